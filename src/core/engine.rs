//! The tariff pipeline: currency normalization, duty, excise, VAT,
//! recycling fee and total.
//!
//! Every step is a pure function of the [`ImportCase`], the exchange rates
//! and the [`TariffConfig`] the engine was built with.

use rust_decimal::Decimal;

use super::config::TariffConfig;
use super::error::TariffError;
use super::rates::RateTable;
use super::types::*;

/// Age tier used by duty and recycling rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeTier {
    /// Up to and including the new-vehicle threshold.
    New,
    /// Above the new threshold, up to and including the mid-age threshold.
    MidAge,
    Old,
}

/// Stateless tariff calculator over an immutable [`TariffConfig`].
#[derive(Debug, Clone, Default)]
pub struct TariffEngine {
    config: TariffConfig,
}

impl TariffEngine {
    /// Create an engine, rejecting inconsistent tariff tables.
    pub fn new(config: TariffConfig) -> Result<Self, TariffError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TariffConfig {
        &self.config
    }

    /// Compute the full breakdown for `case` at the given rates.
    ///
    /// # Errors
    ///
    /// Returns [`TariffError::Rate`] if `rates` lacks the pricing or
    /// reference currency, and [`TariffError::Overflow`] if an amount leaves
    /// the range of [`Decimal`].
    pub fn calculate(&self, case: &ImportCase, rates: &RateTable) -> Result<Quote, TariffError> {
        let pricing_rate = rates.require(&self.config.pricing_currency)?;
        let reference_rate = rates.require(&self.config.reference_currency)?;

        let price_local = mul(case.price_foreign(), pricing_rate, "local price")?;
        let duty = self.duty(case, price_local, reference_rate)?;
        let excise = self.excise(case)?;
        let vat = self.vat(case, sum(&[price_local, duty, excise], "VAT base")?)?;
        let recycling_fee = self.recycling_fee(case)?;
        let flat_fees = self
            .config
            .flat_fees
            .total()
            .ok_or_else(|| overflow("flat fees"))?;
        let total = sum(
            &[price_local, duty, excise, vat, recycling_fee, flat_fees],
            "total",
        )?;

        tracing::debug!(
            powertrain = case.powertrain().code(),
            age_months = case.age_months(),
            %price_local,
            %total,
            "tariff calculated"
        );

        Ok(Quote {
            case: case.clone(),
            age: case.age(),
            power_hp: self.power_hp(case)?,
            pricing_rate,
            reference_rate,
            rates_date: rates.date(),
            rates_degraded: rates.is_degraded(),
            breakdown: TariffBreakdown {
                price_local,
                duty,
                excise,
                vat,
                recycling_fee,
                flat_fees,
                total,
            },
        })
    }

    pub fn age_tier(&self, age_months: u32) -> AgeTier {
        if age_months <= self.config.new_vehicle_max_age_months {
            AgeTier::New
        } else if age_months <= self.config.mid_age_max_months {
            AgeTier::MidAge
        } else {
            AgeTier::Old
        }
    }

    /// Horsepower used for excise. Electric power is entered in kW.
    pub fn power_hp(&self, case: &ImportCase) -> Result<Decimal, TariffError> {
        if case.powertrain().is_electric() {
            mul(case.power(), self.config.kw_to_hp, "horsepower")
        } else {
            Ok(case.power())
        }
    }

    /// Customs duty in local currency.
    ///
    /// # Panics
    ///
    /// If `reference_rate` is not positive. [`RateTable`] never stores such a rate.
    pub fn duty(
        &self,
        case: &ImportCase,
        price_local: Decimal,
        reference_rate: Decimal,
    ) -> Result<Decimal, TariffError> {
        assert!(
            reference_rate > Decimal::ZERO,
            "reference rate must be positive, got {reference_rate}"
        );
        let duty = &self.config.duty;

        if case.powertrain().is_electric() {
            return mul(price_local, duty.electric_rate, "duty");
        }
        if !case.is_personal_use() {
            return mul(price_local, duty.commercial_rate, "duty");
        }

        let cc = Decimal::from(case.displacement_cc());
        let per_cc = match self.age_tier(case.age_months()) {
            AgeTier::New => {
                let price_ref = price_local
                    .checked_div(reference_rate)
                    .ok_or_else(|| overflow("reference price"))?;
                let rate = duty.new_by_price.lookup(price_ref);
                let ad_valorem = mul(price_local, rate.percent, "duty")?;
                let specific = mul(mul(rate.min_per_cc, reference_rate, "duty")?, cc, "duty")?;
                return Ok(ad_valorem.max(specific));
            }
            AgeTier::MidAge => *duty.mid_age_per_cc.lookup(cc),
            AgeTier::Old => *duty.old_per_cc.lookup(cc),
        };
        mul(mul(per_cc, reference_rate, "duty")?, cc, "duty")
    }

    /// Excise in local currency. Combustion vehicles pay only when imported
    /// by a legal entity; electric vehicles always pay by power bracket.
    pub fn excise(&self, case: &ImportCase) -> Result<Decimal, TariffError> {
        let excise = &self.config.excise;
        let hp = self.power_hp(case)?;
        if case.powertrain().is_electric() {
            mul(hp, *excise.electric_by_power.lookup(hp), "excise")
        } else if case.importer() == Importer::Legal {
            mul(hp, excise.ice_rate_per_hp, "excise")
        } else {
            Ok(Decimal::ZERO)
        }
    }

    /// VAT on `base` (price + duty + excise). Individuals importing a
    /// combustion vehicle are exempt.
    pub fn vat(&self, case: &ImportCase, base: Decimal) -> Result<Decimal, TariffError> {
        if case.powertrain().is_electric() || case.importer() == Importer::Legal {
            mul(base, self.config.vat_rate, "VAT")
        } else {
            Ok(Decimal::ZERO)
        }
    }

    /// Recycling fee in local currency.
    pub fn recycling_fee(&self, case: &ImportCase) -> Result<Decimal, TariffError> {
        let rec = &self.config.recycling;
        let is_new = self.age_tier(case.age_months()) == AgeTier::New;

        if case.powertrain().is_electric() {
            let ev = &rec.electric;
            return Ok(match (case.is_personal_use(), is_new) {
                (true, true) => ev.personal_new,
                (true, false) => ev.personal_old,
                (false, true) => ev.commercial_new,
                (false, false) => ev.commercial_old,
            });
        }

        if case.is_personal_use() && case.displacement_cc() <= rec.personal_max_cc {
            return Ok(if is_new {
                rec.personal_new
            } else {
                rec.personal_old
            });
        }

        let coef = rec
            .coefficients
            .lookup(Decimal::from(case.displacement_cc()));
        let factor = if is_new { coef.new } else { coef.old };
        mul(rec.base_commercial_fee, factor, "recycling fee")
    }
}

fn overflow(what: &str) -> TariffError {
    TariffError::Overflow(format!("{what} exceeds the decimal range"))
}

fn mul(a: Decimal, b: Decimal, what: &str) -> Result<Decimal, TariffError> {
    a.checked_mul(b).ok_or_else(|| overflow(what))
}

fn sum(parts: &[Decimal], what: &str) -> Result<Decimal, TariffError> {
    parts.iter().try_fold(Decimal::ZERO, |acc, p| {
        acc.checked_add(*p).ok_or_else(|| overflow(what))
    })
}
