//! Tariff policy tables.
//!
//! Every rate, threshold and fee the engine uses lives in [`TariffConfig`].
//! The [`Default`] impl is one policy snapshot; deployments replace it by
//! loading JSON with [`TariffConfig::from_json`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::brackets::BracketTable;
use super::error::{TariffError, join_errors};
use super::validation::validate_config;

/// Complete set of tariff rules for one customs territory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffConfig {
    /// Currency vehicle prices are quoted in (ISO 4217).
    pub pricing_currency: String,
    /// Unit of account for displacement-based duty (ISO 4217).
    pub reference_currency: String,
    /// Vehicles up to and including this age count as new.
    pub new_vehicle_max_age_months: u32,
    /// Upper age bound of the middle duty tier; older vehicles use the old tier.
    pub mid_age_max_months: u32,
    /// Horsepower per kilowatt.
    pub kw_to_hp: Decimal,
    pub duty: DutyTables,
    pub excise: ExciseTables,
    /// VAT rate as a fraction (0.20 = 20%).
    pub vat_rate: Decimal,
    pub recycling: RecyclingTables,
    pub flat_fees: FlatFees,
}

/// Customs duty rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DutyTables {
    /// Share of local price charged on electric vehicles.
    pub electric_rate: Decimal,
    /// Share of local price charged on combustion vehicles imported commercially.
    pub commercial_rate: Decimal,
    /// New personal-use vehicles, keyed on price in reference currency.
    pub new_by_price: BracketTable<PriceDutyRate>,
    /// Mid-age personal-use vehicles: reference currency per cm³, keyed on displacement.
    pub mid_age_per_cc: BracketTable<Decimal>,
    /// Old personal-use vehicles: reference currency per cm³, keyed on displacement.
    pub old_per_cc: BracketTable<Decimal>,
}

/// Combined ad-valorem / specific duty rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceDutyRate {
    /// Share of local price.
    pub percent: Decimal,
    /// Minimum duty in reference currency per cm³.
    pub min_per_cc: Decimal,
}

/// Excise rates in local currency per horsepower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExciseTables {
    /// Flat rate for combustion vehicles (legal importers only).
    pub ice_rate_per_hp: Decimal,
    /// Electric vehicles, keyed on horsepower.
    pub electric_by_power: BracketTable<Decimal>,
}

/// Recycling fee amounts in local currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecyclingTables {
    /// Largest displacement eligible for the personal flat fee.
    pub personal_max_cc: u32,
    pub personal_new: Decimal,
    pub personal_old: Decimal,
    pub electric: ElectricRecycling,
    /// Multiplied by [`Self::coefficients`] for every other combustion case.
    pub base_commercial_fee: Decimal,
    /// Keyed on displacement.
    pub coefficients: BracketTable<AgeCoefficient>,
}

/// Electric vehicles pay a flat fee per track and age tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElectricRecycling {
    pub personal_new: Decimal,
    pub personal_old: Decimal,
    pub commercial_new: Decimal,
    pub commercial_old: Decimal,
}

/// Recycling coefficient pair for new and old vehicles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeCoefficient {
    pub new: Decimal,
    pub old: Decimal,
}

/// Fixed charges added to every quote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlatFees {
    pub delivery: Decimal,
    pub customs_clearance: Decimal,
}

impl FlatFees {
    /// `None` if the sum does not fit in a `Decimal`.
    pub fn total(&self) -> Option<Decimal> {
        self.delivery.checked_add(self.customs_clearance)
    }
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            pricing_currency: "CNY".into(),
            reference_currency: "EUR".into(),
            new_vehicle_max_age_months: 36,
            mid_age_max_months: 60,
            kw_to_hp: dec!(1.35962),
            duty: DutyTables::default(),
            excise: ExciseTables::default(),
            vat_rate: dec!(0.20),
            recycling: RecyclingTables::default(),
            flat_fees: FlatFees {
                delivery: dec!(220_000),
                customs_clearance: dec!(100_000),
            },
        }
    }
}

impl Default for DutyTables {
    fn default() -> Self {
        let rate = |percent, min_per_cc| PriceDutyRate {
            percent,
            min_per_cc,
        };
        Self {
            electric_rate: dec!(0.15),
            commercial_rate: dec!(0.20),
            new_by_price: BracketTable::new(
                vec![
                    (dec!(8500), rate(dec!(0.54), dec!(2.5))),
                    (dec!(16700), rate(dec!(0.48), dec!(3.5))),
                    (dec!(42250), rate(dec!(0.48), dec!(5.5))),
                    (dec!(84500), rate(dec!(0.48), dec!(7.5))),
                    (dec!(169000), rate(dec!(0.48), dec!(15))),
                ],
                rate(dec!(0.48), dec!(20)),
            ),
            mid_age_per_cc: BracketTable::new(
                vec![
                    (dec!(1000), dec!(1.5)),
                    (dec!(1500), dec!(1.7)),
                    (dec!(1800), dec!(2.5)),
                    (dec!(2300), dec!(2.7)),
                    (dec!(3000), dec!(3.0)),
                ],
                dec!(3.6),
            ),
            old_per_cc: BracketTable::new(
                vec![
                    (dec!(1000), dec!(3.0)),
                    (dec!(1500), dec!(3.2)),
                    (dec!(1800), dec!(3.5)),
                    (dec!(2300), dec!(4.8)),
                    (dec!(3000), dec!(5.0)),
                ],
                dec!(5.7),
            ),
        }
    }
}

impl Default for ExciseTables {
    fn default() -> Self {
        Self {
            ice_rate_per_hp: dec!(61),
            electric_by_power: BracketTable::new(
                vec![
                    (dec!(90), dec!(0)),
                    (dec!(150), dec!(61)),
                    (dec!(200), dec!(583)),
                    (dec!(300), dec!(955)),
                    (dec!(400), dec!(1628)),
                    (dec!(500), dec!(1685)),
                ],
                dec!(1740),
            ),
        }
    }
}

impl Default for RecyclingTables {
    fn default() -> Self {
        let coef = |new, old| AgeCoefficient { new, old };
        Self {
            personal_max_cc: 3000,
            personal_new: dec!(3400),
            personal_old: dec!(5200),
            electric: ElectricRecycling {
                personal_new: dec!(3400),
                personal_old: dec!(5200),
                commercial_new: dec!(667_400),
                commercial_old: dec!(1_174_000),
            },
            base_commercial_fee: dec!(150_000),
            coefficients: BracketTable::new(
                vec![
                    (dec!(1000), coef(dec!(1.42), dec!(5.3))),
                    (dec!(2000), coef(dec!(2.21), dec!(8.26))),
                    (dec!(3000), coef(dec!(4.22), dec!(16.12))),
                    (dec!(3500), coef(dec!(5.73), dec!(28.5))),
                ],
                coef(dec!(9.08), dec!(35.01)),
            ),
        }
    }
}

impl TariffConfig {
    /// Load a config from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, TariffError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| TariffError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, TariffError> {
        serde_json::to_string_pretty(self).map_err(|e| TariffError::Config(e.to_string()))
    }

    /// Check table ordering, rate signs and thresholds.
    pub fn validate(&self) -> Result<(), TariffError> {
        let errors = validate_config(self);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(TariffError::Config(join_errors(&errors)))
        }
    }
}
