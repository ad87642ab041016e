use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Vehicle powertrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Powertrain {
    Gasoline,
    Diesel,
    Electric,
}

impl Powertrain {
    pub fn is_electric(&self) -> bool {
        matches!(self, Self::Electric)
    }

    /// Short code used in config files and CLI input.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Gasoline => "gasoline",
            Self::Diesel => "diesel",
            Self::Electric => "electric",
        }
    }

    /// Parse from a short code (case-insensitive). Accepts "petrol" and "ev" as aliases.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "gasoline" | "petrol" => Some(Self::Gasoline),
            "diesel" => Some(Self::Diesel),
            "electric" | "ev" => Some(Self::Electric),
            _ => None,
        }
    }
}

/// Who clears the vehicle through customs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Importer {
    /// Private person.
    #[default]
    Individual,
    /// Company or sole trader.
    Legal,
}

/// Intended use of a vehicle imported by an individual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UseCategory {
    #[default]
    Personal,
    Resale,
}

/// A validated vehicle import request.
///
/// Constructed only through [`ImportCaseBuilder`](super::ImportCaseBuilder);
/// fields are read through accessors so a case cannot change after validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportCase {
    pub(crate) price_foreign: Decimal,
    pub(crate) age_months: u32,
    pub(crate) powertrain: Powertrain,
    pub(crate) displacement_cc: u32,
    pub(crate) power: Decimal,
    pub(crate) importer: Importer,
    pub(crate) use_category: UseCategory,
}

impl ImportCase {
    /// Vehicle price in the pricing currency.
    pub fn price_foreign(&self) -> Decimal {
        self.price_foreign
    }

    pub fn age_months(&self) -> u32 {
        self.age_months
    }

    pub fn powertrain(&self) -> Powertrain {
        self.powertrain
    }

    /// Engine displacement in cm³. Always 0 for electric vehicles.
    pub fn displacement_cc(&self) -> u32 {
        self.displacement_cc
    }

    /// Power as entered: horsepower for combustion engines, kilowatts for electric.
    pub fn power(&self) -> Decimal {
        self.power
    }

    pub fn importer(&self) -> Importer {
        self.importer
    }

    /// Stored use category. Ignored for legal importers, see [`Self::is_personal_use`].
    pub fn use_category(&self) -> UseCategory {
        self.use_category
    }

    /// Individual importing for personal use. Legal importers are always commercial.
    pub fn is_personal_use(&self) -> bool {
        self.importer == Importer::Individual && self.use_category == UseCategory::Personal
    }

    pub fn age(&self) -> VehicleAge {
        VehicleAge::from_months(self.age_months)
    }
}

/// Vehicle age split into whole years and remaining months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleAge {
    pub years: u32,
    pub months: u32,
}

impl VehicleAge {
    pub fn from_months(total: u32) -> Self {
        Self {
            years: total / 12,
            months: total % 12,
        }
    }

    pub fn total_months(&self) -> u32 {
        self.years * 12 + self.months
    }
}

/// The five tariff components plus fixed fees, all in local currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffBreakdown {
    /// Vehicle price converted to local currency.
    pub price_local: Decimal,
    /// Customs duty.
    pub duty: Decimal,
    /// Power-based excise.
    pub excise: Decimal,
    /// VAT on price + duty + excise.
    pub vat: Decimal,
    /// Recycling (disposal) fee.
    pub recycling_fee: Decimal,
    /// Delivery + customs clearance.
    pub flat_fees: Decimal,
    /// Sum of all of the above.
    pub total: Decimal,
}

impl TariffBreakdown {
    /// Duty, excise, VAT and recycling fee: everything paid at the border.
    pub fn customs_payments(&self) -> Decimal {
        self.duty
            .saturating_add(self.excise)
            .saturating_add(self.vat)
            .saturating_add(self.recycling_fee)
    }
}

/// A tariff breakdown together with the normalized inputs used to compute it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub case: ImportCase,
    pub age: VehicleAge,
    /// Horsepower used for excise (converted from kW for electric vehicles).
    pub power_hp: Decimal,
    /// Local units per one unit of the pricing currency.
    pub pricing_rate: Decimal,
    /// Local units per one unit of the reference currency.
    pub reference_rate: Decimal,
    /// Date the rates apply to, if known.
    pub rates_date: Option<NaiveDate>,
    /// True when any rate came from the fallback table.
    pub rates_degraded: bool,
    pub breakdown: TariffBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn powertrain_codes() {
        assert_eq!(Powertrain::from_code("Petrol"), Some(Powertrain::Gasoline));
        assert_eq!(Powertrain::from_code(" diesel "), Some(Powertrain::Diesel));
        assert_eq!(Powertrain::from_code("EV"), Some(Powertrain::Electric));
        assert_eq!(Powertrain::from_code("hybrid"), None);
        for p in [Powertrain::Gasoline, Powertrain::Diesel, Powertrain::Electric] {
            assert_eq!(Powertrain::from_code(p.code()), Some(p));
        }
    }

    #[test]
    fn vehicle_age_split() {
        assert_eq!(VehicleAge::from_months(0), VehicleAge { years: 0, months: 0 });
        assert_eq!(VehicleAge::from_months(38), VehicleAge { years: 3, months: 2 });
        assert_eq!(VehicleAge::from_months(60).total_months(), 60);
    }
}
