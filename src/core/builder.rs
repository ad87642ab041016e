use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::{TariffError, join_errors};
use super::input::age_in_months;
use super::types::*;
use super::validation;

/// Builder for constructing validated import cases.
///
/// ```
/// use autotariff::core::*;
/// use rust_decimal_macros::dec;
///
/// let case = ImportCaseBuilder::new(dec!(150000), Powertrain::Gasoline)
///     .age_months(20)
///     .displacement_cc(2000)
///     .power(dec!(150))
///     .build()
///     .unwrap();
/// assert!(case.is_personal_use());
/// ```
pub struct ImportCaseBuilder {
    price_foreign: Decimal,
    powertrain: Powertrain,
    age_months: Option<u32>,
    manufactured: Option<(i32, u32, NaiveDate)>,
    displacement_cc: u32,
    power: Decimal,
    importer: Importer,
    use_category: UseCategory,
}

impl ImportCaseBuilder {
    pub fn new(price_foreign: Decimal, powertrain: Powertrain) -> Self {
        Self {
            price_foreign,
            powertrain,
            age_months: None,
            manufactured: None,
            displacement_cc: 0,
            power: Decimal::ZERO,
            importer: Importer::Individual,
            use_category: UseCategory::Personal,
        }
    }

    pub fn age_months(mut self, months: u32) -> Self {
        self.age_months = Some(months);
        self.manufactured = None;
        self
    }

    /// Derive the age from a manufacture year and month relative to `today`.
    pub fn manufactured(mut self, year: i32, month: u32, today: NaiveDate) -> Self {
        self.manufactured = Some((year, month, today));
        self.age_months = None;
        self
    }

    pub fn displacement_cc(mut self, cc: u32) -> Self {
        self.displacement_cc = cc;
        self
    }

    /// Horsepower for combustion engines, kilowatts for electric.
    pub fn power(mut self, power: Decimal) -> Self {
        self.power = power;
        self
    }

    pub fn importer(mut self, importer: Importer) -> Self {
        self.importer = importer;
        self
    }

    pub fn use_category(mut self, category: UseCategory) -> Self {
        self.use_category = category;
        self
    }

    /// Build the case, running validation.
    /// Returns all validation errors (not just the first).
    pub fn build(self) -> Result<ImportCase, TariffError> {
        let age_months = match (self.age_months, self.manufactured) {
            (Some(months), _) => months,
            (None, Some((year, month, today))) => age_in_months(year, month, today)?,
            (None, None) => {
                return Err(TariffError::Builder(
                    "vehicle age or manufacture date is required".into(),
                ));
            }
        };

        let displacement_cc = if self.powertrain.is_electric() {
            if self.displacement_cc != 0 {
                tracing::debug!(
                    cc = self.displacement_cc,
                    "ignoring displacement for electric vehicle"
                );
            }
            0
        } else {
            self.displacement_cc
        };

        let case = ImportCase {
            price_foreign: self.price_foreign,
            age_months,
            powertrain: self.powertrain,
            displacement_cc,
            power: self.power,
            importer: self.importer,
            use_category: self.use_category,
        };

        let errors = validation::validate_import_case(&case);
        if !errors.is_empty() {
            return Err(TariffError::Validation(join_errors(&errors)));
        }

        Ok(case)
    }
}
