use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::brackets::BracketTable;
use super::config::TariffConfig;
use super::error::ValidationError;
use super::types::*;

/// Validate an import case before any monetary step runs.
/// Returns all validation errors found (not just the first).
pub fn validate_import_case(case: &ImportCase) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if case.price_foreign <= Decimal::ZERO {
        errors.push(ValidationError::new(
            "price_foreign",
            format!("price must be greater than zero, got {}", case.price_foreign),
        ));
    }

    if !case.powertrain.is_electric() && case.displacement_cc == 0 {
        errors.push(ValidationError::new(
            "displacement_cc",
            format!(
                "displacement is required for {} engines",
                case.powertrain.code()
            ),
        ));
    }

    if case.powertrain.is_electric() && case.displacement_cc != 0 {
        errors.push(ValidationError::new(
            "displacement_cc",
            "electric vehicles have no displacement",
        ));
    }

    if case.power < Decimal::ZERO {
        errors.push(ValidationError::new(
            "power",
            format!("power must not be negative, got {}", case.power),
        ));
    }

    errors
}

/// Validate tariff tables for internal consistency.
/// Returns all validation errors found (not just the first).
pub fn validate_config(config: &TariffConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (field, code) in [
        ("pricing_currency", &config.pricing_currency),
        ("reference_currency", &config.reference_currency),
    ] {
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            errors.push(ValidationError::new(
                field,
                format!("'{code}' is not a 3-letter ISO 4217 code"),
            ));
        }
    }

    if config.new_vehicle_max_age_months > config.mid_age_max_months {
        errors.push(ValidationError::new(
            "new_vehicle_max_age_months",
            format!(
                "new vehicle threshold {} exceeds mid-age threshold {}",
                config.new_vehicle_max_age_months, config.mid_age_max_months
            ),
        ));
    }

    if config.kw_to_hp <= Decimal::ZERO {
        errors.push(ValidationError::new(
            "kw_to_hp",
            "conversion factor must be positive",
        ));
    }

    if config.vat_rate < Decimal::ZERO || config.vat_rate > dec!(1) {
        errors.push(ValidationError::new(
            "vat_rate",
            format!("{} is outside 0..=1", config.vat_rate),
        ));
    }

    // Duty
    let duty = &config.duty;
    check_non_negative(&mut errors, "duty.electric_rate", duty.electric_rate);
    check_non_negative(&mut errors, "duty.commercial_rate", duty.commercial_rate);
    check_table(&mut errors, "duty.new_by_price", &duty.new_by_price, |r| {
        [r.percent, r.min_per_cc]
    });
    check_table(&mut errors, "duty.mid_age_per_cc", &duty.mid_age_per_cc, |r| [*r]);
    check_table(&mut errors, "duty.old_per_cc", &duty.old_per_cc, |r| [*r]);

    // Excise
    let excise = &config.excise;
    check_non_negative(&mut errors, "excise.ice_rate_per_hp", excise.ice_rate_per_hp);
    check_table(
        &mut errors,
        "excise.electric_by_power",
        &excise.electric_by_power,
        |r| [*r],
    );

    // Recycling
    let rec = &config.recycling;
    check_non_negative(&mut errors, "recycling.personal_new", rec.personal_new);
    check_non_negative(&mut errors, "recycling.personal_old", rec.personal_old);
    check_non_negative(
        &mut errors,
        "recycling.base_commercial_fee",
        rec.base_commercial_fee,
    );
    for (field, value) in [
        ("recycling.electric.personal_new", rec.electric.personal_new),
        ("recycling.electric.personal_old", rec.electric.personal_old),
        ("recycling.electric.commercial_new", rec.electric.commercial_new),
        ("recycling.electric.commercial_old", rec.electric.commercial_old),
    ] {
        check_non_negative(&mut errors, field, value);
    }
    check_table(&mut errors, "recycling.coefficients", &rec.coefficients, |c| {
        [c.new, c.old]
    });

    check_non_negative(&mut errors, "flat_fees.delivery", config.flat_fees.delivery);
    check_non_negative(
        &mut errors,
        "flat_fees.customs_clearance",
        config.flat_fees.customs_clearance,
    );

    errors
}

fn check_non_negative(errors: &mut Vec<ValidationError>, field: &str, value: Decimal) {
    if value < Decimal::ZERO {
        errors.push(ValidationError::new(
            field,
            format!("must not be negative, got {value}"),
        ));
    }
}

fn check_table<T, const N: usize>(
    errors: &mut Vec<ValidationError>,
    field: &str,
    table: &BracketTable<T>,
    amounts: impl Fn(&T) -> [Decimal; N],
) {
    if !table.is_ascending() {
        errors.push(ValidationError::new(
            field,
            "bracket bounds must be strictly ascending",
        ));
    }
    if table.values().flat_map(&amounts).any(|v| v < Decimal::ZERO) {
        errors.push(ValidationError::new(
            field,
            "bracket values must not be negative",
        ));
    }
}
