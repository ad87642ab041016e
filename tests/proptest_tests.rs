//! Property-based tests for the tariff engine and bracket tables.
//!
//! Run with: `cargo test --test proptest_tests`

use autotariff::core::*;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ── Proptest Strategies ─────────────────────────────────────────────────────

/// Generate a price (0.01 to 9 999 999.99).
fn arb_price() -> impl Strategy<Value = Decimal> {
    (1u64..1_000_000_000u64).prop_map(|cents| Decimal::new(cents as i64, 2))
}

/// Generate a positive rate (0.0001 to 999.9999).
fn arb_rate() -> impl Strategy<Value = Decimal> {
    (1u64..10_000_000u64).prop_map(|v| Decimal::new(v as i64, 4))
}

fn arb_powertrain() -> impl Strategy<Value = Powertrain> {
    prop_oneof![
        Just(Powertrain::Gasoline),
        Just(Powertrain::Diesel),
        Just(Powertrain::Electric),
    ]
}

fn arb_importer() -> impl Strategy<Value = Importer> {
    prop_oneof![Just(Importer::Individual), Just(Importer::Legal)]
}

fn arb_use() -> impl Strategy<Value = UseCategory> {
    prop_oneof![Just(UseCategory::Personal), Just(UseCategory::Resale)]
}

/// Generate a valid import case.
fn arb_case() -> impl Strategy<Value = ImportCase> {
    (
        arb_price(),
        arb_powertrain(),
        0u32..=400,
        1u32..=10_000,
        0u32..=1_500,
        arb_importer(),
        arb_use(),
    )
        .prop_map(|(price, powertrain, age, cc, power, importer, use_category)| {
            ImportCaseBuilder::new(price, powertrain)
                .age_months(age)
                .displacement_cc(cc)
                .power(Decimal::from(power))
                .importer(importer)
                .use_category(use_category)
                .build()
                .unwrap()
        })
}

fn arb_rates() -> impl Strategy<Value = RateTable> {
    (arb_rate(), arb_rate()).prop_map(|(cny, eur)| {
        RateTable::new(None)
            .with_rate("CNY", cny)
            .unwrap()
            .with_rate("EUR", eur)
            .unwrap()
    })
}

/// Any non-negative `Decimal`, from zero up to `Decimal::MAX`, at any scale.
fn arb_any_decimal() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        Just(Decimal::MAX),
        (any::<u32>(), any::<u32>(), any::<u32>(), 0u32..=28)
            .prop_map(|(lo, mid, hi, scale)| Decimal::from_parts(lo, mid, hi, false, scale)),
    ]
}

fn arb_any_positive() -> impl Strategy<Value = Decimal> {
    arb_any_decimal().prop_map(|d| if d.is_zero() { Decimal::ONE } else { d })
}

/// Any case the builder accepts, without the realistic caps of `arb_case`.
fn arb_extreme_case() -> impl Strategy<Value = ImportCase> {
    (
        arb_any_positive(),
        arb_powertrain(),
        any::<u32>(),
        1u32..=u32::MAX,
        arb_any_decimal(),
        arb_importer(),
        arb_use(),
    )
        .prop_map(|(price, powertrain, age, cc, power, importer, use_category)| {
            ImportCaseBuilder::new(price, powertrain)
                .age_months(age)
                .displacement_cc(cc)
                .power(power)
                .importer(importer)
                .use_category(use_category)
                .build()
                .unwrap()
        })
}

fn arb_extreme_rates() -> impl Strategy<Value = RateTable> {
    (arb_any_positive(), arb_any_positive()).prop_map(|(cny, eur)| {
        RateTable::new(None)
            .with_rate("CNY", cny)
            .unwrap()
            .with_rate("EUR", eur)
            .unwrap()
    })
}

// ── Property Tests ──────────────────────────────────────────────────────────

proptest! {
    /// Every component is non-negative and the total covers the price.
    #[test]
    fn components_non_negative(case in arb_case(), rates in arb_rates()) {
        let b = TariffEngine::default().calculate(&case, &rates).unwrap().breakdown;
        prop_assert!(b.duty >= Decimal::ZERO);
        prop_assert!(b.excise >= Decimal::ZERO);
        prop_assert!(b.vat >= Decimal::ZERO);
        prop_assert!(b.recycling_fee >= Decimal::ZERO);
        prop_assert!(b.flat_fees >= Decimal::ZERO);
        prop_assert!(b.total > b.price_local);
    }

    /// Total is exactly the sum of its parts.
    #[test]
    fn total_is_sum(case in arb_case(), rates in arb_rates()) {
        let b = TariffEngine::default().calculate(&case, &rates).unwrap().breakdown;
        prop_assert_eq!(
            b.total,
            b.price_local + b.duty + b.excise + b.vat + b.recycling_fee + b.flat_fees
        );
    }

    /// Electric duty is always 15% of the local price.
    #[test]
    fn electric_duty_is_flat(case in arb_case(), rates in arb_rates()) {
        prop_assume!(case.powertrain() == Powertrain::Electric);
        let b = TariffEngine::default().calculate(&case, &rates).unwrap().breakdown;
        prop_assert_eq!(b.duty, b.price_local * dec!(0.15));
    }

    /// Individuals never pay excise on combustion vehicles.
    #[test]
    fn individual_ice_no_excise(case in arb_case(), rates in arb_rates()) {
        prop_assume!(!case.powertrain().is_electric());
        prop_assume!(case.importer() == Importer::Individual);
        let b = TariffEngine::default().calculate(&case, &rates).unwrap().breakdown;
        prop_assert_eq!(b.excise, Decimal::ZERO);
    }

    /// VAT is zero exactly for combustion vehicles imported by individuals.
    #[test]
    fn vat_zero_iff_individual_ice(case in arb_case(), rates in arb_rates()) {
        let b = TariffEngine::default().calculate(&case, &rates).unwrap().breakdown;
        let exempt = !case.powertrain().is_electric() && case.importer() == Importer::Individual;
        prop_assert_eq!(b.vat.is_zero(), exempt);
    }

    /// Same inputs, same output.
    #[test]
    fn calculation_is_deterministic(case in arb_case(), rates in arb_rates()) {
        let engine = TariffEngine::default();
        let a = engine.calculate(&case, &rates).unwrap();
        let b = engine.calculate(&case, &rates).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Non-positive prices never build.
    #[test]
    fn non_positive_price_rejected(cents in -1_000_000i64..=0) {
        let result = ImportCaseBuilder::new(Decimal::new(cents, 2), Powertrain::Gasoline)
            .age_months(12)
            .displacement_cc(1600)
            .build();
        prop_assert!(matches!(result, Err(TariffError::Validation(_))));
    }

    /// Extreme but valid inputs either compute or report an overflow.
    #[test]
    fn extreme_inputs_never_panic(case in arb_extreme_case(), rates in arb_extreme_rates()) {
        match TariffEngine::default().calculate(&case, &rates) {
            Ok(q) => {
                let b = q.breakdown;
                prop_assert_eq!(
                    b.total,
                    b.price_local + b.duty + b.excise + b.vat + b.recycling_fee + b.flat_fees
                );
            }
            Err(e) => prop_assert!(matches!(e, TariffError::Overflow(_)), "unexpected {e}"),
        }
    }

    /// Text parsers reject out-of-range numbers instead of panicking.
    #[test]
    fn numeric_text_never_panics(s in "[-+]?[0-9]{0,40}([.,][0-9]{0,40})?") {
        let _ = parse_amount(&s);
        let _ = parse_displacement(&s);
    }

    /// Any year and month yields an age or an error.
    #[test]
    fn any_manufacture_date_never_panics(year in any::<i32>(), month in any::<u32>()) {
        let today = chrono::NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        if age_in_months(year, month, today).is_ok() {
            prop_assert!(year <= 2026);
            prop_assert!((1..=12).contains(&month));
        }
    }

    /// Displacement parsing: liters and cm³ agree.
    #[test]
    fn liters_match_cc(cc in 1u32..=9_999) {
        let liters = format!("{}.{:03}", cc / 1000, cc % 1000);
        prop_assert_eq!(parse_displacement(&liters).unwrap(), cc);
        prop_assert_eq!(parse_displacement(&cc.to_string()).unwrap(), cc);
    }
}

// ── Bracket sweeps ──────────────────────────────────────────────────────────

fn assert_exhaustive_and_monotonic<T>(name: &str, table: &BracketTable<T>) {
    let mut last = 0;
    for cc in (0..=10_000u32).step_by(5) {
        let idx = table.position(Decimal::from(cc));
        assert!(idx < table.bracket_count(), "{name}: no bracket for {cc}");
        assert!(idx >= last, "{name}: bracket decreased at {cc}");
        last = idx;
    }
    assert_eq!(last, table.bracket_count() - 1, "{name}: tail never reached");
}

/// Each displacement table maps every input in 0..=10 000 to exactly one
/// bracket, and the bracket index never decreases.
#[test]
fn displacement_tables_are_exhaustive_and_monotonic() {
    let config = TariffConfig::default();
    assert_exhaustive_and_monotonic("mid_age_per_cc", &config.duty.mid_age_per_cc);
    assert_exhaustive_and_monotonic("old_per_cc", &config.duty.old_per_cc);
    assert_exhaustive_and_monotonic("coefficients", &config.recycling.coefficients);
}

#[test]
fn every_age_maps_to_one_tier() {
    let engine = TariffEngine::default();
    let mut last = AgeTier::New;
    for age in 0..=400u32 {
        let tier = engine.age_tier(age);
        let expected = match age {
            0..=36 => AgeTier::New,
            37..=60 => AgeTier::MidAge,
            _ => AgeTier::Old,
        };
        assert_eq!(tier, expected, "age {age}");
        assert!(
            !(last == AgeTier::Old && tier != AgeTier::Old),
            "tier went backwards at {age}"
        );
        last = tier;
    }
}

#[test]
fn duty_defined_for_every_displacement_and_age() {
    let engine = TariffEngine::default();
    let rates = RateTable::new(None)
        .with_rate("CNY", dec!(11))
        .unwrap()
        .with_rate("EUR", dec!(90))
        .unwrap();
    for cc in (1..=10_000u32).step_by(97) {
        for age in (0..=400u32).step_by(7) {
            let case = ImportCaseBuilder::new(dec!(20000), Powertrain::Gasoline)
                .age_months(age)
                .displacement_cc(cc)
                .build()
                .unwrap();
            let b = engine.calculate(&case, &rates).unwrap().breakdown;
            assert!(b.duty > Decimal::ZERO, "cc={cc} age={age}");
            assert!(b.recycling_fee > Decimal::ZERO, "cc={cc} age={age}");
        }
    }
}

#[test]
fn power_brackets_are_monotonic() {
    let table = TariffConfig::default().excise.electric_by_power;
    let mut last_rate = Decimal::ZERO;
    for hp in 0..=1_000u32 {
        let rate = *table.lookup(Decimal::from(hp));
        assert!(rate >= last_rate, "rate dropped at {hp} hp");
        last_rate = rate;
    }
    assert_eq!(*table.lookup(dec!(90)), Decimal::ZERO);
    assert_eq!(*table.lookup(dec!(90.01)), dec!(61));
}
