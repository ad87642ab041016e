#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = autotariff::core::parse_amount(s);
        if let Ok(cc) = autotariff::core::parse_displacement(s) {
            // Anything that parses must build a case without panicking.
            let _ = autotariff::core::ImportCaseBuilder::new(
                rust_decimal::Decimal::ONE,
                autotariff::core::Powertrain::Diesel,
            )
            .age_months(12)
            .displacement_cc(cc)
            .build();
        }
    }
});
