use autotariff::core::*;
use rust_decimal_macros::dec;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let engine = TariffEngine::default();
    let rates = RateTable::fallback();

    println!("=== Landed cost at fallback rates ===\n");
    for (code, rate) in rates.iter() {
        println!("  1 {code} = {rate}");
    }

    let scenarios = [
        (
            "Gasoline 2.0 l, 20 months, individual, personal use",
            ImportCaseBuilder::new(dec!(150000), Powertrain::Gasoline)
                .age_months(20)
                .displacement_cc(parse_displacement("2.0").unwrap_or(2000))
                .power(dec!(150)),
        ),
        (
            "Same vehicle, legal entity",
            ImportCaseBuilder::new(dec!(150000), Powertrain::Gasoline)
                .age_months(20)
                .displacement_cc(2000)
                .power(dec!(150))
                .importer(Importer::Legal),
        ),
        (
            "Diesel 3.5 l, 6 years, individual, resale",
            ImportCaseBuilder::new(dec!(90000), Powertrain::Diesel)
                .age_months(72)
                .displacement_cc(3500)
                .power(dec!(249))
                .use_category(UseCategory::Resale),
        ),
        (
            "Electric 120 kW, 20 months, individual, personal use",
            ImportCaseBuilder::new(dec!(150000), Powertrain::Electric)
                .age_months(20)
                .power(dec!(120)),
        ),
    ];

    for (label, builder) in scenarios {
        println!("\n--- {label} ---");
        let quote = match builder.build() {
            Ok(case) => engine.calculate(&case, &rates),
            Err(e) => Err(e),
        };
        match quote {
            Ok(q) => {
                println!("  Age:   {}", q.age);
                println!("  Power: {:.1} hp", q.power_hp);
                for line in q.breakdown.to_string().lines() {
                    println!("  {line}");
                }
            }
            Err(e) => println!("  ERROR: {e}"),
        }
    }

    // Invalid input is rejected before any calculation
    println!("\n--- Missing displacement ---");
    match ImportCaseBuilder::new(dec!(50000), Powertrain::Gasoline)
        .age_months(10)
        .build()
    {
        Ok(_) => println!("  unexpectedly accepted"),
        Err(e) => println!("  {e}"),
    }
}
