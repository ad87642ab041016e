use autotariff::cbr::CbrRateProvider;
use autotariff::core::*;
use rust_decimal_macros::dec;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "autotariff=debug".into()),
        )
        .init();

    let engine = TariffEngine::default();
    let provider = CbrRateProvider::new()?.for_config(engine.config());

    let case = ImportCaseBuilder::new(dec!(180000), Powertrain::Gasoline)
        .manufactured(2023, 6, chrono::Local::now().date_naive())
        .displacement_cc(parse_displacement("1.5")?)
        .power(dec!(147))
        .build()?;

    let quote = quote_with(&provider, &engine, &case).await?;

    println!("Rates for {:?}:", quote.rates_date);
    println!("  CNY {}", quote.pricing_rate);
    println!("  EUR {}", quote.reference_rate);
    if quote.rates_degraded {
        println!("  (fallback rates in use)");
    }
    println!("Age: {}\n", quote.age);
    println!("{}", quote.breakdown);
    Ok(())
}
