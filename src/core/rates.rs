//! Exchange-rate tables and the provider seam.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;

use super::engine::TariffEngine;
use super::error::TariffError;
use super::types::{ImportCase, Quote};

/// Rates substituted when the live source is unavailable
/// (local units per one foreign unit).
pub const FALLBACK_RATES: &[(&str, Decimal)] = &[
    ("CNY", dec!(11.0)),
    ("EUR", dec!(90.0)),
    ("USD", dec!(80.0)),
];

/// Local currency units per one unit of each foreign currency.
///
/// Every stored rate is strictly positive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    date: Option<NaiveDate>,
    rates: BTreeMap<String, Decimal>,
    substituted: BTreeSet<String>,
}

impl RateTable {
    pub fn new(date: Option<NaiveDate>) -> Self {
        Self {
            date,
            ..Self::default()
        }
    }

    /// The full fallback table, every entry marked as substituted.
    pub fn fallback() -> Self {
        let mut table = Self::new(None);
        for (code, rate) in FALLBACK_RATES {
            table.rates.insert((*code).to_string(), *rate);
            table.substituted.insert((*code).to_string());
        }
        table
    }

    /// Fallback rate for a single currency, if one is configured.
    pub fn fallback_rate(code: &str) -> Option<Decimal> {
        FALLBACK_RATES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, rate)| *rate)
    }

    /// Insert a live rate. Rejects non-positive rates and malformed codes.
    pub fn insert(&mut self, code: impl Into<String>, rate: Decimal) -> Result<(), TariffError> {
        let code = code.into();
        check_rate(&code, rate)?;
        self.substituted.remove(&code);
        self.rates.insert(code, rate);
        Ok(())
    }

    /// Insert a rate from the fallback table, marking the table as degraded.
    pub fn substitute(&mut self, code: impl Into<String>, rate: Decimal) -> Result<(), TariffError> {
        let code = code.into();
        check_rate(&code, rate)?;
        self.substituted.insert(code.clone());
        self.rates.insert(code, rate);
        Ok(())
    }

    pub fn with_rate(mut self, code: &str, rate: Decimal) -> Result<Self, TariffError> {
        self.insert(code, rate)?;
        Ok(self)
    }

    pub fn rate(&self, code: &str) -> Option<Decimal> {
        self.rates.get(code).copied()
    }

    /// Like [`Self::rate`] but a missing currency is an error.
    pub fn require(&self, code: &str) -> Result<Decimal, TariffError> {
        self.rate(code)
            .ok_or_else(|| TariffError::Rate(format!("no exchange rate for {code}")))
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(code)
    }

    /// Currencies whose rate came from the fallback table.
    pub fn substituted(&self) -> impl Iterator<Item = &str> {
        self.substituted.iter().map(String::as_str)
    }

    pub fn is_degraded(&self) -> bool {
        !self.substituted.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.rates.iter().map(|(c, r)| (c.as_str(), *r))
    }
}

fn check_rate(code: &str, rate: Decimal) -> Result<(), TariffError> {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(TariffError::Rate(format!(
            "'{code}' is not a 3-letter ISO 4217 code"
        )));
    }
    if rate <= Decimal::ZERO {
        return Err(TariffError::Rate(format!(
            "rate for {code} must be positive, got {rate}"
        )));
    }
    Ok(())
}

/// Source of exchange rates. Implementations must never fail: on any error
/// they return a table with fallback rates substituted.
pub trait RateProvider {
    fn fetch(&self) -> impl Future<Output = RateTable> + Send;
}

/// A provider that always returns the same table.
#[derive(Debug, Clone)]
pub struct StaticRates(pub RateTable);

impl RateProvider for StaticRates {
    fn fetch(&self) -> impl Future<Output = RateTable> + Send {
        let table = self.0.clone();
        async move { table }
    }
}

/// Fetch rates from `provider` and run the engine on `case`.
pub async fn quote_with<P: RateProvider>(
    provider: &P,
    engine: &TariffEngine,
    case: &ImportCase,
) -> Result<Quote, TariffError> {
    let rates = provider.fetch().await;
    engine.calculate(case, &rates)
}
