//! HTTP client for the daily rates feed.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::time::Duration;

use super::parse::parse_cbr_xml;
use crate::core::{RateProvider, RateTable, TariffConfig};

/// Daily rates endpoint. Takes a `date_req=DD/MM/YYYY` query parameter.
pub const CBR_DAILY_URL: &str = "https://www.cbr.ru/scripts/XML_daily.asp";

/// Request timeout; a slower response falls back immediately.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Error from the rates feed. Recovered inside [`CbrRateProvider::fetch_for`].
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum RateError {
    /// Connection, TLS or timeout failure.
    Network(String),
    /// Non-success HTTP status.
    Http(String),
    /// The body is not a rates document.
    Parse(String),
}

impl fmt::Display for RateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(e) => write!(f, "rate feed network error: {e}"),
            Self::Http(e) => write!(f, "rate feed HTTP error: {e}"),
            Self::Parse(e) => write!(f, "rate feed parse error: {e}"),
        }
    }
}

impl std::error::Error for RateError {}

/// Fetches the currencies a tariff needs, substituting fallback rates for
/// anything the feed cannot supply.
///
/// Holds only a `reqwest::Client`, which is cheap to clone and safe to share
/// between concurrent calculations.
#[derive(Debug, Clone)]
pub struct CbrRateProvider {
    client: reqwest::Client,
    url: String,
    currencies: Vec<String>,
}

impl CbrRateProvider {
    /// Provider for the live endpoint requesting CNY and EUR.
    pub fn new() -> Result<Self, RateError> {
        Self::with_url(CBR_DAILY_URL, DEFAULT_TIMEOUT)
    }

    /// Provider for a custom endpoint (mirrors, tests).
    pub fn with_url(url: impl Into<String>, timeout: Duration) -> Result<Self, RateError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RateError::Network(e.to_string()))?;
        let defaults = TariffConfig::default();
        Ok(Self {
            client,
            url: url.into(),
            currencies: vec![defaults.pricing_currency, defaults.reference_currency],
        })
    }

    /// Request exactly the currencies `config` prices in.
    pub fn for_config(mut self, config: &TariffConfig) -> Self {
        self.currencies = vec![
            config.pricing_currency.clone(),
            config.reference_currency.clone(),
        ];
        self
    }

    /// Replace the requested currency list.
    pub fn currencies(mut self, codes: &[&str]) -> Self {
        self.currencies = codes.iter().map(|c| c.to_uppercase()).collect();
        self
    }

    pub fn requested(&self) -> &[String] {
        &self.currencies
    }

    /// Fetch and parse the feed for `date` without any fallback.
    ///
    /// # Errors
    ///
    /// Returns `RateError::Network` on connection issues or timeout,
    /// `RateError::Http` on a non-success status,
    /// `RateError::Parse` if the body is not a rates document.
    pub async fn try_fetch_for(
        &self,
        date: NaiveDate,
    ) -> Result<BTreeMap<String, Decimal>, RateError> {
        let url = format!("{}?date_req={}", self.url, date.format("%d/%m/%Y"));
        tracing::debug!(%url, "requesting exchange rates");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RateError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RateError::Http(format!("HTTP {status}")));
        }

        // windows-1251 payload; only ASCII fields are read.
        let body = resp
            .bytes()
            .await
            .map_err(|e| RateError::Network(e.to_string()))?;
        let rates = parse_cbr_xml(&String::from_utf8_lossy(&body))?;
        tracing::debug!(records = rates.len(), "parsed exchange rates");
        Ok(rates)
    }

    /// Rates for `date`. Never fails: each requested currency the feed
    /// cannot supply is taken from the fallback table and logged.
    pub async fn fetch_for(&self, date: NaiveDate) -> RateTable {
        let mut table = RateTable::new(Some(date));

        let live = match self.try_fetch_for(date).await {
            Ok(live) => live,
            Err(e) => {
                tracing::warn!(error = %e, "exchange rates unavailable, using fallback table");
                BTreeMap::new()
            }
        };

        for code in &self.currencies {
            match live.get(code) {
                Some(rate) => {
                    if let Err(e) = table.insert(code.as_str(), *rate) {
                        substitute(&mut table, code, &e.to_string());
                    }
                }
                None => substitute(&mut table, code, "missing from feed"),
            }
        }

        table
    }
}

fn substitute(table: &mut RateTable, code: &str, cause: &str) {
    match RateTable::fallback_rate(code) {
        Some(rate) => {
            tracing::warn!(currency = code, %rate, cause, "using fallback exchange rate");
            if let Err(e) = table.substitute(code, rate) {
                tracing::warn!(currency = code, error = %e, "fallback rate rejected");
            }
        }
        None => tracing::warn!(currency = code, cause, "no fallback exchange rate"),
    }
}

impl RateProvider for CbrRateProvider {
    fn fetch(&self) -> impl Future<Output = RateTable> + Send {
        let today = chrono::Local::now().date_naive();
        self.fetch_for(today)
    }
}
