//! Daily exchange rates from the central bank's XML feed.
//!
//! The feed lists `Valute` records, each with a currency code, a nominal
//! (lot size) and a value using `,` as the decimal separator. The rate per
//! unit is value / nominal.
//!
//! # Example
//!
//! ```ignore
//! use autotariff::cbr::CbrRateProvider;
//! use autotariff::core::*;
//!
//! let provider = CbrRateProvider::new()?;
//! let rates = provider.fetch().await; // never fails, falls back on error
//! let quote = TariffEngine::default().calculate(&case, &rates)?;
//! ```

mod client;
mod parse;

pub use client::{CBR_DAILY_URL, CbrRateProvider, DEFAULT_TIMEOUT, RateError};
pub use parse::parse_cbr_xml;
