//! # autotariff
//!
//! Landed-cost calculation for vehicles imported into a customs territory:
//! customs duty, excise, VAT and recycling fee, plus fixed delivery and
//! clearance charges.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Every rate and threshold lives in an explicit [`TariffConfig`](core::TariffConfig)
//! so policy changes are data, not code.
//!
//! ## Quick Start
//!
//! ```rust
//! use autotariff::core::*;
//! use rust_decimal_macros::dec;
//!
//! let case = ImportCaseBuilder::new(dec!(150000), Powertrain::Gasoline)
//!     .age_months(20)
//!     .displacement_cc(2000)
//!     .power(dec!(150))
//!     .build()
//!     .unwrap();
//! let rates = RateTable::new(None)
//!     .with_rate("CNY", dec!(11.0)).unwrap()
//!     .with_rate("EUR", dec!(90.0)).unwrap();
//!
//! let quote = TariffEngine::default().calculate(&case, &rates).unwrap();
//! assert_eq!(quote.breakdown.duty, dec!(990000));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Import cases, tariff tables, engine, rate tables |
//! | `cbr` | Central bank daily XML rate client |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "cbr")]
pub mod cbr;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
