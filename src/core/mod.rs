//! Core tariff types, validation, configuration and the calculation engine.
//!
//! This module is pure: given an [`ImportCase`], a [`RateTable`] and a
//! [`TariffConfig`], [`TariffEngine::calculate`] always yields the same
//! [`TariffBreakdown`].

pub mod brackets;
mod builder;
mod config;
mod engine;
mod error;
mod format;
pub mod input;
mod rates;
mod types;
mod validation;

pub use brackets::{Bracket, BracketTable};
pub use builder::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use format::format_amount;
pub use input::{age_in_months, parse_amount, parse_displacement};
pub use rates::*;
pub use types::*;
pub use validation::*;
