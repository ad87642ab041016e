//! Ordered threshold tables shared by every tariff lookup.
//!
//! A table is a list of `(up_to, value)` rows in ascending order plus an
//! `above` value for everything past the last bound. Lookup returns the first
//! row whose `up_to` is greater than or equal to the input, so bounds are
//! inclusive on the upper side and the lower side is exclusive (it is the
//! previous row's bound). Because `above` is mandatory, every input maps to
//! exactly one value.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of a [`BracketTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bracket<T> {
    /// Inclusive upper bound.
    pub up_to: Decimal,
    pub value: T,
}

/// Ascending, first-match bracket table with a catch-all tail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketTable<T> {
    pub bounded: Vec<Bracket<T>>,
    /// Value for inputs strictly greater than the last bound.
    pub above: T,
}

impl<T> BracketTable<T> {
    pub fn new(bounded: Vec<(Decimal, T)>, above: T) -> Self {
        Self {
            bounded: bounded
                .into_iter()
                .map(|(up_to, value)| Bracket { up_to, value })
                .collect(),
            above,
        }
    }

    /// Select the value for `x`.
    pub fn lookup(&self, x: Decimal) -> &T {
        self.bounded
            .iter()
            .find(|b| x <= b.up_to)
            .map(|b| &b.value)
            .unwrap_or(&self.above)
    }

    /// Index of the bracket `x` falls into; `bounded.len()` means `above`.
    pub fn position(&self, x: Decimal) -> usize {
        self.bounded
            .iter()
            .position(|b| x <= b.up_to)
            .unwrap_or(self.bounded.len())
    }

    /// Number of brackets including the tail.
    pub fn bracket_count(&self) -> usize {
        self.bounded.len() + 1
    }

    /// Bounds must be strictly ascending for first-match lookup to be monotonic.
    pub fn is_ascending(&self) -> bool {
        self.bounded.windows(2).all(|w| w[0].up_to < w[1].up_to)
    }

    /// All values in bracket order, tail last.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.bounded
            .iter()
            .map(|b| &b.value)
            .chain(std::iter::once(&self.above))
    }
}
