use thiserror::Error;

/// Errors that can occur while building an import case or computing a tariff.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TariffError {
    /// One or more input fields are malformed or out of range.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Builder is missing a required input.
    #[error("builder error: {0}")]
    Builder(String),

    /// Tariff tables are inconsistent.
    #[error("config error: {0}")]
    Config(String),

    /// Exchange rate missing or not positive.
    #[error("rate error: {0}")]
    Rate(String),

    /// User-entered text could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// An amount does not fit in a `Decimal`.
    #[error("amount out of range: {0}")]
    Overflow(String),
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "duty.new_by_price").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Join a list of validation errors into a single [`TariffError::Validation`].
pub(crate) fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
