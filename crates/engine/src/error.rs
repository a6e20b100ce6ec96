//! Errors raised by the engine.
//!
//! - [`InvalidDate`] when a calendar computation falls outside chrono's range.
//! - [`UnsupportedCurrency`] when a currency code is unknown.
//! - [`Csv`] / [`Io`] when writing an export fails.
//!
//!  [`InvalidDate`]: EngineError::InvalidDate
//!  [`UnsupportedCurrency`]: EngineError::UnsupportedCurrency
//!  [`Csv`]: EngineError::Csv
//!  [`Io`]: EngineError::Io
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidDate(a), Self::InvalidDate(b)) => a == b,
            (Self::UnsupportedCurrency(a), Self::UnsupportedCurrency(b)) => a == b,
            (Self::Csv(a), Self::Csv(b)) => a.to_string() == b.to_string(),
            (Self::Io(a), Self::Io(b)) => a.kind() == b.kind(),
            _ => false,
        }
    }
}
