//! Error types for the book catalog

use crate::currency::Currency;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for catalog operations
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("No exchange rate registered for {from} -> {to}")]
    UnknownCurrencyPair { from: Currency, to: Currency },

    #[error("Invalid currency: '{0}'")]
    InvalidCurrency(String),

    #[error("Invalid amount '{value}': {reason}")]
    InvalidAmount { value: String, reason: String },

    #[error("Malformed record at line {line}: expected {expected} fields, got {found}")]
    MalformedRecord {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Exchange rate for {from} -> {to} must be positive, got {rate}")]
    InvalidRate {
        from: Currency,
        to: Currency,
        rate: Decimal,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CatalogError {
    /// Build an `InvalidAmount` from the offending text and any displayable cause
    pub(crate) fn invalid_amount(value: &str, reason: impl std::fmt::Display) -> Self {
        CatalogError::InvalidAmount {
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// True for errors caused by the content of a record rather than the storage
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            CatalogError::InvalidCurrency(_)
                | CatalogError::InvalidAmount { .. }
                | CatalogError::MalformedRecord { .. }
        )
    }
}

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
