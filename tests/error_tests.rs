//! Tests for error creation and message formatting

use book_catalog::currency::Currency;
use book_catalog::error::CatalogError;
use rust_decimal_macros::dec;

#[test]
fn test_unknown_currency_pair() {
    let err = CatalogError::UnknownCurrencyPair {
        from: Currency::USD,
        to: Currency::YEN,
    };

    let msg = err.to_string();
    assert!(msg.contains("USD -> YEN"));
    assert!(!err.is_data_error());
}

#[test]
fn test_invalid_currency() {
    let err = CatalogError::InvalidCurrency("GBP".to_string());
    assert_eq!(err.to_string(), "Invalid currency: 'GBP'");
    assert!(err.is_data_error());
}

#[test]
fn test_invalid_amount() {
    let err = CatalogError::InvalidAmount {
        value: "ten".to_string(),
        reason: "not a number".to_string(),
    };
    assert_eq!(err.to_string(), "Invalid amount 'ten': not a number");
    assert!(err.is_data_error());
}

#[test]
fn test_malformed_record() {
    let err = CatalogError::MalformedRecord {
        line: 12,
        expected: 4,
        found: 2,
    };

    let msg = err.to_string();
    assert!(msg.contains("line 12"));
    assert!(msg.contains("expected 4"));
    assert!(msg.contains("got 2"));
    assert!(err.is_data_error());
}

#[test]
fn test_invalid_rate() {
    let err = CatalogError::InvalidRate {
        from: Currency::EUR,
        to: Currency::USD,
        rate: dec!(-1.5),
    };
    assert!(err.to_string().contains("-1.5"));
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "catalog.csv");
    let err: CatalogError = io.into();

    assert!(matches!(err, CatalogError::IoError(_)));
    assert!(err.to_string().starts_with("IO error"));
    assert!(!err.is_data_error());
}
