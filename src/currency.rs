//! Currency codes and currency pairs

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of currencies a catalog price may be quoted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Currency {
    /// US Dollar
    USD,
    /// Euro
    EUR,
    /// Japanese Yen
    YEN,
}

impl Currency {
    /// Get the currency code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::YEN => "YEN",
        }
    }

    /// Get currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::YEN => "¥",
        }
    }

    /// Parse from a currency code, ignoring case and surrounding whitespace
    pub fn from_code(code: &str) -> Result<Self> {
        match code.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "YEN" => Ok(Currency::YEN),
            _ => Err(CatalogError::InvalidCurrency(code.to_string())),
        }
    }

    /// Get all supported currencies
    pub fn all() -> [Currency; 3] {
        [Currency::USD, Currency::EUR, Currency::YEN]
    }
}

impl FromStr for Currency {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        Currency::from_code(s)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Ordered (source, target) pair used as an exchange-rate key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurrencyPair {
    pub from: Currency,
    pub to: Currency,
}

impl CurrencyPair {
    /// Create new currency pair
    pub fn new(from: Currency, to: Currency) -> Self {
        Self { from, to }
    }

    /// Get the inverse pair
    pub fn inverse(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }

    /// Whether both sides are the same currency
    pub fn is_identity(&self) -> bool {
        self.from == self.to
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_code() {
        assert_eq!(Currency::USD.code(), "USD");
        assert_eq!(Currency::EUR.code(), "EUR");
        assert_eq!(Currency::YEN.code(), "YEN");
    }

    #[test]
    fn test_currency_symbol() {
        assert_eq!(Currency::USD.symbol(), "$");
        assert_eq!(Currency::EUR.symbol(), "€");
        assert_eq!(Currency::YEN.symbol(), "¥");
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("USD").unwrap(), Currency::USD);
        assert_eq!(Currency::from_code("eur").unwrap(), Currency::EUR);
        assert_eq!(Currency::from_code(" YEN ").unwrap(), Currency::YEN);
        assert!(matches!(
            Currency::from_code("GBP"),
            Err(CatalogError::InvalidCurrency(code)) if code == "GBP"
        ));
    }

    #[test]
    fn test_currency_parse_trait() {
        let c: Currency = "usd".parse().unwrap();
        assert_eq!(c, Currency::USD);
        assert!("".parse::<Currency>().is_err());
    }

    #[test]
    fn test_currency_display() {
        assert_eq!(format!("{}", Currency::USD), "USD");
        assert_eq!(Currency::YEN.to_string(), "YEN");
    }

    #[test]
    fn test_currency_pair() {
        let pair = CurrencyPair::new(Currency::EUR, Currency::USD);
        assert_eq!(pair.from, Currency::EUR);
        assert_eq!(pair.to, Currency::USD);
        assert_eq!(format!("{}", pair), "EUR/USD");
        assert!(!pair.is_identity());
        assert!(CurrencyPair::new(Currency::YEN, Currency::YEN).is_identity());
    }

    #[test]
    fn test_currency_pair_inverse() {
        let inverse = CurrencyPair::new(Currency::EUR, Currency::USD).inverse();
        assert_eq!(inverse.from, Currency::USD);
        assert_eq!(inverse.to, Currency::EUR);
    }

    #[test]
    fn test_all_currencies() {
        let currencies = Currency::all();
        assert_eq!(currencies.len(), 3);
        assert!(currencies.contains(&Currency::USD));
        assert!(currencies.contains(&Currency::YEN));
    }
}
