//! Exchange rate table
//!
//! Rates are multiplicative factors: `to_amount = from_amount * rate(from, to)`.
//! The table never derives a rate it was not given, so same-currency lookups
//! fail unless registered explicitly; [`crate::price::Price`] short-circuits
//! those before reaching the table.
//!
//! # Example
//! ```
//! use book_catalog::currency::Currency;
//! use book_catalog::fx::ExchangeRateTable;
//! use rust_decimal_macros::dec;
//!
//! let table = ExchangeRateTable::standard();
//! assert_eq!(table.rate(Currency::USD, Currency::EUR).unwrap(), dec!(0.89));
//! ```

use crate::currency::{Currency, CurrencyPair};
use crate::error::{CatalogError, Result};
use hashbrown::HashMap;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::OnceLock;

static STANDARD: OnceLock<ExchangeRateTable> = OnceLock::new();

/// Static (from, to) -> factor lookup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExchangeRateTable {
    rates: HashMap<CurrencyPair, Decimal>,
}

impl ExchangeRateTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            rates: HashMap::new(),
        }
    }

    /// The built-in table, complete for every pair of distinct currencies
    pub fn standard() -> &'static ExchangeRateTable {
        STANDARD.get_or_init(|| {
            let mut rates = HashMap::with_capacity(6);
            for (from, to, rate) in [
                (Currency::USD, Currency::EUR, dec!(0.89)),
                (Currency::USD, Currency::YEN, dec!(109.8)),
                (Currency::EUR, Currency::USD, dec!(1.13)),
                (Currency::EUR, Currency::YEN, dec!(123.6)),
                (Currency::YEN, Currency::USD, dec!(0.0091)),
                (Currency::YEN, Currency::EUR, dec!(0.0081)),
            ] {
                rates.insert(CurrencyPair::new(from, to), rate);
            }
            ExchangeRateTable { rates }
        })
    }

    /// Register (or replace) the factor for `from -> to`
    pub fn add_rate(&mut self, from: Currency, to: Currency, rate: Decimal) -> Result<()> {
        if rate <= Decimal::ZERO {
            return Err(CatalogError::InvalidRate { from, to, rate });
        }

        if let Some(previous) = self.rates.insert(CurrencyPair::new(from, to), rate) {
            log::debug!("Replaced rate {}/{}: {} -> {}", from, to, previous, rate);
        }
        Ok(())
    }

    /// Builder-style variant of [`add_rate`](Self::add_rate)
    pub fn with_rate(mut self, from: Currency, to: Currency, rate: Decimal) -> Result<Self> {
        self.add_rate(from, to, rate)?;
        Ok(self)
    }

    /// Load rates from text
    ///
    /// Expected format: from_currency,to_currency,rate
    /// Blank lines and lines starting with `#` are ignored.
    pub fn load_from_csv(&mut self, csv_data: &str) -> Result<usize> {
        let mut entries = Vec::new();

        for (line_num, line) in csv_data.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split(',').map(|s| s.trim()).collect();
            if parts.len() != 3 {
                return Err(CatalogError::MalformedRecord {
                    line: line_num as u64 + 1,
                    expected: 3,
                    found: parts.len(),
                });
            }

            let from = Currency::from_code(parts[0])?;
            let to = Currency::from_code(parts[1])?;
            let rate = Decimal::from_str_exact(parts[2])
                .map_err(|e| CatalogError::invalid_amount(parts[2], e))?;

            entries.push((from, to, rate));
        }

        // Validate everything before touching the table
        if let Some(&(from, to, rate)) = entries.iter().find(|(_, _, r)| *r <= Decimal::ZERO) {
            return Err(CatalogError::InvalidRate { from, to, rate });
        }

        let count = entries.len();
        for (from, to, rate) in entries {
            self.add_rate(from, to, rate)?;
        }
        log::debug!("Loaded {} exchange rates", count);
        Ok(count)
    }

    /// Look up the factor for `from -> to`
    pub fn rate(&self, from: Currency, to: Currency) -> Result<Decimal> {
        self.rates
            .get(&CurrencyPair::new(from, to))
            .copied()
            .ok_or(CatalogError::UnknownCurrencyPair { from, to })
    }

    /// Check if a rate is registered
    pub fn has_rate(&self, from: Currency, to: Currency) -> bool {
        self.rates.contains_key(&CurrencyPair::new(from, to))
    }

    /// Registered pairs, in no particular order
    pub fn pairs(&self) -> impl Iterator<Item = CurrencyPair> + '_ {
        self.rates.keys().copied()
    }

    /// Number of registered pairs
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_is_complete() {
        let table = ExchangeRateTable::standard();
        for from in Currency::all() {
            for to in Currency::all() {
                if from != to {
                    assert!(table.has_rate(from, to), "missing {}/{}", from, to);
                }
            }
        }
        assert_eq!(table.len(), 6);
    }

    #[test]
    fn test_standard_rates() {
        let table = ExchangeRateTable::standard();
        assert_eq!(table.rate(Currency::USD, Currency::EUR).unwrap(), dec!(0.89));
        assert_eq!(table.rate(Currency::EUR, Currency::YEN).unwrap(), dec!(123.6));
        assert_eq!(table.rate(Currency::YEN, Currency::EUR).unwrap(), dec!(0.0081));
    }

    #[test]
    fn test_identity_pair_is_not_registered() {
        let table = ExchangeRateTable::standard();
        assert!(matches!(
            table.rate(Currency::USD, Currency::USD),
            Err(CatalogError::UnknownCurrencyPair {
                from: Currency::USD,
                to: Currency::USD
            })
        ));
    }

    #[test]
    fn test_add_rate() {
        let mut table = ExchangeRateTable::new();
        assert!(table.is_empty());

        table.add_rate(Currency::EUR, Currency::USD, dec!(1.20)).unwrap();
        assert_eq!(table.rate(Currency::EUR, Currency::USD).unwrap(), dec!(1.20));
        assert!(table.rate(Currency::USD, Currency::EUR).is_err());

        table.add_rate(Currency::EUR, Currency::USD, dec!(1.25)).unwrap();
        assert_eq!(table.rate(Currency::EUR, Currency::USD).unwrap(), dec!(1.25));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_add_non_positive_rate() {
        let mut table = ExchangeRateTable::new();
        assert!(matches!(
            table.add_rate(Currency::EUR, Currency::USD, Decimal::ZERO),
            Err(CatalogError::InvalidRate { .. })
        ));
        assert!(table
            .add_rate(Currency::EUR, Currency::USD, dec!(-1))
            .is_err());
        assert!(table.is_empty());
    }

    #[test]
    fn test_load_from_csv() {
        let data = "# from,to,rate\nUSD,EUR,0.90\n\n eur , usd , 1.10 \n";
        let mut table = ExchangeRateTable::new();

        assert_eq!(table.load_from_csv(data).unwrap(), 2);
        assert_eq!(table.rate(Currency::USD, Currency::EUR).unwrap(), dec!(0.90));
        assert_eq!(table.rate(Currency::EUR, Currency::USD).unwrap(), dec!(1.10));
    }

    #[test]
    fn test_load_from_csv_errors() {
        let mut table = ExchangeRateTable::new();

        assert!(matches!(
            table.load_from_csv("USD,EUR"),
            Err(CatalogError::MalformedRecord { line: 1, expected: 3, found: 2 })
        ));
        assert!(matches!(
            table.load_from_csv("USD,GBP,1.0"),
            Err(CatalogError::InvalidCurrency(_))
        ));
        assert!(matches!(
            table.load_from_csv("USD,EUR,abc"),
            Err(CatalogError::InvalidAmount { .. })
        ));
        assert!(matches!(
            table.load_from_csv("USD,EUR,0.9\nEUR,USD,0"),
            Err(CatalogError::InvalidRate { .. })
        ));
        // Failed loads leave the table untouched
        assert!(table.is_empty());
    }

    #[test]
    fn test_with_rate_builder() {
        let table = ExchangeRateTable::new()
            .with_rate(Currency::USD, Currency::YEN, dec!(150))
            .unwrap();
        assert_eq!(table.pairs().count(), 1);
        assert_eq!(
            table.pairs().next().unwrap(),
            CurrencyPair::new(Currency::USD, Currency::YEN)
        );
    }
}
