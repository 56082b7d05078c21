//! Monetary values with exact multi-currency arithmetic
//!
//! A [`Price`] is an immutable, non-negative decimal amount tagged with a
//! [`Currency`]. Cross-currency operations always express the right-hand
//! operand in the left-hand operand's currency before doing anything else:
//!
//! - `convert` returns the amount unchanged when the target is the price's own
//!   currency, otherwise `amount * rate(currency, target)`.
//! - `add` keeps the left operand's currency.
//! - `equals` compares the left amount against the converted right amount.
//!
//! Every operation has a `*_with` variant taking an explicit
//! [`ExchangeRateTable`]; the plain forms use [`ExchangeRateTable::standard`].
//!
//! `Price` deliberately does not implement `PartialEq`: conversion-based
//! equality is not symmetric (100 USD equals 89 EUR, but 89 EUR converts to
//! 100.57 USD), so it cannot honour the trait's contract.

use crate::currency::Currency;
use crate::error::{CatalogError, Result};
use crate::fx::ExchangeRateTable;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// An amount of money in a single currency
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Price {
    amount: Decimal,
    currency: Currency,
}

impl Price {
    /// Create a price, rejecting negative amounts
    pub fn new(amount: Decimal, currency: Currency) -> Result<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(CatalogError::invalid_amount(
                &amount.to_string(),
                "amount must not be negative",
            ));
        }
        Ok(Self { amount, currency })
    }

    /// Parse a price from raw text fields
    pub fn parse(amount: &str, currency: &str) -> Result<Self> {
        let currency = Currency::from_code(currency)?;
        Self::new(parse_amount(amount)?, currency)
    }

    /// Caller guarantees `amount` is non-negative
    pub(crate) fn from_validated(amount: Decimal, currency: Currency) -> Self {
        debug_assert!(!amount.is_sign_negative() || amount.is_zero());
        Self { amount, currency }
    }

    /// Zero in the given currency
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Amount expressed in `target`, using the standard rate table
    pub fn convert(&self, target: Currency) -> Result<Decimal> {
        self.convert_with(ExchangeRateTable::standard(), target)
    }

    /// Amount expressed in `target`, using `rates`
    pub fn convert_with(&self, rates: &ExchangeRateTable, target: Currency) -> Result<Decimal> {
        if target == self.currency {
            return Ok(self.amount);
        }

        let rate = rates.rate(self.currency, target)?;
        let converted = self
            .amount
            .checked_mul(rate)
            .filter(|product| is_exact_product(self.amount, rate, *product))
            .ok_or_else(|| {
                CatalogError::invalid_amount(
                    &self.amount.to_string(),
                    format!(
                        "{} -> {} at {} is not exactly representable",
                        self.currency, target, rate
                    ),
                )
            })?;
        Ok(converted)
    }

    /// Sum of both prices, in this price's currency
    pub fn add(&self, other: &Price) -> Result<Price> {
        self.add_with(ExchangeRateTable::standard(), other)
    }

    pub fn add_with(&self, rates: &ExchangeRateTable, other: &Price) -> Result<Price> {
        let converted = other.convert_with(rates, self.currency)?;
        let amount = self
            .amount
            .checked_add(converted)
            .filter(|sum| is_exact_sum(self.amount, converted, *sum))
            .ok_or_else(|| {
                CatalogError::invalid_amount(
                    &self.amount.to_string(),
                    "sum is not exactly representable",
                )
            })?;

        Ok(Price {
            amount,
            currency: self.currency,
        })
    }

    /// Whether `other`, converted into this price's currency, has the same amount
    pub fn equals(&self, other: &Price) -> Result<bool> {
        self.equals_with(ExchangeRateTable::standard(), other)
    }

    pub fn equals_with(&self, rates: &ExchangeRateTable, other: &Price) -> Result<bool> {
        Ok(self.amount == other.convert_with(rates, self.currency)?)
    }

    pub fn not_equals(&self, other: &Price) -> Result<bool> {
        self.equals(other).map(|eq| !eq)
    }

    pub fn not_equals_with(&self, rates: &ExchangeRateTable, other: &Price) -> Result<bool> {
        self.equals_with(rates, other).map(|eq| !eq)
    }

    /// Sum any number of prices into `currency`
    pub fn total<'a, I>(rates: &ExchangeRateTable, prices: I, currency: Currency) -> Result<Price>
    where
        I: IntoIterator<Item = &'a Price>,
    {
        prices
            .into_iter()
            .try_fold(Price::zero(currency), |acc, price| acc.add_with(rates, price))
    }
}

/// Conversion-based equality of two prices; see [`Price::equals`]
pub fn equals(a: &Price, b: &Price) -> Result<bool> {
    a.equals(b)
}

/// Parse a decimal amount field, rejecting input that would need rounding
pub(crate) fn parse_amount(raw: &str) -> Result<Decimal> {
    let raw = raw.trim();
    Decimal::from_str_exact(raw).map_err(|e| CatalogError::invalid_amount(raw, e))
}

/// Number of times `p` divides `n`; `n` must be non-zero
fn multiplicity(mut n: u128, p: u128) -> u32 {
    let mut count = 0;
    while n % p == 0 {
        n /= p;
        count += 1;
    }
    count
}

/// Whether `product` is `a * b` with no digits rounded away
///
/// The exact product has scale `a.scale() + b.scale()`. When the library had
/// to drop `k` of those digits, the result is still exact iff the product of
/// the mantissas is divisible by `10^k`.
fn is_exact_product(a: Decimal, b: Decimal, product: Decimal) -> bool {
    let exact_scale = a.scale() + b.scale();
    if product.scale() >= exact_scale || a.is_zero() || b.is_zero() {
        return true;
    }

    let dropped = exact_scale - product.scale();
    let (ma, mb) = (a.mantissa().unsigned_abs(), b.mantissa().unsigned_abs());
    multiplicity(ma, 2) + multiplicity(mb, 2) >= dropped
        && multiplicity(ma, 5) + multiplicity(mb, 5) >= dropped
}

/// Whether `value` can be written with at most `scale` fractional digits
fn fits_scale(value: Decimal, scale: u32) -> bool {
    if value.scale() <= scale {
        return true;
    }
    let dropped = value.scale() - scale;
    value.mantissa().unsigned_abs() % 10u128.pow(dropped) == 0
}

/// Whether `sum` is `a + b` with no digits rounded away
fn is_exact_sum(a: Decimal, b: Decimal, sum: Decimal) -> bool {
    fits_scale(a, sum.scale()) && fits_scale(b, sum.scale())
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency, self.amount)
    }
}
