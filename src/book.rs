//! Catalog records

use crate::currency::Currency;
use crate::error::Result;
use crate::price::{self, Price};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// One catalog entry
///
/// The currency is validated when the book is built, so every `Book` in hand
/// carries a known currency and a non-negative amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    title: String,
    authors: String,
    price_amount: Decimal,
    price_currency: Currency,
}

impl Book {
    /// Build a book from typed fields
    pub fn new(
        title: impl Into<String>,
        authors: impl Into<String>,
        price_amount: Decimal,
        price_currency: Currency,
    ) -> Result<Self> {
        // Same non-negativity check as a standalone price
        Price::new(price_amount, price_currency)?;

        Ok(Self {
            title: title.into(),
            authors: authors.into(),
            price_amount,
            price_currency,
        })
    }

    /// Build a book from the four raw text fields of a record
    pub fn from_fields(title: &str, authors: &str, amount: &str, currency: &str) -> Result<Self> {
        let price_amount = price::parse_amount(amount)?;
        let price_currency = Currency::from_code(currency)?;
        Self::new(title.trim(), authors.trim(), price_amount, price_currency)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn authors(&self) -> &str {
        &self.authors
    }

    pub fn price_amount(&self) -> Decimal {
        self.price_amount
    }

    pub fn price_currency(&self) -> Currency {
        self.price_currency
    }

    /// A fresh `Price` for this book; nothing is cached between calls
    pub fn price(&self) -> Price {
        price_of(self)
    }
}

/// Build the `Price` view of a book
pub fn price_of(book: &Book) -> Price {
    Price::from_validated(book.price_amount, book.price_currency)
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (by {}) - {}${}",
            self.title, self.authors, self.price_currency, self.price_amount
        )
    }
}
