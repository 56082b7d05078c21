//! # Book Catalog
//!
//! A small catalog of books read from a comma-separated text file, each
//! priced in one of a closed set of currencies.
//!
//! - [`price::Price`] carries exact decimal amounts and converts, adds and
//!   compares across currencies through an [`fx::ExchangeRateTable`].
//! - [`data::BookIterator`] streams [`book::Book`] records from storage one
//!   at a time and can be restarted from the first record.
//!
//! ## Example
//!
//! ```rust,no_run
//! use book_catalog::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut books = BookIterator::from_path("catalog.csv");
//!     let mut total = Price::zero(Currency::USD);
//!     while let Some(book) = books.next_book()? {
//!         total = total.add(&book.price())?;
//!     }
//!     println!("{}", total);
//!     Ok(())
//! }
//! ```

pub mod book;
pub mod currency;
pub mod data;
pub mod error;
pub mod fx;
pub mod price;

pub mod prelude {
    //! Commonly used types and traits
    pub use crate::book::{price_of, Book};
    pub use crate::currency::Currency;
    pub use crate::data::{BookIterator, FileSource, InMemorySource, RecordSource};
    pub use crate::error::{CatalogError, Result};
    pub use crate::fx::ExchangeRateTable;
    pub use crate::price::Price;
}
