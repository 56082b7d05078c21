//! Catalog storage access
//!
//! - **source**: raw record sources (comma-separated files, in-memory lines)
//! - **book_iterator**: lazy, restartable stream of [`crate::book::Book`]

pub mod book_iterator;
pub mod source;

pub use book_iterator::{BookIterator, IterationState};
pub use source::{FileSource, InMemorySource, RawRecord, RecordCursor, RecordSource};
