//! Lazy, restartable stream of books
//!
//! A [`BookIterator`] owns a [`RecordSource`] and at most one open cursor on
//! it. Nothing is read at construction; the source is opened on the first
//! call to [`BookIterator::start_iteration`] or [`BookIterator::next_book`].
//!
//! ```text
//! Unstarted --start/next--> Iterating --end of input / I/O error--> Exhausted
//!     ^                        |   ^                                    |
//!     +------------------------+   +------------ start_iteration -------+
//! ```
//!
//! The cursor (and with it the file handle) is released on restart, on
//! exhaustion, on a storage error, and when the iterator is dropped. A record
//! that fails to parse is reported as an error and the cursor stays past it,
//! so the caller may keep pulling.
//!
//! # Example
//! ```
//! use book_catalog::data::{BookIterator, InMemorySource};
//!
//! let source = InMemorySource::new(["Dune,Frank Herbert,10.99,USD"]);
//! let mut books = BookIterator::new(source);
//!
//! let dune = books.next_book().unwrap().unwrap();
//! assert_eq!(dune.title(), "Dune");
//! assert!(books.next_book().unwrap().is_none());
//!
//! books.start_iteration().unwrap();
//! assert_eq!(books.next_book().unwrap().unwrap(), dune);
//! ```

use super::source::{FileSource, RecordCursor, RecordSource};
use crate::book::Book;
use crate::error::Result;
use std::path::Path;

/// Observable iteration state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationState {
    Unstarted,
    Iterating,
    Exhausted,
}

enum State<C> {
    Unstarted,
    Iterating(C),
    Exhausted,
}

/// Forward-only, restartable sequence of [`Book`] pulled from a record source
pub struct BookIterator<S: RecordSource> {
    source: S,
    state: State<S::Cursor>,
    records_read: u64,
}

impl BookIterator<FileSource> {
    /// Iterate the catalog file at `path`; the file is not opened yet
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self::new(FileSource::new(path))
    }
}

impl<S: RecordSource> BookIterator<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: State::Unstarted,
            records_read: 0,
        }
    }

    /// (Re)open the source and position at the first record
    pub fn start_iteration(&mut self) -> Result<()> {
        let restarting = !matches!(self.state, State::Unstarted);

        // Release any previous handle before reopening
        self.state = State::Unstarted;
        self.records_read = 0;

        let cursor = self.source.open()?;
        if restarting {
            log::debug!("Restarted iteration over {}", self.source.describe());
        } else {
            log::debug!("Opened {}", self.source.describe());
        }
        self.state = State::Iterating(cursor);
        Ok(())
    }

    /// Pull the next book, or `None` at end of sequence
    pub fn next_book(&mut self) -> Result<Option<Book>> {
        loop {
            match &mut self.state {
                State::Unstarted => self.start_iteration()?,
                State::Exhausted => return Ok(None),
                State::Iterating(cursor) => {
                    let record = match cursor.read_next() {
                        Ok(Some(record)) => record,
                        Ok(None) => {
                            self.finish();
                            return Ok(None);
                        }
                        Err(e) => {
                            log::warn!("Read from {} failed: {}", self.source.describe(), e);
                            self.finish();
                            return Err(e);
                        }
                    };

                    self.records_read += 1;
                    return match record.to_book() {
                        Ok(book) => Ok(Some(book)),
                        Err(e) => {
                            log::warn!("Rejected record at line {}: {}", record.line, e);
                            Err(e)
                        }
                    };
                }
            }
        }
    }

    /// Records pulled since the last (re)start, including rejected ones
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    pub fn state(&self) -> IterationState {
        match self.state {
            State::Unstarted => IterationState::Unstarted,
            State::Iterating(_) => IterationState::Iterating,
            State::Exhausted => IterationState::Exhausted,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn finish(&mut self) {
        log::debug!(
            "Finished {} after {} records",
            self.source.describe(),
            self.records_read
        );
        self.state = State::Exhausted;
    }
}

impl<S: RecordSource> Iterator for BookIterator<S> {
    type Item = Result<Book>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_book().transpose()
    }
}
