//! Raw record sources
//!
//! A [`RecordSource`] hands out cursors; each cursor is an open handle that
//! yields one [`RawRecord`] per call and is closed when dropped. Fields are
//! split on commas with no quoting or escaping and trimmed of surrounding
//! whitespace. Every line is a record, so a blank line is a one-field record
//! that fails the arity check; a final newline does not start another line.

use crate::book::Book;
use crate::error::{CatalogError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Number of fields in a catalog record
pub const RECORD_FIELDS: usize = 4;

/// One line of the backing store, already split and trimmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based line number in the backing store
    pub line: u64,
    pub fields: Vec<String>,
}

impl RawRecord {
    pub fn new(line: u64, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    /// Split a raw line on commas and trim every field
    pub fn from_line(line: u64, raw: &str) -> Self {
        Self {
            line,
            fields: raw.split(',').map(|f| f.trim().to_string()).collect(),
        }
    }

    /// Build a book from the positional fields `title, authors, amount, currency`
    pub fn to_book(&self) -> Result<Book> {
        match self.fields.as_slice() {
            [title, authors, amount, currency] => {
                Book::from_fields(title, authors, amount, currency)
            }
            fields => Err(CatalogError::MalformedRecord {
                line: self.line,
                expected: RECORD_FIELDS,
                found: fields.len(),
            }),
        }
    }
}

/// Something that can be opened for reading raw records
pub trait RecordSource {
    type Cursor: RecordCursor;

    /// Open a fresh handle positioned at the first record
    fn open(&self) -> Result<Self::Cursor>;

    /// Human-readable name for log messages
    fn describe(&self) -> String;
}

/// An open handle on a record source
pub trait RecordCursor {
    /// Read the next record, or `None` once the source is exhausted
    fn read_next(&mut self) -> Result<Option<RawRecord>>;
}

/// Comma-separated text file on disk, read one line at a time
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Does not touch the file system
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for FileSource {
    type Cursor = FileCursor;

    fn open(&self) -> Result<FileCursor> {
        let file = File::open(&self.path)?;

        Ok(FileCursor {
            reader: BufReader::new(file),
            buf: String::new(),
            line: 0,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Open file handle; the file is closed when this is dropped
#[derive(Debug)]
pub struct FileCursor {
    reader: BufReader<File>,
    buf: String,
    line: u64,
}

impl RecordCursor for FileCursor {
    fn read_next(&mut self) -> Result<Option<RawRecord>> {
        self.buf.clear();
        if self.reader.read_line(&mut self.buf)? == 0 {
            return Ok(None);
        }

        self.line += 1;
        Ok(Some(RawRecord::from_line(self.line, &self.buf)))
    }
}

/// Lines held in memory, shared between cursors
#[derive(Debug, Clone)]
pub struct InMemorySource {
    lines: Arc<[String]>,
}

impl InMemorySource {
    pub fn new<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(|line| -> String { line.into() }).collect(),
        }
    }

    /// Split a block of text into lines
    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines())
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl RecordSource for InMemorySource {
    type Cursor = InMemoryCursor;

    fn open(&self) -> Result<InMemoryCursor> {
        Ok(InMemoryCursor {
            lines: Arc::clone(&self.lines),
            position: 0,
        })
    }

    fn describe(&self) -> String {
        format!("<in-memory: {} lines>", self.lines.len())
    }
}

#[derive(Debug)]
pub struct InMemoryCursor {
    lines: Arc<[String]>,
    position: usize,
}

impl RecordCursor for InMemoryCursor {
    fn read_next(&mut self) -> Result<Option<RawRecord>> {
        let Some(raw) = self.lines.get(self.position) else {
            return Ok(None);
        };

        self.position += 1;
        Ok(Some(RawRecord::from_line(self.position as u64, raw)))
    }
}
