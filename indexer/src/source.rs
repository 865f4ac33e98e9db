//! Event sources.
//!
//! The indexer does not subscribe to a chain itself. Whatever decodes the
//! governor's logs (a node client, a log archive, a test fixture) only has
//! to yield [`EventEnvelope`]s in block order through [`EventSource`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use stele_events::EventEnvelope;

use crate::IndexerError;

pub trait EventSource {
    /// The next event, or `None` once the source is exhausted.
    fn next_event(&mut self) -> Result<Option<EventEnvelope>, IndexerError>;
}

impl EventSource for std::vec::IntoIter<EventEnvelope> {
    fn next_event(&mut self) -> Result<Option<EventEnvelope>, IndexerError> {
        Ok(self.next())
    }
}

/// Newline-delimited JSON, one [`EventEnvelope`] per line. Blank lines are
/// skipped.
pub struct JsonLinesSource<R> {
    reader: R,
    line: usize,
    buf: String,
}

impl JsonLinesSource<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, IndexerError> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }

    /// 1-based number of the last line read.
    pub fn line(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> EventSource for JsonLinesSource<R> {
    fn next_event(&mut self) -> Result<Option<EventEnvelope>, IndexerError> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let trimmed = self.buf.trim();
            if trimmed.is_empty() {
                continue;
            }
            return serde_json::from_str(trimmed)
                .map(Some)
                .map_err(|source| IndexerError::Decode {
                    line: self.line,
                    source,
                });
        }
    }
}
