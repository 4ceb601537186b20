//! Decode session orchestration
//!
//! This module ties the pieces together: it reads the header from a
//! [`LineSource`], resolves the [`ColumnMapping`] once, and then pulls data
//! lines one at a time through splitting, width checking and coercion.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use super::column_mapping::ColumnMapping;
use super::header::HeaderRow;
use super::line_splitter::split_line;
use super::record_parser::coerce_row;
use super::stats::DecodeStats;
use crate::config::DecoderConfig;
use crate::models::{FieldValues, Row};
use crate::schema::{FieldDeclaration, Record, Schema, validate_declarations};
use crate::{Error, Result};

/// Source of raw input lines
///
/// `Ok(None)` signals end of input. Line terminators are stripped by the
/// source, never by the decoder.
pub trait LineSource {
    fn next_line(&mut self) -> io::Result<Option<Vec<u8>>>;
}

impl<B: BufRead> LineSource for B {
    fn next_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut line = Vec::new();
        if self.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }

        if line.last() == Some(&b'\n') {
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

/// Destination for decoded records
pub trait RecordSink<R> {
    fn append(&mut self, record: R);
}

impl<R> RecordSink<R> for Vec<R> {
    fn append(&mut self, record: R) {
        self.push(record);
    }
}

/// CSV decoder for statically declared record types
///
/// The configuration is fixed at construction. Each call that takes a line
/// source runs an independent session with its own column mapping.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    /// Create a decoder with a validated configuration
    pub fn new(config: DecoderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Start a session that streams records of type `R`
    ///
    /// The header is read and the mapping resolved before this returns, so
    /// an unresolvable column fails here without producing any record.
    pub fn records<R: Record, L: LineSource>(&self, source: L) -> Result<Records<R, L>> {
        let session = Session::open(&self.config, source, &R::declarations())?;
        Ok(Records {
            session,
            _record: PhantomData,
        })
    }

    /// Decode every record into a sink
    ///
    /// Records are appended as they decode. On error, the records of earlier
    /// lines stay in the sink and the failing line contributes nothing.
    pub fn decode_into<R, L, S>(&self, source: L, sink: &mut S) -> Result<DecodeStats>
    where
        R: Record,
        L: LineSource,
        S: RecordSink<R>,
    {
        let mut records = self.records::<R, L>(source)?;
        for record in records.by_ref() {
            sink.append(record?);
        }
        Ok(records.stats().clone())
    }

    /// Decode every record into a new vector
    pub fn read_all<R: Record, L: LineSource>(&self, source: L) -> Result<Vec<R>> {
        let mut records = Vec::new();
        self.decode_into(source, &mut records)?;
        Ok(records)
    }

    /// Decode a CSV file
    pub fn read_path<R: Record>(&self, path: impl AsRef<Path>) -> Result<Vec<R>> {
        let path = path.as_ref();
        info!("Decoding CSV file: {}", path.display());

        let file = File::open(path)
            .map_err(|e| Error::io(format!("Failed to open {}", path.display()), e))?;
        self.read_all(BufReader::new(file))
    }

    /// Start a session that streams dynamic rows for a registered schema
    pub fn rows<L: LineSource>(&self, source: L, schema: &Schema) -> Result<Rows<L>> {
        let session = Session::open(&self.config, source, schema.declarations())?;
        Ok(Rows {
            session,
            columns: schema.column_names().into(),
        })
    }

    /// Decode every row of a registered schema
    pub fn read_rows<L: LineSource>(&self, source: L, schema: &Schema) -> Result<Vec<Row>> {
        self.rows(source, schema)?.collect()
    }
}

/// State of one decode session
#[derive(Debug)]
struct Session<L> {
    source: L,
    config: DecoderConfig,
    mapping: ColumnMapping,
    line_number: usize,
    stats: DecodeStats,
    finished: bool,
}

impl<L: LineSource> Session<L> {
    fn open(config: &DecoderConfig, mut source: L, declarations: &[FieldDeclaration]) -> Result<Self> {
        validate_declarations(declarations)?;

        let header_line = source
            .next_line()
            .map_err(|e| Error::io("Failed to read header line", e))?
            .ok_or(Error::MissingHeader)?;
        let header = HeaderRow::parse(&header_line, config.delimiter)?;
        let mapping = ColumnMapping::resolve(declarations, &header)?;

        let (fields, columns, unused) = mapping.stats();
        debug!(
            "Column mapping: {} fields from {} columns, {} columns unused",
            fields, columns, unused
        );

        Ok(Self {
            source,
            config: config.clone(),
            mapping,
            line_number: 1,
            stats: DecodeStats {
                lines_read: 1,
                ..DecodeStats::default()
            },
            finished: false,
        })
    }

    /// Read, split, width-check and coerce the next data line
    fn next_values(&mut self) -> Result<Option<FieldValues>> {
        loop {
            let next_line_number = self.line_number + 1;
            let Some(line) = self
                .source
                .next_line()
                .map_err(|e| Error::io(format!("Failed to read line {}", next_line_number), e))?
            else {
                return Ok(None);
            };

            self.line_number = next_line_number;
            self.stats.lines_read += 1;

            if line.is_empty() && self.config.skip_blank_lines {
                self.stats.blank_lines_skipped += 1;
                continue;
            }

            let row = split_line(&line, self.config.delimiter).map_err(|source| {
                Error::MalformedLine {
                    line_number: self.line_number,
                    source,
                }
            })?;

            if row.len() != self.mapping.expected_width() {
                return Err(Error::RowWidthMismatch {
                    line_number: self.line_number,
                    expected: self.mapping.expected_width(),
                    actual: row.len(),
                });
            }

            return coerce_row(
                &row,
                &self.mapping,
                &self.config.timestamp_layout,
                self.line_number,
            )
            .map(Some);
        }
    }

    /// Produce the next item, fusing the session after end of input or an error
    fn advance<T>(&mut self, build: impl FnOnce(&mut FieldValues) -> Result<T>) -> Option<Result<T>> {
        if self.finished {
            return None;
        }

        let item = self.next_values().and_then(|values| match values {
            Some(mut values) => build(&mut values).map(Some),
            None => Ok(None),
        });

        match item {
            Ok(Some(item)) => {
                self.stats.records_decoded += 1;
                Some(Ok(item))
            }
            Ok(None) => {
                self.finished = true;
                info!(
                    "Decoded {} records from {} lines",
                    self.stats.records_decoded, self.stats.lines_read
                );
                None
            }
            Err(e) => {
                self.finished = true;
                debug!("Decode session stopped: {}", e);
                Some(Err(e))
            }
        }
    }
}

/// Streaming iterator over decoded records
///
/// Yields records in input order. After the first error it yields nothing
/// more.
#[derive(Debug)]
pub struct Records<R, L> {
    session: Session<L>,
    _record: PhantomData<fn() -> R>,
}

impl<R, L> Records<R, L> {
    /// Resolved mapping for this session
    pub fn mapping(&self) -> &ColumnMapping {
        &self.session.mapping
    }

    pub fn stats(&self) -> &DecodeStats {
        &self.session.stats
    }

    /// Physical line number of the last line read (the header is line 1)
    pub fn line_number(&self) -> usize {
        self.session.line_number
    }
}

impl<R: Record, L: LineSource> Iterator for Records<R, L> {
    type Item = Result<R>;

    fn next(&mut self) -> Option<Self::Item> {
        self.session.advance(R::from_values)
    }
}

impl<R: Record, L: LineSource> FusedIterator for Records<R, L> {}

/// Streaming iterator over rows of a registered [`Schema`]
#[derive(Debug)]
pub struct Rows<L> {
    session: Session<L>,
    columns: Arc<[String]>,
}

impl<L> Rows<L> {
    pub fn mapping(&self) -> &ColumnMapping {
        &self.session.mapping
    }

    pub fn stats(&self) -> &DecodeStats {
        &self.session.stats
    }
}

impl<L: LineSource> Iterator for Rows<L> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        let columns = &self.columns;
        self.session
            .advance(|values| Ok(Row::new(Arc::clone(columns), values.drain())))
    }
}

impl<L: LineSource> FusedIterator for Rows<L> {}
