//! Raw tabular input
//!
//! A [`RawTable`] is the uninterpreted form of a dataset: a header row plus
//! string-valued records, exactly as they came off the wire or out of a
//! delimited file. No cell is parsed at this layer; interpretation happens
//! when a [`crate::TimeIndexedTable`] is constructed from it.

use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};

/// Uninterpreted tabular data: named columns over string-valued records
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    records: Vec<Vec<String>>,
}

impl RawTable {
    /// Create a raw table from headers and records
    ///
    /// Fails if a header name repeats or any record's length differs from
    /// the header count.
    pub fn new(headers: Vec<String>, records: Vec<Vec<String>>) -> Result<Self> {
        for (i, name) in headers.iter().enumerate() {
            if headers[..i].iter().any(|other| other == name) {
                return Err(Error::DuplicateColumn(name.clone()));
            }
        }

        for record in &records {
            if record.len() != headers.len() {
                // Name the first column the record falls short of (or the
                // last one it overflows past) so the failure is addressable.
                let column = headers
                    .get(record.len().min(headers.len().saturating_sub(1)))
                    .cloned()
                    .unwrap_or_default();
                return Err(Error::LengthMismatch {
                    column,
                    expected: headers.len(),
                    actual: record.len(),
                });
            }
        }

        Ok(Self { headers, records })
    }

    /// Read a raw table from any CSV source
    ///
    /// The first row is taken as the header row. Ragged records are
    /// rejected by the reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader.headers()?.iter().map(String::from).collect();

        let mut records = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            records.push(record.iter().map(String::from).collect());
        }

        tracing::debug!(
            rows = records.len(),
            columns = headers.len(),
            "raw table read"
        );

        Self::new(headers, records)
    }

    /// Read a raw table from a CSV file on disk
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Column names, in input order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// String-valued records, one per row
    pub fn records(&self) -> &[Vec<String>] {
        &self.records
    }

    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.records.len()
    }

    /// Number of columns
    pub fn n_columns(&self) -> usize {
        self.headers.len()
    }

    /// Position of a column by name
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}
