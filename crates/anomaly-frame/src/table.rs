//! Time-indexed table
//!
//! A [`TimeIndexedTable`] owns a parsed dataset: a timestamp index plus
//! named numeric columns of equal length. Columns carry a [`ColumnRole`]
//! tag so that detector-derived output (scores, flags) is structurally
//! distinguished from source data instead of being inferred from name
//! prefixes. Detection passes only ever read `Source` columns, which makes
//! repeated passes over an augmented table safe by construction.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::dates::{parse_timestamp, ReadOptions};
use crate::error::{Error, Result};
use crate::raw::RawTable;

/// Role of a column within a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnRole {
    /// Original data column from the input
    Source,
    /// Derived per-row deviation scores for a source column
    Score { source: String },
    /// Derived per-row classification flags (1.0 / 0.0) for a source column
    Flag { source: String },
}

impl ColumnRole {
    /// Whether this is an original data column
    pub fn is_source(&self) -> bool {
        matches!(self, ColumnRole::Source)
    }

    /// Whether this column was produced by a detection pass
    pub fn is_derived(&self) -> bool {
        !self.is_source()
    }

    /// The source column a derived column was computed from
    pub fn source_column(&self) -> Option<&str> {
        match self {
            ColumnRole::Source => None,
            ColumnRole::Score { source } | ColumnRole::Flag { source } => Some(source),
        }
    }
}

/// A named numeric column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    role: ColumnRole,
    values: Vec<f64>,
}

impl Column {
    /// Column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column role
    pub fn role(&self) -> &ColumnRole {
        &self.role
    }

    /// Cell values, one per index entry; missing cells are NaN
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column has no cells
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at a row, if in bounds
    pub fn get(&self, row: usize) -> Option<f64> {
        self.values.get(row).copied()
    }
}

/// A dataset keyed by a parsed timestamp column
///
/// The index need not be unique or sorted, but every row has a timestamp.
/// All columns have the same length as the index. The table is immutable
/// after construction except for [`insert_derived`](Self::insert_derived),
/// which can append or replace derived columns but never touch source data.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeIndexedTable {
    index: Vec<NaiveDateTime>,
    columns: Vec<Column>,
    by_name: HashMap<String, usize>,
}

impl TimeIndexedTable {
    /// Construct a table from raw input, installing `time_column` as the
    /// row index
    ///
    /// Every cell of the time column must parse under the configured date
    /// order; a single failure rejects the whole table, since a partially
    /// indexed table has undefined row identity. Value cells that fail
    /// numeric parsing are carried as NaN rather than failing the load.
    /// The caller's [`RawTable`] is not mutated.
    pub fn from_raw(raw: &RawTable, time_column: &str, options: &ReadOptions) -> Result<Self> {
        let time_pos = raw
            .column_position(time_column)
            .ok_or_else(|| Error::MissingTimeColumn {
                column: time_column.to_string(),
            })?;

        let mut index = Vec::with_capacity(raw.n_rows());
        for (row, record) in raw.records().iter().enumerate() {
            let cell = &record[time_pos];
            let ts = parse_timestamp(cell, options.date_order).ok_or_else(|| {
                Error::TimeParseError {
                    value: cell.clone(),
                    row,
                }
            })?;
            index.push(ts);
        }

        let mut columns = Vec::with_capacity(raw.n_columns().saturating_sub(1));
        let mut by_name = HashMap::new();
        for (pos, name) in raw.headers().iter().enumerate() {
            if pos == time_pos {
                continue;
            }
            let values = raw
                .records()
                .iter()
                .map(|record| record[pos].trim().parse::<f64>().unwrap_or(f64::NAN))
                .collect();
            by_name.insert(name.clone(), columns.len());
            columns.push(Column {
                name: name.clone(),
                role: ColumnRole::Source,
                values,
            });
        }

        tracing::debug!(
            rows = index.len(),
            columns = columns.len(),
            time_column,
            "time-indexed table constructed"
        );

        Ok(Self {
            index,
            columns,
            by_name,
        })
    }

    /// Load a table directly from a CSV file
    pub fn from_csv_path<P: AsRef<Path>>(
        path: P,
        time_column: &str,
        options: &ReadOptions,
    ) -> Result<Self> {
        let raw = RawTable::from_csv_path(path)?;
        Self::from_raw(&raw, time_column, options)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The timestamp index, one entry per row
    pub fn index(&self) -> &[NaiveDateTime] {
        &self.index
    }

    /// Timestamp of a row, if in bounds
    pub fn timestamp(&self, row: usize) -> Option<NaiveDateTime> {
        self.index.get(row).copied()
    }

    /// All columns, in input order (derived columns after their insertion)
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    /// Source columns only, in input order
    pub fn source_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.role().is_source())
    }

    /// Column names, in column order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name())
    }

    /// Number of columns (source and derived)
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Look up a column by name in O(1)
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.by_name.get(name).map(|&i| &self.columns[i])
    }

    /// Cell values of a column by name
    pub fn values(&self, name: &str) -> Option<&[f64]> {
        self.column(name).map(|c| c.values())
    }

    /// Append or replace a derived column
    ///
    /// The role must be derived and the values must align with the index.
    /// An existing derived column of the same name is replaced; a source
    /// column of that name is never overwritten.
    pub fn insert_derived(&mut self, name: &str, role: ColumnRole, values: Vec<f64>) -> Result<()> {
        if role.is_source() {
            return Err(Error::SourceRoleRejected(name.to_string()));
        }
        if values.len() != self.index.len() {
            return Err(Error::LengthMismatch {
                column: name.to_string(),
                expected: self.index.len(),
                actual: values.len(),
            });
        }

        match self.by_name.get(name) {
            Some(&i) if self.columns[i].role.is_derived() => {
                self.columns[i].role = role;
                self.columns[i].values = values;
                Ok(())
            }
            Some(_) => Err(Error::SourceColumnCollision(name.to_string())),
            None => {
                self.by_name.insert(name.to_string(), self.columns.len());
                self.columns.push(Column {
                    name: name.to_string(),
                    role,
                    values,
                });
                Ok(())
            }
        }
    }
}
