//! Time-indexed tabular data for anomaly analysis
//!
//! This crate owns the data model consumed by the detection layer: a
//! [`TimeIndexedTable`] keyed by a parsed timestamp column, with named
//! numeric value columns and a structural distinction between source
//! columns and detector-derived columns.
//!
//! # Example
//!
//! ```rust
//! use anomaly_frame::{RawTable, ReadOptions, TimeIndexedTable};
//!
//! let raw = RawTable::new(
//!     vec!["Date".into(), "load".into()],
//!     vec![
//!         vec!["01/02/2024".into(), "0.4".into()],
//!         vec!["02/02/2024".into(), "0.5".into()],
//!     ],
//! )?;
//!
//! let table = TimeIndexedTable::from_raw(&raw, "Date", &ReadOptions::default())?;
//! assert_eq!(table.len(), 2);
//! # Ok::<(), anomaly_frame::Error>(())
//! ```

mod dates;
mod error;
mod raw;
mod table;

pub use dates::{parse_timestamp, DateOrder, ReadOptions};
pub use error::{Error, Result};
pub use raw::RawTable;
pub use table::{Column, ColumnRole, TimeIndexedTable};
