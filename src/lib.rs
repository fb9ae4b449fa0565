//! Z-score anomaly detection for time-indexed tabular data
//!
//! Facade crate re-exporting the workspace members:
//!
//! - [`frame`] — time-indexed tables: CSV ingestion, timestamp parsing,
//!   source/derived column tagging
//! - [`detect`] — per-column z-score scoring, classification and anomaly
//!   partitioning
//! - [`viz`] — panel-chart rendering of flagged points
//!
//! # Example
//!
//! ```rust,no_run
//! use anomaly_stats::detect::ZScoreDetector;
//! use anomaly_stats::frame::{ReadOptions, TimeIndexedTable};
//!
//! let mut table =
//!     TimeIndexedTable::from_csv_path("metrics.csv", "Date", &ReadOptions::default())?;
//! let result = ZScoreDetector::default().annotate(&mut table)?;
//! println!("{result}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use anomaly_detect as detect;
pub use anomaly_frame as frame;
pub use anomaly_viz as viz;
