//! Per-column z-score anomaly detection
//!
//! This crate consumes an [`anomaly_frame::TimeIndexedTable`] and, per
//! source column, computes normalized deviation scores, classifies each
//! row against a configurable threshold, and partitions rows into
//! normal/anomalous sets. Results are queryable by column name and row in
//! O(1), and a visualizer trait lets a presentation collaborator observe
//! a pass without the core depending on any charting library.
//!
//! # Example
//!
//! ```rust
//! use anomaly_detect::ZScoreDetector;
//! use anomaly_frame::{RawTable, ReadOptions, TimeIndexedTable};
//!
//! let raw = RawTable::new(
//!     vec!["Date".into(), "load".into()],
//!     vec![
//!         vec!["01/02/2024".into(), "1.0".into()],
//!         vec!["02/02/2024".into(), "1.2".into()],
//!         vec!["03/02/2024".into(), "40.0".into()],
//!     ],
//! )?;
//! let mut table = TimeIndexedTable::from_raw(&raw, "Date", &ReadOptions::default())?;
//!
//! let detector = ZScoreDetector::new(1.2);
//! let result = detector.annotate(&mut table)?;
//!
//! assert_eq!(result.is_anomaly("load", 2), Some(true));
//! assert!(table.column("score_load").is_some());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod stats;
pub mod traits;
pub mod types;
pub mod visualization;
pub mod zscore;

pub use error::{Error, Result};
pub use stats::{column_stats, zscores, ColumnStats};
pub use traits::{ConfigurableDetector, DetectorProperties};
pub use types::{AnomalousPoint, Classification, ColumnDetection, DetectionResult};
pub use visualization::{AnomalyVisualizer, NullAnomalyVisualizer};
pub use zscore::{ZScoreDetector, ZScoreParameters, DEFAULT_THRESHOLD};
