//! Types produced by a detection pass

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Per-row classification outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// Within the configured deviation threshold
    Normal,
    /// Deviation magnitude exceeds the configured threshold
    Anomaly,
}

impl Classification {
    /// Whether this row was flagged
    pub fn is_anomaly(&self) -> bool {
        matches!(self, Classification::Anomaly)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Normal => write!(f, "Normal"),
            Classification::Anomaly => write!(f, "Anomaly"),
        }
    }
}

/// A row flagged as anomalous in one column
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalousPoint {
    /// Row position in the table
    pub row: usize,
    /// Timestamp of the row
    pub timestamp: NaiveDateTime,
    /// Original cell value
    pub value: f64,
    /// Deviation score of the cell
    pub score: f64,
}

impl fmt::Display for AnomalousPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AnomalousPoint {{ row: {}, at: {}, value: {}, score: {:.3} }}",
            self.row, self.timestamp, self.value, self.score
        )
    }
}

/// Detection output for one source column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDetection {
    column: String,
    mean: f64,
    std_dev: f64,
    scores: Vec<f64>,
    classifications: Vec<Classification>,
    anomalies: Vec<AnomalousPoint>,
}

impl ColumnDetection {
    /// Assemble the detection output for one column
    pub fn new(
        column: String,
        mean: f64,
        std_dev: f64,
        scores: Vec<f64>,
        classifications: Vec<Classification>,
        anomalies: Vec<AnomalousPoint>,
    ) -> Self {
        Self {
            column,
            mean,
            std_dev,
            scores,
            classifications,
            anomalies,
        }
    }

    /// Name of the source column
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Mean the scores were centered on
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population standard deviation the scores were scaled by
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Per-row deviation scores; NaN where undefined
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Per-row classifications, aligned with the table index
    pub fn classifications(&self) -> &[Classification] {
        &self.classifications
    }

    /// Flagged rows, in original row order
    pub fn anomalies(&self) -> &[AnomalousPoint] {
        &self.anomalies
    }

    /// Number of flagged rows
    pub fn anomaly_count(&self) -> usize {
        self.anomalies.len()
    }

    /// Whether any row was flagged
    pub fn has_anomalies(&self) -> bool {
        !self.anomalies.is_empty()
    }

    /// Whether a row was flagged, in O(1); `None` when out of bounds
    pub fn is_anomaly(&self, row: usize) -> Option<bool> {
        self.classifications.get(row).map(|c| c.is_anomaly())
    }
}

/// Result of a full detection pass over a table
///
/// Columns appear in table column order and are addressable by name in
/// O(1). Recomputing the pass on the same table reproduces this result
/// exactly; there is no hidden incremental state.
#[derive(Debug, Clone)]
pub struct DetectionResult {
    columns: Vec<ColumnDetection>,
    by_name: HashMap<String, usize>,
    threshold: f64,
    sample_size: usize,
}

impl DetectionResult {
    /// Assemble a detection result from per-column outputs
    pub fn new(columns: Vec<ColumnDetection>, threshold: f64, sample_size: usize) -> Self {
        let by_name = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.column().to_string(), i))
            .collect();
        Self {
            columns,
            by_name,
            threshold,
            sample_size,
        }
    }

    /// Per-column outputs, in table column order
    pub fn columns(&self) -> &[ColumnDetection] {
        &self.columns
    }

    /// Output for one column, by name, in O(1)
    pub fn column(&self, name: &str) -> Option<&ColumnDetection> {
        self.by_name.get(name).map(|&i| &self.columns[i])
    }

    /// Whether row `row` of column `name` was flagged, in O(1)
    pub fn is_anomaly(&self, name: &str, row: usize) -> Option<bool> {
        self.column(name).and_then(|c| c.is_anomaly(row))
    }

    /// The classification threshold the pass ran with
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Number of rows analyzed
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Total flagged rows across all columns
    pub fn total_anomalies(&self) -> usize {
        self.columns.iter().map(|c| c.anomaly_count()).sum()
    }
}

impl fmt::Display for DetectionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Anomaly Detection Result:")?;
        writeln!(f, "  Threshold: {}", self.threshold)?;
        writeln!(f, "  Sample size: {}", self.sample_size)?;
        writeln!(f, "  Anomalies detected: {}", self.total_anomalies())?;

        for column in &self.columns {
            writeln!(
                f,
                "  Column {}: {} anomalies (mean {:.3}, std dev {:.3})",
                column.column(),
                column.anomaly_count(),
                column.mean(),
                column.std_dev()
            )?;
            for point in column.anomalies() {
                writeln!(f, "    {point}")?;
            }
        }

        Ok(())
    }
}
