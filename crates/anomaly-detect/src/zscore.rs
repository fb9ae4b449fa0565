//! Z-score anomaly detection over a time-indexed table
//!
//! Every source column is standardized against its own mean and population
//! standard deviation; a row is flagged when the magnitude of its score
//! strictly exceeds the configured threshold. Columns are processed
//! independently, so one column's missing cells never disturb another
//! column's statistics.

use anomaly_frame::{Column, ColumnRole, TimeIndexedTable};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::stats::{column_stats, zscores, ColumnStats};
use crate::traits::{ConfigurableDetector, DetectorProperties};
use crate::types::{AnomalousPoint, Classification, ColumnDetection, DetectionResult};
use crate::visualization::{AnomalyVisualizer, NullAnomalyVisualizer};

/// Default classification threshold, in standard deviations
pub const DEFAULT_THRESHOLD: f64 = 3.0;

/// Z-score detector parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZScoreParameters {
    /// Deviation cutoff for classification; a row is anomalous when
    /// |score| exceeds it strictly
    pub threshold: f64,
}

impl Default for ZScoreParameters {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ZScoreParameters {
    /// Check the parameters before a pass runs
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(Error::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}

/// Per-column z-score anomaly detector
#[derive(Debug, Clone, Default)]
pub struct ZScoreDetector {
    params: ZScoreParameters,
}

impl ZScoreDetector {
    /// Create a detector with the given threshold
    pub fn new(threshold: f64) -> Self {
        Self {
            params: ZScoreParameters { threshold },
        }
    }

    /// Run a detection pass over every source column of the table
    ///
    /// The pass is read-only and deterministic: running it twice on the
    /// same table yields identical scores, classifications and anomaly
    /// sets. Fails with [`Error::InvalidThreshold`] before any computation
    /// when misconfigured, and with [`Error::NonNumericColumn`] naming
    /// every column that has no usable numeric data.
    pub fn detect_all(&self, table: &TimeIndexedTable) -> Result<DetectionResult> {
        self.detect_all_with(table, &mut NullAnomalyVisualizer)
    }

    /// Run a detection pass, driving a visualizer's hooks along the way
    pub fn detect_all_with<V: AnomalyVisualizer>(
        &self,
        table: &TimeIndexedTable,
        visualizer: &mut V,
    ) -> Result<DetectionResult> {
        self.params.validate()?;

        // Surface every unusable column before any per-column work, so the
        // pass either produces a complete result set or nothing.
        let mut prepared = Vec::new();
        let mut unusable = Vec::new();
        for column in table.source_columns() {
            match column_stats(column.values()) {
                Some(stats) => prepared.push((column, stats)),
                None => unusable.push(column.name().to_string()),
            }
        }
        if !unusable.is_empty() {
            return Err(Error::NonNumericColumn { columns: unusable });
        }

        visualizer.record_threshold(self.params.threshold)?;

        let mut detections = Vec::new();
        for (column, stats) in prepared {
            let detection = self.detect_column(table, column, stats);

            visualizer.record_series(column.name(), table.index(), column.values())?;
            visualizer.record_scores(column.name(), detection.scores())?;
            visualizer.record_anomalies(column.name(), detection.anomalies())?;

            detections.push(detection);
        }

        debug!(
            columns = detections.len(),
            rows = table.len(),
            threshold = self.params.threshold,
            "detection pass complete"
        );

        Ok(DetectionResult::new(
            detections,
            self.params.threshold,
            table.len(),
        ))
    }

    /// Run a detection pass and append the derived columns to the table
    ///
    /// For every source column `C` this installs `score_C` (the raw
    /// deviation scores) and `classification_C` (1.0 for Anomaly, 0.0 for
    /// Normal) as role-tagged derived columns for a presentation
    /// collaborator to pick up. Source columns are never overwritten, and
    /// a repeated call replaces the previous derived output instead of
    /// reprocessing it.
    pub fn annotate(&self, table: &mut TimeIndexedTable) -> Result<DetectionResult> {
        let result = self.detect_all(table)?;

        for detection in result.columns() {
            let source = detection.column().to_string();
            table.insert_derived(
                &format!("score_{source}"),
                ColumnRole::Score {
                    source: source.clone(),
                },
                detection.scores().to_vec(),
            )?;
            table.insert_derived(
                &format!("classification_{source}"),
                ColumnRole::Flag {
                    source: source.clone(),
                },
                detection
                    .classifications()
                    .iter()
                    .map(|c| if c.is_anomaly() { 1.0 } else { 0.0 })
                    .collect(),
            )?;
        }

        Ok(result)
    }

    fn detect_column(
        &self,
        table: &TimeIndexedTable,
        column: &Column,
        stats: ColumnStats,
    ) -> ColumnDetection {
        let scores = zscores(column.values(), &stats);

        let classifications: Vec<Classification> = scores
            .iter()
            .map(|&score| {
                // NaN scores compare false and stay Normal
                if score.abs() > self.params.threshold {
                    Classification::Anomaly
                } else {
                    Classification::Normal
                }
            })
            .collect();

        let anomalies: Vec<AnomalousPoint> = classifications
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_anomaly())
            .map(|(row, _)| AnomalousPoint {
                row,
                timestamp: table.index()[row],
                value: column.values()[row],
                score: scores[row],
            })
            .collect();

        debug!(
            column = column.name(),
            mean = stats.mean,
            std_dev = stats.std_dev,
            n_finite = stats.n_finite,
            anomalies = anomalies.len(),
            "column scored"
        );

        ColumnDetection::new(
            column.name().to_string(),
            stats.mean,
            stats.std_dev,
            scores,
            classifications,
            anomalies,
        )
    }
}

impl DetectorProperties for ZScoreDetector {
    fn algorithm_name(&self) -> &'static str {
        "z-score"
    }

    fn minimum_sample_size(&self) -> usize {
        1
    }
}

impl ConfigurableDetector for ZScoreDetector {
    type Parameters = ZScoreParameters;

    fn with_parameters(params: Self::Parameters) -> Self {
        Self { params }
    }

    fn parameters(&self) -> &Self::Parameters {
        &self.params
    }

    fn set_parameters(&mut self, params: Self::Parameters) {
        self.params = params;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anomaly_frame::{RawTable, ReadOptions};

    fn spike_table() -> TimeIndexedTable {
        // Nine quiet days and one spike; the spike sits at exactly three
        // population standard deviations.
        let records = (1..=10)
            .map(|day| {
                let value = if day == 10 { "100" } else { "1" };
                vec![format!("{day:02}/02/2024"), value.to_string()]
            })
            .collect();
        let raw = RawTable::new(vec!["Date".into(), "X".into()], records).unwrap();
        TimeIndexedTable::from_raw(&raw, "Date", &ReadOptions::default()).unwrap()
    }

    #[test]
    fn test_boundary_score_is_normal() {
        let table = spike_table();
        let probe = ZScoreDetector::default().detect_all(&table).unwrap();
        let spike_score = probe.column("X").unwrap().scores()[9];
        assert!((spike_score - 3.0).abs() < 1e-12);

        // Strict comparison: a threshold exactly equal to the score is not
        // exceeded, so the row stays Normal.
        let result = ZScoreDetector::new(spike_score).detect_all(&table).unwrap();
        let x = result.column("X").unwrap();
        assert_eq!(x.classifications()[9], Classification::Normal);
        assert!(!x.has_anomalies());
    }

    #[test]
    fn test_lowered_threshold_flags_the_spike() {
        let table = spike_table();
        let result = ZScoreDetector::new(2.5).detect_all(&table).unwrap();

        let x = result.column("X").unwrap();
        assert_eq!(x.anomaly_count(), 1);
        let point = &x.anomalies()[0];
        assert_eq!(point.row, 9);
        assert_eq!(point.value, 100.0);
        assert_eq!(result.is_anomaly("X", 9), Some(true));
        assert_eq!(result.is_anomaly("X", 0), Some(false));
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        let table = spike_table();
        for bad in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            let result = ZScoreDetector::new(bad).detect_all(&table);
            assert!(matches!(result, Err(Error::InvalidThreshold(_))), "threshold {bad}");
        }
    }

    #[test]
    fn test_detection_is_deterministic() {
        let table = spike_table();
        let detector = ZScoreDetector::new(2.5);

        let first = detector.detect_all(&table).unwrap();
        let second = detector.detect_all(&table).unwrap();

        assert_eq!(first.column("X").unwrap(), second.column("X").unwrap());
    }

    #[test]
    fn test_annotate_appends_tagged_columns() {
        let mut table = spike_table();
        ZScoreDetector::new(2.5).annotate(&mut table).unwrap();

        assert_eq!(table.n_columns(), 3);
        let score = table.column("score_X").unwrap();
        assert!(matches!(score.role(), ColumnRole::Score { source } if source == "X"));
        let flags = table.column("classification_X").unwrap();
        assert!(matches!(flags.role(), ColumnRole::Flag { source } if source == "X"));
        assert_eq!(flags.values()[9], 1.0);
        assert_eq!(flags.values()[0], 0.0);

        // Source values untouched
        assert_eq!(table.values("X").unwrap()[9], 100.0);
    }

    #[test]
    fn test_annotate_is_idempotent() {
        let mut table = spike_table();
        let detector = ZScoreDetector::new(2.5);

        let first = detector.annotate(&mut table).unwrap();
        let second = detector.annotate(&mut table).unwrap();

        // No score_score_* cascade, no column growth
        assert_eq!(table.n_columns(), 3);
        assert!(table.column("score_score_X").is_none());
        assert!(table.column_names().all(|n| !n.starts_with("score_score")));

        // Identical anomaly sets across passes
        assert_eq!(
            first.column("X").unwrap().anomalies(),
            second.column("X").unwrap().anomalies()
        );
        // Derived columns were not reprocessed as data
        assert!(second.column("score_X").is_none());
        assert!(second.column("classification_X").is_none());
    }

    #[test]
    fn test_non_numeric_columns_abort_the_pass() {
        let raw = RawTable::new(
            vec!["Date".into(), "ok".into(), "label".into(), "notes".into()],
            vec![
                vec!["01/02/2024".into(), "1.0".into(), "up".into(), "fine".into()],
                vec!["02/02/2024".into(), "2.0".into(), "down".into(), "fine".into()],
            ],
        )
        .unwrap();
        let table = TimeIndexedTable::from_raw(&raw, "Date", &ReadOptions::default()).unwrap();

        let err = ZScoreDetector::default().detect_all(&table).unwrap_err();
        match err {
            Error::NonNumericColumn { columns } => {
                // Every offender named, not just the first
                assert_eq!(columns, vec!["label".to_string(), "notes".to_string()]);
            }
            other => panic!("expected NonNumericColumn, got {other}"),
        }
    }

    #[test]
    fn test_columns_are_independent() {
        let raw = RawTable::new(
            vec!["Date".into(), "gappy".into(), "clean".into()],
            vec![
                vec!["01/02/2024".into(), "".into(), "1.0".into()],
                vec!["02/02/2024".into(), "5.0".into(), "2.0".into()],
                vec!["03/02/2024".into(), "6.0".into(), "3.0".into()],
                vec!["04/02/2024".into(), "7.0".into(), "4.0".into()],
            ],
        )
        .unwrap();
        let table = TimeIndexedTable::from_raw(&raw, "Date", &ReadOptions::default()).unwrap();

        let result = ZScoreDetector::default().detect_all(&table).unwrap();

        // The clean column's statistics ignore the gappy neighbor
        let clean = result.column("clean").unwrap();
        assert!((clean.mean() - 2.5).abs() < 1e-12);
        assert_eq!(clean.classifications().len(), 4);

        // The gap rides along: NaN score, Normal classification
        let gappy = result.column("gappy").unwrap();
        assert!(gappy.scores()[0].is_nan());
        assert_eq!(gappy.classifications()[0], Classification::Normal);
        assert!((gappy.mean() - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_variance_column_all_normal() {
        let raw = RawTable::new(
            vec!["Date".into(), "flat".into()],
            vec![
                vec!["01/02/2024".into(), "5.0".into()],
                vec!["02/02/2024".into(), "5.0".into()],
                vec!["03/02/2024".into(), "5.0".into()],
            ],
        )
        .unwrap();
        let table = TimeIndexedTable::from_raw(&raw, "Date", &ReadOptions::default()).unwrap();

        let result = ZScoreDetector::default().detect_all(&table).unwrap();
        let flat = result.column("flat").unwrap();

        assert_eq!(flat.std_dev(), 0.0);
        assert!(flat.scores().iter().all(|s| s.is_nan()));
        assert!(flat
            .classifications()
            .iter()
            .all(|c| *c == Classification::Normal));
    }

    #[test]
    fn test_configurable_detector_roundtrip() {
        let mut detector = ZScoreDetector::with_parameters(ZScoreParameters { threshold: 2.0 });
        assert_eq!(detector.parameters().threshold, 2.0);
        assert_eq!(detector.algorithm_name(), "z-score");

        detector.set_parameters(ZScoreParameters::default());
        assert_eq!(detector.parameters().threshold, DEFAULT_THRESHOLD);
    }
}
