//! Visualization interface for detection passes
//!
//! This module defines the hooks through which a detection pass hands its
//! data to a presentation collaborator, without depending on any specific
//! charting library. Rendering backends implement [`AnomalyVisualizer`] in
//! their own crate; detection code stays chart-free, and the null
//! implementation compiles to no-ops when visualization is unwanted.

use chrono::NaiveDateTime;

use crate::error::Result;
use crate::types::AnomalousPoint;

/// Hooks a detection pass drives for a presentation collaborator
///
/// A pass records the threshold once, then for each source column the raw
/// series, its deviation scores, and the flagged rows. `save_visualizations`
/// is left to the caller so a visualizer can collect several passes before
/// rendering.
pub trait AnomalyVisualizer {
    /// Record the classification threshold of the pass
    fn record_threshold(&mut self, threshold: f64) -> Result<()>;

    /// Record a source column's raw series
    fn record_series(
        &mut self,
        column: &str,
        index: &[NaiveDateTime],
        values: &[f64],
    ) -> Result<()>;

    /// Record a column's per-row deviation scores
    fn record_scores(&mut self, column: &str, scores: &[f64]) -> Result<()>;

    /// Record a column's flagged rows
    fn record_anomalies(&mut self, column: &str, anomalies: &[AnomalousPoint]) -> Result<()>;

    /// Generate and save visualizations
    ///
    /// Returns paths to generated files (if any).
    fn save_visualizations(&self, output_prefix: &str) -> Result<Vec<String>>;

    /// Check if this visualizer is active
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Null visualizer that performs no operations
///
/// All methods are `#[inline(always)]` no-ops, so a pass run without a
/// real visualizer pays nothing for the hooks.
#[derive(Default, Clone, Copy, Debug)]
pub struct NullAnomalyVisualizer;

impl AnomalyVisualizer for NullAnomalyVisualizer {
    #[inline(always)]
    fn record_threshold(&mut self, _: f64) -> Result<()> {
        Ok(())
    }

    #[inline(always)]
    fn record_series(&mut self, _: &str, _: &[NaiveDateTime], _: &[f64]) -> Result<()> {
        Ok(())
    }

    #[inline(always)]
    fn record_scores(&mut self, _: &str, _: &[f64]) -> Result<()> {
        Ok(())
    }

    #[inline(always)]
    fn record_anomalies(&mut self, _: &str, _: &[AnomalousPoint]) -> Result<()> {
        Ok(())
    }

    #[inline(always)]
    fn save_visualizations(&self, _: &str) -> Result<Vec<String>> {
        Ok(vec![])
    }

    #[inline(always)]
    fn is_enabled(&self) -> bool {
        false
    }
}
