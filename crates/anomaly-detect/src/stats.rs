//! Column statistics for z-score computation
//!
//! Moments are computed over the finite cells of a column only; NaN and
//! infinite cells are excluded from the statistics but keep their row
//! position in every per-row output. Standard deviation is the population
//! form (divide by n, not n - 1), matching the classification boundary
//! examples this crate is tested against.

/// Mean and population standard deviation of a column's finite cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    /// Mean of the finite cells
    pub mean: f64,
    /// Population standard deviation of the finite cells
    pub std_dev: f64,
    /// Number of finite cells the moments were computed from
    pub n_finite: usize,
}

/// Compute column statistics, or `None` when no cell is finite
pub fn column_stats(values: &[f64]) -> Option<ColumnStats> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }

    let n = finite.len() as f64;
    let mean = finite.iter().sum::<f64>() / n;
    let variance = finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    Some(ColumnStats {
        mean,
        std_dev: variance.sqrt(),
        n_finite: finite.len(),
    })
}

/// Per-row z-scores for a column
///
/// Non-finite cells score NaN. A zero standard deviation makes every score
/// NaN (no variance, nothing deviates) rather than raising a division
/// fault.
pub fn zscores(values: &[f64], stats: &ColumnStats) -> Vec<f64> {
    values
        .iter()
        .map(|&v| {
            if !v.is_finite() || stats.std_dev == 0.0 {
                f64::NAN
            } else {
                (v - stats.mean) / stats.std_dev
            }
        })
        .collect()
}
