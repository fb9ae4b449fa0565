//! Panel-chart visualizer
//!
//! Buffers everything a detection pass records, then renders one sub-chart
//! per source column into a single SVG: the raw series as a line, flagged
//! rows as filled red markers, two panels per grid row.

use std::collections::HashMap;

use anomaly_detect::{AnomalousPoint, AnomalyVisualizer, DetectionResult, Error, Result};
use anomaly_frame::TimeIndexedTable;
use chrono::{Duration, NaiveDateTime};
use plotters::prelude::*;
use tracing::debug;

/// Default canvas size in pixels
pub const DEFAULT_DIMENSIONS: (u32, u32) = (1400, 900);

struct Panel {
    column: String,
    index: Vec<NaiveDateTime>,
    values: Vec<f64>,
    scores: Vec<f64>,
    anomalies: Vec<AnomalousPoint>,
}

/// Visualizer that renders recorded columns as a grid of sub-charts
pub struct PanelVisualizer {
    dimensions: (u32, u32),
    threshold: Option<f64>,
    panels: Vec<Panel>,
    by_name: HashMap<String, usize>,
}

impl PanelVisualizer {
    /// Create a visualizer with the default canvas size
    pub fn new() -> Self {
        Self::with_dimensions(DEFAULT_DIMENSIONS)
    }

    /// Create a visualizer with an explicit canvas size
    pub fn with_dimensions(dimensions: (u32, u32)) -> Self {
        Self {
            dimensions,
            threshold: None,
            panels: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Number of columns recorded so far
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    fn panel_mut(&mut self, column: &str) -> &mut Panel {
        let i = *self.by_name.entry(column.to_string()).or_insert_with(|| {
            self.panels.push(Panel {
                column: column.to_string(),
                index: Vec::new(),
                values: Vec::new(),
                scores: Vec::new(),
                anomalies: Vec::new(),
            });
            self.panels.len() - 1
        });
        &mut self.panels[i]
    }

    fn draw_panel(
        panel: &Panel,
        area: &DrawingArea<SVGBackend<'_>, plotters::coord::Shift>,
    ) -> Result<()> {
        let finite: Vec<(NaiveDateTime, f64)> = panel
            .index
            .iter()
            .zip(&panel.values)
            .filter(|(_, v)| v.is_finite())
            .map(|(&t, &v)| (t, v))
            .collect();
        if finite.is_empty() {
            return Ok(());
        }

        let mut x_min = finite.iter().map(|(t, _)| *t).min().unwrap();
        let mut x_max = finite.iter().map(|(t, _)| *t).max().unwrap();
        if x_min == x_max {
            x_min = x_min - Duration::days(1);
            x_max = x_max + Duration::days(1);
        }

        let mut y_min = finite.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
        let mut y_max = finite
            .iter()
            .map(|(_, v)| *v)
            .fold(f64::NEG_INFINITY, f64::max);
        if y_min == y_max {
            y_min -= 1.0;
            y_max += 1.0;
        }
        let pad = (y_max - y_min) * 0.05;

        let max_score = panel
            .scores
            .iter()
            .copied()
            .filter(|s| s.is_finite())
            .fold(0.0_f64, |acc, s| acc.max(s.abs()));
        let caption = format!(
            "{} ({} anomalies, max |z| {:.2})",
            panel.column,
            panel.anomalies.len(),
            max_score
        );

        let mut chart = ChartBuilder::on(area)
            .caption(caption, ("sans-serif", 18))
            .margin(8)
            .x_label_area_size(28)
            .y_label_area_size(48)
            .build_cartesian_2d(
                RangedDateTime::<NaiveDateTime>::from(x_min..x_max),
                (y_min - pad)..(y_max + pad),
            )
            .map_err(|e| Error::Visualization(e.to_string()))?;

        chart
            .configure_mesh()
            .x_labels(5)
            .y_labels(5)
            .x_label_formatter(&|ts: &NaiveDateTime| ts.format("%Y-%m-%d").to_string())
            .draw()
            .map_err(|e| Error::Visualization(e.to_string()))?;

        chart
            .draw_series(LineSeries::new(finite.iter().copied(), &BLUE))
            .map_err(|e| Error::Visualization(e.to_string()))?
            .label("value")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], &BLUE));

        chart
            .draw_series(
                panel
                    .anomalies
                    .iter()
                    .map(|p| Circle::new((p.timestamp, p.value), 4, RED.filled())),
            )
            .map_err(|e| Error::Visualization(e.to_string()))?
            .label("anomaly")
            .legend(|(x, y)| Circle::new((x + 8, y), 4, RED.filled()));

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(|e| Error::Visualization(e.to_string()))?;

        Ok(())
    }
}

impl Default for PanelVisualizer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnomalyVisualizer for PanelVisualizer {
    fn record_threshold(&mut self, threshold: f64) -> Result<()> {
        self.threshold = Some(threshold);
        Ok(())
    }

    fn record_series(
        &mut self,
        column: &str,
        index: &[NaiveDateTime],
        values: &[f64],
    ) -> Result<()> {
        let panel = self.panel_mut(column);
        panel.index = index.to_vec();
        panel.values = values.to_vec();
        Ok(())
    }

    fn record_scores(&mut self, column: &str, scores: &[f64]) -> Result<()> {
        self.panel_mut(column).scores = scores.to_vec();
        Ok(())
    }

    fn record_anomalies(&mut self, column: &str, anomalies: &[AnomalousPoint]) -> Result<()> {
        self.panel_mut(column).anomalies = anomalies.to_vec();
        Ok(())
    }

    fn save_visualizations(&self, output_prefix: &str) -> Result<Vec<String>> {
        if self.panels.is_empty() {
            return Ok(vec![]);
        }

        let path = format!("{output_prefix}_anomalies.svg");
        {
            let root = SVGBackend::new(&path, self.dimensions).into_drawing_area();
            root.fill(&WHITE)
                .map_err(|e| Error::Visualization(e.to_string()))?;

            let title = match self.threshold {
                Some(t) => format!("Anomaly detection (threshold {t})"),
                None => "Anomaly detection".to_string(),
            };
            let root = root
                .titled(&title, ("sans-serif", 24))
                .map_err(|e| Error::Visualization(e.to_string()))?;

            // Two panels per grid row, like a subplot sheet
            let rows = self.panels.len().div_ceil(2);
            let areas = root.split_evenly((rows, 2));
            for (panel, area) in self.panels.iter().zip(areas.iter()) {
                Self::draw_panel(panel, area)?;
            }

            root.present()
                .map_err(|e| Error::Visualization(e.to_string()))?;
        }

        debug!(path = %path, panels = self.panels.len(), "visualization saved");
        Ok(vec![path])
    }
}

/// Render an already-computed detection result over its table
///
/// Convenience for callers that ran a plain pass without hooks. Returns
/// the paths of the generated files.
pub fn render_detection(
    table: &TimeIndexedTable,
    result: &DetectionResult,
    output_prefix: &str,
) -> Result<Vec<String>> {
    let mut visualizer = PanelVisualizer::new();
    visualizer.record_threshold(result.threshold())?;
    for detection in result.columns() {
        // Only source columns have detections; values are still in the table
        if let Some(values) = table.values(detection.column()) {
            visualizer.record_series(detection.column(), table.index(), values)?;
            visualizer.record_scores(detection.column(), detection.scores())?;
            visualizer.record_anomalies(detection.column(), detection.anomalies())?;
        }
    }
    visualizer.save_visualizations(output_prefix)
}
