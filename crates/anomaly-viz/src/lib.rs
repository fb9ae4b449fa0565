//! Rendering of detected anomalies
//!
//! The thin presentation collaborator for the detection layer: a
//! [`PanelVisualizer`] implements `anomaly_detect`'s visualizer trait and
//! renders each recorded source column as a sub-chart (line series with
//! flagged rows as red markers) into a single SVG. All computation happens
//! upstream; this crate only draws what a pass recorded.

mod panel;

pub use panel::{render_detection, PanelVisualizer, DEFAULT_DIMENSIONS};

// The hooks this crate implements
pub use anomaly_detect::AnomalyVisualizer;
