//! Output writers for charts and series data.
//!
//! This module handles:
//! - Step charts (saved PNG/SVG, or shown in a viewer)
//! - JSON series exports

pub mod chart;
pub mod json;
pub mod viewer;

// Re-export main functions
pub use chart::{emit_chart, post_step_points, render_chart, ChartConfig, ChartOutput};
pub use json::{read_series_json, write_series_json};
pub use viewer::ChartViewer;
