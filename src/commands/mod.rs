//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod models;
pub mod overlay;
pub mod plot;
pub mod utils;

// Re-export main command functions
pub use models::{OverlayArgs, PlotArgs};
pub use overlay::{collect_series, execute_overlay, validate_overlay_args};
pub use plot::{execute_plot, load_series, validate_plot_args};
