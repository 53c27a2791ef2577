//! Configuration and constants for the CLI tools.

/// Download targets the collector script knows how to fetch.
///
/// Keep this in sync with the list printed by `trace.sh`.
pub const ALLOWED_FILES: &[&str] = &["1K.bin", "1M.bin", "1G.bin"];

/// Directory that collected trace logs are written into
pub const DEFAULT_TRACE_DIR: &str = "traces";

/// Collector script, resolved relative to the working directory
pub const DEFAULT_TRACE_SCRIPT: &str = "trace.sh";

/// Interpreter used to run the collector script
pub const DEFAULT_SHELL: &str = "bash";

/// Single-trace parsing stops once the running total exceeds this (12 MiB)
pub const EARLY_STOP_BYTES: u64 = 12 * 1024 * 1024;

// Output resolution: a 6.4 x 4.8 inch figure rendered at 150 DPI
pub const CHART_DPI: u32 = 150;
pub const FIGURE_SIZE_INCHES: (f64, f64) = (6.4, 4.8);

/// Pixel dimensions of a saved chart
pub fn chart_dimensions() -> (u32, u32) {
    let (w, h) = FIGURE_SIZE_INCHES;
    (
        (w * CHART_DPI as f64).round() as u32,
        (h * CHART_DPI as f64).round() as u32,
    )
}

/// Check a download target against [`ALLOWED_FILES`]
pub fn is_allowed_file(file_name: &str) -> bool {
    ALLOWED_FILES.contains(&file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_dimensions_at_150_dpi() {
        assert_eq!(chart_dimensions(), (960, 720));
    }

    #[test]
    fn test_allowed_files() {
        assert!(is_allowed_file("1M.bin"));
        assert!(!is_allowed_file("2M.bin"));
        assert!(!is_allowed_file(""));
    }
}
