pub mod svg;
pub mod text;

/// Shown instead of a chart when the window has no readings.
pub const NO_DATA_MESSAGE: &str = "Not enough data to draw the chart yet.";
