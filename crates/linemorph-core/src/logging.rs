//! Logging facilities for linemorph.
//!
//! linemorph uses the `tracing` crate for instrumentation. Library code never
//! installs a subscriber; to see logs, install one in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("linemorph::driver=debug")
//!         .init();
//! }
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Frame scheduling target.
    pub const FRAME: &str = "linemorph::frame";
    /// Path interpolation target.
    pub const INTERPOLATE: &str = "linemorph::interpolate";
    /// Animation driver target.
    pub const DRIVER: &str = "linemorph::driver";
    /// Animated path widget target.
    pub const WIDGET: &str = "linemorph::widget";
    /// Line chart target.
    pub const CHART: &str = "linemorph::chart";
    /// Performance spans target.
    pub const PERF: &str = "linemorph::perf";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for measuring the duration of a frame dispatch.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "linemorph::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_share_prefix() {
        for target in [
            targets::FRAME,
            targets::INTERPOLATE,
            targets::DRIVER,
            targets::WIDGET,
            targets::CHART,
            targets::PERF,
        ] {
            assert!(target.starts_with("linemorph::"));
        }
    }

    #[test]
    fn test_perf_span() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let _span = PerfSpan::new("test_operation");
    }
}
