//! linemorph - animated line-chart paths with continuous transitions.
//!
//! This is the main umbrella crate. It re-exports the frame facility from
//! `linemorph-core`, exposes the path types of `linemorph-render` under
//! [`render`], and adds the animation layer on top:
//!
//! - [`AnimationDriver`]: the Idle/Animating state machine behind every
//!   animated path
//! - [`AnimatedPathWidget`]: a driver bundled with its sink and scheduler
//! - [`LineChart`]: a line and its shadow, animated between data sets
//! - [`ChartConfig`] and [`AnimationConfig`]: TOML-loadable settings
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use linemorph::render::RecordingSink;
//! use linemorph::{ChartConfig, LineChart, SharedFrameQueue};
//!
//! let frames = SharedFrameQueue::new();
//! let config = ChartConfig::from_toml_str("[animation]\nanimation_duration_ms = 200")?;
//! let mut chart = LineChart::new(RecordingSink::new(), RecordingSink::new(), frames.clone(), config);
//!
//! chart.set_size(320.0, 120.0)?;
//! chart.set_data_points(&[3.0, 8.0, 5.0])?;
//! chart.set_data_points(&[4.0, 2.0, 9.0, 6.0])?;
//!
//! // The host pumps frames once per display refresh.
//! let mut now = Duration::ZERO;
//! while chart.is_animating() {
//!     for frame in frames.advance(now) {
//!         chart.on_frame(frame)?;
//!     }
//!     now += Duration::from_millis(16);
//! }
//! assert_eq!(chart.line().current_path(), chart.line_path().as_ref());
//! # Ok::<(), linemorph::AnimationError>(())
//! ```

pub use linemorph_core::*;

/// Path descriptors, interpolation and sinks.
pub mod render {
    pub use linemorph_render::*;
}

pub mod chart;
pub mod config;
pub mod driver;
mod error;
pub mod widget;

pub use chart::{LineChart, LinearScale};
pub use config::{AnimationConfig, ChartConfig, ContentInset};
pub use driver::{AnimationDriver, DriverState, FrameOutcome, RequestOutcome, SnapReason};
pub use error::{AnimationError, AnimationResult};
pub use widget::{AnimatedPathProps, AnimatedPathWidget};
