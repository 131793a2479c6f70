//! A self-contained animated path component.
//!
//! [`AnimatedPathWidget`] bundles an [`AnimationDriver`] with the sink it
//! paints into and the frame scheduler it is driven by. Owners hand it new
//! paths through [`set_target`](AnimatedPathWidget::set_target) or
//! [`set_props`](AnimatedPathWidget::set_props), and forward host frames
//! through [`on_frame`](AnimatedPathWidget::on_frame).
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use linemorph::render::{Path, Point, RecordingSink};
//! use linemorph::{AnimatedPathWidget, SharedFrameQueue};
//!
//! let frames = SharedFrameQueue::new();
//! let mut widget = AnimatedPathWidget::new(RecordingSink::new(), frames.clone());
//!
//! let low = Path::polyline([Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
//! let high = Path::polyline([Point::new(0.0, 8.0), Point::new(10.0, 8.0)]);
//! let duration = Duration::from_millis(100);
//!
//! widget.set_target(Some(low), true, duration)?;
//! widget.set_target(Some(high.clone()), true, duration)?;
//!
//! for millis in [0, 50, 100] {
//!     for frame in frames.advance(Duration::from_millis(millis)) {
//!         widget.on_frame(frame)?;
//!     }
//! }
//! assert_eq!(widget.current_path(), Some(&high));
//! # Ok::<(), linemorph::AnimationError>(())
//! ```

use std::time::Duration;

use linemorph_core::{Frame, FrameScheduler, SharedFrameQueue, targets};
use linemorph_render::{Path, PathSink};

use crate::config::AnimationConfig;
use crate::driver::{AnimationDriver, FrameOutcome, RequestOutcome};
use crate::error::{AnimationError, AnimationResult};

/// Everything an owner passes to an [`AnimatedPathWidget`] on update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimatedPathProps {
    /// The path to display. `None` clears the sink.
    pub path: Option<Path>,
    pub animation: AnimationConfig,
}

impl AnimatedPathProps {
    pub fn new(path: Option<Path>) -> Self {
        Self {
            path,
            animation: AnimationConfig::default(),
        }
    }

    /// Set the animation configuration using builder pattern.
    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }
}

/// A path that animates towards every new target it is given.
///
/// Dropping the widget cancels its pending frame, so no sink write happens
/// after it is gone.
pub struct AnimatedPathWidget<S: PathSink, F: FrameScheduler = SharedFrameQueue> {
    driver: AnimationDriver,
    sink: S,
    scheduler: F,
    config: AnimationConfig,
}

impl<S: PathSink, F: FrameScheduler> AnimatedPathWidget<S, F> {
    /// Create a widget with the default animation configuration.
    pub fn new(sink: S, scheduler: F) -> Self {
        Self::with_config(sink, scheduler, AnimationConfig::default())
    }

    pub fn with_config(sink: S, scheduler: F, config: AnimationConfig) -> Self {
        Self {
            driver: AnimationDriver::new(),
            sink,
            scheduler,
            config,
        }
    }

    /// Request a new path with explicit animation settings.
    pub fn set_target(
        &mut self,
        path: Option<Path>,
        animate: bool,
        duration: Duration,
    ) -> AnimationResult<RequestOutcome> {
        let config = AnimationConfig::new()
            .with_animate(animate)
            .with_duration(duration);
        self.request(path, config)
    }

    /// Apply a full set of props.
    pub fn set_props(&mut self, props: AnimatedPathProps) -> AnimationResult<RequestOutcome> {
        self.request(props.path, props.animation)
    }

    fn request(
        &mut self,
        path: Option<Path>,
        config: AnimationConfig,
    ) -> AnimationResult<RequestOutcome> {
        self.config = config;
        let outcome =
            self.driver
                .request_target(path, config, &mut self.scheduler, &mut self.sink)?;
        tracing::trace!(target: targets::WIDGET, ?outcome, "target requested");
        Ok(outcome)
    }

    /// Forward a frame delivered by the host.
    pub fn on_frame(&mut self, frame: Frame) -> AnimationResult<FrameOutcome> {
        self.driver
            .on_frame(frame, &mut self.scheduler, &mut self.sink)
    }

    /// Whether the owner's regular render pass may repaint this widget.
    ///
    /// While animation is requested, the sink is only written from frames.
    #[inline]
    pub fn should_render(&self) -> bool {
        !self.config.animate
    }

    /// The owner's regular render pass.
    ///
    /// Returns `false` without touching the sink while animation is
    /// requested. Otherwise re-applies the current path and returns `true`.
    pub fn render(&mut self) -> AnimationResult<bool> {
        if !self.should_render() {
            tracing::trace!(target: targets::WIDGET, "render skipped while animating");
            return Ok(false);
        }
        let empty = Path::new();
        let path = self.driver.current_path().unwrap_or(&empty);
        self.sink.apply_path(path).map_err(AnimationError::Sink)?;
        Ok(true)
    }

    /// Cancel any pending frame and stop animating.
    pub fn teardown(&mut self) {
        self.driver.teardown(&mut self.scheduler);
    }

    /// Check if an animation is in progress.
    pub fn is_animating(&self) -> bool {
        self.driver.is_animating()
    }

    /// The last path applied to the sink.
    pub fn current_path(&self) -> Option<&Path> {
        self.driver.current_path()
    }

    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }

    /// The configuration of the latest request.
    pub fn config(&self) -> AnimationConfig {
        self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }
}

impl<S: PathSink, F: FrameScheduler> Drop for AnimatedPathWidget<S, F> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<S: PathSink, F: FrameScheduler> std::fmt::Debug for AnimatedPathWidget<S, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimatedPathWidget")
            .field("driver", &self.driver)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
