//! The path animation driver.
//!
//! [`AnimationDriver`] is a two-state machine. It is **Idle** when no
//! animation is running and **Animating** while exactly one
//! [`AnimationSession`] is live. A session owns the interpolator, a lazily
//! captured start timestamp, and the id of its one pending frame.
//!
//! Two paths are tracked separately:
//!
//! - the *target*: the last path requested by the owner, used to detect
//!   redundant requests and to decide whether there is anything to animate
//!   from;
//! - the *current* path: the last path actually applied to the sink.
//!
//! A sink failure keeps the target but marks it unapplied, so requesting the
//! same path again retries it.
//!
//! New animations always start from the current path. When an animation is
//! interrupted halfway, the replacement continues from what is on screen
//! instead of jumping back to where the interrupted animation started.

use std::time::Duration;

use linemorph_core::{Frame, FrameId, FrameScheduler, PerfSpan, targets};
use linemorph_render::{Path, PathInterpolator, PathSink};

use crate::config::AnimationConfig;
use crate::error::{AnimationError, AnimationResult};

/// Observable state of a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverState {
    /// No animation in progress.
    #[default]
    Idle,
    /// An animation session is live.
    Animating,
}

/// What a call to [`AnimationDriver::request_target`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The path equals the last requested target; nothing changed.
    Unchanged,
    /// The path was applied immediately.
    Snapped(SnapReason),
    /// A new animation session was started.
    Started,
}

/// Why a request was applied without animating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapReason {
    /// Animation is disabled by configuration.
    AnimationDisabled,
    /// The new path is absent.
    NoTarget,
    /// There is nothing to animate from.
    NoSource,
    /// The paths could not be interpolated.
    Incompatible,
}

/// What a frame callback did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// The frame does not belong to the live session.
    Ignored,
    /// An intermediate path was applied and the next frame requested.
    Continued { progress: f32 },
    /// The final path was applied; the driver is idle again.
    Completed,
}

/// One in-flight animation.
#[derive(Debug)]
struct AnimationSession {
    interpolator: PathInterpolator,
    duration: Duration,
    /// Captured from the first frame, not from the request.
    start: Option<Duration>,
    pending: Option<FrameId>,
}

impl AnimationSession {
    fn progress(&self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0) as f32
    }

    /// Request the next frame, cancelling any frame still pending first.
    fn schedule_next<F>(&mut self, scheduler: &mut F)
    where
        F: FrameScheduler + ?Sized,
    {
        cancel_pending(&mut self.pending, scheduler);
        self.pending = Some(scheduler.request_frame());
    }
}

fn cancel_pending<F>(pending: &mut Option<FrameId>, scheduler: &mut F)
where
    F: FrameScheduler + ?Sized,
{
    if let Some(id) = pending.take() {
        // A frame the host has already drained can no longer be cancelled;
        // it is dropped as stale when it arrives.
        if scheduler.cancel_frame(id).is_err() {
            tracing::trace!(target: targets::DRIVER, ?id, "pending frame already drained");
        }
    }
}

/// Drives the animation of one path.
#[derive(Debug, Default)]
pub struct AnimationDriver {
    session: Option<AnimationSession>,
    target: Option<Path>,
    /// Set when the sink failed before `target` was reached.
    target_unapplied: bool,
    current: Option<Path>,
}

impl AnimationDriver {
    /// Create an idle driver that has not rendered anything yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state.
    pub fn state(&self) -> DriverState {
        if self.session.is_some() {
            DriverState::Animating
        } else {
            DriverState::Idle
        }
    }

    /// Check if an animation is in progress.
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.session.is_some()
    }

    /// The last path applied to the sink.
    pub fn current_path(&self) -> Option<&Path> {
        self.current.as_ref()
    }

    /// The last path requested by the owner.
    pub fn target_path(&self) -> Option<&Path> {
        self.target.as_ref()
    }

    /// The frame the live session is waiting for.
    pub fn pending_frame(&self) -> Option<FrameId> {
        self.session.as_ref().and_then(|s| s.pending)
    }

    /// Request a new target path.
    ///
    /// Requests equal to the previous target are ignored. When animation is
    /// disabled, or either the new or the previous target is absent, the
    /// path is applied to `sink` immediately. Otherwise a new session starts
    /// from the current path and the first frame is requested.
    #[tracing::instrument(skip_all, target = "linemorph::driver", level = "trace")]
    pub fn request_target<F, S>(
        &mut self,
        target: Option<Path>,
        config: AnimationConfig,
        scheduler: &mut F,
        sink: &mut S,
    ) -> AnimationResult<RequestOutcome>
    where
        F: FrameScheduler + ?Sized,
        S: PathSink + ?Sized,
    {
        if !self.target_unapplied && target == self.target {
            tracing::trace!(target: targets::DRIVER, "target unchanged");
            return Ok(RequestOutcome::Unchanged);
        }

        let previous = std::mem::replace(&mut self.target, target.clone());
        self.target_unapplied = false;

        if !config.animate {
            return self.snap_to(target, SnapReason::AnimationDisabled, scheduler, sink);
        }
        let Some(next) = target else {
            return self.snap_to(None, SnapReason::NoTarget, scheduler, sink);
        };
        let source = match (&previous, &self.current) {
            (Some(_), Some(current)) => current,
            _ => return self.snap_to(Some(next), SnapReason::NoSource, scheduler, sink),
        };

        let interpolator = match PathInterpolator::new(source, &next) {
            Ok(interpolator) => interpolator,
            Err(err) => {
                tracing::warn!(target: targets::DRIVER, %err, "cannot animate path change; snapping");
                return self.snap_to(Some(next), SnapReason::Incompatible, scheduler, sink);
            }
        };

        self.cancel_session(scheduler);
        let mut session = AnimationSession {
            interpolator,
            duration: config.duration,
            start: None,
            pending: None,
        };
        session.schedule_next(scheduler);
        self.session = Some(session);

        tracing::debug!(
            target: targets::DRIVER,
            duration_ms = config.duration.as_millis() as u64,
            "animation started"
        );
        Ok(RequestOutcome::Started)
    }

    /// Handle a frame delivered by the host.
    ///
    /// Frames other than the one the live session is waiting for are ignored.
    /// On a sink failure the session is torn down and nothing is left pending.
    #[tracing::instrument(skip_all, target = "linemorph::driver", level = "trace")]
    pub fn on_frame<F, S>(
        &mut self,
        frame: Frame,
        scheduler: &mut F,
        sink: &mut S,
    ) -> AnimationResult<FrameOutcome>
    where
        F: FrameScheduler + ?Sized,
        S: PathSink + ?Sized,
    {
        let Some(session) = self.session.as_mut() else {
            return Ok(FrameOutcome::Ignored);
        };
        if session.pending != Some(frame.id) {
            tracing::trace!(target: targets::DRIVER, id = ?frame.id, "stale frame ignored");
            return Ok(FrameOutcome::Ignored);
        }
        session.pending = None;
        let _perf = PerfSpan::new("animation_frame");

        let start = *session.start.get_or_insert(frame.timestamp);
        let progress = session.progress(frame.timestamp.saturating_sub(start));
        let path = session.interpolator.at(progress);

        if let Err(err) = sink.apply_path(&path) {
            tracing::warn!(target: targets::DRIVER, %err, progress, "sink failed; animation stopped");
            self.session = None;
            self.target_unapplied = true;
            return Err(AnimationError::Sink(err));
        }
        self.current = Some(path);

        if progress >= 1.0 {
            self.session = None;
            tracing::debug!(target: targets::DRIVER, "animation complete");
            return Ok(FrameOutcome::Completed);
        }

        session.schedule_next(scheduler);
        Ok(FrameOutcome::Continued { progress })
    }

    /// Stop any animation and cancel its pending frame.
    ///
    /// The current path stays as it is; no further frame will be handled.
    pub fn teardown<F>(&mut self, scheduler: &mut F)
    where
        F: FrameScheduler + ?Sized,
    {
        if self.session.is_some() {
            tracing::debug!(target: targets::DRIVER, "animation torn down");
        }
        self.cancel_session(scheduler);
    }

    fn cancel_session<F>(&mut self, scheduler: &mut F)
    where
        F: FrameScheduler + ?Sized,
    {
        if let Some(mut session) = self.session.take() {
            cancel_pending(&mut session.pending, scheduler);
        }
    }

    /// Apply `target` immediately, without interpolation.
    fn snap_to<F, S>(
        &mut self,
        target: Option<Path>,
        reason: SnapReason,
        scheduler: &mut F,
        sink: &mut S,
    ) -> AnimationResult<RequestOutcome>
    where
        F: FrameScheduler + ?Sized,
        S: PathSink + ?Sized,
    {
        self.cancel_session(scheduler);

        let applied = match &target {
            Some(path) => sink.apply_path(path),
            None => sink.apply_path(&Path::new()),
        };
        if let Err(err) = applied {
            tracing::warn!(target: targets::DRIVER, %err, "sink failed while snapping");
            self.target_unapplied = true;
            return Err(AnimationError::Sink(err));
        }

        tracing::debug!(target: targets::DRIVER, ?reason, "snapped to target");
        self.current = target;
        Ok(RequestOutcome::Snapped(reason))
    }
}
