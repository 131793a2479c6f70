//! An animated line chart.
//!
//! [`LineChart`] turns a series of values into two paths: the line itself
//! and a shadow drawn the same way but shifted down by
//! [`ChartConfig::shadow_offset`] data units. Each path is owned by its own
//! [`AnimatedPathWidget`], so changing the data or the size animates both.
//!
//! Values are laid out evenly along x. Along y the finite values are scaled
//! so the smallest sits at the bottom inset and the largest at the top one.
//! Non-finite values leave a gap in the line.

use linemorph_core::{Frame, FrameScheduler, SharedFrameQueue, targets};
use linemorph_render::{Path, PathSink, Point};

use crate::config::ChartConfig;
use crate::error::AnimationResult;
use crate::widget::{AnimatedPathProps, AnimatedPathWidget};

/// A linear map from a domain interval to a range interval.
///
/// A degenerate domain maps every value to the middle of the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f32, f32),
    range: (f32, f32),
}

impl LinearScale {
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f32, f32) {
        self.domain
    }

    pub fn range(&self) -> (f32, f32) {
        self.range
    }

    /// Map a domain value into the range.
    pub fn apply(&self, value: f32) -> f32 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let t = if span != 0.0 { (value - d0) / span } else { 0.5 };
        r0 + (r1 - r0) * t
    }
}

/// Smallest and largest finite value, if any.
fn finite_extent(values: &[f32]) -> Option<(f32, f32)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |extent, v| match extent {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// A line chart with a shadow, animated between data sets.
pub struct LineChart<S: PathSink, F: FrameScheduler + Clone = SharedFrameQueue> {
    line: AnimatedPathWidget<S, F>,
    shadow: AnimatedPathWidget<S, F>,
    config: ChartConfig,
    width: f32,
    height: f32,
    data: Vec<f32>,
}

impl<S: PathSink, F: FrameScheduler + Clone> LineChart<S, F> {
    /// Create an empty chart of zero size.
    ///
    /// Both widgets share `scheduler`; frames from it must be forwarded
    /// through [`on_frame`](Self::on_frame).
    pub fn new(line_sink: S, shadow_sink: S, scheduler: F, config: ChartConfig) -> Self {
        Self {
            line: AnimatedPathWidget::with_config(line_sink, scheduler.clone(), config.animation),
            shadow: AnimatedPathWidget::with_config(shadow_sink, scheduler, config.animation),
            config,
            width: 0.0,
            height: 0.0,
            data: Vec::new(),
        }
    }

    /// Set the chart's layout size and re-plot.
    pub fn set_size(&mut self, width: f32, height: f32) -> AnimationResult<()> {
        if (width, height) == (self.width, self.height) {
            return Ok(());
        }
        tracing::debug!(target: targets::CHART, width, height, "chart resized");
        self.width = width;
        self.height = height;
        self.update()
    }

    /// Replace the plotted values and re-plot.
    pub fn set_data_points(&mut self, data: &[f32]) -> AnimationResult<()> {
        self.data.clear();
        self.data.extend_from_slice(data);
        self.update()
    }

    /// Replace the configuration and re-plot.
    pub fn set_config(&mut self, config: ChartConfig) -> AnimationResult<()> {
        self.config = config;
        self.update()
    }

    /// Forward a host frame to both paths.
    ///
    /// Both paths see the frame even if the first one fails; the first error
    /// is returned.
    pub fn on_frame(&mut self, frame: Frame) -> AnimationResult<()> {
        let line = self.line.on_frame(frame);
        let shadow = self.shadow.on_frame(frame);
        line?;
        shadow?;
        Ok(())
    }

    /// Scale mapping data indices to x coordinates.
    pub fn x_scale(&self) -> LinearScale {
        let inset = self.config.content_inset;
        let last = self.data.len().saturating_sub(1) as f32;
        LinearScale::new((0.0, last), (inset.left, self.width - inset.right))
    }

    /// Scale mapping values to y coordinates, top-down. `None` without
    /// finite data.
    pub fn y_scale(&self) -> Option<LinearScale> {
        let inset = self.config.content_inset;
        finite_extent(&self.data)
            .map(|extent| LinearScale::new(extent, (self.height - inset.bottom, inset.top)))
    }

    /// The path of the line for the current data and size.
    pub fn line_path(&self) -> Option<Path> {
        self.plot(0.0)
    }

    /// The path of the shadow for the current data and size.
    pub fn shadow_path(&self) -> Option<Path> {
        self.plot(self.config.shadow_offset)
    }

    fn plot(&self, offset: f32) -> Option<Path> {
        let y = self.y_scale()?;
        let x = self.x_scale();

        let mut path = Path::new();
        let mut pen_down = false;
        for (index, &value) in self.data.iter().enumerate() {
            if !value.is_finite() {
                pen_down = false;
                continue;
            }
            let point = Point::new(x.apply(index as f32), y.apply(value - offset));
            if pen_down {
                path.line_to(point);
            } else {
                path.move_to(point);
                pen_down = true;
            }
        }
        Some(path)
    }

    #[tracing::instrument(skip_all, target = "linemorph::chart", level = "trace")]
    fn update(&mut self) -> AnimationResult<()> {
        let animation = self.config.animation;
        let line_props = AnimatedPathProps::new(self.line_path()).with_animation(animation);
        let shadow_props = AnimatedPathProps::new(self.shadow_path()).with_animation(animation);

        let line = self.line.set_props(line_props);
        let shadow = self.shadow.set_props(shadow_props);
        line?;
        shadow?;
        Ok(())
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn data_points(&self) -> &[f32] {
        &self.data
    }

    pub fn line(&self) -> &AnimatedPathWidget<S, F> {
        &self.line
    }

    pub fn shadow(&self) -> &AnimatedPathWidget<S, F> {
        &self.shadow
    }

    /// Check if either path is animating.
    pub fn is_animating(&self) -> bool {
        self.line.is_animating() || self.shadow.is_animating()
    }
}

impl<S: PathSink, F: FrameScheduler + Clone> std::fmt::Debug for LineChart<S, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineChart")
            .field("config", &self.config)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}
