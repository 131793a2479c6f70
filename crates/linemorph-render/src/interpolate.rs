//! Time-parameterized interpolation between two paths.

use linemorph_core::targets;

use crate::error::PathResult;
use crate::normalize::{NormalizedPair, normalize_pair};
use crate::types::{Path, Point};

/// A pure function from progress in `[0, 1]` to a path.
///
/// Built once from a source and a target path and never mutated. At progress
/// 0 it returns the source exactly, at progress 1 the target exactly; in
/// between it blends the normalized coordinates of both paths linearly, so
/// every coordinate moves monotonically from its source to its target value.
///
/// # Example
///
/// ```
/// use linemorph_render::{Path, PathInterpolator, Point};
///
/// let a = Path::polyline([Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
/// let b = Path::polyline([Point::new(0.0, 10.0), Point::new(10.0, 10.0)]);
///
/// let interpolator = PathInterpolator::new(&a, &b).unwrap();
/// assert_eq!(interpolator.at(0.0), a);
/// assert_eq!(interpolator.at(1.0), b);
/// assert_eq!(interpolator.at(0.5).to_string(), "M0,5L10,5");
/// ```
#[derive(Debug, Clone)]
pub struct PathInterpolator {
    source: Path,
    target: Path,
    normalized: NormalizedPair,
}

impl PathInterpolator {
    /// Build an interpolator from `source` to `target`.
    ///
    /// Fails with [`PathError::IncompatiblePath`](crate::PathError::IncompatiblePath)
    /// when the paths cannot be normalized to a common structure.
    #[tracing::instrument(skip_all, target = "linemorph::interpolate", level = "trace")]
    pub fn new(source: &Path, target: &Path) -> PathResult<Self> {
        let normalized = normalize_pair(source, target)?;
        tracing::trace!(
            target: targets::INTERPOLATE,
            commands = normalized.kinds.len(),
            "built interpolator"
        );

        Ok(Self {
            source: source.clone(),
            target: target.clone(),
            normalized,
        })
    }

    /// The path returned at progress 0.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The path returned at progress 1.
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Evaluate the interpolation at `progress`.
    ///
    /// Progress outside `[0, 1]` is clamped; NaN is treated as 0.
    pub fn at(&self, progress: f32) -> Path {
        // Written so that NaN falls into the first branch.
        if !(progress > 0.0) {
            return self.source.clone();
        }
        if progress >= 1.0 {
            return self.target.clone();
        }
        self.normalized.build(&self.points_at(progress))
    }

    fn points_at(&self, progress: f32) -> Vec<Point> {
        self.normalized
            .source
            .iter()
            .zip(&self.normalized.target)
            .map(|(a, b)| a.lerp(*b, progress))
            .collect()
    }
}
