//! Path descriptors and path interpolation for linemorph.
//!
//! This crate holds the pure, stateless half of path animation:
//!
//! - [`Path`] and [`PathCommand`]: the path descriptor value type
//! - [`PathInterpolator`]: blends two paths over progress in `[0, 1]`
//! - [`PathSink`]: the surface finished paths are handed to
//! - [`to_lyon_path`]: conversion for hosts that render with lyon
//!
//! # Interpolating Paths
//!
//! ```
//! use linemorph_render::{Path, PathInterpolator, Point};
//!
//! let from = Path::polyline([Point::new(0.0, 50.0), Point::new(100.0, 50.0)]);
//! let to = Path::polyline([
//!     Point::new(0.0, 80.0),
//!     Point::new(50.0, 20.0),
//!     Point::new(100.0, 60.0),
//! ]);
//!
//! // Paths with different segment counts are normalized first.
//! let interpolator = PathInterpolator::new(&from, &to)?;
//! let halfway = interpolator.at(0.5);
//! assert_eq!(halfway.len(), to.len());
//! # Ok::<(), linemorph_render::PathError>(())
//! ```

mod error;
mod interpolate;
mod normalize;
pub mod path;
pub mod sink;
mod types;

pub use error::{Incompatibility, PathError, PathResult};
pub use interpolate::PathInterpolator;
pub use path::to_lyon_path;
pub use sink::{LyonSink, PathSink, RecordingSink, SinkError};
pub use types::{Path, PathCommand, Point};
