//! Error types for the render crate.

use thiserror::Error;

/// Errors that can occur while preparing paths for interpolation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// The two paths cannot be reconciled into a common structure.
    #[error("incompatible paths: {0}")]
    IncompatiblePath(#[from] Incompatibility),
}

/// Why two paths could not be normalized to a common structure.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Incompatibility {
    /// One path is empty and the other is not.
    #[error("cannot interpolate between an empty and a non-empty path")]
    EmptyPath,

    /// A drawing command appears before any move-to.
    #[error("path draws before its first move-to")]
    MissingMoveTo,

    /// Paired subpaths disagree on whether they are closed.
    #[error("subpath {subpath} is closed in one path but open in the other")]
    ClosedMismatch { subpath: usize },

    /// A coordinate is NaN or infinite.
    #[error("path contains a non-finite coordinate")]
    NonFiniteCoordinate,
}

/// Result type for path operations.
pub type PathResult<T> = Result<T, PathError>;
