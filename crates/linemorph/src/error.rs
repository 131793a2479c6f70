//! Error types for path animation.

use linemorph_core::CoreError;
use linemorph_render::{PathError, SinkError};
use thiserror::Error;

/// Errors surfaced by the animation driver, widgets and charts.
#[derive(Error, Debug)]
pub enum AnimationError {
    /// Two paths could not be interpolated.
    #[error("path error: {0}")]
    Path(#[from] PathError),

    /// The rendering sink failed to apply a path. The animation that was
    /// running, if any, has been torn down.
    #[error("rendering sink failed: {0}")]
    Sink(#[source] SinkError),

    /// The frame scheduler rejected an operation.
    #[error("frame error: {0}")]
    Frame(#[from] CoreError),

    /// A configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for animation operations.
pub type AnimationResult<T> = Result<T, AnimationError>;
