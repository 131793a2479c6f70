//! Error types for linemorph core systems.

use std::fmt;

/// The main error type for linemorph core operations.
#[derive(Debug)]
pub enum CoreError {
    /// Frame-scheduling error.
    Frame(FrameError),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Frame(err) => write!(f, "Frame error: {err}"),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Frame(err) => Some(err),
        }
    }
}

/// Frame-scheduling errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// The frame ID is invalid, has already fired, or was cancelled.
    InvalidFrameId,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFrameId => write!(f, "Invalid, fired, or cancelled frame ID"),
        }
    }
}

impl std::error::Error for FrameError {}

impl From<FrameError> for CoreError {
    fn from(err: FrameError) -> Self {
        Self::Frame(err)
    }
}

/// A specialized Result type for linemorph core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_frame_error_display() {
        let err: CoreError = FrameError::InvalidFrameId.into();
        assert_eq!(
            err.to_string(),
            "Frame error: Invalid, fired, or cancelled frame ID"
        );
        assert!(err.source().is_some());
    }
}
