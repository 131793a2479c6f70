//! Rendering sinks.
//!
//! A sink is the surface a path is painted onto. linemorph never paints by
//! itself; it hands finished paths to a [`PathSink`] and expects the sink to
//! repaint synchronously.

use lyon::path::Path as LyonPath;

use crate::path::to_lyon_path;
use crate::types::Path;

/// Error returned by a sink that failed to apply a path.
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// A surface that can display a path.
pub trait PathSink {
    /// Replace the displayed path with `path` and repaint.
    fn apply_path(&mut self, path: &Path) -> Result<(), SinkError>;
}

impl<S: PathSink + ?Sized> PathSink for &mut S {
    fn apply_path(&mut self, path: &Path) -> Result<(), SinkError> {
        (**self).apply_path(path)
    }
}

impl<S: PathSink + ?Sized> PathSink for Box<S> {
    fn apply_path(&mut self, path: &Path) -> Result<(), SinkError> {
        (**self).apply_path(path)
    }
}

/// A sink that records every path it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    applied: Vec<Path>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every path applied so far, oldest first.
    pub fn applied(&self) -> &[Path] {
        &self.applied
    }

    /// The most recently applied path.
    pub fn last(&self) -> Option<&Path> {
        self.applied.last()
    }

    /// Number of `apply_path` calls.
    pub fn len(&self) -> usize {
        self.applied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    /// Forget all recorded paths.
    pub fn clear(&mut self) {
        self.applied.clear();
    }
}

impl PathSink for RecordingSink {
    fn apply_path(&mut self, path: &Path) -> Result<(), SinkError> {
        self.applied.push(path.clone());
        Ok(())
    }
}

/// A sink that keeps the latest path converted to lyon's format, ready for
/// tessellation by a lyon-based renderer.
#[derive(Debug, Clone, Default)]
pub struct LyonSink {
    path: Option<LyonPath>,
    revision: u64,
}

impl LyonSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The latest converted path.
    pub fn path(&self) -> Option<&LyonPath> {
        self.path.as_ref()
    }

    /// Number of paths applied so far. Renderers compare it to decide whether
    /// to re-tessellate.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl PathSink for LyonSink {
    fn apply_path(&mut self, path: &Path) -> Result<(), SinkError> {
        self.path = Some(to_lyon_path(path));
        self.revision += 1;
        Ok(())
    }
}
