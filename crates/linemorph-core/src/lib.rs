//! Core systems for linemorph.
//!
//! This crate provides the foundational pieces shared by the rendering and
//! animation crates:
//!
//! - **Frames**: a host-driven frame scheduling facility with cancellation
//! - **Errors**: core error types
//! - **Logging**: `tracing` targets and performance spans
//!
//! # Frame Loop Example
//!
//! ```
//! use std::time::Duration;
//! use linemorph_core::{FrameQueue, FrameScheduler};
//!
//! let mut queue = FrameQueue::new();
//! let id = queue.request_frame();
//!
//! // Once per display refresh, the host drains the queue.
//! let frames = queue.advance(Duration::from_millis(16));
//! assert_eq!(frames[0].id, id);
//! ```

mod error;
pub mod frame;
pub mod logging;

pub use error::{CoreError, FrameError, Result};
pub use frame::{Frame, FrameId, FrameQueue, FrameScheduler, SharedFrameQueue};
pub use logging::{PerfSpan, targets};
