//! Frame scheduling for linemorph.
//!
//! Provides a host-driven equivalent of `requestAnimationFrame`: callers
//! request a frame and receive a [`FrameId`] that can be used to cancel it.
//! The host calls [`FrameQueue::advance`] once per display refresh, which
//! drains every pending request and stamps them with the refresh timestamp.
//! The host then delivers each [`Frame`] to its owner.
//!
//! Everything runs on one logical thread. Frames requested while the host is
//! delivering a tick are not part of that tick; they fire on the next one.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::error::{FrameError, Result};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a requested frame.
    pub struct FrameId;
}

/// A frame delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// The request this frame answers.
    pub id: FrameId,
    /// Host timestamp of the refresh, measured from an arbitrary epoch.
    pub timestamp: Duration,
}

/// Something that can schedule and cancel frame callbacks.
pub trait FrameScheduler {
    /// Request a callback on the next frame.
    fn request_frame(&mut self) -> FrameId;

    /// Cancel a requested frame before it is delivered.
    ///
    /// Returns an error if the frame was never requested, already drained by
    /// the host, or already cancelled.
    fn cancel_frame(&mut self, id: FrameId) -> Result<()>;

    /// Check if a frame is still waiting to be drained.
    fn is_pending(&self, id: FrameId) -> bool;
}

/// Internal bookkeeping for a requested frame.
#[derive(Debug, Clone, Copy)]
struct FrameRequest {
    /// Monotonic request counter, for ordering diagnostics.
    sequence: u64,
}

/// Queue of pending frame requests.
#[derive(Debug, Default)]
pub struct FrameQueue {
    /// Requests that have not been drained or cancelled.
    requests: SlotMap<FrameId, FrameRequest>,
    /// Ids of `requests`, in request order.
    order: VecDeque<FrameId>,
    /// Timestamp of the most recent tick.
    last_timestamp: Option<Duration>,
    /// Next request sequence number.
    next_sequence: u64,
}

impl FrameQueue {
    /// Create an empty frame queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain every pending request and stamp it with `timestamp`.
    ///
    /// Frames are returned in request order. Timestamps never go backwards:
    /// a timestamp earlier than the previous tick is clamped to it.
    #[tracing::instrument(skip(self), target = "linemorph::frame", level = "trace")]
    pub fn advance(&mut self, timestamp: Duration) -> Vec<Frame> {
        let timestamp = match self.last_timestamp {
            Some(last) if timestamp < last => {
                tracing::warn!(
                    target: targets::FRAME,
                    ?timestamp,
                    ?last,
                    "frame timestamp went backwards; clamping"
                );
                last
            }
            _ => timestamp,
        };
        self.last_timestamp = Some(timestamp);

        let mut frames = Vec::with_capacity(self.requests.len());
        while let Some(id) = self.order.pop_front() {
            let Some(request) = self.requests.remove(id) else {
                continue;
            };
            tracing::trace!(
                target: targets::FRAME,
                ?id,
                sequence = request.sequence,
                "frame fired"
            );
            frames.push(Frame { id, timestamp });
        }

        frames
    }

    /// Get the number of pending requests.
    pub fn pending_count(&self) -> usize {
        self.requests.len()
    }

    /// Get the timestamp of the most recent tick.
    pub fn last_timestamp(&self) -> Option<Duration> {
        self.last_timestamp
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameId {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let id = self.requests.insert(FrameRequest { sequence });
        self.order.push_back(id);

        tracing::trace!(target: targets::FRAME, ?id, sequence, "frame requested");
        id
    }

    fn cancel_frame(&mut self, id: FrameId) -> Result<()> {
        if self.requests.remove(id).is_some() {
            self.order.retain(|&queued| queued != id);
            tracing::trace!(target: targets::FRAME, ?id, "frame cancelled");
            Ok(())
        } else {
            Err(FrameError::InvalidFrameId.into())
        }
    }

    fn is_pending(&self, id: FrameId) -> bool {
        self.requests.contains_key(id)
    }
}

/// A cloneable handle to a [`FrameQueue`] shared by every widget on one
/// rendering thread.
#[derive(Debug, Clone, Default)]
pub struct SharedFrameQueue {
    inner: Arc<Mutex<FrameQueue>>,
}

impl SharedFrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain every pending request. See [`FrameQueue::advance`].
    ///
    /// The lock is released before the frames are returned, so owners may
    /// request new frames while handling them.
    pub fn advance(&self, timestamp: Duration) -> Vec<Frame> {
        self.inner.lock().advance(timestamp)
    }

    pub fn pending_count(&self) -> usize {
        self.inner.lock().pending_count()
    }

    pub fn last_timestamp(&self) -> Option<Duration> {
        self.inner.lock().last_timestamp()
    }
}

impl FrameScheduler for SharedFrameQueue {
    fn request_frame(&mut self) -> FrameId {
        self.inner.lock().request_frame()
    }

    fn cancel_frame(&mut self, id: FrameId) -> Result<()> {
        self.inner.lock().cancel_frame(id)
    }

    fn is_pending(&self, id: FrameId) -> bool {
        self.inner.lock().is_pending(id)
    }
}

static_assertions::assert_impl_all!(SharedFrameQueue: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_advance_drains_in_request_order() {
        let mut queue = FrameQueue::new();
        let a = queue.request_frame();
        let b = queue.request_frame();
        assert_eq!(queue.pending_count(), 2);

        let frames = queue.advance(ms(16));
        assert_eq!(
            frames,
            vec![
                Frame { id: a, timestamp: ms(16) },
                Frame { id: b, timestamp: ms(16) },
            ]
        );
        assert_eq!(queue.pending_count(), 0);
        assert!(queue.advance(ms(32)).is_empty());
    }

    #[test]
    fn test_cancelled_frame_never_fires() {
        let mut queue = FrameQueue::new();
        let a = queue.request_frame();
        let b = queue.request_frame();

        assert!(queue.cancel_frame(a).is_ok());
        assert!(!queue.is_pending(a));
        assert!(queue.is_pending(b));

        let frames = queue.advance(ms(16));
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].id, b);
    }

    #[test]
    fn test_cancel_releases_order_slot() {
        let mut queue = FrameQueue::new();
        let keep = queue.request_frame();
        for _ in 0..1000 {
            let id = queue.request_frame();
            queue.cancel_frame(id).unwrap();
        }
        assert_eq!(queue.order.len(), 1);
        assert_eq!(queue.pending_count(), 1);

        let frames = queue.advance(ms(16));
        assert_eq!(frames, vec![Frame { id: keep, timestamp: ms(16) }]);
    }

    #[test]
    fn test_cancel_twice_is_error() {
        let mut queue = FrameQueue::new();
        let a = queue.request_frame();
        assert!(queue.cancel_frame(a).is_ok());
        assert!(queue.cancel_frame(a).is_err());
    }

    #[test]
    fn test_cancel_after_drain_is_error() {
        let mut queue = FrameQueue::new();
        let a = queue.request_frame();
        queue.advance(ms(16));
        assert!(queue.cancel_frame(a).is_err());
    }

    #[test]
    fn test_request_during_tick_fires_next_tick() {
        let mut queue = FrameQueue::new();
        queue.request_frame();

        let frames = queue.advance(ms(16));
        assert_eq!(frames.len(), 1);

        // Owner reschedules while handling the frame.
        let next = queue.request_frame();
        let frames = queue.advance(ms(33));
        assert_eq!(frames, vec![Frame { id: next, timestamp: ms(33) }]);
    }

    #[test]
    fn test_timestamps_never_go_backwards() {
        let mut queue = FrameQueue::new();
        queue.request_frame();
        queue.advance(ms(100));

        let id = queue.request_frame();
        let frames = queue.advance(ms(50));
        assert_eq!(frames, vec![Frame { id, timestamp: ms(100) }]);
        assert_eq!(queue.last_timestamp(), Some(ms(100)));
    }

    #[test]
    fn test_shared_queue_handles_see_same_requests() {
        let shared = SharedFrameQueue::new();
        let mut handle = shared.clone();

        let id = handle.request_frame();
        assert!(shared.is_pending(id));
        assert_eq!(shared.pending_count(), 1);

        let frames = shared.advance(ms(16));
        assert_eq!(frames.len(), 1);
        assert!(!handle.is_pending(id));
    }
}
