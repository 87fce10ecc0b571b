//! Animation frame scheduling.
//!
//! A frame request is a promise to call back into the canvas for one sprite
//! on a later tick. Frames requested while a tick is running belong to the
//! next tick, so a sprite never has two frames in flight.

use tracing::trace;

use crate::sprite::SpriteId;

/// Cancellation token for a requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

pub trait FrameScheduler {
    fn request_frame(&mut self, sprite: SpriteId) -> FrameHandle;

    /// Cancel a pending frame. Unknown, cancelled and fired handles are
    /// ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Take every frame that is due on this tick.
    fn due_frames(&mut self) -> Vec<(FrameHandle, SpriteId)>;
}

/// Runs each requested frame on the next tick.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next: u64,
    pending: Vec<(FrameHandle, SpriteId)>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self, sprite: SpriteId) -> FrameHandle {
        let handle = FrameHandle(self.next);
        self.next += 1;
        trace!(?handle, ?sprite, "frame requested");
        self.pending.push((handle, sprite));
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|&(h, _)| h != handle);
    }

    fn due_frames(&mut self) -> Vec<(FrameHandle, SpriteId)> {
        std::mem::take(&mut self.pending)
    }
}
