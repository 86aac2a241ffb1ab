use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Opaque handle of one requested animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameHandle(u64);

impl FrameHandle {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// The host environment's "next frame" primitive.
///
/// Requesting a frame never blocks; the environment later calls
/// `SceneHost::on_animation_frame` with the returned handle. Cancelling a
/// handle that already fired is a no-op.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

#[derive(Debug, Default)]
struct ManualQueue {
    next_id: u64,
    pending: Vec<FrameHandle>,
    cancelled: usize,
}

/// Scheduler driven by hand, for tests and headless hosts.
///
/// Clones share one queue, so a test can keep a clone and fire the frames the
/// host requested.
#[derive(Debug, Clone, Default)]
pub struct ManualFrameScheduler {
    queue: Rc<RefCell<ManualQueue>>,
}

impl ManualFrameScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requested, not yet fired or cancelled handles.
    #[must_use]
    pub fn pending(&self) -> Vec<FrameHandle> {
        self.queue.borrow().pending.clone()
    }

    /// Removes and returns every pending handle, as a display refresh would.
    #[must_use]
    pub fn take_due(&self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.queue.borrow_mut().pending)
    }

    #[must_use]
    pub fn cancelled_count(&self) -> usize {
        self.queue.borrow().cancelled
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let mut queue = self.queue.borrow_mut();
        queue.next_id += 1;
        let handle = FrameHandle::new(queue.next_id);
        queue.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let mut queue = self.queue.borrow_mut();
        if let Some(position) = queue.pending.iter().position(|entry| *entry == handle) {
            queue.pending.remove(position);
            queue.cancelled += 1;
        }
    }
}
