//! FrameQueue - 開発用のフレームスケジューラ
//!
//! `run_frame` を呼んだときに、そのフレームの開始前に積まれていた
//! コールバックだけを実行します。実行中に積まれたものは次のフレームへ回ります。

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use crate::ports::{FrameCallback, FrameScheduler};

#[derive(Default)]
pub struct FrameQueue {
    queue: RefCell<VecDeque<FrameCallback>>,
    frame: Cell<u64>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one frame. Returns the number of callbacks executed.
    pub fn run_frame(&self) -> usize {
        let due = std::mem::take(&mut *self.queue.borrow_mut());
        let frame = self.frame.get() + 1;
        self.frame.set(frame);

        let count = due.len();
        for callback in due {
            callback();
        }
        if count > 0 {
            tracing::trace!(frame, count, "frame callbacks ran");
        }
        count
    }

    /// Callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Number of frames run so far.
    pub fn frame(&self) -> u64 {
        self.frame.get()
    }
}

impl FrameScheduler for FrameQueue {
    fn schedule_next_frame(&self, callback: FrameCallback) {
        self.queue.borrow_mut().push_back(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn callbacks_wait_for_the_next_frame() {
        let frames = FrameQueue::new();
        let ran = Rc::new(Cell::new(0));

        let counter = ran.clone();
        frames.schedule_next_frame(Box::new(move || counter.set(counter.get() + 1)));

        assert_eq!(ran.get(), 0);
        assert_eq!(frames.pending(), 1);
        assert_eq!(frames.run_frame(), 1);
        assert_eq!(ran.get(), 1);
        assert_eq!(frames.run_frame(), 0);
        assert_eq!(frames.frame(), 2);
    }

    #[test]
    fn callbacks_scheduled_during_a_frame_run_on_the_following_one() {
        let frames = Rc::new(FrameQueue::new());
        let order = Rc::new(RefCell::new(Vec::new()));

        let inner_frames = frames.clone();
        let inner_order = order.clone();
        frames.schedule_next_frame(Box::new(move || {
            inner_order.borrow_mut().push("first");
            let later = inner_order.clone();
            inner_frames.schedule_next_frame(Box::new(move || later.borrow_mut().push("second")));
        }));

        frames.run_frame();
        assert_eq!(*order.borrow(), vec!["first"]);
        assert_eq!(frames.pending(), 1);

        frames.run_frame();
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }
}
