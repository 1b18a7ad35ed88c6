//! Queue of `ClientEvent`s from the view controllers to the shell.
//!
//! Controllers push from spawned request tasks; the app takes the batch at
//! the start of a frame and repaints only when something arrived. A view
//! unmounted mid-request emits nothing when the request settles.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use unibot_types::event::ClientEvent;

/// Cloned into every controller; all clones share one queue.
#[derive(Clone, Default)]
pub struct EventBus {
    queue: Rc<RefCell<VecDeque<ClientEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, event: ClientEvent) {
        log::trace!("Event: {:?}", event);
        self.queue.borrow_mut().push_back(event);
    }

    /// Everything queued so far, oldest first.
    pub fn drain(&self) -> Vec<ClientEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.borrow().is_empty()
    }

    /// The queued batch, or `None` when the frame has nothing to react to.
    pub fn take_pending(&self) -> Option<Vec<ClientEvent>> {
        if !self.has_pending() {
            return None;
        }
        Some(self.drain())
    }
}
