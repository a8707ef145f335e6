//! Single-pending scheduled tasks.
//!
//! Every timer-driven transition in the page (happy revert, speech revert,
//! pupil debounce, modal reveal / teardown) is represented by a [`TaskSlot`].
//! Arming the slot hands out a fresh [`TaskId`] and supersedes whatever was
//! pending; when a timer fires it reports its id back and only the id that is
//! still pending is honoured. Overlapping timers therefore can never race:
//! the most recently armed one wins and stale ones are dropped on the floor.

/// Identifier of one scheduled task. Ids are unique per slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u32);

/// Holder of at most one pending task.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskSlot {
    pending: Option<TaskId>,
    next: u32,
}

impl TaskSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a new task, cancelling the pending one (if any).
    pub fn arm(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        self.pending = Some(id);
        id
    }

    /// Consume a firing task. Returns `true` only when `id` was the pending task.
    pub fn fire(&mut self, id: TaskId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<TaskId> {
        self.pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
