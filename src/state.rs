//! Per-frame state shared between producer logic and the consuming side.

use std::cell::{Cell, Ref, RefCell};

use crate::slot::ValueSlot;

/// Completion status of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The producer may still yield.
    Running,
    /// The producer ran to completion.
    Finished,
    /// The producer panicked or broke the suspension protocol.
    Failed,
}

/// The state object attached to one frame.
///
/// Holds exactly one [`ValueSlot`]. Producer logic writes it through
/// [`yield_value`](Self::yield_value); the frame driver calls
/// [`finalize`](Self::finalize) when the producer returns; the consumer reads
/// it through [`get`](Self::get) and [`take`](Self::take).
#[derive(Debug)]
pub struct ProducerState<T> {
    slot: RefCell<ValueSlot<T>>,
    status: Cell<Status>,
}

impl<T> ProducerState<T> {
    pub(crate) fn new() -> Self {
        Self {
            slot: RefCell::new(ValueSlot::new()),
            status: Cell::new(Status::Running),
        }
    }

    /// Hand `value` to the consumer, dropping the previously resident one.
    ///
    /// Called by producer bodies from [`Body::resume`](crate::Body::resume).
    ///
    /// # Panics
    ///
    /// Panics if the consumer still holds a borrow of the current value.
    pub fn yield_value(&self, value: T) {
        self.slot.borrow_mut().emplace(value);
    }

    /// Mark the producer as finished and drop any resident value.
    ///
    /// Calling it more than once has no further effect.
    pub(crate) fn finalize(&self) {
        self.slot.borrow_mut().reset();
        if self.status.get() == Status::Running {
            self.status.set(Status::Finished);
        }
    }

    /// Generators cannot be cancelled from the outside; this is always `false`.
    pub fn cancellation_requested(&self) -> bool {
        false
    }

    /// Current completion status.
    pub fn status(&self) -> Status {
        self.status.get()
    }

    /// Returns `true` once the producer finished or failed.
    pub fn is_done(&self) -> bool {
        self.status.get() != Status::Running
    }

    /// Returns `true` if a yielded value is waiting to be read.
    pub fn has_value(&self) -> bool {
        self.slot.borrow().has_value()
    }

    /// Borrow the current value, if one is resident.
    pub fn get(&self) -> Option<Ref<'_, T>> {
        Ref::filter_map(self.slot.borrow(), |slot| slot.get()).ok()
    }

    /// Move the current value out, leaving the slot empty.
    pub fn take(&self) -> Option<T> {
        self.slot.borrow_mut().take()
    }

    pub(crate) fn clear(&self) {
        self.slot.borrow_mut().reset();
    }

    pub(crate) fn fail(&self) {
        self.slot.borrow_mut().reset();
        self.status.set(Status::Failed);
    }
}
