//! Single-value storage for the element a producer is currently handing out.
//!
//! A [`ValueSlot`] holds at most one live value. Storing a new value drops the
//! resident one first, so two produced values are never alive inside a slot at
//! the same time.
//!
//! Reference elements need no special wrapper: a `ValueSlot<&U>` stores the
//! reference itself. It is rebound on every store and never owns, copies, or
//! drops the referent.

/// Storage for at most one produced value.
#[derive(Debug)]
pub struct ValueSlot<T> {
    value: Option<T>,
}

impl<T> ValueSlot<T> {
    /// Create an empty slot.
    pub const fn new() -> Self {
        Self { value: None }
    }

    /// Returns `true` if a value is resident.
    #[inline]
    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Store `value`, dropping the resident value first.
    pub fn emplace(&mut self, value: T) -> &mut T {
        self.reset();
        self.value.insert(value)
    }

    /// Drop the resident value, if any.
    #[inline]
    pub fn reset(&mut self) {
        drop(self.value.take());
    }

    /// Borrow the resident value.
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Move the resident value out, leaving the slot empty.
    pub fn take(&mut self) -> Option<T> {
        self.value.take()
    }
}

impl<T> Default for ValueSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
