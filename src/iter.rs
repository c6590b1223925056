//! Single-pass iteration over a generator.
//!
//! [`Iter`] is a non-owning view of a generator's frame with the classic
//! begin/end protocol: it denotes the current value until
//! [`advance`](Iter::advance) resumes the producer, and it compares equal to
//! the end sentinel once the producer is done. It also implements
//! [`Iterator`], so it works with `for` loops and adapters.
//!
//! [`IntoIter`] owns the generator instead of borrowing it.
//!
//! # Examples
//!
//! The begin/end protocol:
//! ```rust
//! use lazyseq::prelude::*;
//!
//! let mut seq = Generator::new(|co| async move {
//!     co.yield_(1).await;
//!     co.yield_(2).await;
//! });
//!
//! let end = seq.end();
//! let mut it = seq.begin();
//! let mut seen = Vec::new();
//! while it != end {
//!     seen.push(*it.current());
//!     it.advance().unwrap();
//! }
//! assert_eq!(seen, vec![1, 2]);
//! ```
//!
//! As a Rust iterator:
//! ```rust
//! use lazyseq::prelude::*;
//!
//! let seq = Generator::new(|co| async move {
//!     for word in ["x", "y"] {
//!         co.yield_(word).await;
//!     }
//! });
//! assert_eq!(seq.into_iter().collect::<Vec<_>>(), vec!["x", "y"]);
//! ```

use std::{cell::Ref, fmt, iter::FusedIterator};

use crate::{
    error::{GeneratorError, Result},
    frame::{FrameHandle, FrameId},
    state::ProducerState,
    step::Step,
};

/// Forward, single-pass view of a generator's frame.
///
/// A default-constructed `Iter` is the end sentinel. All exhausted iterators
/// are equal to it and to each other, whichever generator they came from.
pub struct Iter<'g, 'a, T> {
    frame: Option<&'g mut FrameHandle<'a, T>>,
    // The current value was moved out; resume before reading again.
    consumed: bool,
}

impl<'g, 'a, T> Iter<'g, 'a, T> {
    /// The end sentinel.
    pub const fn end() -> Self {
        Self {
            frame: None,
            consumed: false,
        }
    }

    /// Bind to `handle` and advance to the first value.
    pub(crate) fn bind(handle: &'g mut FrameHandle<'a, T>) -> Result<Self> {
        let mut iter = Self {
            frame: Some(handle),
            consumed: false,
        };
        iter.advance()?;
        Ok(iter)
    }

    pub fn is_end(&self) -> bool {
        self.frame.is_none()
    }

    /// Identity of the bound frame, [`FrameId::EMPTY`] at the end.
    pub fn frame_id(&self) -> FrameId {
        self.frame.as_deref().map_or(FrameId::EMPTY, FrameHandle::id)
    }

    /// Resume the producer to reach the next value.
    ///
    /// When the producer completes, fails or panics, the iterator drops its
    /// binding and becomes the end sentinel.
    ///
    /// # Errors
    ///
    /// [`GeneratorError::InvalidResume`] when called on the end sentinel, or
    /// the protocol error reported by the producer, after which the iterator
    /// is at the end as well.
    pub fn advance(&mut self) -> Result<()> {
        self.consumed = false;
        let mut binding = UnbindWhenDone(&mut self.frame);
        let handle = binding
            .0
            .as_deref_mut()
            .ok_or(GeneratorError::InvalidResume)?;
        handle.resume().map(|_| ())
    }

    fn state(&self) -> Option<&ProducerState<T>> {
        self.frame.as_deref().and_then(FrameHandle::state)
    }

    /// Borrow the current value.
    ///
    /// # Errors
    ///
    /// [`GeneratorError::UseAfterEnd`] at the end, or after the current value
    /// was moved out by [`take_current`](Self::take_current) or `next()`.
    pub fn try_current(&self) -> Result<Ref<'_, T>> {
        self.state()
            .and_then(ProducerState::get)
            .ok_or(GeneratorError::UseAfterEnd)
    }

    /// Borrow the current value.
    ///
    /// # Panics
    ///
    /// Panics where [`try_current`](Self::try_current) returns an error.
    #[track_caller]
    pub fn current(&self) -> Ref<'_, T> {
        match self.try_current() {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Move the current value out.
    ///
    /// The iterator keeps its position; the next call to `next()` resumes the
    /// producer before reading.
    pub fn take_current(&mut self) -> Option<T> {
        let value = self.state().and_then(ProducerState::take)?;
        self.consumed = true;
        Some(value)
    }
}

/// Drops the binding once the frame is done, also when the producer unwinds.
struct UnbindWhenDone<'r, 'g, 'a, T>(&'r mut Option<&'g mut FrameHandle<'a, T>>);

impl<T> Drop for UnbindWhenDone<'_, '_, '_, T> {
    fn drop(&mut self) {
        if self.0.as_deref().is_some_and(FrameHandle::done) {
            *self.0 = None;
        }
    }
}

impl<T> Default for Iter<'_, '_, T> {
    fn default() -> Self {
        Self::end()
    }
}

impl<'g, 'h, 'a, 'b, T> PartialEq<Iter<'h, 'b, T>> for Iter<'g, 'a, T> {
    fn eq(&self, other: &Iter<'h, 'b, T>) -> bool {
        self.frame_id() == other.frame_id()
    }
}

impl<T> Eq for Iter<'_, '_, T> {}

impl<T> fmt::Debug for Iter<'_, '_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("frame", &self.frame_id())
            .field("consumed", &self.consumed)
            .finish()
    }
}

/// Moves each value out of the frame.
///
/// The producer is resumed only when the following value is requested, never
/// ahead of time.
///
/// # Panics
///
/// Panics if resuming the producer reports a protocol error, and propagates
/// panics raised by producer logic.
impl<T> Iterator for Iter<'_, '_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.consumed {
            if let Err(err) = self.advance() {
                panic!("{err}");
            }
        }
        self.take_current()
    }
}

impl<T> FusedIterator for Iter<'_, '_, T> {}

/// Owning iterator over a generator, created by [`Generator::into_iter`](crate::Generator).
pub struct IntoIter<'a, T> {
    handle: FrameHandle<'a, T>,
}

impl<'a, T> IntoIter<'a, T> {
    pub(crate) fn new(handle: FrameHandle<'a, T>) -> Self {
        Self { handle }
    }
}

impl<T> Iterator for IntoIter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.handle.is_empty() || self.handle.done() {
            return None;
        }
        match self.handle.resume() {
            Ok(Step::Yielded(())) => self.handle.state().and_then(ProducerState::take),
            Ok(Step::Complete(())) => {
                self.handle.reset();
                None
            }
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> FusedIterator for IntoIter<'_, T> {}

impl<T> fmt::Debug for IntoIter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("frame", &self.handle).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{empty, from_fn, once, producer};
    use std::cell::Cell;
    use std::rc::Rc;

    fn counter(n: u32, resumes: Rc<Cell<u32>>) -> FrameHandle<'static, u32> {
        let mut i = 0;
        FrameHandle::new(from_fn(move || {
            resumes.set(resumes.get() + 1);
            i += 1;
            if i <= n {
                Step::Yielded(i)
            } else {
                Step::Complete(())
            }
        }))
    }

    #[test]
    fn test_bind_advances_to_first_value() {
        let resumes = Rc::new(Cell::new(0));
        let mut handle = counter(3, Rc::clone(&resumes));
        let it = Iter::bind(&mut handle).unwrap();
        assert_eq!(resumes.get(), 1);
        assert_eq!(*it.current(), 1);
        assert!(!it.is_end());
    }

    #[test]
    fn test_advance_trace_reaches_end() {
        let resumes = Rc::new(Cell::new(0));
        let mut handle = counter(3, Rc::clone(&resumes));
        let mut it = Iter::bind(&mut handle).unwrap();

        let mut trace = vec![*it.current()];
        it.advance().unwrap();
        trace.push(*it.current());
        it.advance().unwrap();
        trace.push(*it.current());
        it.advance().unwrap();

        assert_eq!(trace, vec![1, 2, 3]);
        assert!(it.is_end());
        assert_eq!(it, Iter::end());
        assert_eq!(resumes.get(), 4);
    }

    #[test]
    fn test_advance_on_end_is_invalid() {
        let mut it: Iter<'_, '_, u8> = Iter::default();
        assert_eq!(it.advance(), Err(GeneratorError::InvalidResume));
    }

    #[test]
    fn test_current_on_end() {
        let it: Iter<'_, '_, u8> = Iter::end();
        assert_eq!(it.try_current().err(), Some(GeneratorError::UseAfterEnd));
    }

    #[test]
    #[should_panic(expected = "holds none")]
    fn test_current_on_end_panics() {
        let it: Iter<'_, '_, u8> = Iter::end();
        let _ = it.current();
    }

    #[test]
    fn test_producer_without_values_binds_to_end() {
        let mut handle: FrameHandle<'_, u8> = FrameHandle::new(empty());
        let it = Iter::bind(&mut handle).unwrap();
        assert!(it.is_end());
        assert_eq!(it, Iter::default());
    }

    #[test]
    fn test_live_iterator_never_equals_end() {
        let mut handle = FrameHandle::new(once(5));
        let it = Iter::bind(&mut handle).unwrap();
        assert_ne!(it, Iter::end());
    }

    #[test]
    fn test_exhausted_iterators_of_different_frames_are_equal() {
        let mut a = FrameHandle::new(once(1));
        let mut b = FrameHandle::new(once(2));
        let mut ia = Iter::bind(&mut a).unwrap();
        let mut ib = Iter::bind(&mut b).unwrap();
        assert_ne!(ia, ib);

        ia.advance().unwrap();
        ib.advance().unwrap();
        assert_eq!(ia, ib);
    }

    #[test]
    fn test_next_defers_resume() {
        let resumes = Rc::new(Cell::new(0));
        let mut handle = counter(2, Rc::clone(&resumes));
        let mut it = Iter::bind(&mut handle).unwrap();

        assert_eq!(it.next(), Some(1));
        assert_eq!(resumes.get(), 1);
        assert_eq!(it.try_current().err(), Some(GeneratorError::UseAfterEnd));

        assert_eq!(it.next(), Some(2));
        assert_eq!(resumes.get(), 2);
        assert_eq!(it.next(), None);
        assert_eq!(resumes.get(), 3);
        assert_eq!(it.next(), None);
        assert_eq!(resumes.get(), 3);
    }

    #[test]
    fn test_take_current_then_next_moves_on() {
        let mut handle = FrameHandle::new(from_fn({
            let mut words = vec!["b", "a"];
            move || Step::from(words.pop())
        }));
        let mut it = Iter::bind(&mut handle).unwrap();
        assert_eq!(it.take_current(), Some("a"));
        assert_eq!(it.take_current(), None);
        assert_eq!(it.next(), Some("b"));
        assert_eq!(it.next(), None);
    }

    #[test]
    #[should_panic(expected = "other than its yielder")]
    fn test_next_panics_on_protocol_error() {
        struct NeverReady;

        impl std::future::Future for NeverReady {
            type Output = ();
            fn poll(
                self: std::pin::Pin<&mut Self>,
                _cx: &mut std::task::Context<'_>,
            ) -> std::task::Poll<()> {
                std::task::Poll::Pending
            }
        }

        let mut handle = FrameHandle::new(producer(|co| async move {
            co.yield_(1).await;
            NeverReady.await;
        }));
        let mut it = Iter::bind(&mut handle).unwrap();
        assert_eq!(it.next(), Some(1));
        it.next();
    }

    #[test]
    fn test_panicking_producer_leaves_iterator_at_end() {
        use std::panic::{AssertUnwindSafe, catch_unwind};

        let mut handle = FrameHandle::new(producer(|co| async move {
            co.yield_(1).await;
            panic!("producer broke");
        }));
        let mut it = Iter::bind(&mut handle).unwrap();
        assert_eq!(*it.current(), 1);

        let outcome = catch_unwind(AssertUnwindSafe(|| it.advance()));
        assert!(outcome.is_err());
        assert!(it.is_end());
        assert_eq!(it, Iter::end());
        assert_eq!(it.try_current().err(), Some(GeneratorError::UseAfterEnd));
        assert_eq!(it.advance(), Err(GeneratorError::InvalidResume));
    }

    #[test]
    fn test_into_iter_resumes_on_demand() {
        let resumes = Rc::new(Cell::new(0));
        let mut iter = IntoIter::new(counter(3, Rc::clone(&resumes)));
        assert_eq!(resumes.get(), 0);
        assert_eq!(iter.next(), Some(1));
        assert_eq!(resumes.get(), 1);
        assert_eq!(iter.by_ref().collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(iter.next(), None);
        assert_eq!(resumes.get(), 4);
    }

    #[test]
    fn test_into_iter_of_empty_handle() {
        let mut iter: IntoIter<'_, u8> = IntoIter::new(FrameHandle::empty());
        assert_eq!(iter.next(), None);
    }
}
