//! The user-facing generator type.

use std::{fmt, future::Future, mem};

use crate::{
    body::Body,
    build::{self, Yielder},
    error::Result,
    frame::FrameHandle,
    iter::{IntoIter, Iter},
    step::Step,
};

/// A lazy sequence of `T` produced by suspendable producer logic.
///
/// The generator owns its producer exclusively. Nothing runs until iteration
/// begins, each value is computed only when the consumer asks for it, and at
/// most one produced value is alive at a time.
///
/// ```rust
/// use lazyseq::prelude::*;
///
/// let mut squares = Generator::new(|co| async move {
///     for i in 1..=4u32 {
///         co.yield_(i * i).await;
///     }
/// });
///
/// let mut it = squares.begin();
/// assert_eq!(*it.current(), 1);
/// it.advance().unwrap();
/// assert_eq!(it.by_ref().collect::<Vec<_>>(), vec![4, 9, 16]);
/// assert!(it.is_end());
/// ```
pub struct Generator<'a, T> {
    handle: FrameHandle<'a, T>,
}

impl<'a, T> Generator<'a, T> {
    /// A generator with no producer; `begin() == end()`.
    pub const fn empty() -> Self {
        Self {
            handle: FrameHandle::empty(),
        }
    }

    /// Build a generator from an `async` producer.
    ///
    /// The producer is handed a [`Yielder`] and awaits
    /// [`yield_`](Yielder::yield_) for each element. It is not called before
    /// the first value is requested.
    pub fn new<F, Fut>(producer: F) -> Self
    where
        F: FnOnce(Yielder<T>) -> Fut + 'a,
        Fut: Future<Output = ()> + 'a,
    {
        Self::from_body(build::producer(producer))
    }

    /// Build a generator from a closure called once per element.
    ///
    /// ```rust
    /// use lazyseq::prelude::*;
    ///
    /// let mut lines = "a\nb".lines();
    /// let seq = Generator::from_fn(move || Step::from(lines.next()));
    /// assert_eq!(seq.into_iter().collect::<Vec<_>>(), vec!["a", "b"]);
    /// ```
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnMut() -> Step<T, ()> + 'a,
    {
        Self::from_body(build::from_fn(f))
    }

    /// A generator yielding exactly `value`.
    pub fn once(value: T) -> Self
    where
        T: 'a,
    {
        Self::from_body(build::once(value))
    }

    /// Wrap any producer body, not yet started.
    pub fn from_body<B>(body: B) -> Self
    where
        B: Body<T> + 'a,
    {
        Self {
            handle: FrameHandle::new(body),
        }
    }

    /// Start (or continue) iterating.
    ///
    /// Resumes the producer once to reach the next value. Returns the end
    /// sentinel without resuming if there is no producer or it is done.
    ///
    /// # Panics
    ///
    /// Panics if the producer reports a protocol error; see
    /// [`try_begin`](Self::try_begin).
    #[track_caller]
    pub fn begin(&mut self) -> Iter<'_, 'a, T> {
        match self.try_begin() {
            Ok(iter) => iter,
            Err(err) => panic!("{err}"),
        }
    }

    /// Like [`begin`](Self::begin), returning protocol errors instead of panicking.
    pub fn try_begin(&mut self) -> Result<Iter<'_, 'a, T>> {
        if self.handle.is_empty() || self.handle.done() {
            return Ok(Iter::end());
        }
        Iter::bind(&mut self.handle)
    }

    /// The end sentinel.
    ///
    /// The result does not borrow the generator, so it can be kept while
    /// iterating with [`begin`](Self::begin).
    pub fn end<'g>(&self) -> Iter<'g, 'a, T>
    where
        'a: 'g,
        T: 'g,
    {
        Iter::end()
    }

    /// Exchange producers with `other` without resuming either.
    pub fn swap(&mut self, other: &mut Self) {
        self.handle.swap(&mut other.handle);
    }

    /// Move the producer out, leaving this generator empty.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Release the producer and any value it left behind, without resuming it.
    pub fn reset(&mut self) {
        self.handle.reset();
    }

    /// Returns `true` if no producer is attached.
    pub fn is_empty(&self) -> bool {
        self.handle.is_empty()
    }

    /// Returns `true` if there is nothing left to produce.
    pub fn is_done(&self) -> bool {
        self.handle.is_empty() || self.handle.done()
    }
}

/// Exchange the producers of two generators.
pub fn swap<'a, T>(a: &mut Generator<'a, T>, b: &mut Generator<'a, T>) {
    a.swap(b);
}

impl<T> Default for Generator<'_, T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> fmt::Debug for Generator<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("frame", &self.handle)
            .finish()
    }
}

impl<'g, 'a, T> IntoIterator for &'g mut Generator<'a, T> {
    type Item = T;
    type IntoIter = Iter<'g, 'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.begin()
    }
}

impl<'a, T> IntoIterator for Generator<'a, T> {
    type Item = T;
    type IntoIter = IntoIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.handle)
    }
}
