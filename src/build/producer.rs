//! Straight-line producers written as `async` blocks.
//!
//! The producer receives a [`Yielder`] and awaits [`Yielder::yield_`] for every
//! element. Awaiting a yield stores the value in the frame's slot and suspends
//! the block; the next resume continues right after the `await`.
//!
//! ```rust
//! use lazyseq::prelude::*;
//!
//! let mut seq = Generator::new(|co| async move {
//!     let (mut a, mut b) = (0u64, 1u64);
//!     while a < 20 {
//!         co.yield_(a).await;
//!         (a, b) = (b, a + b);
//!     }
//! });
//! let fib: Vec<u64> = (&mut seq).into_iter().collect();
//! assert_eq!(fib, vec![0, 1, 1, 2, 3, 5, 8, 13]);
//! ```
//!
//! Only yields may suspend the block. Awaiting any other pending future makes
//! the resume fail with [`GeneratorError::ForeignAwait`].

use std::{
    fmt,
    future::Future,
    pin::Pin,
    rc::Rc,
    sync::Arc,
    task::{Context, Poll, Wake, Waker},
};

use crate::{
    Body, ProducerState, Step,
    error::{GeneratorError, Result},
};

/// Producer-side handle of a frame, passed to the `async` producer.
pub struct Yielder<T> {
    state: Rc<ProducerState<T>>,
}

impl<T> Yielder<T> {
    /// Hand `value` to the consumer and suspend until the next resume.
    ///
    /// Nothing happens until the returned future is awaited.
    pub fn yield_(&self, value: T) -> Suspend<'_, T> {
        Suspend {
            state: &self.state,
            value: Some(value),
        }
    }

    /// Always `false`: a running generator cannot be cancelled from outside.
    pub fn cancellation_requested(&self) -> bool {
        self.state.cancellation_requested()
    }
}

impl<T> fmt::Debug for Yielder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Yielder")
            .field("status", &self.state.status())
            .finish()
    }
}

/// Future returned by [`Yielder::yield_`].
///
/// The first poll stores the value and returns `Pending`; the second returns `Ready`.
#[must_use = "a value is only yielded when the future is awaited"]
pub struct Suspend<'y, T> {
    state: &'y ProducerState<T>,
    value: Option<T>,
}

// The value is moved out on first poll and never pinned.
impl<T> Unpin for Suspend<'_, T> {}

impl<T> Future for Suspend<'_, T> {
    type Output = ();

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
        let this = self.get_mut();
        match this.value.take() {
            Some(value) => {
                this.state.yield_value(value);
                Poll::Pending
            }
            None => Poll::Ready(()),
        }
    }
}

struct Noop;

impl Wake for Noop {
    fn wake(self: Arc<Self>) {}
}

enum Stage<F, Fut> {
    NotStarted(F),
    Running(Pin<Box<Fut>>),
    Finished,
}

impl<F, Fut> Stage<F, Fut> {
    fn take(&mut self) -> Self {
        std::mem::replace(self, Stage::Finished)
    }
}

/// Body driving an `async` producer.
///
/// Created by [`producer`] or [`Generator::new`](crate::Generator::new).
pub struct Producer<F, Fut> {
    stage: Stage<F, Fut>,
    waker: Waker,
}

/// Wrap an `async` producer in a [`Body`].
///
/// `f` is called on the first resume, not before: even code placed ahead of
/// the `async` block stays unexecuted until the consumer asks for a value.
pub fn producer<T, F, Fut>(f: F) -> Producer<F, Fut>
where
    F: FnOnce(Yielder<T>) -> Fut,
    Fut: Future<Output = ()>,
{
    Producer {
        stage: Stage::NotStarted(f),
        waker: Waker::from(Arc::new(Noop)),
    }
}

impl<T, F, Fut> Body<T> for Producer<F, Fut>
where
    F: FnOnce(Yielder<T>) -> Fut,
    Fut: Future<Output = ()>,
{
    fn resume(&mut self, state: &Rc<ProducerState<T>>) -> Result<Step<(), ()>> {
        let mut running = match self.stage.take() {
            Stage::NotStarted(f) => Box::pin(f(Yielder {
                state: Rc::clone(state),
            })),
            Stage::Running(fut) => fut,
            Stage::Finished => return Err(GeneratorError::InvalidResume),
        };

        let mut context = Context::from_waker(&self.waker);
        match running.as_mut().poll(&mut context) {
            Poll::Ready(()) => Ok(Step::Complete(())),
            Poll::Pending if state.has_value() => {
                self.stage = Stage::Running(running);
                Ok(Step::Yielded(()))
            }
            Poll::Pending => Err(GeneratorError::ForeignAwait),
        }
    }
}
