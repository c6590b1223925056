//! The suspendable computation driven by a frame.
//!
//! A [`Body`] is the producer logic of one generator. Each call to
//! [`resume`](Body::resume) runs it up to its next yield or to its end. The
//! frame driver owns the body exclusively and calls it from one thread only.
//!
//! Implementations must not run any producer logic before the first
//! `resume`. The provided bodies live in [`build`](crate::build):
//! [`Producer`](crate::build::Producer) for straight-line `async` producers,
//! [`FromFn`](crate::build::FromFn) for hand-written state machines.

use std::rc::Rc;

use either::Either;

use crate::error::Result;
use crate::state::ProducerState;
use crate::step::Step;

/// Producer logic that can be suspended after each yielded value.
pub trait Body<T> {
    /// Run until the next yield or until completion.
    ///
    /// On `Step::Yielded(())` the body must have stored exactly one value
    /// through [`ProducerState::yield_value`]. On `Step::Complete(())` the
    /// caller finalizes the state and never resumes the body again.
    fn resume(&mut self, state: &Rc<ProducerState<T>>) -> Result<Step<(), ()>>;

    fn boxed<'a>(self) -> Box<dyn Body<T> + 'a>
    where
        Self: Sized + 'a,
    {
        Box::new(self)
    }
}

impl<T, B> Body<T> for Box<B>
where
    B: Body<T> + ?Sized,
{
    fn resume(&mut self, state: &Rc<ProducerState<T>>) -> Result<Step<(), ()>> {
        (**self).resume(state)
    }
}

impl<T, B> Body<T> for &'_ mut B
where
    B: Body<T> + ?Sized,
{
    fn resume(&mut self, state: &Rc<ProducerState<T>>) -> Result<Step<(), ()>> {
        (**self).resume(state)
    }
}

impl<T, L, R> Body<T> for Either<L, R>
where
    L: Body<T>,
    R: Body<T>,
{
    fn resume(&mut self, state: &Rc<ProducerState<T>>) -> Result<Step<(), ()>> {
        match self {
            Either::Left(l) => l.resume(state),
            Either::Right(r) => r.resume(state),
        }
    }
}
