use std::rc::Rc;

use crate::{Body, ProducerState, Step, error::Result};

/// Hand-written state machine: calls a closure for every element.
pub struct FromFn<F>(F);

impl<T, F> Body<T> for FromFn<F>
where
    F: FnMut() -> Step<T, ()>,
{
    fn resume(&mut self, state: &Rc<ProducerState<T>>) -> Result<Step<(), ()>> {
        Ok(match (self.0)() {
            Step::Yielded(value) => {
                state.yield_value(value);
                Step::Yielded(())
            }
            Step::Complete(()) => Step::Complete(()),
        })
    }
}

/// Create a producer body from a closure.
///
/// The closure is not called before the first resume.
///
/// ```rust
/// use lazyseq::prelude::*;
///
/// let mut n = 0;
/// let mut seq = Generator::from_body(from_fn(move || {
///     n += 1;
///     if n <= 3 { Step::Yielded(n) } else { Step::Complete(()) }
/// }));
/// assert_eq!((&mut seq).into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
/// ```
pub fn from_fn<F>(f: F) -> FromFn<F> {
    FromFn(f)
}

/// Yields values from a closure indefinitely.
///
/// Never completes on its own; the owner stops it by dropping or resetting the frame.
pub struct RepeatWith<F>(F);

impl<T, F> Body<T> for RepeatWith<F>
where
    F: FnMut() -> T,
{
    fn resume(&mut self, state: &Rc<ProducerState<T>>) -> Result<Step<(), ()>> {
        state.yield_value((self.0)());
        Ok(Step::Yielded(()))
    }
}

/// Create a body that yields `f()` on every resume.
///
/// ```rust
/// use lazyseq::prelude::*;
///
/// let mut seq = Generator::from_body(repeat_with(|| 7));
/// assert_eq!((&mut seq).into_iter().take(3).collect::<Vec<_>>(), vec![7, 7, 7]);
/// ```
pub fn repeat_with<T, F: FnMut() -> T>(f: F) -> RepeatWith<F> {
    RepeatWith(f)
}

/// Yields one value, then completes.
pub struct Once<T>(Option<T>);

/// Create a body that yields `value` once.
pub fn once<T>(value: T) -> Once<T> {
    Once(Some(value))
}

impl<T> Body<T> for Once<T> {
    fn resume(&mut self, state: &Rc<ProducerState<T>>) -> Result<Step<(), ()>> {
        match self.0.take() {
            Some(value) => {
                state.yield_value(value);
                Ok(Step::Yielded(()))
            }
            None => Ok(Step::Complete(())),
        }
    }
}

/// Completes on the first resume without yielding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Empty;

pub fn empty() -> Empty {
    Empty
}

impl<T> Body<T> for Empty {
    fn resume(&mut self, _state: &Rc<ProducerState<T>>) -> Result<Step<(), ()>> {
        Ok(Step::Complete(()))
    }
}
