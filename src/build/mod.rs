//! Building producer bodies
//!
//! This module provides the [`Body`](crate::Body) implementations a generator
//! can be built from: `async` producers and closure-driven state machines.

mod func;
mod producer;

pub use func::{Empty, FromFn, Once, RepeatWith, empty, from_fn, once, repeat_with};
pub use producer::{Producer, Suspend, Yielder, producer};
