//! # lazyseq: Lazy, Single-Pass Generators
//!
//! Write producers as straight-line code that yields one value at a time, and
//! consume them with a forward iterator that pulls each value on demand.
//!
//! ## Core Types
//!
//! - **[`Generator<T>`]**: Owns one suspended producer; the thing you iterate
//! - **[`Iter`]**: Forward, single-pass view with `begin`/`end`, `advance`, `current`
//! - **[`FrameHandle`]**: Unique owner of a producer body and its [`ProducerState`]
//! - **[`Body<T>`]**: The suspendable computation seam; see [`build`]
//!
//! ## Guarantees
//!
//! - **Lazy**: no producer code runs before the first value is requested
//! - **One value at a time**: the previous value is dropped before the producer resumes
//! - **Single owner**: generators move but never clone; iterators borrow
//!
//! ## Example
//!
//! ```
//! use lazyseq::prelude::*;
//!
//! let mut evens = Generator::new(|co| async move {
//!     let mut n = 0;
//!     while n < 10 {
//!         co.yield_(n).await;
//!         n += 2;
//!     }
//! });
//!
//! let collected: Vec<u32> = (&mut evens).into_iter().collect();
//! assert_eq!(collected, vec![0, 2, 4, 6, 8]);
//! assert!(evens.is_done());
//! ```
//!
//! ## Common Functions
//!
//! **Building Generators:**
//! - [`Generator::new(f)`](Generator::new) - Straight-line `async` producer
//! - [`Generator::from_fn(f)`](Generator::from_fn) - Closure called once per element
//! - [`Generator::once(v)`](Generator::once) - Single element
//! - [`Generator::from_body(b)`](Generator::from_body) - Any [`Body`], e.g. an `Either`
//!
//! **Consuming:**
//! - [`Generator::begin`] / [`Generator::end`] - Explicit begin/end protocol
//! - `for x in &mut generator` - Borrowing iteration
//! - `generator.into_iter()` - Owning iteration

mod body;
pub mod build;
mod error;
mod frame;
mod generator;
mod iter;
pub mod prelude;
mod slot;
mod state;
mod step;

pub use body::*;
pub use error::{GeneratorError, Result};
pub use frame::*;
pub use generator::*;
pub use iter::*;
pub use slot::*;
pub use state::*;
pub use step::*;
