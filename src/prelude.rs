//! Commonly used imports
//!
//! Use `use lazyseq::prelude::*;` for quick access to the most common types and functions.

// Core types
pub use crate::{Body, Generator, Iter, Step};

// Producer side
pub use crate::build::{Yielder, empty, from_fn, once, repeat_with};

// Errors
pub use crate::GeneratorError;
