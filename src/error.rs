//! Generator errors

use thiserror::Error;

/// Generator result type
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Protocol violations reported by frames and iterators.
///
/// A panic inside producer logic is not represented here: it unwinds out of
/// the `resume` call that ran the producer, unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("resumed a generator frame that is empty or already done")]
    InvalidResume,

    #[error("read the current value of an iterator that holds none")]
    UseAfterEnd,

    #[error("generator body suspended on a future other than its yielder")]
    ForeignAwait,
}
