//! Error type shared by every fallible [`Deque`](crate::Deque) operation.

use thiserror::Error;

/// Failure reported by a deque operation.
///
/// Every variant is a contract violation by the caller; nothing is retried or
/// recovered internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DequeError {
    /// A front/back accessor or a pop was called while the deque was empty.
    #[error("deque: {op}() called on empty queue")]
    Empty { op: &'static str },

    /// A logical index was outside `[0, len)`.
    #[error("deque: index out of range {index} with length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A count argument was negative.
    #[error("deque: {op}() called with negative count")]
    InvalidArgument { op: &'static str },

    /// A [`Cursor`](crate::Cursor) observed that the deque was pushed to,
    /// popped from, or reallocated since the cursor was created.
    #[error("deque: modified during iteration")]
    ConcurrentModification,
}

/// Result alias used throughout the crate.
pub type Result<T, E = DequeError> = core::result::Result<T, E>;
