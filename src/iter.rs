//! Views over a [`Deque`]: borrowing iteration, detached cursors, draining and
//! owning iteration.

use core::fmt;
use core::iter::FusedIterator;

use crate::deque::Deque;
use crate::error::{DequeError, Result};

// ─── Iter ─────────────────────────────────────────────────────────────────────

/// Borrowing front-to-back iterator returned by [`Deque::iter`].
///
/// Double-ended, so `iter().rev()` walks back to front.  The shared borrow keeps the
/// deque from being mutated while the iterator is alive.
pub struct Iter<'a, T> {
    deque: &'a Deque<T>,
    front: usize,
    back: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(deque: &'a Deque<T>) -> Self {
        Self {
            deque,
            front: 0,
            back: deque.len(),
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            deque: self.deque,
            front: self.front,
            back: self.back,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.clone().collect::<Vec<_>>()).finish()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        let item = self.deque.slot(self.deque.physical(self.front));
        self.front += 1;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.deque.slot(self.deque.physical(self.back)))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

// ─── Cursor ───────────────────────────────────────────────────────────────────

/// Detached read-only position into a [`Deque`], created by [`Deque::cursor`] or
/// [`Deque::cursor_rev`].
///
/// A cursor holds no borrow, so the deque may be mutated between steps.  It
/// snapshots the deque's `head`, `tail` and length at creation and every
/// [`next`](Cursor::next) compares them with the live values, failing with
/// [`DequeError::ConcurrentModification`] on mismatch.  This catches pushes, pops,
/// clears, rotations and reallocations; it does not catch in-place overwrites
/// through `set`, `swap` or `at_mut`.
///
/// Dropping a cursor part-way through needs no cleanup.
#[derive(Debug, Clone)]
pub struct Cursor {
    shape: (usize, usize, usize),
    remaining: usize,
    reverse: bool,
}

impl Cursor {
    pub(crate) fn new<T>(deque: &Deque<T>, reverse: bool) -> Self {
        Self {
            shape: deque.shape(),
            remaining: deque.len(),
            reverse,
        }
    }

    /// Number of elements this cursor has yet to yield.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Yields the next element, or `Ok(None)` once every element has been visited.
    ///
    /// # Errors
    /// [`DequeError::ConcurrentModification`] if `deque` changed shape since the
    /// cursor was created.
    pub fn next<'a, T>(&mut self, deque: &'a Deque<T>) -> Result<Option<&'a T>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        if deque.shape() != self.shape {
            return Err(DequeError::ConcurrentModification);
        }
        let len = self.shape.2;
        let index = if self.reverse {
            self.remaining - 1
        } else {
            len - self.remaining
        };
        self.remaining -= 1;
        Ok(deque.get(index))
    }
}

// ─── drains ───────────────────────────────────────────────────────────────────

/// Iterator that pops from the front of a deque, returned by [`Deque::drain_front`].
///
/// Shrinking is suspended while draining; when the iterator is dropped (exhausted
/// or not) the deque shrinks to fit once.
pub struct DrainFront<'a, T> {
    deque: &'a mut Deque<T>,
}

impl<'a, T> DrainFront<'a, T> {
    pub(crate) fn new(deque: &'a mut Deque<T>) -> Self {
        Self { deque }
    }
}

impl<T> Iterator for DrainFront<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.deque.take_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.deque.len(), Some(self.deque.len()))
    }
}

impl<T> ExactSizeIterator for DrainFront<'_, T> {}
impl<T> FusedIterator for DrainFront<'_, T> {}

impl<T> Drop for DrainFront<'_, T> {
    fn drop(&mut self) {
        self.deque.shrink_to_fit();
    }
}

/// Iterator that pops from the back of a deque, returned by [`Deque::drain_back`].
///
/// Shrinks once on drop, like [`DrainFront`].
pub struct DrainBack<'a, T> {
    deque: &'a mut Deque<T>,
}

impl<'a, T> DrainBack<'a, T> {
    pub(crate) fn new(deque: &'a mut Deque<T>) -> Self {
        Self { deque }
    }
}

impl<T> Iterator for DrainBack<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.deque.take_back()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.deque.len(), Some(self.deque.len()))
    }
}

impl<T> ExactSizeIterator for DrainBack<'_, T> {}
impl<T> FusedIterator for DrainBack<'_, T> {}

impl<T> Drop for DrainBack<'_, T> {
    fn drop(&mut self) {
        self.deque.shrink_to_fit();
    }
}

// ─── IntoIter ─────────────────────────────────────────────────────────────────

/// Owning iterator returned by `Deque::into_iter`.
pub struct IntoIter<T> {
    deque: Deque<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(deque: Deque<T>) -> Self {
        Self { deque }
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.deque).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.deque.take_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.deque.len(), Some(self.deque.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.deque.take_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}
