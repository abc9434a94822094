//! Growable ring-buffer double-ended queue.
//!
//! [`Deque`] stores its elements in a boxed slice of `Option<T>` slots whose length is
//! always zero or a power of two, so a logical index maps to a physical slot with a
//! single bitmask: `(head + i) & (capacity - 1)`.  `None` marks a vacant slot; every
//! removal moves the value out, so the buffer never keeps a stale owner alive.
//!
//! # Resize policy
//! * **Grow**: a push into a full buffer doubles it (the first push allocates the
//!   base capacity, [`DEFAULT_MIN_CAPACITY`] unless configured otherwise).
//! * **Shrink**: a single pop that leaves the buffer exactly one quarter full halves
//!   it, never going below the base capacity.  Because the trigger is an exact match,
//!   alternating push/pop around the boundary does not reallocate on every call.
//! * **Drain**: [`drain_front`](Deque::drain_front) and [`drain_back`](Deque::drain_back)
//!   skip the per-pop check and shrink to fit once when the drain is dropped.
//!
//! # Middle operations
//! [`insert`](Deque::insert) and [`remove`](Deque::remove) walk adjacent swaps from the
//! nearer end, so their cost is linear in `min(index, len - index)`.
//! [`rotate`](Deque::rotate) on a full buffer only relabels `head`/`tail`.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem;
use core::ops::{Index, IndexMut};
use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::error::{DequeError, Result};
use crate::iter::{Cursor, DrainBack, DrainFront, IntoIter, Iter};

/// Base capacity used when none has been configured.  Always a power of two.
pub const DEFAULT_MIN_CAPACITY: usize = 16;

// ─── AnyDeque ─────────────────────────────────────────────────────────────────

/// Object-safe view shared by [`Deque<T>`] and `std::collections::VecDeque<T>`.
///
/// The two impls are made to agree where their inherent APIs differ: `Deque`'s
/// [`DequeError`] results collapse to `None`, and `VecDeque::insert`, which panics
/// past the end, is clamped so an out-of-range index appends as
/// [`Deque::insert`] does.  Code written against this trait therefore sees the same
/// sequence from either backing type.
pub trait AnyDeque<T> {
    /// Returns the number of elements in the deque.
    fn len(&self) -> usize;
    /// Returns `true` if the deque contains no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Appends an element to the back.
    fn push_back(&mut self, item: T);
    /// Prepends an element to the front.
    fn push_front(&mut self, item: T);
    /// Removes and returns the element from the back, or `None` if empty.
    fn pop_back(&mut self) -> Option<T>;
    /// Removes and returns the element from the front, or `None` if empty.
    fn pop_front(&mut self) -> Option<T>;
    /// Inserts an element before logical `index`; indexes past the end append.
    fn insert(&mut self, index: usize, item: T);
    /// Removes and returns the element at `index`, or `None` if out of bounds.
    fn remove(&mut self, index: usize) -> Option<T>;
    /// Removes all elements.
    fn clear(&mut self);
    /// Returns a shared reference to the element at `index`, or `None`.
    fn get(&self, index: usize) -> Option<&T>;
    /// Returns a shared reference to the front element, or `None` if empty.
    fn front(&self) -> Option<&T>;
    /// Returns a shared reference to the back element, or `None` if empty.
    fn back(&self) -> Option<&T>;
    /// Returns an exclusive reference to the front element, or `None` if empty.
    fn front_mut(&mut self) -> Option<&mut T>;
    /// Returns an exclusive reference to the back element, or `None` if empty.
    fn back_mut(&mut self) -> Option<&mut T>;
}

impl<T> AnyDeque<T> for VecDeque<T> {
    fn len(&self) -> usize {
        self.len()
    }
    fn push_back(&mut self, item: T) {
        self.push_back(item);
    }
    fn push_front(&mut self, item: T) {
        self.push_front(item);
    }
    fn pop_back(&mut self) -> Option<T> {
        self.pop_back()
    }
    fn pop_front(&mut self) -> Option<T> {
        self.pop_front()
    }
    fn insert(&mut self, index: usize, item: T) {
        let index = index.min(self.len());
        self.insert(index, item);
    }
    fn remove(&mut self, index: usize) -> Option<T> {
        self.remove(index)
    }
    fn clear(&mut self) {
        self.clear();
    }
    fn get(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
    fn front(&self) -> Option<&T> {
        self.front()
    }
    fn back(&self) -> Option<&T> {
        self.back()
    }
    fn front_mut(&mut self) -> Option<&mut T> {
        self.front_mut()
    }
    fn back_mut(&mut self) -> Option<&mut T> {
        self.back_mut()
    }
}

impl<T> AnyDeque<T> for Deque<T> {
    fn len(&self) -> usize {
        self.len
    }
    fn push_back(&mut self, item: T) {
        self.push_back(item);
    }
    fn push_front(&mut self, item: T) {
        self.push_front(item);
    }
    fn pop_back(&mut self) -> Option<T> {
        self.pop_back().ok()
    }
    fn pop_front(&mut self) -> Option<T> {
        self.pop_front().ok()
    }
    fn insert(&mut self, index: usize, item: T) {
        self.insert(index, item);
    }
    fn remove(&mut self, index: usize) -> Option<T> {
        self.remove(index).ok()
    }
    fn clear(&mut self) {
        self.clear();
    }
    fn get(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
    fn front(&self) -> Option<&T> {
        self.front().ok()
    }
    fn back(&self) -> Option<&T> {
        self.back().ok()
    }
    fn front_mut(&mut self) -> Option<&mut T> {
        self.front_mut().ok()
    }
    fn back_mut(&mut self) -> Option<&mut T> {
        self.back_mut().ok()
    }
}

// ─── Deque ────────────────────────────────────────────────────────────────────

/// A double-ended queue backed by a growable power-of-two ring buffer.
///
/// # Representation
/// | Field | Meaning |
/// |-------|---------|
/// | `buf` | Slots; `buf.len()` is the capacity (0 or a power of two) |
/// | `head` | Physical slot of the front element |
/// | `tail` | Physical slot one past the back element |
/// | `len` | Number of live elements; disambiguates `head == tail` (empty vs full) |
/// | `min_capacity` | Floor the buffer never shrinks below |
///
/// The structure is single-threaded; wrap it in a lock to share it across threads.
pub struct Deque<T> {
    buf: Box<[Option<T>]>,
    head: usize,
    tail: usize,
    len: usize,
    min_capacity: usize,
}

impl<T> Deque<T> {
    /// Creates an empty deque.  Nothing is allocated until the first push.
    pub fn new() -> Self {
        Self {
            buf: Box::default(),
            head: 0,
            tail: 0,
            len: 0,
            min_capacity: DEFAULT_MIN_CAPACITY,
        }
    }

    /// Creates an empty deque that can always hold at least `base` items without
    /// shrinking, and allocates that capacity up front.
    ///
    /// See [`set_base_capacity`](Deque::set_base_capacity) for how `base` is rounded.
    pub fn with_base_capacity(base: usize) -> Self {
        let mut deque = Self::new();
        deque.set_base_capacity(base);
        deque.buf = Self::alloc(deque.min_capacity);
        deque
    }

    /// Returns the number of elements currently in the deque.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the deque contains no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots in the backing buffer (0 or a power of two).
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Returns the capacity the buffer is never shrunk below.
    #[inline(always)]
    pub fn base_capacity(&self) -> usize {
        self.min_capacity
    }

    /// Sets the base capacity so that at least `base` items can always be stored
    /// without the deque shrinking below them.
    ///
    /// The stored floor is the smallest power of two that is `>= base` and
    /// `>= DEFAULT_MIN_CAPACITY`.  A non-empty deque whose buffer is smaller than the
    /// new floor is grown to it immediately.
    ///
    /// # Panics
    /// Panics if the rounded floor overflows `usize`.
    pub fn set_base_capacity(&mut self, base: usize) {
        let min_capacity = match base.checked_next_power_of_two() {
            Some(cap) => cap.max(DEFAULT_MIN_CAPACITY),
            None => panic!("deque: capacity overflow"),
        };
        debug!(
            from = self.min_capacity,
            to = min_capacity,
            "deque base capacity set"
        );
        self.min_capacity = min_capacity;
        // An allocated buffer is raised even when empty; pushes only grow a full one.
        if !self.buf.is_empty() && self.buf.len() < min_capacity {
            self.resize(min_capacity);
        }
    }

    // ─── index arithmetic ─────────────────────────────────────────────────────

    /// Advances a physical index with wraparound.  Uses bitmask `(capacity - 1)`,
    /// valid because the capacity is a power of two; must not be called while the
    /// buffer is unallocated.
    #[inline(always)]
    fn wrap_add(&self, idx: usize, add: usize) -> usize {
        (idx + add) & (self.buf.len() - 1)
    }

    /// Retreats a physical index with wraparound.
    #[inline(always)]
    fn wrap_sub(&self, idx: usize, sub: usize) -> usize {
        idx.wrapping_sub(sub) & (self.buf.len() - 1)
    }

    /// Maps logical index `i` (front-relative) to its physical slot.
    #[inline(always)]
    pub(crate) fn physical(&self, i: usize) -> usize {
        self.wrap_add(self.head, i)
    }

    #[inline(always)]
    pub(crate) fn slot(&self, phys: usize) -> &T {
        match &self.buf[phys] {
            Some(item) => item,
            None => unreachable!("Logic Error: live slot {phys} is vacant"),
        }
    }

    #[inline(always)]
    fn slot_mut(&mut self, phys: usize) -> &mut T {
        match &mut self.buf[phys] {
            Some(item) => item,
            None => unreachable!("Logic Error: live slot {phys} is vacant"),
        }
    }

    #[inline(always)]
    fn take_slot(&mut self, phys: usize) -> T {
        match self.buf[phys].take() {
            Some(item) => item,
            None => unreachable!("Logic Error: live slot {phys} is vacant"),
        }
    }

    #[inline(always)]
    fn check_range(&self, index: usize) -> Result<()> {
        if index < self.len {
            Ok(())
        } else {
            Err(DequeError::IndexOutOfRange {
                index,
                len: self.len,
            })
        }
    }

    /// Snapshot of the structural shape compared by [`Cursor`].
    #[inline(always)]
    pub(crate) fn shape(&self) -> (usize, usize, usize) {
        (self.head, self.tail, self.len)
    }

    // ─── allocation ───────────────────────────────────────────────────────────

    fn alloc(capacity: usize) -> Box<[Option<T>]> {
        core::iter::repeat_with(|| None).take(capacity).collect()
    }

    /// Moves the live window into a fresh buffer of `new_capacity` slots, starting
    /// at offset 0.  Used both to grow a full buffer and to shrink a sparse one.
    fn resize(&mut self, new_capacity: usize) {
        debug_assert!(new_capacity.is_power_of_two());
        debug_assert!(new_capacity >= self.len);
        let mut new_buf = Self::alloc(new_capacity);
        for (i, dst) in new_buf.iter_mut().enumerate().take(self.len) {
            let src = self.physical(i);
            *dst = self.buf[src].take();
        }
        trace!(
            from = self.buf.len(),
            to = new_capacity,
            len = self.len,
            "deque reallocated"
        );
        self.buf = new_buf;
        self.head = 0;
        self.tail = self.len & (new_capacity - 1);
    }

    /// Cold path of the pushes: allocates the base capacity on first use, doubles
    /// afterwards, never landing below the base capacity.
    #[inline(never)]
    fn grow(&mut self) {
        if self.buf.is_empty() {
            trace!(to = self.min_capacity, "deque allocated");
            self.buf = Self::alloc(self.min_capacity);
            self.head = 0;
            self.tail = 0;
        } else {
            self.resize((self.len << 1).max(self.min_capacity));
        }
    }

    #[inline(always)]
    fn grow_if_full(&mut self) {
        if self.len == self.buf.len() {
            self.grow();
        }
    }

    /// Halves the buffer when a single removal left it exactly a quarter full.
    #[inline(always)]
    fn shrink_if_excess(&mut self) {
        if self.buf.len() > self.min_capacity && (self.len << 2) == self.buf.len() {
            self.resize(self.len << 1);
        }
    }

    /// Shrinks the buffer to the smallest power of two holding `len` (not below the
    /// base capacity), provided occupancy is at or under a quarter.  Run once at the
    /// end of a drain instead of per popped element.
    pub(crate) fn shrink_to_fit(&mut self) {
        if self.buf.len() <= self.min_capacity || (self.len << 2) > self.buf.len() {
            return;
        }
        let target = self.len.next_power_of_two().max(self.min_capacity);
        debug!(
            from = self.buf.len(),
            to = target,
            len = self.len,
            "deque shrink to fit"
        );
        self.resize(target);
    }

    /// Grows the capacity, if necessary, to guarantee room for another `n` items.
    ///
    /// This is the signed entry point; prefer [`reserve`](Deque::reserve) when the
    /// count is already a `usize`.
    ///
    /// # Errors
    /// [`DequeError::InvalidArgument`] if `n` is negative.
    pub fn grow_by(&mut self, n: isize) -> Result<()> {
        let additional =
            usize::try_from(n).map_err(|_| DequeError::InvalidArgument { op: "grow_by" })?;
        self.reserve(additional);
        Ok(())
    }

    /// Reserves room for at least `additional` more items.  After this call that many
    /// pushes will not reallocate.  A no-op when enough free slots already exist.
    ///
    /// # Panics
    /// Panics if the required capacity overflows `usize`.
    pub fn reserve(&mut self, additional: usize) {
        let capacity = self.buf.len();
        if additional <= capacity - self.len {
            return;
        }
        let required = self
            .len
            .checked_add(additional)
            .and_then(usize::checked_next_power_of_two);
        let Some(required) = required else {
            panic!("deque: capacity overflow");
        };
        let start = if capacity == 0 {
            self.min_capacity
        } else {
            capacity
        };
        self.resize(required.max(start));
    }

    // ─── ends ─────────────────────────────────────────────────────────────────

    /// Appends `item` to the back of the deque, growing the buffer if it is full.
    ///
    /// Together with [`pop_front`](Deque::pop_front) this gives FIFO order; with
    /// [`pop_back`](Deque::pop_back), LIFO order.
    #[inline(always)]
    pub fn push_back(&mut self, item: T) {
        self.grow_if_full();
        self.buf[self.tail] = Some(item);
        self.tail = self.wrap_add(self.tail, 1);
        self.len += 1;
    }

    /// Prepends `item` to the front of the deque, growing the buffer if it is full.
    #[inline(always)]
    pub fn push_front(&mut self, item: T) {
        self.grow_if_full();
        self.head = self.wrap_sub(self.head, 1);
        self.buf[self.head] = Some(item);
        self.len += 1;
    }

    /// Removes the front element without running the shrink policy.
    pub(crate) fn take_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let item = self.take_slot(self.head);
        self.head = self.wrap_add(self.head, 1);
        self.len -= 1;
        Some(item)
    }

    /// Removes the back element without running the shrink policy.
    pub(crate) fn take_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.tail = self.wrap_sub(self.tail, 1);
        let item = self.take_slot(self.tail);
        self.len -= 1;
        Some(item)
    }

    /// Removes and returns the front element.
    ///
    /// # Errors
    /// [`DequeError::Empty`] if the deque is empty.
    pub fn pop_front(&mut self) -> Result<T> {
        let item = self
            .take_front()
            .ok_or(DequeError::Empty { op: "pop_front" })?;
        self.shrink_if_excess();
        Ok(item)
    }

    /// Removes and returns the back element.
    ///
    /// # Errors
    /// [`DequeError::Empty`] if the deque is empty.
    pub fn pop_back(&mut self) -> Result<T> {
        let item = self
            .take_back()
            .ok_or(DequeError::Empty { op: "pop_back" })?;
        self.shrink_if_excess();
        Ok(item)
    }

    /// Returns the element [`pop_front`](Deque::pop_front) would remove.
    pub fn front(&self) -> Result<&T> {
        if self.len == 0 {
            return Err(DequeError::Empty { op: "front" });
        }
        Ok(self.slot(self.head))
    }

    /// Returns the element [`pop_back`](Deque::pop_back) would remove.
    pub fn back(&self) -> Result<&T> {
        if self.len == 0 {
            return Err(DequeError::Empty { op: "back" });
        }
        Ok(self.slot(self.wrap_sub(self.tail, 1)))
    }

    /// Mutable form of [`front`](Deque::front).
    ///
    /// # Errors
    /// [`DequeError::Empty`] if the deque holds no elements.
    pub fn front_mut(&mut self) -> Result<&mut T> {
        if self.len == 0 {
            return Err(DequeError::Empty { op: "front_mut" });
        }
        Ok(self.slot_mut(self.head))
    }

    /// Mutable form of [`back`](Deque::back).
    ///
    /// # Errors
    /// [`DequeError::Empty`] if the deque holds no elements.
    pub fn back_mut(&mut self) -> Result<&mut T> {
        if self.len == 0 {
            return Err(DequeError::Empty { op: "back_mut" });
        }
        let phys = self.wrap_sub(self.tail, 1);
        Ok(self.slot_mut(phys))
    }

    // ─── random access ────────────────────────────────────────────────────────

    /// Returns a shared reference to the element at logical `index`, or `None`.
    ///
    /// Logical index 0 is the front.
    #[inline(always)]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len {
            Some(self.slot(self.physical(index)))
        } else {
            None
        }
    }

    /// Returns an exclusive reference to the element at logical `index`, or `None`.
    #[inline(always)]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len {
            let phys = self.physical(index);
            Some(self.slot_mut(phys))
        } else {
            None
        }
    }

    /// Returns the element at logical `index` without removing it.  `at(0)` is the
    /// front and `at(len - 1)` the back.
    ///
    /// # Errors
    /// [`DequeError::IndexOutOfRange`] if `index >= len`.
    pub fn at(&self, index: usize) -> Result<&T> {
        self.check_range(index)?;
        Ok(self.slot(self.physical(index)))
    }

    /// Mutable counterpart of [`at`](Deque::at).
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        self.check_range(index)?;
        let phys = self.physical(index);
        Ok(self.slot_mut(phys))
    }

    /// Overwrites the element at logical `index`, returning the previous value.
    ///
    /// # Errors
    /// [`DequeError::IndexOutOfRange`] if `index >= len`.
    pub fn set(&mut self, index: usize, item: T) -> Result<T> {
        let slot = self.at_mut(index)?;
        Ok(mem::replace(slot, item))
    }

    /// Exchanges the elements at logical indexes `a` and `b`.  A no-op when they are
    /// equal.
    ///
    /// # Errors
    /// [`DequeError::IndexOutOfRange`] if either index is `>= len`.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        self.check_range(a)?;
        self.check_range(b)?;
        if a != b {
            let (pa, pb) = (self.physical(a), self.physical(b));
            self.buf.swap(pa, pb);
        }
        Ok(())
    }

    /// Drops every element but keeps the current buffer, so a deque reused at high
    /// frequency does not reallocate.
    pub fn clear(&mut self) {
        for i in 0..self.len {
            let phys = self.physical(i);
            self.buf[phys] = None;
        }
        self.head = 0;
        self.tail = 0;
        self.len = 0;
    }

    // ─── middle ───────────────────────────────────────────────────────────────

    /// Inserts `item` before the element at logical `at`.
    ///
    /// `insert(0, x)` is `push_front(x)` and any `at >= len` is `push_back(x)`.
    /// Otherwise the item is pushed on the nearer end and walked into place with
    /// adjacent swaps, so the cost is linear in `min(at, len - at)`.
    pub fn insert(&mut self, at: usize, item: T) {
        if at == 0 {
            self.push_front(item);
        } else if at >= self.len {
            self.push_back(item);
        } else if at * 2 < self.len {
            self.push_front(item);
            let mut front = self.head;
            for _ in 0..at {
                let next = self.wrap_add(front, 1);
                self.buf.swap(front, next);
                front = next;
            }
        } else {
            let swaps = self.len - at;
            self.push_back(item);
            let mut back = self.wrap_sub(self.tail, 1);
            for _ in 0..swaps {
                let prev = self.wrap_sub(back, 1);
                self.buf.swap(back, prev);
                back = prev;
            }
        }
    }

    /// Removes and returns the element at logical `at`, shifting whichever side is
    /// shorter.  `remove(0)` is `pop_front()` and `remove(len - 1)` is `pop_back()`.
    ///
    /// # Errors
    /// [`DequeError::IndexOutOfRange`] if `at >= len`.
    pub fn remove(&mut self, at: usize) -> Result<T> {
        self.check_range(at)?;
        let mut rm = self.physical(at);
        if at * 2 < self.len {
            // Bubble the removed slot to the front.
            for _ in 0..at {
                let prev = self.wrap_sub(rm, 1);
                self.buf.swap(prev, rm);
                rm = prev;
            }
            self.pop_front()
        } else {
            for _ in 0..(self.len - at - 1) {
                let next = self.wrap_add(rm, 1);
                self.buf.swap(rm, next);
                rm = next;
            }
            self.pop_back()
        }
    }

    /// Rotates the deque `n` steps front-to-back; a negative `n` rotates
    /// back-to-front.  After `rotate(n)`, the element previously at `n` is at the
    /// front.
    ///
    /// When the buffer is full only `head` and `tail` move, so the cost is O(1)
    /// regardless of `n`.  Otherwise one element crosses the gap per step.
    pub fn rotate(&mut self, n: isize) {
        if self.len <= 1 {
            return;
        }
        // len never exceeds isize::MAX: it is bounded by an allocation.
        let n = n % self.len as isize;
        if n == 0 {
            return;
        }

        if self.head == self.tail {
            self.head = self.head.wrapping_add_signed(n) & (self.buf.len() - 1);
            self.tail = self.head;
            return;
        }

        if n < 0 {
            for _ in 0..n.unsigned_abs() {
                self.head = self.wrap_sub(self.head, 1);
                self.tail = self.wrap_sub(self.tail, 1);
                let moved = self.buf[self.tail].take();
                self.buf[self.head] = moved;
            }
        } else {
            for _ in 0..n {
                let moved = self.buf[self.head].take();
                self.buf[self.tail] = moved;
                self.head = self.wrap_add(self.head, 1);
                self.tail = self.wrap_add(self.tail, 1);
            }
        }
    }

    // ─── search ───────────────────────────────────────────────────────────────

    /// Returns the logical index of the first element satisfying `pred`, scanning
    /// front to back, or `None`.
    pub fn index<F>(&self, pred: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().position(pred)
    }

    /// Like [`index`](Deque::index) but scans back to front.  The returned index is
    /// still front-relative.
    pub fn rindex<F>(&self, pred: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().rposition(pred)
    }

    /// Returns `true` if the deque contains an element equal to `x`.
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|item| item == x)
    }

    // ─── views ────────────────────────────────────────────────────────────────

    /// Returns a front-to-back iterator; call `.rev()` on it for back-to-front.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Returns a detached front-to-back cursor.  It does not borrow the deque, and
    /// reports [`DequeError::ConcurrentModification`] if the deque is pushed, popped
    /// or reallocated between steps.
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self, false)
    }

    /// Back-to-front counterpart of [`cursor`](Deque::cursor).
    pub fn cursor_rev(&self) -> Cursor {
        Cursor::new(self, true)
    }

    /// Returns an iterator that pops from the front on every step.  Shrinking is
    /// deferred until the iterator is dropped and then done once.
    pub fn drain_front(&mut self) -> DrainFront<'_, T> {
        DrainFront::new(self)
    }

    /// Back-end counterpart of [`drain_front`](Deque::drain_front).
    pub fn drain_back(&mut self) -> DrainBack<'_, T> {
        DrainBack::new(self)
    }
}

// ─── trait impls ──────────────────────────────────────────────────────────────

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Deque<T> {
    fn clone(&self) -> Self {
        let mut out = Self {
            buf: Self::alloc(self.buf.len()),
            head: 0,
            tail: 0,
            len: 0,
            min_capacity: self.min_capacity,
        };
        for item in self.iter() {
            out.push_back(item.clone());
        }
        out
    }
}

impl<T: fmt::Debug> fmt::Debug for Deque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Deque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}
impl<T: Eq> Eq for Deque<T> {}

impl<T: PartialOrd> PartialOrd for Deque<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for Deque<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash> Hash for Deque<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for item in self.iter() {
            item.hash(state);
        }
    }
}

impl<T> Index<usize> for Deque<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(item) => item,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<usize> for Deque<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        match self.get_mut(index) {
            Some(item) => item,
            None => panic!("{}", DequeError::IndexOutOfRange { index, len }),
        }
    }
}

impl<T> Extend<T> for Deque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for Deque<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Self::new();
        deque.extend(iter);
        deque
    }
}

impl<T> From<Vec<T>> for Deque<T> {
    fn from(vec: Vec<T>) -> Self {
        vec.into_iter().collect()
    }
}

impl<T, const N: usize> From<[T; N]> for Deque<T> {
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T> From<Deque<T>> for Vec<T> {
    fn from(deque: Deque<T>) -> Self {
        deque.into_iter().collect()
    }
}

impl<T> IntoIterator for Deque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a Deque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<T: Clone>(d: &Deque<T>) -> Vec<T> {
        d.iter().cloned().collect()
    }

    fn assert_shape<T>(d: &Deque<T>) {
        let cap = d.capacity();
        assert!(cap == 0 || cap.is_power_of_two(), "capacity {cap}");
        assert!(d.len() <= cap);
    }

    // ─── ends ─────────────────────────────────────────────────────────────────
    #[test]
    fn test_deque_ends_fifo() {
        let mut d = Deque::new();
        d.push_back(1);
        d.push_back(2);
        d.push_back(3);
        assert_eq!(d.pop_front(), Ok(1));
        assert_eq!(d.pop_front(), Ok(2));
        assert_eq!(d.pop_front(), Ok(3));
        assert_eq!(d.len(), 0);
    }

    #[test]
    fn test_deque_ends_lifo() {
        let mut d = Deque::new();
        for i in 0..5 {
            d.push_back(i);
        }
        for i in (0..5).rev() {
            assert_eq!(d.pop_back(), Ok(i));
        }
        assert!(d.is_empty());
    }

    #[test]
    fn test_deque_ends_push_front_order() {
        let mut d = Deque::new();
        d.push_front(1);
        d.push_front(2);
        d.push_front(3);
        assert_eq!(collect(&d), vec![3, 2, 1]);
        assert_eq!(d.at(0), Ok(&3));
        assert_eq!(d.at(2), Ok(&1));
        assert_eq!(d.front(), Ok(&3));
        assert_eq!(d.back(), Ok(&1));
    }

    #[test]
    fn test_deque_ends_empty_errors() {
        let mut d: Deque<i32> = Deque::new();
        assert_eq!(d.pop_front(), Err(DequeError::Empty { op: "pop_front" }));
        assert_eq!(d.pop_back(), Err(DequeError::Empty { op: "pop_back" }));
        assert_eq!(d.front(), Err(DequeError::Empty { op: "front" }));
        assert_eq!(d.back(), Err(DequeError::Empty { op: "back" }));
        assert!(d.front_mut().is_err());
        assert!(d.back_mut().is_err());
        assert_eq!(
            d.at(0),
            Err(DequeError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn test_deque_ends_front_back_mut() {
        let mut d: Deque<i32> = [1, 2, 3].into();
        *d.front_mut().unwrap() = 10;
        *d.back_mut().unwrap() = 30;
        assert_eq!(collect(&d), vec![10, 2, 30]);
    }

    #[test]
    fn test_deque_ends_wraparound() {
        let mut d = Deque::new();
        for i in 0..16 {
            d.push_back(i);
        }
        for _ in 0..10 {
            d.pop_front().unwrap();
        }
        // head is now at slot 10, tail wraps past the end
        for i in 16..24 {
            d.push_back(i);
        }
        assert_eq!(d.capacity(), 16);
        assert_eq!(collect(&d), (10..24).collect::<Vec<_>>());
    }

    #[test]
    fn test_deque_ends_pop_releases_value() {
        use std::rc::Rc;
        let shared = Rc::new(());
        let mut d = Deque::new();
        d.push_back(Rc::clone(&shared));
        d.push_back(Rc::clone(&shared));
        assert_eq!(Rc::strong_count(&shared), 3);
        drop(d.pop_front().unwrap());
        assert_eq!(Rc::strong_count(&shared), 2);
        d.clear();
        assert_eq!(Rc::strong_count(&shared), 1);
    }

    // ─── grow / shrink ────────────────────────────────────────────────────────
    #[test]
    fn test_deque_grow_lazy_allocation() {
        let mut d = Deque::new();
        assert_eq!(d.capacity(), 0);
        d.push_back(1);
        assert_eq!(d.capacity(), DEFAULT_MIN_CAPACITY);
    }

    #[test]
    fn test_deque_grow_doubles() {
        let mut d = Deque::new();
        for i in 0..16 {
            d.push_back(i);
        }
        assert_eq!(d.capacity(), 16);
        d.push_front(-1);
        assert_eq!(d.capacity(), 32);
        assert_eq!(d.front(), Ok(&-1));
        assert_eq!(d.back(), Ok(&15));
        assert_shape(&d);
    }

    #[test]
    fn test_deque_grow_when_wrapped() {
        let mut d = Deque::new();
        for i in 0..8 {
            d.push_back(i);
        }
        for i in 1..=8 {
            d.push_front(-i);
        }
        assert_eq!(d.capacity(), 16);
        d.push_back(8);
        assert_eq!(d.capacity(), 32);
        let expected: Vec<i32> = (-8..=8).collect();
        assert_eq!(collect(&d), expected);
    }

    #[test]
    fn test_deque_shrink_hysteresis() {
        let mut d = Deque::new();
        for i in 0..64 {
            d.push_back(i);
        }
        assert_eq!(d.capacity(), 64);

        let mut transitions = Vec::new();
        let mut last = d.capacity();
        while d.len() > 16 {
            d.pop_front().unwrap();
            if d.capacity() != last {
                transitions.push((d.len(), d.capacity()));
                last = d.capacity();
            }
        }
        assert_eq!(transitions, vec![(16, 32)]);

        // Alternating around the quarter mark does not reallocate.
        for i in 0..100 {
            d.push_back(i);
            assert_eq!(d.capacity(), 32);
            d.pop_front().unwrap();
            assert_eq!(d.capacity(), 32);
        }
    }

    #[test]
    fn test_deque_shrink_respects_base_capacity() {
        let mut d = Deque::new();
        for i in 0..32 {
            d.push_back(i);
        }
        while d.pop_back().is_ok() {}
        assert_eq!(d.capacity(), DEFAULT_MIN_CAPACITY);
    }

    #[test]
    fn test_deque_reserve() {
        let mut d: Deque<i32> = Deque::new();
        d.reserve(0);
        assert_eq!(d.capacity(), 0);
        d.reserve(20);
        assert_eq!(d.capacity(), 32);
        d.extend(0..10);
        d.reserve(5);
        assert_eq!(d.capacity(), 32);
        d.reserve(40);
        assert_eq!(d.capacity(), 64);
        assert_eq!(collect(&d), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_deque_grow_by_negative() {
        let mut d: Deque<i32> = [1, 2].into();
        let cap = d.capacity();
        assert_eq!(
            d.grow_by(-1),
            Err(DequeError::InvalidArgument { op: "grow_by" })
        );
        assert_eq!(d.grow_by(0), Ok(()));
        assert_eq!(d.capacity(), cap);
        assert_eq!(d.grow_by(100), Ok(()));
        assert_eq!(d.capacity(), 128);
    }

    #[test]
    fn test_deque_base_capacity() {
        let mut d: Deque<i32> = Deque::with_base_capacity(100);
        assert_eq!(d.base_capacity(), 128);
        assert_eq!(d.capacity(), 128);
        for i in 0..200 {
            d.push_back(i);
        }
        assert_eq!(d.capacity(), 256);
        while d.pop_front().is_ok() {}
        assert_eq!(d.capacity(), 128);

        let mut small = Deque::new();
        small.set_base_capacity(3);
        assert_eq!(small.base_capacity(), DEFAULT_MIN_CAPACITY);
        small.push_back(1);
        small.set_base_capacity(40);
        assert_eq!(small.capacity(), 64);
        assert_eq!(small.front(), Ok(&1));
    }

    #[test]
    fn test_deque_base_capacity_raised_while_empty() {
        // Emptied by pops: the buffer survives and must follow the new floor.
        let mut d: Deque<i32> = Deque::new();
        d.push_back(1);
        assert_eq!(d.pop_back(), Ok(1));
        assert_eq!(d.capacity(), DEFAULT_MIN_CAPACITY);
        d.set_base_capacity(64);
        assert_eq!(d.capacity(), 64);
        d.push_back(1);
        assert!(d.capacity() >= d.base_capacity());

        // Emptied by clear.
        let mut d: Deque<i32> = (0..5).collect();
        d.clear();
        d.set_base_capacity(1000);
        assert_eq!(d.base_capacity(), 1024);
        d.push_front(1);
        assert_eq!(d.capacity(), 1024);
        assert_eq!(collect(&d), vec![1]);

        // Never allocated: the first push allocates the floor, so no doubling follows.
        let mut d: Deque<i32> = Deque::new();
        d.set_base_capacity(256);
        assert_eq!(d.capacity(), 0);
        for i in 0..17 {
            d.push_back(i);
        }
        assert_eq!(d.capacity(), 256);

        // Raised on a full wrapped buffer: the window survives the move.
        let mut d: Deque<i32> = (0..16).collect();
        for _ in 0..5 {
            let x = d.pop_front().unwrap();
            d.push_back(x);
        }
        d.set_base_capacity(32);
        assert_eq!(d.capacity(), 32);
        d.push_back(16);
        assert_eq!(d.capacity(), 32);
        let want: Vec<i32> = (5..16).chain(0..5).chain([16]).collect();
        assert_eq!(collect(&d), want);
    }

    // ─── random access ────────────────────────────────────────────────────────
    #[test]
    fn test_deque_access_set_round_trip() {
        let mut d: Deque<i32> = (0..10).collect();
        d.rotate(3);
        for i in 0..d.len() {
            let before = collect(&d);
            assert!(d.set(i, 100).is_ok());
            assert_eq!(d.at(i), Ok(&100));
            let after = collect(&d);
            for j in 0..d.len() {
                if j != i {
                    assert_eq!(before[j], after[j]);
                }
            }
            d.set(i, before[i]).unwrap();
        }
    }

    #[test]
    fn test_deque_access_out_of_range() {
        let mut d: Deque<i32> = [1, 2, 3].into();
        let err = DequeError::IndexOutOfRange { index: 3, len: 3 };
        assert_eq!(d.at(3), Err(err));
        assert_eq!(d.set(3, 0), Err(err));
        assert_eq!(d.swap(0, 3), Err(err));
        assert_eq!(d.swap(3, 0), Err(err));
        assert_eq!(d.remove(3), Err(err));
        assert_eq!(d.get(3), None);
        assert_eq!(d.set(1, 9), Ok(2));
    }

    #[test]
    fn test_deque_access_swap() {
        let mut d: Deque<i32> = [1, 2, 3, 4].into();
        d.swap(0, 3).unwrap();
        assert_eq!(collect(&d), vec![4, 2, 3, 1]);
        d.swap(1, 1).unwrap();
        assert_eq!(collect(&d), vec![4, 2, 3, 1]);
    }

    #[test]
    fn test_deque_access_index_ops() {
        let mut d: Deque<i32> = [1, 2, 3].into();
        d[1] = 20;
        assert_eq!(d[1], 20);
    }

    #[test]
    #[should_panic(expected = "index out of range 5 with length 3")]
    fn test_deque_access_index_panics() {
        let d: Deque<i32> = [1, 2, 3].into();
        let _value = d[5];
    }

    #[test]
    fn test_deque_access_clear_keeps_capacity() {
        let mut d: Deque<i32> = (0..40).collect();
        let cap = d.capacity();
        d.clear();
        assert!(d.is_empty());
        assert_eq!(d.capacity(), cap);
        d.push_back(7);
        assert_eq!(d.pop_front(), Ok(7));
    }

    // ─── insert / remove ──────────────────────────────────────────────────────
    #[test]
    fn test_deque_insert_ends() {
        let mut d: Deque<i32> = [1, 2, 3].into();
        d.insert(0, 0);
        assert_eq!(collect(&d), vec![0, 1, 2, 3]);
        let n = d.len();
        d.insert(n, 4);
        d.insert(usize::MAX, 5);
        assert_eq!(collect(&d), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_deque_insert_middle() {
        for at in 0..=10 {
            let mut d: Deque<i32> = (0..10).collect();
            let mut model: Vec<i32> = (0..10).collect();
            d.insert(at, 99);
            model.insert(at, 99);
            assert_eq!(collect(&d), model, "insert at {at}");
        }
    }

    #[test]
    fn test_deque_insert_middle_wrapped_and_full() {
        let mut d = Deque::new();
        for i in 0..8 {
            d.push_back(i);
        }
        for i in 1..=8 {
            d.push_front(-i);
        }
        assert_eq!(d.len(), d.capacity());
        let mut model = collect(&d);
        d.insert(5, 100);
        model.insert(5, 100);
        d.insert(12, 200);
        model.insert(12, 200);
        assert_eq!(collect(&d), model);
        assert_shape(&d);
    }

    #[test]
    fn test_deque_remove_middle() {
        for at in 0..10 {
            let mut d: Deque<i32> = (0..10).collect();
            d.rotate(-4);
            let mut model = collect(&d);
            let expected = model.remove(at);
            assert_eq!(d.remove(at), Ok(expected));
            assert_eq!(collect(&d), model, "remove at {at}");
        }
    }

    #[test]
    fn test_deque_insert_remove_inverse() {
        let base: Deque<i32> = (0..13).collect();
        for k in 0..=base.len() {
            let mut d = base.clone();
            d.insert(k, -1);
            assert_eq!(d.remove(k), Ok(-1));
            assert_eq!(d, base);
        }
    }

    // ─── rotate ───────────────────────────────────────────────────────────────
    #[test]
    fn test_deque_rotate_full_relabels() {
        let mut d: Deque<i32> = Deque::new();
        d.set_base_capacity(8);
        assert_eq!(d.base_capacity(), 16);
        for i in 0..16 {
            d.push_back(i);
        }
        assert_eq!(d.len(), d.capacity());
        let before = d.shape();
        d.rotate(3);
        assert_eq!(d.at(0), Ok(&3));
        assert_eq!(d.back(), Ok(&2));
        let after = d.shape();
        assert_eq!(after.0, (before.0 + 3) & 15);
        assert_eq!(after.0, after.1);
        d.rotate(-5);
        assert_eq!(d.at(0), Ok(&14));
    }

    #[test]
    fn test_deque_rotate_with_gap() {
        let mut d: Deque<i32> = (0..5).collect();
        d.rotate(2);
        assert_eq!(collect(&d), vec![2, 3, 4, 0, 1]);
        d.rotate(-3);
        assert_eq!(collect(&d), vec![4, 0, 1, 2, 3]);
        d.rotate(10);
        assert_eq!(collect(&d), vec![4, 0, 1, 2, 3]);
        d.rotate(-7);
        assert_eq!(collect(&d), vec![2, 3, 4, 0, 1]);
        assert_shape(&d);
    }

    #[test]
    fn test_deque_rotate_composition() {
        let base: Deque<i32> = (0..11).collect();
        for n in -25..25 {
            let mut d = base.clone();
            d.rotate(n);
            d.rotate(-n);
            assert_eq!(d, base, "rotate {n}");
        }
    }

    #[test]
    fn test_deque_rotate_trivial() {
        let mut d: Deque<i32> = Deque::new();
        d.rotate(3);
        d.push_back(1);
        d.rotate(-9);
        assert_eq!(collect(&d), vec![1]);
    }

    // ─── search ───────────────────────────────────────────────────────────────
    #[test]
    fn test_deque_search_index_rindex() {
        let mut d: Deque<i32> = [5, 1, 5, 2].into();
        d.rotate(1);
        // [1, 5, 2, 5]
        assert_eq!(d.index(|&x| x == 5), Some(1));
        assert_eq!(d.rindex(|&x| x == 5), Some(3));
        assert_eq!(d.index(|&x| x == 9), None);
        assert_eq!(d.rindex(|&x| x == 9), None);
        assert!(d.contains(&2));
        assert!(!d.contains(&7));
        let empty: Deque<i32> = Deque::new();
        assert_eq!(empty.index(|_| true), None);
    }

    // ─── traits ───────────────────────────────────────────────────────────────
    #[test]
    fn test_deque_traits_comparison() {
        let d1: Deque<i32> = vec![1, 2, 3].into();
        let d2: Deque<i32> = vec![1, 2, 3].into_iter().collect();
        let d3: Deque<i32> = vec![1, 2, 4].into();
        let d4: Deque<i32> = vec![1, 2].into();

        assert_eq!(d1, d2);
        assert!(d1 < d3);
        assert!(d1 > d4);
        assert!(d3 > d1);
    }

    #[test]
    fn test_deque_traits_eq_ignores_layout() {
        let mut a: Deque<i32> = Deque::new();
        for i in (0..4).rev() {
            a.push_front(i);
        }
        let b: Deque<i32> = (0..4).collect();
        assert_eq!(a, b);

        use std::collections::hash_map::DefaultHasher;
        let hash = |d: &Deque<i32>| {
            let mut h = DefaultHasher::new();
            d.hash(&mut h);
            h.finish()
        };
        assert_eq!(hash(&a), hash(&b));
    }

    #[test]
    fn test_deque_traits_clone() {
        let mut d: Deque<i32> = Deque::with_base_capacity(64);
        d.extend([1, 2, 3]);
        d.rotate(1);
        let mut cloned = d.clone();
        d.push_back(4);
        assert_eq!(cloned.len(), 3);
        assert_eq!(cloned.capacity(), 64);
        assert_eq!(cloned.base_capacity(), 64);
        assert_eq!(cloned.pop_front(), Ok(2));
    }

    #[test]
    fn test_deque_traits_debug() {
        let d: Deque<i32> = [1, 2, 3].into();
        assert_eq!(format!("{:?}", d), "[1, 2, 3]");
    }

    #[test]
    fn test_deque_traits_extend_and_convert() {
        let mut d: Deque<i32> = Deque::new();
        d.extend(&[1, 2]);
        d.extend(vec![3]);
        let v: Vec<i32> = d.into();
        assert_eq!(v, vec![1, 2, 3]);
    }

    // ─── AnyDeque trait dispatch ──────────────────────────────────────────────
    fn exercise(any: &mut dyn AnyDeque<i32>) {
        any.push_back(10);
        any.push_front(5);
        any.insert(1, 7);
        assert_eq!(any.len(), 3);
        assert!(!any.is_empty());
        assert_eq!(any.get(1), Some(&7));
        assert_eq!(any.front(), Some(&5));
        assert_eq!(any.back(), Some(&10));
        if let Some(back) = any.back_mut() {
            *back += 1;
        }
        assert_eq!(any.remove(1), Some(7));
        assert_eq!(any.remove(9), None);
        assert_eq!(any.pop_back(), Some(11));
        assert_eq!(any.pop_front(), Some(5));
        assert_eq!(any.pop_front(), None);
        any.push_back(1);
        any.insert(40, 2);
        assert_eq!(any.back(), Some(&2));
        assert_eq!(any.len(), 2);
        any.clear();
        assert!(any.is_empty());
    }

    #[test]
    fn test_deque_any_deque_trait() {
        let mut d: Deque<i32> = Deque::new();
        exercise(&mut d);
        let mut v: VecDeque<i32> = VecDeque::new();
        exercise(&mut v);
    }
}
