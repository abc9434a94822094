//! # Ring Deque
//!
//! A growable double-ended queue backed by a power-of-two ring buffer.
//!
//! [`Deque`] gives O(1) amortized push and pop at both ends and O(1) indexed access.
//! Inserting, removing and rotating in the middle are supported too, at a cost bounded
//! by the distance to the nearer end.
//!
//! ## Key Features
//!
//! * **Bitmask indexing:** capacity is always a power of two, so a logical index maps
//!   to a slot with `(head + i) & (capacity - 1)`.
//! * **Shrink hysteresis:** the buffer halves only when a pop leaves it exactly a quarter
//!   full, so alternating push/pop near a boundary never thrashes.
//! * **Batched drains:** [`Deque::drain_front`] and [`Deque::drain_back`] suspend
//!   shrinking and shrink to fit once at the end.
//! * **O(1) rotation when full:** rotating a full buffer only relabels its ends.
//! * **Guarded cursors:** a [`Cursor`] holds no borrow and reports
//!   [`DequeError::ConcurrentModification`] if the deque changed shape under it.
//! * **Interoperability:** [`Deque`] implements the [`AnyDeque`] trait, as does
//!   `std::collections::VecDeque`.
//!
//! ## Base capacity
//!
//! The buffer is never shrunk below its base capacity.  It defaults to
//! [`DEFAULT_MIN_CAPACITY`] and can be raised with [`Deque::with_base_capacity`] or
//! [`Deque::set_base_capacity`]; the value is rounded up to a power of two.
//!
//! ## Examples
//!
//! ### Queue and stack
//!
//! ```rust
//! use ring_deque::Deque;
//!
//! let mut q: Deque<i32> = Deque::new();
//! q.push_back(1);
//! q.push_back(2);
//! q.push_front(0);
//!
//! assert_eq!(q.pop_front(), Ok(0));
//! assert_eq!(q.pop_back(), Ok(2));
//! assert_eq!(q.at(0), Ok(&1));
//! ```
//!
//! ### Middle operations
//!
//! ```rust
//! use ring_deque::Deque;
//!
//! let mut d: Deque<char> = "abde".chars().collect();
//! d.insert(2, 'c');
//! assert_eq!(d.iter().collect::<String>(), "abcde");
//!
//! d.rotate(2);
//! assert_eq!(d.iter().collect::<String>(), "cdeab");
//!
//! assert_eq!(d.remove(0), Ok('c'));
//! assert_eq!(d.index(|&c| c == 'a'), Some(2));
//! ```
//!
//! ### Cursors
//!
//! ```rust
//! use ring_deque::{Deque, DequeError};
//!
//! let mut d: Deque<i32> = (0..4).collect();
//! let mut cursor = d.cursor();
//! assert_eq!(cursor.next(&d), Ok(Some(&0)));
//!
//! d.push_back(4);
//! assert_eq!(cursor.next(&d), Err(DequeError::ConcurrentModification));
//! ```

// --- Module Declarations ---

pub mod deque;
pub mod error;
pub mod iter;

// --- Re-exports ---

pub use deque::{AnyDeque, DEFAULT_MIN_CAPACITY, Deque};
pub use error::{DequeError, Result};
pub use iter::{Cursor, DrainBack, DrainFront, IntoIter, Iter};
