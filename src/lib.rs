//! ringrange - fixed-capacity FIFO ring buffer
//!
//! A bounded, single-threaded queue over `N` cache-aligned slots allocated
//! once at construction. Inserts past capacity are rejected, never
//! overwritten; removals from an empty buffer report `None`/`false`.
//!
//! ```
//! use ringrange::RingBuffer;
//!
//! let mut rb: RingBuffer<u32, 8> = RingBuffer::new();
//! assert!(rb.enqueue(1));
//! assert!(rb.enqueue(2));
//! assert_eq!(rb.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
//! assert_eq!(rb.dequeue(), Some(1));
//! assert_eq!(rb.n_entries(), 1);
//! ```

pub mod core;
pub mod error;

pub use crate::core::{Cursor, Iter, RingBuffer};
pub use crate::error::Full;
