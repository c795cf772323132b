//! Core module: fixed-capacity ring buffer over aligned storage
//!
//! Design principles:
//! - No-Allocation: the slot block is allocated once in `RingBuffer::new`
//! - Power-of-two capacity: slot indices are a bitmask, never a division
//! - Total operations: full/empty are return values, never panics

mod aligned_storage;
mod cursor;
mod ring_buffer;

pub use aligned_storage::{AlignedSlots, CACHE_LINE};
pub use cursor::{Cursor, Iter};
pub use ring_buffer::RingBuffer;
