//! Fixed-capacity FIFO ring buffer
//!
//! Indexing uses two monotonic `i64` counters (total enqueued, total
//! dequeued). The live entry count is their difference; the physical slot of
//! a logical position is `counter & (N - 1)`. The counters are never reset,
//! only their projection onto the slot block wraps.
//!
//! Storage is allocated once in [`RingBuffer::new`]. After that no operation
//! allocates or blocks.

use std::fmt;

use super::aligned_storage::AlignedSlots;
use super::cursor::{Cursor, Iter};
use crate::error::Full;

/// Bounded FIFO queue over `N` pre-allocated, cache-aligned slots.
///
/// `N` must be a power of two. Anything else fails to compile as soon as
/// `RingBuffer::<T, N>::new` is instantiated:
///
/// ```compile_fail
/// let rb: ringrange::RingBuffer<u8, 3> = ringrange::RingBuffer::new();
/// ```
///
/// Not `Clone`: the slot block and the counters exist exactly once.
pub struct RingBuffer<T, const N: usize> {
    // Total successful inserts
    enqueued: i64,
    // Total successful removals
    dequeued: i64,
    slots: AlignedSlots<T, N>,
}

impl<T, const N: usize> RingBuffer<T, N> {
    const MASK: usize = N - 1;

    const CAPACITY_IS_POWER_OF_TWO: () = assert!(
        N.is_power_of_two(),
        "RingBuffer capacity N must be a non-zero power of two"
    );

    #[inline(always)]
    fn slot_index(counter: i64) -> usize {
        counter as usize & Self::MASK
    }

    /// Number of live entries: `enqueued - dequeued`, always in `[0, N]`.
    #[inline(always)]
    pub fn n_entries(&self) -> u64 {
        self.enqueued.wrapping_sub(self.dequeued) as u64
    }

    /// Slot count, always `N`.
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        N
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.enqueued == self.dequeued
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.n_entries() >= N as u64
    }

    /// Append `value` at the back.
    ///
    /// Returns `false` and drops `value` if the buffer already holds `N`
    /// entries; stored contents are left untouched in that case.
    #[inline(always)]
    pub fn enqueue(&mut self, value: T) -> bool {
        self.try_enqueue(value).is_ok()
    }

    /// Like [`enqueue`](Self::enqueue), but hands a rejected value back.
    #[inline(always)]
    pub fn try_enqueue(&mut self, value: T) -> Result<(), Full<T>> {
        if self.is_full() {
            return Err(Full(value));
        }

        let idx = Self::slot_index(self.enqueued);
        self.slots.as_mut_slice()[idx] = value;
        self.enqueued = self.enqueued.wrapping_add(1);

        Ok(())
    }

    /// Construct a `T` from `args` directly into the next free slot.
    ///
    /// Nothing is constructed when the buffer is full.
    #[inline(always)]
    pub fn emplace<A>(&mut self, args: A) -> bool
    where
        T: From<A>,
    {
        self.emplace_with(|| T::from(args))
    }

    /// Closure form of [`emplace`](Self::emplace); `make` only runs if a slot
    /// is free.
    #[inline(always)]
    pub fn emplace_with<F>(&mut self, make: F) -> bool
    where
        F: FnOnce() -> T,
    {
        if self.is_full() {
            return false;
        }

        let idx = Self::slot_index(self.enqueued);
        self.slots.as_mut_slice()[idx] = make();
        self.enqueued = self.enqueued.wrapping_add(1);

        true
    }

    /// Discard the oldest entry. Returns whether one was removed.
    #[inline(always)]
    pub fn pop(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        self.dequeued = self.dequeued.wrapping_add(1);
        true
    }

    /// Cursor at the oldest live entry.
    #[inline(always)]
    pub fn begin(&self) -> Cursor<'_, T, N> {
        Cursor::new(self.slots.as_slice(), Self::slot_index(self.dequeued))
    }

    /// Cursor one past the newest live entry (the next slot to be written).
    ///
    /// When the buffer is full this aliases `begin()`: both counters differ
    /// by exactly `N` and land on the same slot.
    #[inline(always)]
    pub fn end(&self) -> Cursor<'_, T, N> {
        Cursor::new(self.slots.as_slice(), Self::slot_index(self.enqueued))
    }

    /// Snapshot of the `begin()..end()` range, oldest first.
    ///
    /// A full buffer iterates as empty; use [`n_entries`](Self::n_entries)
    /// for occupancy.
    #[inline(always)]
    pub fn iter(&self) -> Iter<'_, T, N> {
        Iter::new(self.begin(), self.end())
    }

    /// Oldest live entry, without removing it.
    #[inline(always)]
    pub fn peek(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        Some(&self.slots.as_slice()[Self::slot_index(self.dequeued)])
    }
}

impl<T: Default, const N: usize> RingBuffer<T, N> {
    /// Allocate all `N` slots up front, each holding `T::default()`.
    ///
    /// # Panics
    /// Aborts via `handle_alloc_error` if the slot block cannot be
    /// allocated.
    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::CAPACITY_IS_POWER_OF_TWO;

        Self {
            enqueued: 0,
            dequeued: 0,
            slots: AlignedSlots::new(),
        }
    }
}

impl<T: Clone, const N: usize> RingBuffer<T, N> {
    /// Remove and return the oldest entry.
    ///
    /// The value is cloned out; the vacated slot keeps its old contents
    /// until a later insert overwrites it.
    #[inline(always)]
    pub fn dequeue(&mut self) -> Option<T> {
        let value = self.peek().cloned()?;
        self.dequeued = self.dequeued.wrapping_add(1);
        Some(value)
    }
}

impl<T: Default, const N: usize> Default for RingBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a RingBuffer<T, N> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for RingBuffer<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &N)
            .field("enqueued", &self.enqueued)
            .field("dequeued", &self.dequeued)
            .field("entries", &LiveEntries(self))
            .finish()
    }
}

// Walks dequeued..enqueued by counter, so a full buffer lists all N entries
// even though its begin/end cursors alias.
struct LiveEntries<'a, T, const N: usize>(&'a RingBuffer<T, N>);

impl<T: fmt::Debug, const N: usize> fmt::Debug for LiveEntries<'_, T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rb = self.0;
        let slots = rb.slots.as_slice();
        f.debug_list()
            .entries((0..rb.n_entries()).map(|k| {
                &slots[RingBuffer::<T, N>::slot_index(rb.dequeued.wrapping_add(k as i64))]
            }))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_enqueue_dequeue() {
        let mut rb: RingBuffer<u64, 16> = RingBuffer::new();

        assert!(rb.is_empty());
        assert!(!rb.is_full());

        assert!(rb.enqueue(42));
        assert!(!rb.is_empty());
        assert_eq!(rb.n_entries(), 1);

        assert_eq!(rb.dequeue(), Some(42));
        assert!(rb.is_empty());
        assert_eq!(rb.dequeue(), None);
    }

    #[test]
    fn test_full_buffer() {
        let mut rb: RingBuffer<u64, 4> = RingBuffer::new();

        assert!(rb.enqueue(1));
        assert!(rb.enqueue(2));
        assert!(rb.enqueue(3));
        assert!(rb.enqueue(4));

        assert!(rb.is_full());
        assert!(!rb.enqueue(5)); // Should fail - buffer full
        assert_eq!(rb.try_enqueue(6), Err(Full(6)));

        assert_eq!(rb.dequeue(), Some(1));
        assert!(rb.enqueue(5)); // Now should succeed
    }

    #[test]
    fn test_wraparound() {
        let mut rb: RingBuffer<u64, 4> = RingBuffer::new();

        // Fill and drain multiple times to test wraparound
        for round in 0..10 {
            for i in 0..4 {
                assert!(rb.enqueue(round * 4 + i));
            }
            for i in 0..4 {
                assert_eq!(rb.dequeue(), Some(round * 4 + i));
            }
        }
        assert_eq!(rb.enqueued, 40);
        assert_eq!(rb.dequeued, 40);
    }

    #[test]
    fn test_pop() {
        let mut rb: RingBuffer<i32, 2> = RingBuffer::new();
        assert!(!rb.pop());

        rb.enqueue(1);
        rb.enqueue(2);
        assert!(rb.pop());
        assert_eq!(rb.peek(), Some(&2));
        assert!(rb.pop());
        assert!(!rb.pop());
        assert_eq!(rb.n_entries(), 0);
    }

    #[test]
    fn test_vacated_slot_not_cleared() {
        let mut rb: RingBuffer<i32, 4> = RingBuffer::new();
        rb.enqueue(9);
        let begin = rb.begin().position();
        rb.dequeue();
        assert_eq!(rb.slots.as_slice()[begin], 9);
    }

    #[test]
    fn test_emplace_with_skips_construction_when_full() {
        let mut rb: RingBuffer<i32, 1> = RingBuffer::new();
        assert!(rb.emplace_with(|| 1));

        let mut ran = false;
        assert!(!rb.emplace_with(|| {
            ran = true;
            2
        }));
        assert!(!ran);
        assert_eq!(rb.dequeue(), Some(1));
    }

    #[test]
    fn test_full_buffer_cursors_alias() {
        let mut rb: RingBuffer<u8, 4> = RingBuffer::new();
        for i in 0..4 {
            rb.enqueue(i);
        }
        assert_eq!(rb.n_entries(), 4);
        assert_eq!(rb.begin(), rb.end());
        assert_eq!(rb.iter().count(), 0);
    }

    #[test]
    fn test_debug_lists_live_entries() {
        let mut rb: RingBuffer<i32, 4> = RingBuffer::new();
        rb.enqueue(5);
        rb.enqueue(6);
        rb.pop();
        let s = format!("{:?}", rb);
        assert!(s.contains("enqueued: 2"));
        assert!(s.contains("dequeued: 1"));
        assert!(s.contains("entries: [6]"));
    }

    #[test]
    fn test_debug_lists_all_entries_when_full() {
        let mut rb: RingBuffer<i32, 4> = RingBuffer::new();
        for i in 0..5 {
            rb.enqueue(i);
        }
        rb.pop();
        rb.enqueue(7);
        rb.enqueue(8);
        assert!(rb.is_full());
        assert_eq!(rb.iter().count(), 0);

        let s = format!("{:?}", rb);
        assert!(s.contains("entries: [1, 2, 3, 7]"), "{}", s);
    }
}
