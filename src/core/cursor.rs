//! Snapshot cursors over the slot block
//!
//! A [`Cursor`] is a physical slot position plus a borrow of the slots. The
//! pair returned by `begin()`/`end()` is frozen at the moment it is created;
//! since both borrow the buffer, it cannot be mutated while they are alive.

use std::fmt;
use std::iter::FusedIterator;
use std::ptr;

/// Position inside a buffer's slot block, advancing one slot (mod N) per step.
pub struct Cursor<'a, T, const N: usize> {
    slots: &'a [T],
    position: usize,
}

impl<'a, T, const N: usize> Cursor<'a, T, N> {
    const MASK: usize = N - 1;

    #[inline(always)]
    pub(crate) fn new(slots: &'a [T], position: usize) -> Self {
        debug_assert_eq!(slots.len(), N);
        Self {
            slots,
            position: position & Self::MASK,
        }
    }

    /// Physical slot index this cursor points at.
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Element in the slot under the cursor.
    ///
    /// No liveness check is made: an `end()` cursor points at the next free
    /// slot, which holds either the default value or a stale entry.
    #[inline(always)]
    pub fn get(&self) -> &'a T {
        &self.slots[self.position]
    }

    /// Step to the next slot, wrapping at N.
    #[inline(always)]
    pub fn advance(&mut self) -> &mut Self {
        self.position = (self.position + 1) & Self::MASK;
        self
    }

    /// Number of `advance` steps needed to reach `other`.
    ///
    /// Always in `[0, N)`, so a full buffer's begin/end pair reports zero.
    #[inline(always)]
    pub fn distance_to(&self, other: &Self) -> usize {
        other.position.wrapping_sub(self.position) & Self::MASK
    }
}

impl<T, const N: usize> Clone for Cursor<'_, T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const N: usize> Copy for Cursor<'_, T, N> {}

impl<T, const N: usize> PartialEq for Cursor<'_, T, N> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.slots.as_ptr(), other.slots.as_ptr()) && self.position == other.position
    }
}

impl<T, const N: usize> Eq for Cursor<'_, T, N> {}

impl<T, const N: usize> fmt::Debug for Cursor<'_, T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("base", &self.slots.as_ptr())
            .field("position", &self.position)
            .finish()
    }
}

/// Iterator over a `[begin, end)` cursor range, oldest entry first.
pub struct Iter<'a, T, const N: usize> {
    front: Cursor<'a, T, N>,
    // Steps left, fixed from the cursor distance when the range is built
    remaining: usize,
}

impl<'a, T, const N: usize> Iter<'a, T, N> {
    #[inline(always)]
    pub(crate) fn new(begin: Cursor<'a, T, N>, end: Cursor<'a, T, N>) -> Self {
        Self {
            front: begin,
            remaining: begin.distance_to(&end),
        }
    }
}

impl<T, const N: usize> Clone for Iter<'_, T, N> {
    fn clone(&self) -> Self {
        Self {
            front: self.front,
            remaining: self.remaining,
        }
    }
}

impl<'a, T, const N: usize> Iterator for Iter<'a, T, N> {
    type Item = &'a T;

    #[inline(always)]
    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.front.get();
        self.front.advance();
        self.remaining -= 1;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, const N: usize> ExactSizeIterator for Iter<'_, T, N> {}

impl<T, const N: usize> FusedIterator for Iter<'_, T, N> {}

impl<T: fmt::Debug, const N: usize> fmt::Debug for Iter<'_, T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
