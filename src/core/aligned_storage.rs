//! Cache-line aligned, fixed-length slot storage
//!
//! The block is allocated exactly once with an explicit `Layout`, so every
//! slot lives in one contiguous region whose start sits on a 64-byte boundary
//! (or `T`'s own alignment, if larger). There is no reallocation API.

use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};
use std::slice;

/// Minimum alignment of the slot block (one x86-64 cache line)
pub const CACHE_LINE: usize = 64;

/// Owned block of exactly `N` initialized slots.
pub struct AlignedSlots<T, const N: usize> {
    ptr: NonNull<T>,
    _marker: PhantomData<T>,
}

// SAFETY: AlignedSlots owns its elements exactly like Box<[T]> does.
unsafe impl<T: Send, const N: usize> Send for AlignedSlots<T, N> {}
unsafe impl<T: Sync, const N: usize> Sync for AlignedSlots<T, N> {}

impl<T, const N: usize> AlignedSlots<T, N> {
    /// Alignment actually requested from the allocator
    pub const ALIGN: usize = if mem::align_of::<T>() > CACHE_LINE {
        mem::align_of::<T>()
    } else {
        CACHE_LINE
    };

    fn layout() -> Layout {
        Layout::array::<T>(N)
            .and_then(|layout| layout.align_to(Self::ALIGN))
            .unwrap_or_else(|_| panic!("capacity overflow"))
    }

    /// Allocate the block and fill every slot from `init`.
    ///
    /// Allocation failure is fatal: it goes through
    /// [`std::alloc::handle_alloc_error`], there is no degraded mode.
    pub fn new_with(mut init: impl FnMut() -> T) -> Self {
        let layout = Self::layout();

        let ptr = if layout.size() == 0 {
            NonNull::dangling()
        } else {
            // SAFETY: layout has non-zero size
            let raw = unsafe { alloc::alloc(layout) };
            match NonNull::new(raw as *mut T) {
                Some(ptr) => ptr,
                None => alloc::handle_alloc_error(layout),
            }
        };

        // Drops what was written so far and frees the block if `init` panics.
        let mut guard = InitGuard {
            ptr,
            layout,
            initialized: 0,
        };
        while guard.initialized < N {
            // SAFETY: initialized < N, slot is in bounds and not yet written
            unsafe { ptr.as_ptr().add(guard.initialized).write(init()) };
            guard.initialized += 1;
        }
        mem::forget(guard);

        Self {
            ptr,
            _marker: PhantomData,
        }
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: ptr points to N initialized, properly aligned slots
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), N) }
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as above, and &mut self guarantees exclusive access
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), N) }
    }
}

impl<T: Default, const N: usize> AlignedSlots<T, N> {
    /// Allocate the block with every slot set to `T::default()`.
    pub fn new() -> Self {
        Self::new_with(T::default)
    }
}

impl<T: Default, const N: usize> Default for AlignedSlots<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Drop for AlignedSlots<T, N> {
    fn drop(&mut self) {
        // SAFETY: all N slots are initialized and dropped exactly once here
        unsafe { ptr::drop_in_place(self.as_mut_slice() as *mut [T]) };

        let layout = Self::layout();
        if layout.size() != 0 {
            // SAFETY: allocated in new_with with this same layout
            unsafe { alloc::dealloc(self.ptr.as_ptr() as *mut u8, layout) };
        }
    }
}

struct InitGuard<T> {
    ptr: NonNull<T>,
    layout: Layout,
    initialized: usize,
}

impl<T> Drop for InitGuard<T> {
    fn drop(&mut self) {
        // SAFETY: only the first `initialized` slots were written, and the
        // block came from alloc with `layout` (skipped for zero-sized layouts)
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.ptr.as_ptr(),
                self.initialized,
            ));
            if self.layout.size() != 0 {
                alloc::dealloc(self.ptr.as_ptr() as *mut u8, self.layout);
            }
        }
    }
}
