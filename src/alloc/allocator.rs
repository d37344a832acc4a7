use std::alloc::Layout;
use std::ptr::{self, NonNull};

use super::{AllocError, CapacityOverflow};

/// The capability every collection in this crate allocates through.
///
/// Implementors only provide the raw byte-level [`allocate`](Allocator::allocate) and
/// [`deallocate`](Allocator::deallocate). The typed helpers built on top of them handle layouts,
/// zero-sized requests and the construction / destruction of values in place.
///
/// # Safety
/// Implementors must return memory that is valid for reads and writes of `layout.size()` bytes,
/// aligned to `layout.align()` and not aliased by any other live allocation. The memory must stay
/// valid until it is passed back to `deallocate` with the same layout. `allocate` is never called
/// with a zero-sized layout by the provided methods.
pub unsafe trait Allocator {
    /// Allocates a block of memory described by `layout`.
    ///
    /// # Errors
    /// Returns [`AllocError::OutOfMemory`] if the request can't be satisfied.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Releases a block previously returned by [`allocate`](Allocator::allocate).
    ///
    /// # Safety
    /// `ptr` must have been allocated by this allocator with exactly `layout`, and must not be
    /// used after this call.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);

    /// Allocates uninitialized storage for `count` values of `T`. Zero-sized requests don't touch
    /// the backend and return a dangling, well-aligned pointer.
    ///
    /// # Errors
    /// Returns [`AllocError::CapacityOverflow`] if the total size exceeds [`isize::MAX`] and
    /// [`AllocError::OutOfMemory`] if the backend fails.
    fn allocate_slots<T>(&self, count: usize) -> Result<NonNull<T>, AllocError> {
        let layout = slots_layout::<T>(count)?;
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }
        Ok(self.allocate(layout)?.cast())
    }

    /// Releases storage obtained from [`allocate_slots`](Allocator::allocate_slots). The values in
    /// the slots aren't dropped.
    ///
    /// # Safety
    /// `ptr` must have been returned by `allocate_slots::<T>(count)` on this allocator, with the
    /// same `count`, and must not be used afterwards.
    unsafe fn deallocate_slots<T>(&self, ptr: NonNull<T>, count: usize) {
        // The layout was valid when allocating with the same count.
        let Ok(layout) = slots_layout::<T>(count) else { return };
        if layout.size() != 0 {
            // SAFETY: The caller guarantees that ptr came from this allocator with this layout.
            unsafe { self.deallocate(ptr.cast(), layout) }
        }
    }

    /// Moves `value` into the uninitialized `slot`.
    ///
    /// # Safety
    /// `slot` must be valid for writes and properly aligned. Any value previously in the slot is
    /// overwritten without being dropped.
    unsafe fn construct<T>(&self, slot: NonNull<T>, value: T) {
        // SAFETY: Upheld by the caller.
        unsafe { slot.write(value) }
    }

    /// Drops the value in `slot` in place, leaving the slot uninitialized.
    ///
    /// # Safety
    /// `slot` must point to an initialized value that isn't used again until it is reconstructed.
    unsafe fn destroy<T>(&self, slot: NonNull<T>) {
        // SAFETY: Upheld by the caller.
        unsafe { ptr::drop_in_place(slot.as_ptr()) }
    }
}

// SAFETY: Forwarding to a valid allocator.
unsafe impl<A: Allocator> Allocator for &A {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        (**self).allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: Upheld by the caller.
        unsafe { (**self).deallocate(ptr, layout) }
    }
}

/// Creates the [`Layout`] for `count` consecutive values of `T`.
pub(crate) fn slots_layout<T>(count: usize) -> Result<Layout, AllocError> {
    Layout::array::<T>(count).map_err(|_| CapacityOverflow.into())
}
