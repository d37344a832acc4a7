use std::alloc::{self, Layout};
use std::ptr::NonNull;

use super::{AllocError, Allocator, OutOfMemory};

/// The default [`Allocator`], backed by Rust's global allocator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Global;

// SAFETY: std::alloc::alloc returns memory satisfying the layout or null, which is reported as an
// error rather than handed out.
unsafe impl Allocator for Global {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }

        // SAFETY: Zero-sized layouts have been guarded against.
        let raw_ptr = unsafe { alloc::alloc(layout) };
        NonNull::new(raw_ptr).ok_or_else(|| OutOfMemory::for_layout(layout).into())
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() != 0 {
            // SAFETY: The caller guarantees that ptr was allocated here with the same layout.
            // Zero-sized layouts are never allocated.
            unsafe { alloc::dealloc(ptr.as_ptr(), layout) }
        }
    }
}
