#![cfg(feature = "malloc")]

use std::alloc::Layout;
use std::ffi::c_void;
use std::mem;
use std::ptr::{self, NonNull};

use super::{AllocError, Allocator, OutOfMemory};

/// An [`Allocator`] that goes straight to the C library's `malloc` and `free`. Alignments larger
/// than `malloc` guarantees are served by `posix_memalign`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Malloc;

/// The alignment that every pointer returned by `malloc` is guaranteed to have.
const MALLOC_ALIGN: usize = 2 * mem::size_of::<usize>();

// SAFETY: malloc and posix_memalign return memory valid for the requested size and alignment or a
// failure, which is reported as an error rather than handed out.
unsafe impl Allocator for Malloc {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }

        let raw_ptr = if layout.align() <= MALLOC_ALIGN {
            // SAFETY: malloc has no preconditions beyond a non-zero size.
            unsafe { libc::malloc(layout.size()) }
        } else {
            let mut out: *mut c_void = ptr::null_mut();
            // posix_memalign requires a power of two multiple of the pointer size, which any
            // alignment above MALLOC_ALIGN is.
            // SAFETY: out is a valid location to write the resulting pointer to.
            let res = unsafe { libc::posix_memalign(&mut out, layout.align(), layout.size()) };
            if res == 0 { out } else { ptr::null_mut() }
        };

        NonNull::new(raw_ptr.cast()).ok_or_else(|| OutOfMemory::for_layout(layout).into())
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() != 0 {
            // SAFETY: The caller guarantees that ptr came from allocate, so it came from malloc or
            // posix_memalign, both of which are released with free.
            unsafe { libc::free(ptr.as_ptr().cast()) }
        }
    }
}
