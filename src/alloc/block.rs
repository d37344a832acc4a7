use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::ptr::{self, NonNull};

use super::{AllocError, Allocator, Global};

/// An owning handle to a block of `cap` uninitialized slots of `T`, obtained from the allocator
/// `A`.
///
/// A Block never reads, writes or drops the values in its slots; it only tracks the allocation and
/// releases it when dropped. Keeping track of which slots are initialized is the responsibility of
/// the collection built on top of it, which must drop all live values before the Block goes.
pub struct Block<T, A: Allocator = Global> {
    pub(crate) ptr: NonNull<T>,
    pub(crate) cap: usize,
    pub(crate) alloc: A,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T, A: Allocator> Block<T, A> {
    /// Creates a Block with no slots. Nothing is allocated.
    pub const fn dangling_in(alloc: A) -> Block<T, A> {
        Block {
            ptr: NonNull::dangling(),
            cap: 0,
            alloc,
            _phantom: PhantomData,
        }
    }

    /// Allocates a Block with exactly `cap` uninitialized slots.
    ///
    /// # Errors
    /// Fails if the layout for `cap` slots overflows or the allocator runs out of memory.
    pub fn try_with_cap_in(cap: usize, alloc: A) -> Result<Block<T, A>, AllocError> {
        let ptr = alloc.allocate_slots::<T>(cap)?;
        Ok(Block {
            ptr,
            cap,
            alloc,
            _phantom: PhantomData,
        })
    }

    /// Returns the number of slots in the Block.
    pub const fn cap(&self) -> usize {
        self.cap
    }

    /// Returns a reference to the allocator which owns this Block's memory.
    pub const fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Returns a pointer to the first slot.
    pub const fn as_ptr(&self) -> NonNull<T> {
        self.ptr
    }

    /// Returns a pointer to the slot at `index`.
    ///
    /// # Safety
    /// `index` must be no greater than [`cap`](Block::cap). (A pointer to `cap` itself is one past
    /// the end and must not be dereferenced.)
    pub const unsafe fn slot(&self, index: usize) -> NonNull<T> {
        // SAFETY: The offset stays within or one past the end of the allocation.
        unsafe { self.ptr.add(index) }
    }

    /// Moves the first `live` values into a freshly allocated block of `new_cap` slots, then
    /// releases the old allocation.
    ///
    /// The new block is allocated before anything is moved, so if this returns an error the Block
    /// is left exactly as it was.
    ///
    /// # Errors
    /// Fails if the layout for `new_cap` slots overflows or the allocator runs out of memory.
    ///
    /// # Safety
    /// The first `live` slots must be initialized and `live` must be no greater than `new_cap`.
    pub unsafe fn try_relocate(&mut self, new_cap: usize, live: usize) -> Result<(), AllocError> {
        let new_ptr = self.alloc.allocate_slots::<T>(new_cap)?;

        // SAFETY: Both allocations are valid for at least live values and are distinct, so they
        // can't overlap. The values are moved bitwise and the old copies are never read again.
        unsafe {
            ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), live);
            self.alloc.deallocate_slots(self.ptr, self.cap);
        }

        self.ptr = new_ptr;
        self.cap = new_cap;
        Ok(())
    }
}

impl<T, A: Allocator> Drop for Block<T, A> {
    fn drop(&mut self) {
        // SAFETY: ptr was allocated by alloc with exactly cap slots (or is dangling with a
        // zero-sized layout, which is ignored).
        unsafe { self.alloc.deallocate_slots(self.ptr, self.cap) }
    }
}

impl<T, A: Allocator + Debug> Debug for Block<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("ptr", &self.ptr)
            .field("cap", &self.cap)
            .field("alloc", &self.alloc)
            .finish()
    }
}

// SAFETY: A Block uniquely owns its allocation, so it can be sent if T and the allocator can.
unsafe impl<T: Send, A: Allocator + Send> Send for Block<T, A> {}
// SAFETY: A Block's API offers no interior mutability through a shared reference.
unsafe impl<T: Sync, A: Allocator + Sync> Sync for Block<T, A> {}
