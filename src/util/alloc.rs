#![cfg(test)]

use std::alloc::Layout;
use std::cell::{Cell, RefCell};
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;
use std::rc::Rc;

use crate::alloc::{AllocError, Allocator, Global, OutOfMemory};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZeroSizedType;

#[derive(Debug, Clone)]
pub struct CountedDrop(pub Rc<RefCell<usize>>);

impl CountedDrop {
    pub fn new(value: usize) -> CountedDrop {
        CountedDrop(Rc::new(RefCell::new(value)))
    }
}

impl Deref for CountedDrop {
    type Target = Rc<RefCell<usize>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for CountedDrop {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Drop for CountedDrop {
    fn drop(&mut self) {
        self.0.replace_with(|v| *v + 1);
    }
}

/// An allocator which forwards to [`Global`] for a limited number of allocations and reports
/// [`OutOfMemory`] for every request after that. Clones share the same budget and counters.
#[derive(Debug, Clone)]
pub struct FailingAllocator {
    budget: Rc<Cell<usize>>,
    live: Rc<Cell<usize>>,
}

impl FailingAllocator {
    pub fn new(budget: usize) -> FailingAllocator {
        FailingAllocator {
            budget: Rc::new(Cell::new(budget)),
            live: Rc::new(Cell::new(0)),
        }
    }

    pub fn set_budget(&self, budget: usize) {
        self.budget.set(budget);
    }

    /// The number of allocations that haven't been released yet.
    pub fn live(&self) -> usize {
        self.live.get()
    }
}

// SAFETY: Every successful allocation comes from Global.
unsafe impl Allocator for FailingAllocator {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        match self.budget.get().checked_sub(1) {
            Some(remaining) => {
                let ptr = Global.allocate(layout)?;
                self.budget.set(remaining);
                self.live.set(self.live.get() + 1);
                Ok(ptr)
            },
            None => Err(OutOfMemory::for_layout(layout).into()),
        }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.live.set(self.live.get() - 1);
        // SAFETY: ptr was allocated by Global with this layout.
        unsafe { Global.deallocate(ptr, layout) }
    }
}
