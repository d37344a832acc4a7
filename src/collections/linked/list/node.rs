use std::ptr::NonNull;

use crate::alloc::{AllocError, Allocator};

pub(crate) type Link<T> = Option<NodePtr<T>>;

pub(crate) struct Node<T> {
    pub value: T,
    pub prev: Link<T>,
    pub next: Link<T>,
}

/// An unowned pointer to a node allocated by a list's allocator. Copying a NodePtr never copies the
/// node; the list that allocated it is responsible for releasing it exactly once.
///
/// The accessors hand out references with an unbounded lifetime. Callers tie them to a borrow of
/// the owning list.
#[derive(Debug)]
pub(crate) struct NodePtr<T>(pub NonNull<Node<T>>);

impl<T> NodePtr<T> {
    /// Allocates a single node through `alloc` and moves `node` into it.
    pub fn try_new_in<A: Allocator>(node: Node<T>, alloc: &A) -> Result<NodePtr<T>, AllocError> {
        let slot = alloc.allocate_slots::<Node<T>>(1)?;
        // SAFETY: slot was just allocated with room for one node.
        unsafe { alloc.construct(slot, node) }
        Ok(NodePtr(slot))
    }

    /// Moves the node out of its allocation and releases the allocation.
    ///
    /// # Safety
    /// The node must have been allocated by `alloc` and must not be accessed through any copy of
    /// this pointer afterwards.
    pub unsafe fn take_node<A: Allocator>(self, alloc: &A) -> Node<T> {
        // SAFETY: The node is initialized and is read exactly once before being deallocated.
        unsafe {
            let node = self.0.read();
            alloc.deallocate_slots(self.0, 1);
            node
        }
    }

    pub const fn value<'a>(&self) -> &'a T {
        // SAFETY: A NodePtr held by a list always points to an initialized node.
        unsafe { &(*self.0.as_ptr()).value }
    }

    #[allow(clippy::mut_from_ref)]
    pub const fn value_mut<'a>(&self) -> &'a mut T {
        // SAFETY: As above. Exclusive access is guaranteed by the caller's borrow of the list.
        unsafe { &mut (*self.0.as_ptr()).value }
    }

    pub const fn prev<'a>(&self) -> &'a Link<T> {
        // SAFETY: A NodePtr held by a list always points to an initialized node.
        unsafe { &(*self.0.as_ptr()).prev }
    }

    #[allow(clippy::mut_from_ref)]
    pub const fn prev_mut<'a>(&self) -> &'a mut Link<T> {
        // SAFETY: Links are only rewritten while the list is borrowed mutably.
        unsafe { &mut (*self.0.as_ptr()).prev }
    }

    pub const fn next<'a>(&self) -> &'a Link<T> {
        // SAFETY: A NodePtr held by a list always points to an initialized node.
        unsafe { &(*self.0.as_ptr()).next }
    }

    #[allow(clippy::mut_from_ref)]
    pub const fn next_mut<'a>(&self) -> &'a mut Link<T> {
        // SAFETY: Links are only rewritten while the list is borrowed mutably.
        unsafe { &mut (*self.0.as_ptr()).next }
    }
}

impl<T> Clone for NodePtr<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodePtr<T> {}

impl<T> PartialEq for NodePtr<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for NodePtr<T> {}
