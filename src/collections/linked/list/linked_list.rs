use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::mem;
use std::ops::{Index, IndexMut};

use super::{Iter, IterMut, Link, Node, NodePtr, Span};
use crate::alloc::{AllocError, Allocator, Global};
#[doc(inline)]
pub use crate::util::error::{IndexOrAllocError, IndexOutOfBounds};
use crate::util::result::ResultExtension;

/// A doubly linked list. Every element lives in its own node, allocated through `A`.
///
/// # Time Complexity
/// With `n` as the length of the list and `i` as the index being accessed:
///
/// | Method | Complexity |
/// |-|-|
/// | `len`, `front/back` | `O(1)` |
/// | `push_front/back`, `pop_front/back` | `O(1)` |
/// | `get`, `insert`, `remove`, `replace` | `O(min(i, n - i))` |
/// | `contains`, `index_of` | `O(n)` |
///
/// Positional access walks from whichever end is closer. Each step is a pointer chase to a
/// separate allocation, so a [`Vector`](crate::collections::contiguous::Vector) is the better
/// choice unless elements really need to be added and removed at both ends.
pub struct LinkedList<T, A: Allocator = Global> {
    pub(crate) head: Link<T>,
    pub(crate) tail: Link<T>,
    pub(crate) len: usize,
    pub(crate) alloc: A,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T> LinkedList<T> {
    /// Creates an empty LinkedList. Nodes are only allocated as elements are added.
    pub const fn new() -> LinkedList<T> {
        LinkedList::new_in(Global)
    }
}

impl<T, A: Allocator> LinkedList<T, A> {
    /// Creates an empty LinkedList which will allocate its nodes through `alloc`.
    pub const fn new_in(alloc: A) -> LinkedList<T, A> {
        LinkedList {
            head: None,
            tail: None,
            len: 0,
            alloc,
            _phantom: PhantomData,
        }
    }

    /// Returns the number of elements in the list.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list holds no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a reference to the allocator backing the list.
    pub const fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Returns the first element, or None if the list is empty.
    pub const fn front(&self) -> Option<&T> {
        match self.head {
            Some(node) => Some(node.value()),
            None => None,
        }
    }

    /// Returns a mutable reference to the first element, or None if the list is empty.
    pub const fn front_mut(&mut self) -> Option<&mut T> {
        match self.head {
            Some(node) => Some(node.value_mut()),
            None => None,
        }
    }

    /// Returns the last element, or None if the list is empty.
    pub const fn back(&self) -> Option<&T> {
        match self.tail {
            Some(node) => Some(node.value()),
            None => None,
        }
    }

    /// Returns a mutable reference to the last element, or None if the list is empty.
    pub const fn back_mut(&mut self) -> Option<&mut T> {
        match self.tail {
            Some(node) => Some(node.value_mut()),
            None => None,
        }
    }

    /// Prepends `value` to the list.
    ///
    /// # Panics
    /// Panics if the node can't be allocated.
    pub fn push_front(&mut self, value: T) {
        self.try_push_front(value).throw()
    }

    /// Prepends `value`, returning the [`AllocError`] instead of panicking if the node can't be
    /// allocated. The list is left as it was and `value` is dropped.
    pub fn try_push_front(&mut self, value: T) -> Result<(), AllocError> {
        self.try_link(value, None, self.head)
    }

    /// Appends `value` to the list.
    ///
    /// # Panics
    /// Panics if the node can't be allocated.
    pub fn push_back(&mut self, value: T) {
        self.try_push_back(value).throw()
    }

    /// Appends `value`, returning the [`AllocError`] instead of panicking if the node can't be
    /// allocated. The list is left as it was and `value` is dropped.
    ///
    /// # Examples
    /// ```
    /// # use hand_std::collections::linked::LinkedList;
    /// let mut list = LinkedList::new();
    /// list.try_push_back(1).unwrap();
    /// list.try_push_back(2).unwrap();
    /// assert_eq!(list.back(), Some(&2));
    /// ```
    pub fn try_push_back(&mut self, value: T) -> Result<(), AllocError> {
        self.try_link(value, self.tail, None)
    }

    /// Removes and returns the first element, releasing its node.
    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.head?;
        // SAFETY: The head is a node of this list.
        Some(unsafe { self.unlink(head) })
    }

    /// Removes and returns the last element, releasing its node.
    pub fn pop_back(&mut self) -> Option<T> {
        let tail = self.tail?;
        // SAFETY: The tail is a node of this list.
        Some(unsafe { self.unlink(tail) })
    }

    /// Returns a reference to the element at `index`. `list[index]` does the same.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn get(&self, index: usize) -> &T {
        self.try_get(index).throw()
    }

    /// Returns a reference to the element at `index`, or an [`IndexOutOfBounds`] error.
    pub fn try_get(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        Ok(self.node_at(index)?.value())
    }

    /// Returns a mutable reference to the element at `index`. `list[index]` does the same.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        self.try_get_mut(index).throw()
    }

    /// Returns a mutable reference to the element at `index`, or an [`IndexOutOfBounds`] error.
    pub fn try_get_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfBounds> {
        Ok(self.node_at(index)?.value_mut())
    }

    /// Inserts `value` so that it ends up at `index`. Inserting at `len` appends.
    ///
    /// # Panics
    /// Panics if `index > len` or the node can't be allocated.
    pub fn insert(&mut self, index: usize, value: T) {
        self.try_insert(index, value).throw()
    }

    /// Inserts `value` at `index`, reporting a bad index or a failed allocation as an error
    /// rather than panicking.
    ///
    /// # Examples
    /// ```
    /// # use hand_std::collections::linked::LinkedList;
    /// let mut list: LinkedList<_> = [1, 3].into_iter().collect();
    /// list.try_insert(1, 2).unwrap();
    /// assert_eq!(list.to_string(), "(1) -> (2) -> (3)");
    /// assert!(list.try_insert(5, 0).unwrap_err().is_index_out_of_bounds());
    /// ```
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), IndexOrAllocError> {
        if index == self.len {
            return Ok(self.try_push_back(value)?);
        }

        let next = self.node_at(index)?;
        Ok(self.try_link(value, *next.prev(), Some(next))?)
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> T {
        self.try_remove(index).throw()
    }

    /// Unlinks and returns the element at `index`, or reports an [`IndexOutOfBounds`].
    pub fn try_remove(&mut self, index: usize) -> Result<T, IndexOutOfBounds> {
        let node = self.node_at(index)?;
        // SAFETY: node_at only returns nodes of this list.
        Ok(unsafe { self.unlink(node) })
    }

    /// Replaces the element at `index` with `value`, returning the old element.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn replace(&mut self, index: usize, value: T) -> T {
        self.try_replace(index, value).throw()
    }

    /// Swaps in `value` at `index` and returns the old element, or reports an
    /// [`IndexOutOfBounds`] and drops `value`.
    pub fn try_replace(&mut self, index: usize, value: T) -> Result<T, IndexOutOfBounds> {
        Ok(mem::replace(self.node_at(index)?.value_mut(), value))
    }

    /// Drops every element and releases every node.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Returns an iterator over references to the elements, front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        self.into_iter()
    }

    /// Returns an iterator over mutable references to the elements, front to back.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.into_iter()
    }

    pub(crate) const fn span(&self) -> Span<T> {
        Span {
            front: self.head,
            back: self.tail,
            len: self.len,
        }
    }

    /// Allocates a node for `value` between `prev` and `next`, which must be adjacent nodes of this
    /// list. None stands for the corresponding end of the list.
    fn try_link(&mut self, value: T, prev: Link<T>, next: Link<T>) -> Result<(), AllocError> {
        let node = NodePtr::try_new_in(Node { value, prev, next }, &self.alloc)?;

        match prev {
            Some(prev) => *prev.next_mut() = Some(node),
            None => self.head = Some(node),
        }
        match next {
            Some(next) => *next.prev_mut() = Some(node),
            None => self.tail = Some(node),
        }
        self.len += 1;
        Ok(())
    }

    /// Detaches `node`, joins its neighbours and releases it, returning its value.
    ///
    /// # Safety
    /// `node` must be a node of this list.
    unsafe fn unlink(&mut self, node: NodePtr<T>) -> T {
        // SAFETY: The caller guarantees that node was allocated by self.alloc. Nothing refers to it
        // once its neighbours are rewired below.
        let Node { value, prev, next } = unsafe { node.take_node(&self.alloc) };

        match prev {
            Some(prev) => *prev.next_mut() = next,
            None => self.head = next,
        }
        match next {
            Some(next) => *next.prev_mut() = prev,
            None => self.tail = prev,
        }
        self.len -= 1;
        value
    }

    fn node_at(&self, index: usize) -> Result<NodePtr<T>, IndexOutOfBounds> {
        let len = self.len;
        if index >= len {
            return Err(IndexOutOfBounds { index, len });
        }

        let node = if index < len / 2 {
            (0..index).fold(self.head, |node, _| node.and_then(|n| *n.next()))
        } else {
            (index..len - 1).fold(self.tail, |node, _| node.and_then(|n| *n.prev()))
        };
        // SAFETY: index < len, so the walk ends on a node.
        Ok(unsafe { node.unwrap_unchecked() })
    }

    #[cfg(test)]
    pub(crate) fn verify_double_links(&self) {
        assert_eq!(self.head.is_none(), self.len == 0, "Only an empty list has no head.");
        assert_eq!(self.tail.is_none(), self.len == 0, "Only an empty list has no tail.");

        let mut prev: Link<T> = None;
        let mut curr = self.head;
        let mut count = 0;
        while let Some(node) = curr {
            assert!(*node.prev() == prev, "Each node should link back to its predecessor.");
            prev = curr;
            curr = *node.next();
            count += 1;
        }
        assert!(prev == self.tail, "Walking forwards should finish at the tail.");
        assert_eq!(count, self.len, "The length should match the number of nodes.");
    }
}

impl<T: PartialEq, A: Allocator> LinkedList<T, A> {
    /// Returns the position of the first element equal to `item`.
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.iter().position(|element| element == item)
    }

    /// Returns true if any element is equal to `item`.
    pub fn contains(&self, item: &T) -> bool {
        self.index_of(item).is_some()
    }
}

impl<T, A: Allocator> Index<usize> for LinkedList<T, A> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.get(index)
    }
}

impl<T, A: Allocator> IndexMut<usize> for LinkedList<T, A> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.get_mut(index)
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = LinkedList::new();
        list.extend(iter);
        list
    }
}

impl<T, A: Allocator> Extend<T> for LinkedList<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|value| self.push_back(value));
    }
}

impl<T, A: Allocator + Default> Default for LinkedList<T, A> {
    fn default() -> Self {
        LinkedList::new_in(A::default())
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for LinkedList<T, A> {
    fn clone(&self) -> Self {
        let mut list = LinkedList::new_in(self.alloc.clone());
        list.extend(self.iter().cloned());
        list
    }
}

impl<T, A: Allocator> Drop for LinkedList<T, A> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: PartialEq, A: Allocator> PartialEq for LinkedList<T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other)
    }
}

impl<T: Eq, A: Allocator> Eq for LinkedList<T, A> {}

impl<T: Hash, A: Allocator> Hash for LinkedList<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        self.iter().for_each(|value| value.hash(state));
    }
}

impl<T: Debug, A: Allocator> Debug for LinkedList<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedList")
            .field("contents", &self.iter())
            .field("len", &self.len)
            .finish()
    }
}

impl<T: Debug, A: Allocator> Display for LinkedList<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, value) in self.iter().enumerate() {
            if i != 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "({value:?})")?;
        }
        Ok(())
    }
}

// SAFETY: The list owns its nodes outright, so moving it moves the elements and the allocator.
unsafe impl<T: Send, A: Allocator + Send> Send for LinkedList<T, A> {}
// SAFETY: A shared list only hands out shared references to its elements.
unsafe impl<T: Sync, A: Allocator + Sync> Sync for LinkedList<T, A> {}
