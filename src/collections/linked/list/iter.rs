use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;
use std::marker::PhantomData;

use super::{LinkedList, Link, NodePtr};
use crate::alloc::{Allocator, Global};

/// The unvisited stretch of a list, between `front` and `back` inclusive. Borrowing iterators walk
/// this inwards from both ends, and `len` stops them before they cross.
pub(crate) struct Span<T> {
    pub front: Link<T>,
    pub back: Link<T>,
    pub len: usize,
}

impl<T> Span<T> {
    fn take_front(&mut self) -> Option<NodePtr<T>> {
        if self.len == 0 {
            return None;
        }
        let node = self.front?;
        self.front = *node.next();
        self.len -= 1;
        Some(node)
    }

    fn take_back(&mut self) -> Option<NodePtr<T>> {
        if self.len == 0 {
            return None;
        }
        let node = self.back?;
        self.back = *node.prev();
        self.len -= 1;
        Some(node)
    }
}

impl<T> Clone for Span<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Span<T> {}

impl<T, A: Allocator> IntoIterator for LinkedList<T, A> {
    type Item = T;

    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

/// An owning iterator over the elements of a [`LinkedList`]. Each element's node is released as
/// it is yielded, and anything left over is dropped with the iterator.
pub struct IntoIter<T, A: Allocator = Global>(pub(crate) LinkedList<T, A>);

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.pop_back()
    }
}

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}

impl<'a, T, A: Allocator> IntoIterator for &'a mut LinkedList<T, A> {
    type Item = &'a mut T;

    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        IterMut {
            span: self.span(),
            _phantom: PhantomData,
        }
    }
}

/// An iterator over mutable references to the elements of a [`LinkedList`].
pub struct IterMut<'a, T> {
    pub(crate) span: Span<T>,
    pub(crate) _phantom: PhantomData<&'a mut T>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        // Each node is taken from the span once, so no two references alias.
        self.span.take_front().map(|node| node.value_mut())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.span.len, Some(self.span.len))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.span.take_back().map(|node| node.value_mut())
    }
}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<'a, T, A: Allocator> IntoIterator for &'a LinkedList<T, A> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            span: self.span(),
            _phantom: PhantomData,
        }
    }
}

/// An iterator over references to the elements of a [`LinkedList`].
pub struct Iter<'a, T> {
    pub(crate) span: Span<T>,
    pub(crate) _phantom: PhantomData<&'a T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.span.take_front().map(|node| node.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.span.len, Some(self.span.len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.span.take_back().map(|node| node.value())
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            span: self.span,
            _phantom: PhantomData,
        }
    }
}

impl<T: Debug> Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
