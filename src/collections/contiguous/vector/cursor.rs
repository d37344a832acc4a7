use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};
use std::ops::{Add, AddAssign, Index, Sub, SubAssign};
use std::ptr;

use super::Vector;
use crate::alloc::Allocator;
use crate::util::result::ResultExtension;

/// A random-access position within the live elements of a contiguous collection, such as the
/// [`Vector`](super::Vector) it was created from.
///
/// A Cursor can point at any offset, including ones before the first element or after the last.
/// Dereferencing is checked, so only positions in `[begin, end)` yield elements. Cursors support
/// offset arithmetic (`+`, `-`, `+=`, `-=` with an [`isize`]), the distance between two cursors
/// (`a - b`) and all six relational comparisons. Cursors over different collections are never
/// equal and have no ordering.
///
/// A Cursor borrows the collection, so it can't outlive a reallocation. Use
/// [`Cursor::until`] to turn a pair of Cursors back into a slice for iteration.
pub struct Cursor<'a, T> {
    pub(crate) slice: &'a [T],
    /// Address of the Vector the Cursor was created from. The borrow keeps the Vector in place,
    /// so two Cursors share storage exactly when their owners match, even when the elements are
    /// zero-sized or there are none.
    pub(crate) owner: usize,
    pub(crate) pos: isize,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new<A: Allocator>(vec: &'a Vector<T, A>, pos: isize) -> Cursor<'a, T> {
        Cursor {
            slice: vec,
            owner: ptr::from_ref(vec).cast::<()>() as usize,
            pos,
        }
    }

    /// Returns the offset of this Cursor from the first element.
    pub const fn position(&self) -> isize {
        self.pos
    }

    /// Returns true if the Cursor is positioned at the first element (or at the end of an empty
    /// collection).
    pub const fn is_begin(&self) -> bool {
        self.pos == 0
    }

    /// Returns true if the Cursor is positioned one past the last element.
    pub const fn is_end(&self) -> bool {
        self.pos == self.slice.len() as isize
    }

    /// Returns the element at the Cursor's position, if the position is in bounds.
    pub fn get(&self) -> Option<&'a T> {
        self.at(0)
    }

    /// Returns the element `offset` places away from the Cursor's position, if that position is
    /// in bounds.
    pub fn at(&self, offset: isize) -> Option<&'a T> {
        let index = usize::try_from(self.pos.checked_add(offset)?).ok()?;
        self.slice.get(index)
    }

    /// Returns the elements in `[self, end)`, or None if the two Cursors belong to different
    /// collections, are out of order, or either lies outside `[begin, end]`.
    pub fn until(&self, end: &Cursor<'a, T>) -> Option<&'a [T]> {
        if !self.same_storage(end) { return None; }

        let from = usize::try_from(self.pos).ok()?;
        let to = usize::try_from(end.pos).ok()?;
        self.slice.get(from..to)
    }

    pub(crate) fn same_storage(&self, other: &Cursor<'a, T>) -> bool {
        self.owner == other.owner
    }

    pub(crate) fn offset(self, offset: isize) -> Cursor<'a, T> {
        Cursor {
            pos: self.pos.checked_add(offset).ok_or(CursorOverflow).throw(),
            ..self
        }
    }
}

/// A Cursor was dereferenced at a position outside of `[begin, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorOutOfBounds {
    /// The position that was dereferenced.
    pub position: isize,
    /// The number of elements in the collection.
    pub len: usize,
}

impl Display for CursorOutOfBounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cursor position {} out of bounds for collection with {} elements!",
            self.position, self.len
        )
    }
}

impl Error for CursorOutOfBounds {}

/// Cursor arithmetic overflowed an [`isize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorOverflow;

impl Display for CursorOverflow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Cursor offset overflow!")
    }
}

impl Error for CursorOverflow {}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<'a, T> Add<isize> for Cursor<'a, T> {
    type Output = Cursor<'a, T>;

    fn add(self, rhs: isize) -> Self::Output {
        self.offset(rhs)
    }
}

impl<'a, T> Sub<isize> for Cursor<'a, T> {
    type Output = Cursor<'a, T>;

    fn sub(self, rhs: isize) -> Self::Output {
        self.offset(rhs.checked_neg().ok_or(CursorOverflow).throw())
    }
}

impl<T> AddAssign<isize> for Cursor<'_, T> {
    fn add_assign(&mut self, rhs: isize) {
        *self = *self + rhs;
    }
}

impl<T> SubAssign<isize> for Cursor<'_, T> {
    fn sub_assign(&mut self, rhs: isize) {
        *self = *self - rhs;
    }
}

impl<'a, T> Sub for Cursor<'a, T> {
    type Output = isize;

    /// Returns the number of elements between the two Cursors.
    ///
    /// # Panics
    /// Panics in debug builds if the Cursors belong to different collections.
    fn sub(self, rhs: Self) -> Self::Output {
        debug_assert!(self.same_storage(&rhs), "Cursors belong to different collections!");
        self.pos.checked_sub(rhs.pos).ok_or(CursorOverflow).throw()
    }
}

impl<T> Index<isize> for Cursor<'_, T> {
    type Output = T;

    fn index(&self, offset: isize) -> &Self::Output {
        self.at(offset)
            .ok_or(CursorOutOfBounds {
                position: self.pos.saturating_add(offset),
                len: self.slice.len(),
            })
            .throw()
    }
}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_storage(other) && self.pos == other.pos
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> PartialOrd for Cursor<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.same_storage(other) {
            Some(self.pos.cmp(&other.pos))
        } else {
            None
        }
    }
}

impl<T> Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("pos", &self.pos)
            .field("len", &self.slice.len())
            .finish()
    }
}
