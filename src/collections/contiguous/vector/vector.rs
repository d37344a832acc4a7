use std::borrow::{Borrow, BorrowMut};
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use super::Cursor;
use crate::alloc::{AllocError, Allocator, Block, CapacityOverflow, Global};
#[doc(inline)]
pub use crate::util::error::{EmptyContainer, IndexOrAllocError, IndexOutOfBounds};
use crate::util::result::ResultExtension;

/// The capacity allocated by the first growth of an empty Vector.
pub(crate) const INITIAL_CAP: usize = 4;

const GROWTH_FACTOR: usize = 2;

/// A variable size contiguous collection, storing its elements in a [`Block`] obtained from the
/// allocator `A`.
///
/// Slots `[0, len)` are always initialized and `[len, cap)` never are. When a push finds the
/// Vector full, the capacity doubles (starting from 4), which keeps the total cost of `n` pushes
/// at `O(n)`.
///
/// # Time Complexity
/// With `n` as the length, `i` as the index being accessed and `m` as the length of the other
/// Vector:
///
/// | Method | Complexity |
/// |-|-|
/// | `len`, `get`, `replace`, `pop` | `O(1)` |
/// | `push` | amortized `O(1)`, `O(n)` when full |
/// | `insert`, `remove` | `O(n - i)` |
/// | `reserve` | `O(1)` with spare capacity, otherwise `O(n)`, amortized like `push` |
/// | `shrink_to_fit` | `O(n)` |
/// | `append` | `O(n + m)` |
///
/// # Allocation Failure
/// Every method that allocates has a `try_` counterpart which returns the [`AllocError`] instead
/// of panicking. A failed allocation never changes the contents or capacity of the Vector.
pub struct Vector<T, A: Allocator = Global> {
    pub(crate) buf: Block<T, A>,
    pub(crate) len: usize,
}

impl<T> Vector<T> {
    /// Creates a new Vector with length and capacity 0. Memory will be allocated by the first
    /// push.
    ///
    /// # Examples
    /// ```
    /// # use hand_std::collections::contiguous::Vector;
    /// let empty: Vector<u8> = Vector::new();
    /// assert_eq!(empty.len(), 0);
    /// assert_eq!(empty.cap(), 0);
    /// ```
    pub const fn new() -> Vector<T> {
        Vector::new_in(Global)
    }

    /// Creates an empty Vector with room for exactly `cap` elements, so the first `cap` pushes
    /// don't reallocate.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    ///
    /// # Examples
    /// ```
    /// # use hand_std::collections::contiguous::Vector;
    /// let mut bytes: Vector<u8> = Vector::with_cap(5);
    /// bytes.extend([1_u8, 2, 3, 4, 5]);
    /// assert_eq!(bytes.cap(), 5);
    /// ```
    pub fn with_cap(cap: usize) -> Vector<T> {
        Vector::with_cap_in(cap, Global)
    }

    /// Creates a new Vector with capacity `cap`, returning an error if the allocation fails.
    pub fn try_with_cap(cap: usize) -> Result<Vector<T>, AllocError> {
        Vector::try_with_cap_in(cap, Global)
    }
}

impl<T, A: Allocator> Vector<T, A> {
    /// Creates a new, empty Vector which will allocate through `alloc`.
    pub const fn new_in(alloc: A) -> Vector<T, A> {
        Vector {
            buf: Block::dangling_in(alloc),
            len: 0,
        }
    }

    /// Creates a new Vector with capacity `cap`, allocated through `alloc`.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    pub fn with_cap_in(cap: usize, alloc: A) -> Vector<T, A> {
        Vector::try_with_cap_in(cap, alloc).throw()
    }

    /// Creates a new Vector with capacity `cap`, allocated through `alloc`, returning an error if
    /// the allocation fails.
    pub fn try_with_cap_in(cap: usize, alloc: A) -> Result<Vector<T, A>, AllocError> {
        Ok(Vector {
            buf: Block::try_with_cap_in(cap, alloc)?,
            len: 0,
        })
    }

    /// Returns the number of live elements.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the Vector holds no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current capacity of the Vector. The capacity is exactly the value requested by
    /// the last (re)allocation.
    pub const fn cap(&self) -> usize {
        self.buf.cap()
    }

    /// Returns a reference to the allocator backing this Vector.
    pub const fn allocator(&self) -> &A {
        self.buf.allocator()
    }

    /// Appends `value`, doubling the capacity first if the Vector is full.
    ///
    /// # Panics
    /// Panics if growing the Vector fails.
    ///
    /// # Examples
    /// ```
    /// # use hand_std::collections::contiguous::Vector;
    /// let mut vec = Vector::<u8>::new();
    /// vec.push(1);
    /// assert_eq!(vec.cap(), 4);
    /// for i in 2..=5 {
    ///     vec.push(i);
    /// }
    /// assert_eq!(&*vec, &[1, 2, 3, 4, 5]);
    /// assert_eq!(vec.cap(), 8);
    /// ```
    pub fn push(&mut self, value: T) {
        self.try_push(value).throw()
    }

    /// Appends `value`, growing as [`push`](Vector::push) does.
    ///
    /// # Errors
    /// If growing fails, the error is returned and the Vector is unchanged. The value is dropped.
    pub fn try_push(&mut self, value: T) -> Result<(), AllocError> {
        if self.len == self.cap() {
            self.try_grow()?;
        }
        // SAFETY: Either there was a free slot already or try_grow just made one.
        unsafe { self.push_unchecked(value) }
        Ok(())
    }

    /// Writes `value` into the first free slot without checking the capacity.
    ///
    /// # Safety
    /// The Vector must have `len < cap`.
    pub(crate) unsafe fn push_unchecked(&mut self, value: T) {
        // SAFETY: The caller guarantees that len < cap, so the slot is in bounds and uninitialized.
        unsafe {
            let slot = self.buf.slot(self.len);
            self.buf.allocator().construct(slot, value);
        }
        self.len += 1;
    }

    /// Removes the last element and returns it, or None if the Vector is empty. The capacity is
    /// kept.
    pub fn pop(&mut self) -> Option<T> {
        self.len = self.len.checked_sub(1)?;
        // SAFETY: The slot at the new len was the last live one. It is read once and is no longer
        // counted as live.
        Some(unsafe { self.buf.slot(self.len).read() })
    }

    /// Returns a reference to the element at `index`, or an [`IndexOutOfBounds`] error.
    pub fn try_get(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        self.get(index).ok_or(IndexOutOfBounds { index, len: self.len })
    }

    /// Returns a mutable reference to the element at `index`, or an [`IndexOutOfBounds`] error.
    pub fn try_get_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfBounds> {
        let len = self.len;
        self.get_mut(index).ok_or(IndexOutOfBounds { index, len })
    }

    /// Returns a reference to the first element.
    ///
    /// # Panics
    /// Panics if the Vector is empty.
    pub fn front(&self) -> &T {
        self.try_front().throw()
    }

    /// Returns a reference to the first element, or [`EmptyContainer`] if there isn't one.
    pub fn try_front(&self) -> Result<&T, EmptyContainer> {
        self.first().ok_or(EmptyContainer)
    }

    /// Returns a reference to the last element.
    ///
    /// # Panics
    /// Panics if the Vector is empty.
    pub fn back(&self) -> &T {
        self.try_back().throw()
    }

    /// Returns a reference to the last element, or [`EmptyContainer`] if there isn't one.
    pub fn try_back(&self) -> Result<&T, EmptyContainer> {
        self.last().ok_or(EmptyContainer)
    }

    /// Inserts `value` at `index`, shifting every later element one slot to the right. An `index`
    /// of `len` appends.
    ///
    /// # Panics
    /// Panics if `index > len` or growing the Vector fails.
    ///
    /// # Examples
    /// ```
    /// # use hand_std::collections::contiguous::Vector;
    /// let mut vec: Vector<_> = (0..3).collect();
    /// vec.insert(1, 100);
    /// vec.insert(1, 200);
    /// vec.insert(5, 300);
    /// assert_eq!(&*vec, &[0, 200, 100, 1, 2, 300]);
    /// ```
    pub fn insert(&mut self, index: usize, value: T) {
        self.try_insert(index, value).throw()
    }

    /// Inserts `value` at `index`, reporting a bad index or a failed growth as an error. Either
    /// way the Vector is left as it was.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), IndexOrAllocError> {
        if index > self.len {
            return Err(IndexOutOfBounds { index, len: self.len }.into());
        }

        if self.len == self.cap() {
            self.try_grow()?;
        }

        // SAFETY: len < cap, so shifting [index, len) one slot to the right stays in bounds. The
        // slot at index is then logically uninitialized and gets written.
        unsafe {
            let slot = self.buf.slot(index);
            ptr::copy(slot.as_ptr(), slot.add(1).as_ptr(), self.len - index);
            self.buf.allocator().construct(slot, value);
        }

        self.len += 1;
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting every later element one slot to the
    /// left.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    ///
    /// # Examples
    /// ```
    /// # use hand_std::collections::contiguous::Vector;
    /// let mut digits: Vector<_> = (0..6).collect();
    /// assert_eq!(digits.remove(0), 0);
    /// assert_eq!(digits.remove(3), 4);
    /// assert_eq!(&*digits, &[1, 2, 3, 5]);
    /// ```
    pub fn remove(&mut self, index: usize) -> T {
        self.try_remove(index).throw()
    }

    /// Removes and returns the element at `index`, or reports an [`IndexOutOfBounds`].
    pub fn try_remove(&mut self, index: usize) -> Result<T, IndexOutOfBounds> {
        self.check_index(index)?;

        // SAFETY: index < len, so the slot is initialized. It is read once, then overwritten by
        // shifting the initialized tail (index, len) one slot to the left.
        let value = unsafe {
            let slot = self.buf.slot(index);
            let value = slot.read();
            ptr::copy(slot.add(1).as_ptr(), slot.as_ptr(), self.len - index - 1);
            value
        };

        self.len -= 1;
        Ok(value)
    }

    /// Swaps `value` into the slot at `index` and returns what was there.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn replace(&mut self, index: usize, value: T) -> T {
        self.try_replace(index, value).throw()
    }

    /// Swaps in `value` at `index` and returns the old element, or reports an
    /// [`IndexOutOfBounds`] and drops `value`.
    pub fn try_replace(&mut self, index: usize, value: T) -> Result<T, IndexOutOfBounds> {
        Ok(mem::replace(self.try_get_mut(index)?, value))
    }

    /// Makes room for at least `extra` more elements. When the Vector has to grow, it grows to at
    /// least double its capacity, so repeated small reservations stay amortized `O(1)` per element.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    pub fn reserve(&mut self, extra: usize) {
        self.try_reserve(extra).throw()
    }

    /// Makes room for at least `extra` more elements, growing as [`reserve`](Vector::reserve)
    /// does. On failure the Vector is unchanged.
    pub fn try_reserve(&mut self, extra: usize) -> Result<(), AllocError> {
        let required = self.len.checked_add(extra).ok_or(CapacityOverflow)?;
        if required <= self.cap() { return Ok(()); }

        let doubled = self.cap().saturating_mul(GROWTH_FACTOR);
        self.try_realloc_with_cap(required.max(doubled).max(INITIAL_CAP))
    }

    /// Makes room for exactly `extra` more elements, without growing any further.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    pub fn reserve_exact(&mut self, extra: usize) {
        self.try_reserve_exact(extra).throw()
    }

    /// Makes room for exactly `extra` more elements, returning an error rather than panicking.
    /// On failure the Vector is unchanged.
    pub fn try_reserve_exact(&mut self, extra: usize) -> Result<(), AllocError> {
        let required = self.len.checked_add(extra).ok_or(CapacityOverflow)?;
        if required <= self.cap() { return Ok(()); }

        self.try_realloc_with_cap(required)
    }

    /// Reallocates so that no capacity is left unused.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    pub fn shrink_to_fit(&mut self) {
        if self.len != self.cap() {
            self.try_realloc_with_cap(self.len).throw()
        }
    }

    /// Drops all elements at or after `len`, keeping the capacity.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len { return; }

        let old_len = mem::replace(&mut self.len, len);
        for i in len..old_len {
            // SAFETY: Slots in [len, old_len) were initialized and are no longer considered live.
            unsafe { self.buf.allocator().destroy(self.buf.slot(i)) }
        }
    }

    /// Drops all elements, keeping the capacity.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Moves all elements from `other` onto the end of self.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    pub fn append(&mut self, other: Vector<T, A>) {
        self.try_append(other).throw()
    }

    /// Moves all elements from `other` onto the end of self, returning an error rather than
    /// panicking. On failure self is unchanged and `other` is dropped.
    pub fn try_append(&mut self, mut other: Vector<T, A>) -> Result<(), AllocError> {
        self.try_reserve(other.len)?;

        // SAFETY: self is valid for writes from len to len + other.len and other is initialized
        // from 0 to other.len. The two Vectors own separate allocations.
        unsafe {
            ptr::copy_nonoverlapping(
                other.buf.as_ptr().as_ptr().cast_const(),
                self.buf.slot(self.len).as_ptr(),
                other.len,
            );
        }

        // The values now belong to self, so other must only release its memory.
        self.len += mem::take(&mut other.len);
        Ok(())
    }

    /// Returns a [`Cursor`] positioned at the first element.
    ///
    /// # Examples
    /// ```
    /// # use hand_std::collections::contiguous::Vector;
    /// let vec: Vector<_> = (1..=5).collect();
    /// let begin = vec.begin();
    /// let end = vec.end();
    /// assert_eq!(end - begin, 5);
    /// assert_eq!((begin + 2).get(), Some(&3));
    /// assert!(begin < end);
    /// ```
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self, 0)
    }

    /// Returns a [`Cursor`] positioned one past the last element.
    pub fn end(&self) -> Cursor<'_, T> {
        // len can't exceed isize::MAX, because the layout of the Block would be invalid.
        Cursor::new(self, self.len as isize)
    }

    /// Grows the Vector by the growth factor so that it can take at least one more element.
    pub(crate) fn try_grow(&mut self) -> Result<(), AllocError> {
        self.try_reserve(1)
    }

    /// Moves the live elements into a new allocation with exactly `new_cap` slots.
    pub(crate) fn try_realloc_with_cap(&mut self, new_cap: usize) -> Result<(), AllocError> {
        debug_assert!(new_cap >= self.len);

        // SAFETY: The first len slots are initialized and new_cap >= len.
        unsafe { self.buf.try_relocate(new_cap, self.len) }
    }

    pub(crate) const fn check_index(&self, index: usize) -> Result<(), IndexOutOfBounds> {
        if index >= self.len {
            Err(IndexOutOfBounds { index, len: self.len })
        } else {
            Ok(())
        }
    }
}

impl<T, A: Allocator> Extend<T> for Vector<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);

        for item in iter {
            self.push(item);
        }
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Vector::new();
        vec.extend(iter);
        vec
    }
}

impl<T, A: Allocator + Default> Default for Vector<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T, A: Allocator> Drop for Vector<T, A> {
    fn drop(&mut self) {
        // Destroy all live values, then let the Block release the memory.
        self.clear();
    }
}

impl<T, A: Allocator> Deref for Vector<T, A> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: The Block is valid for cap >= len slots, the first len of which are initialized.
        // The pointer is nonnull and properly aligned, and the borrow of self prevents mutation.
        unsafe { slice::from_raw_parts(self.buf.as_ptr().as_ptr(), self.len) }
    }
}

impl<T, A: Allocator> DerefMut for Vector<T, A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: As for deref, with the mutable borrow of self preventing any other access.
        unsafe { slice::from_raw_parts_mut(self.buf.as_ptr().as_ptr(), self.len) }
    }
}

impl<T, A: Allocator> AsRef<[T]> for Vector<T, A> {
    fn as_ref(&self) -> &[T] {
        self.deref()
    }
}

impl<T, A: Allocator> AsMut<[T]> for Vector<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self.deref_mut()
    }
}

impl<T, A: Allocator> Borrow<[T]> for Vector<T, A> {
    fn borrow(&self) -> &[T] {
        self.as_ref()
    }
}

impl<T, A: Allocator> BorrowMut<[T]> for Vector<T, A> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut()
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for Vector<T, A> {
    fn clone(&self) -> Self {
        let mut vec = Self::with_cap_in(self.len, self.allocator().clone());

        for value in self.iter() {
            // SAFETY: vec was created with room for every element of self.
            unsafe { vec.push_unchecked(value.clone()); }
        }

        vec
    }
}

impl<T: PartialEq, A: Allocator> PartialEq for Vector<T, A> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq, A: Allocator> Eq for Vector<T, A> {}

impl<T: Hash, A: Allocator> Hash for Vector<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Debug, A: Allocator> Debug for Vector<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("contents", &&**self)
            .field("len", &self.len)
            .field("cap", &self.cap())
            .finish()
    }
}

impl<T: Debug, A: Allocator> Display for Vector<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "!")?;
        f.debug_list().entries(self.iter()).finish()
    }
}
