use std::borrow::Borrow;
use std::fmt::{self, Debug, Display, Formatter, Write};
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Deref, DerefMut};
use std::str::{self, Utf8Error};

use crate::alloc::{AllocError, Allocator, Global};
use crate::collections::contiguous::{Cursor, Vector};
#[doc(inline)]
pub use crate::util::error::EmptyContainer;
use crate::util::result::ResultExtension;

/// A growable buffer of bytes, allocated through `A`.
///
/// ByteString treats its contents purely as bytes: it doesn't require or check UTF-8, and its
/// length is a number of bytes. [`to_str`](ByteString::to_str) checks the encoding when a `&str`
/// is needed, and [`Display`] replaces invalid sequences with `U+FFFD`.
///
/// Growth, allocation failure and the `try_` variants behave exactly as they do for [`Vector`].
pub struct ByteString<A: Allocator = Global> {
    pub(crate) bytes: Vector<u8, A>,
}

impl ByteString {
    /// Creates an empty ByteString. Nothing is allocated until bytes are added.
    pub const fn new() -> ByteString {
        ByteString::new_in(Global)
    }

    /// Creates a ByteString holding a copy of `bytes`.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    ///
    /// # Examples
    /// ```
    /// # use hand_std::collections::string::ByteString;
    /// let s = ByteString::from_bytes(b"hello");
    /// assert_eq!(s.len(), 5);
    /// assert_eq!(s, "hello");
    /// ```
    pub fn from_bytes(bytes: &[u8]) -> ByteString {
        let mut string = ByteString::new();
        string.push_bytes(bytes);
        string
    }
}

impl<A: Allocator> ByteString<A> {
    /// Creates an empty ByteString which will allocate through `alloc`.
    pub const fn new_in(alloc: A) -> ByteString<A> {
        ByteString {
            bytes: Vector::new_in(alloc),
        }
    }

    /// Returns the number of bytes in the ByteString.
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the ByteString contains no bytes.
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the number of bytes the ByteString can hold without reallocating.
    pub const fn cap(&self) -> usize {
        self.bytes.cap()
    }

    /// Returns the contents as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the contents as a `&str`, if they are valid UTF-8.
    pub fn to_str(&self) -> Result<&str, Utf8Error> {
        str::from_utf8(&self.bytes)
    }

    /// Appends a single byte.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    pub fn push(&mut self, byte: u8) {
        self.bytes.push(byte)
    }

    /// Appends a single byte, returning an error rather than panicking if the allocation fails.
    pub fn try_push(&mut self, byte: u8) -> Result<(), AllocError> {
        self.bytes.try_push(byte)
    }

    /// Appends the bytes of `string`.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    pub fn push_str(&mut self, string: &str) {
        self.push_bytes(string.as_bytes())
    }

    /// Appends the bytes of `string`, returning an error rather than panicking if the allocation
    /// fails. On failure the ByteString is unchanged.
    pub fn try_push_str(&mut self, string: &str) -> Result<(), AllocError> {
        self.try_push_bytes(string.as_bytes())
    }

    /// Appends a copy of `bytes`.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.try_push_bytes(bytes).throw()
    }

    /// Appends a copy of `bytes`, reserving once for all of them. On failure the ByteString is
    /// unchanged.
    pub fn try_push_bytes(&mut self, bytes: &[u8]) -> Result<(), AllocError> {
        self.bytes.try_reserve(bytes.len())?;
        for &byte in bytes {
            // SAFETY: Capacity for every byte was reserved above.
            unsafe { self.bytes.push_unchecked(byte) }
        }
        Ok(())
    }

    /// Appends a copy of `other`'s bytes.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    pub fn append<B: Allocator>(&mut self, other: &ByteString<B>) {
        self.push_bytes(other.as_bytes())
    }

    /// Appends a copy of `other`'s bytes, returning an error rather than panicking if the
    /// allocation fails.
    pub fn try_append<B: Allocator>(&mut self, other: &ByteString<B>) -> Result<(), AllocError> {
        self.try_push_bytes(other.as_bytes())
    }

    /// Ensures there is room for `extra` more bytes.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    pub fn reserve(&mut self, extra: usize) {
        self.bytes.reserve(extra)
    }

    /// Removes every byte, keeping the capacity.
    pub fn clear(&mut self) {
        self.bytes.clear()
    }

    /// Returns the first byte.
    ///
    /// # Panics
    /// Panics if the ByteString is empty.
    pub fn front(&self) -> u8 {
        self.try_front().throw()
    }

    /// Returns the first byte, or [`EmptyContainer`] if there are none.
    pub fn try_front(&self) -> Result<u8, EmptyContainer> {
        self.bytes.try_front().copied()
    }

    /// Returns the last byte.
    ///
    /// # Panics
    /// Panics if the ByteString is empty.
    pub fn back(&self) -> u8 {
        self.try_back().throw()
    }

    /// Returns the last byte, or [`EmptyContainer`] if there are none.
    pub fn try_back(&self) -> Result<u8, EmptyContainer> {
        self.bytes.try_back().copied()
    }

    /// Returns a [`Cursor`] positioned at the first byte.
    pub fn begin(&self) -> Cursor<'_, u8> {
        self.bytes.begin()
    }

    /// Returns a [`Cursor`] positioned one past the last byte.
    pub fn end(&self) -> Cursor<'_, u8> {
        self.bytes.end()
    }

    /// Returns a reference to the allocator backing the ByteString.
    pub const fn allocator(&self) -> &A {
        self.bytes.allocator()
    }
}

impl From<&str> for ByteString {
    fn from(value: &str) -> Self {
        ByteString::from_bytes(value.as_bytes())
    }
}

impl From<&[u8]> for ByteString {
    fn from(value: &[u8]) -> Self {
        ByteString::from_bytes(value)
    }
}

impl<A: Allocator> From<Vector<u8, A>> for ByteString<A> {
    fn from(bytes: Vector<u8, A>) -> Self {
        ByteString { bytes }
    }
}

impl<A: Allocator> Deref for ByteString<A> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.bytes
    }
}

impl<A: Allocator> DerefMut for ByteString<A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.bytes
    }
}

impl<A: Allocator> AsRef<[u8]> for ByteString<A> {
    fn as_ref(&self) -> &[u8] {
        self
    }
}

impl<A: Allocator> Borrow<[u8]> for ByteString<A> {
    fn borrow(&self) -> &[u8] {
        self
    }
}

impl<A: Allocator, B: Allocator> Add<&ByteString<B>> for ByteString<A> {
    type Output = ByteString<A>;

    fn add(mut self, rhs: &ByteString<B>) -> Self::Output {
        self.append(rhs);
        self
    }
}

impl<A: Allocator + Clone, B: Allocator> Add<&ByteString<B>> for &ByteString<A> {
    type Output = ByteString<A>;

    fn add(self, rhs: &ByteString<B>) -> Self::Output {
        self.clone() + rhs
    }
}

impl<A: Allocator> Add<&str> for ByteString<A> {
    type Output = ByteString<A>;

    fn add(mut self, rhs: &str) -> Self::Output {
        self.push_str(rhs);
        self
    }
}

impl<A: Allocator, B: Allocator> AddAssign<&ByteString<B>> for ByteString<A> {
    fn add_assign(&mut self, rhs: &ByteString<B>) {
        self.append(rhs)
    }
}

impl<A: Allocator> AddAssign<&str> for ByteString<A> {
    fn add_assign(&mut self, rhs: &str) {
        self.push_str(rhs)
    }
}

impl<A: Allocator> Extend<u8> for ByteString<A> {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        self.bytes.extend(iter)
    }
}

impl FromIterator<u8> for ByteString {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        ByteString { bytes: Vector::from_iter(iter) }
    }
}

impl<A: Allocator + Default> Default for ByteString<A> {
    fn default() -> Self {
        ByteString::new_in(A::default())
    }
}

impl<A: Allocator + Clone> Clone for ByteString<A> {
    fn clone(&self) -> Self {
        ByteString {
            bytes: self.bytes.clone(),
        }
    }
}

impl<A: Allocator> PartialEq for ByteString<A> {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<A: Allocator> Eq for ByteString<A> {}

impl<A: Allocator> PartialEq<str> for ByteString<A> {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<A: Allocator> PartialEq<&str> for ByteString<A> {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<A: Allocator> Hash for ByteString<A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state)
    }
}

impl<A: Allocator> Display for ByteString<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for chunk in self.as_bytes().utf8_chunks() {
            f.write_str(chunk.valid())?;
            if !chunk.invalid().is_empty() {
                f.write_char(char::REPLACEMENT_CHARACTER)?;
            }
        }
        Ok(())
    }
}

impl<A: Allocator> Debug for ByteString<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "b\"{}\"", self.as_bytes().escape_ascii())
    }
}
