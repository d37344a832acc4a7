//! Various general-purpose collection types, all allocating through an
//! [`Allocator`](crate::alloc::Allocator).
//!
//! # Purpose
//! I wrote these types to learn about each of the data structures themselves, but also concepts
//! such as allocators, iterators and hashing.
//!
//! # Method
//! The contiguous types here implement [`Deref<Target = [T]>`](std::ops::Deref) (and DerefMut),
//! which saves me from writing some of the more repetitive functionality. Every type is generic
//! over its allocator, defaulting to [`Global`](crate::alloc::Global).

#[cfg(feature = "contiguous")]
pub mod contiguous;
#[cfg(feature = "hash")]
pub mod hash;
#[cfg(feature = "linked")]
pub mod linked;
#[cfg(feature = "string")]
pub mod string;
