//! This crate is my attempt at writing the containers at the heart of a standard library on top of
//! an allocator of my own: a growable [`Vector`](collections::contiguous::Vector), a chained
//! [`HashMap`](collections::hash::HashMap), a [`LinkedList`](collections::linked::LinkedList) and a
//! [`ByteString`](collections::string::ByteString).
//!
//! # Purpose
//! This crate is a project that I'm working on as a learning experience, with no expectation for it
//! to be used in production. Writing these data structures helps me to understand and appreciate
//! them properly as well as scratching my "I could write that" itch.
//!
//! # Allocation
//! Every container is generic over an [`Allocator`](alloc::Allocator), which only has to provide
//! raw `allocate` and `deallocate`. Typed slot allocation, construction and destruction are built
//! on top of those. [`Global`](alloc::Global) forwards to Rust's global allocator and
//! [`Malloc`](alloc::Malloc) (feature `malloc`) goes straight to `libc`. Allocation failures are
//! never fatal inside the containers: each allocating method has a `try_` version which reports
//! the [`AllocError`](alloc::AllocError) and leaves the container exactly as it was.
//!
//! # Error Handling
//! Specifically for a standard library, it is more ergonomic for functions to panic in some cases,
//! because users don't want to be forced to handle an error every time they invoke a method. For
//! example, imagine having to handle the possibility of running out of memory every time you push
//! into a Vector. So most operations come in pairs: `try_push` returns a [`Result`] and `push`
//! panics with the error's message.
//!
//! When this crate employs errors via [`Result`]s, it does so in a method that is strongly typed,
//! using enums for static dispatch rather than dynamic, with structs (often ZSTs) that implement
//! [`Error`](std::error::Error).
//!
//! # Dependencies
//! The containers don't use [`Vec`] or std's collections at all. The `malloc` backend relies on
//! `libc`, and the error types lean on some derive macros because they're helpful and remove the
//! need for some very repetitive programming.
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod alloc;
pub mod collections;

pub(crate) mod util;
