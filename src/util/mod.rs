//! Crate-internal helpers. `error` holds the error types shared between collections, while
//! `alloc`, `hash` and `panic` provide fixtures for the unit tests.
#![warn(missing_docs)]

pub mod alloc;
pub mod error;
pub mod hash;
pub mod panic;
pub mod result;
