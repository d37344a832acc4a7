//! Contiguous collection types. Namely [`Vector`] for a collection of values stored side by side
//! in a single allocation, which grows as values are added.
#![warn(missing_docs)]

pub mod vector;

#[doc(inline)]
pub use vector::{Cursor, Vector};
