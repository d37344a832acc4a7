//! The allocation capability shared by every collection in this crate.
//!
//! Collections are generic over an [`Allocator`], defaulting to [`Global`]. All of them allocate
//! through the same trait, so swapping the backend for one container (for example to [`Malloc`],
//! or to an arena) doesn't affect any other.
//!
//! [`Block`] is the owning handle that the contiguous collections keep their slots in.
#![warn(missing_docs)]

mod allocator;
mod block;
mod error;
mod global;
mod malloc;
mod tests;

pub use allocator::*;
pub use block::*;
pub use error::*;
pub use global::*;
#[cfg(feature = "malloc")]
pub use malloc::*;
