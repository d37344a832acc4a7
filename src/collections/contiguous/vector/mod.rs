//! A module containing [`Vector`] and associated types.
//!
//! [`Cursor`] provides random-access traversal over a Vector's live elements and [`IntoIter`]
//! provides owned iteration. [`IterMut`](std::slice::IterMut) and [`Iter`](std::slice::Iter) from
//! [`std::slice`] are used for borrowed iteration.
//!
//! [`Vector`] is also re-exported under the parent module.

mod cursor;
mod iter;
mod tests;
mod vector;

pub use cursor::*;
pub use iter::*;
pub use vector::*;
