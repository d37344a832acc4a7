//! A module containing [`HashMap`] and associated types.
//!
//! Besides the map itself there are the types for configuring it ([`Config`] and
//! [`LoadFactor`]), the errors it produces, and iterators providing owned and borrowed iteration
//! over entries, keys or values.
//!
//! As a note, there is no mutable iterator over entries or keys because mutating the keys of a
//! HashMap in place would cause a logic error.
//!
//! [`HashMap`] is also re-exported under the parent module.

mod config;
mod error;
mod hash_map;
mod iter;

pub use config::*;
pub use error::*;
pub use hash_map::*;
pub use iter::*;
