//! A byte string type, [`ByteString`], built on [`Vector`](super::contiguous::Vector).
#![warn(missing_docs)]

mod byte_string;
mod tests;

pub use byte_string::*;
