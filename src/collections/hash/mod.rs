//! Hash-based collection types. [`HashMap`] stores its entries in chained buckets, rehashing into
//! twice as many buckets whenever its load factor is reached. Configured with
//! [`Config::fixed`](map::Config::fixed), the same type acts as a simple map with a fixed number
//! of buckets.

pub mod map;

#[doc(inline)]
pub use map::{Config, HashMap, LoadFactor};
