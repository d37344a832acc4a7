use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// A lookup that must succeed didn't find its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyNotFound;

impl Display for KeyNotFound {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Key not found in HashMap!")
    }
}

impl Error for KeyNotFound {}

/// A load factor must be a finite number greater than zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidLoadFactor(pub f64);

impl Display for InvalidLoadFactor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid load factor {}, expected a finite value greater than 0!", self.0)
    }
}

impl Error for InvalidLoadFactor {}
