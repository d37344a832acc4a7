use super::InvalidLoadFactor;

/// The number of buckets a HashMap starts with unless configured otherwise.
pub const DEFAULT_BUCKETS: usize = 16;

/// The load factor a HashMap uses unless configured otherwise.
pub const DEFAULT_LOAD_FACTOR: LoadFactor = LoadFactor(0.75);

/// The smallest number of buckets a HashMap can have. Keys are reduced modulo the bucket count,
/// so there must be at least one.
pub const MIN_BUCKETS: usize = 1;

/// The ratio of entries to buckets at which a HashMap rehashes into twice as many buckets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadFactor(f64);

impl LoadFactor {
    /// Creates a new LoadFactor, checking that it is finite and greater than zero.
    pub fn new(value: f64) -> Result<LoadFactor, InvalidLoadFactor> {
        if value.is_finite() && value > 0.0 {
            Ok(LoadFactor(value))
        } else {
            Err(InvalidLoadFactor(value))
        }
    }

    /// Returns the ratio as a float.
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Returns true if `len` entries in `buckets` buckets would be above this load factor.
    pub(crate) fn is_exceeded_by(self, len: usize, buckets: usize) -> bool {
        len as f64 > buckets as f64 * self.0
    }
}

impl Default for LoadFactor {
    fn default() -> Self {
        DEFAULT_LOAD_FACTOR
    }
}

/// Runtime configuration for a [`HashMap`](super::HashMap).
///
/// A `max_load` of None gives a map that never rehashes on its own: its bucket count stays fixed
/// and chains simply get longer as entries are added.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// The number of buckets to allocate up front. Values below [`MIN_BUCKETS`] are raised to it.
    pub buckets: usize,
    /// The load factor that triggers automatic rehashing, if any.
    pub max_load: Option<LoadFactor>,
}

impl Config {
    /// A growable map with the provided initial bucket count and load factor.
    pub const fn new(buckets: usize, load_factor: LoadFactor) -> Config {
        Config {
            buckets,
            max_load: Some(load_factor),
        }
    }

    /// A map that always keeps exactly `buckets` buckets.
    pub const fn fixed(buckets: usize) -> Config {
        Config {
            buckets,
            max_load: None,
        }
    }

    pub(crate) const fn bucket_count(&self) -> usize {
        if self.buckets < MIN_BUCKETS { MIN_BUCKETS } else { self.buckets }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(DEFAULT_BUCKETS, DEFAULT_LOAD_FACTOR)
    }
}
