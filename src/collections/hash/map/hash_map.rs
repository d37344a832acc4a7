use std::borrow::Borrow;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{BuildHasher, Hash, RandomState};
use std::mem;
use std::ops::Index;

use super::{
    Config, IntoKeys, IntoValues, Iter, IterMut, KeyNotFound, Keys, LoadFactor, Values, ValuesMut,
};
use crate::alloc::{AllocError, Allocator, CapacityOverflow, Global};
use crate::collections::contiguous::Vector;
use crate::util::result::ResultExtension;

const GROWTH_FACTOR: usize = 2;

/// A map of keys to values which relies on the keys implementing [`Hash`].
///
/// Entries live in an array of buckets, each bucket being a chain (a [`Vector`]) of the entries
/// whose hash reduces to that bucket's index. Every entry caches the hash of its key, so chains can
/// be scanned and entries relocated without hashing the keys again.
///
/// When one more entry would put the map above its load factor (0.75 by default), `insert` first
/// rehashes into twice as many buckets and then inserts, so the load factor holds once `insert`
/// returns. With the default configuration, that is the insertion which finds `len` equal to
/// `0.75 * bucket_count`. A
/// map configured with [`Config::fixed`] never rehashes on its own.
///
/// It is a logic error for keys in a HashMap to be manipulated in a way that changes their hash.
/// Because of this, HashMap's API prevents mutable access to its keys.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the HashMap.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `insert` | `O(1)`**, `O(n)` |
/// | `find` | `O(1)`* |
/// | `erase` | `O(1)`* |
/// | `contains` | `O(1)`* |
/// | `rehash` | `O(n)` |
///
/// \* Each of these scans one chain, which takes longer when many keys collide. While the load
/// factor is upheld, the expected chain length is constant.
///
/// \** If the HashMap needs to rehash first, `insert` will take `O(n)`. \* applies as well.
///
/// # Allocation Failure
/// A rehash allocates every bucket and chain it needs before moving any entry, so a failed
/// allocation always leaves the map exactly as it was. `try_insert`, `try_rehash` and
/// `try_reserve` return the [`AllocError`] instead of panicking.
pub struct HashMap<K: Hash + Eq, V, B: BuildHasher = RandomState, A: Allocator + Clone = Global> {
    pub(crate) buckets: Vector<Chain<K, V, A>, A>,
    pub(crate) len: usize,
    pub(crate) max_load: Option<LoadFactor>,
    pub(crate) hasher: B,
}

pub(crate) type Chain<K, V, A> = Vector<Entry<K, V>, A>;

#[derive(Debug, Clone)]
pub(crate) struct Entry<K, V> {
    pub hash: u64,
    pub key: K,
    pub value: V,
}

impl<K: Hash + Eq, V> HashMap<K, V> {
    /// Creates a new HashMap with 16 buckets and a load factor of 0.75.
    ///
    /// # Panics
    /// Panics if allocating the buckets fails.
    ///
    /// # Examples
    /// ```
    /// # use hand_std::collections::hash::HashMap;
    /// let mut map = HashMap::new();
    /// map.insert("apple", 1);
    /// map.insert("banana", 2);
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.bucket_count(), 16);
    /// assert_eq!(map.find("apple"), Some(&1));
    /// ```
    pub fn new() -> HashMap<K, V> {
        HashMap::with_config(Config::default())
    }

    /// Creates a new HashMap with `buckets` buckets and the default load factor.
    ///
    /// # Panics
    /// Panics if allocating the buckets fails.
    pub fn with_buckets(buckets: usize) -> HashMap<K, V> {
        HashMap::with_config(Config { buckets, ..Config::default() })
    }

    /// Creates a new HashMap that keeps exactly `buckets` buckets and never rehashes on its own.
    ///
    /// # Panics
    /// Panics if allocating the buckets fails.
    pub fn fixed(buckets: usize) -> HashMap<K, V> {
        HashMap::with_config(Config::fixed(buckets))
    }

    /// Creates a new HashMap according to `config`.
    ///
    /// # Panics
    /// Panics if allocating the buckets fails.
    pub fn with_config(config: Config) -> HashMap<K, V> {
        HashMap::with_config_in(config, RandomState::new(), Global)
    }
}

impl<K: Hash + Eq, V, B: BuildHasher> HashMap<K, V, B> {
    /// Creates a new HashMap with the default configuration and the provided `hasher`.
    ///
    /// # Panics
    /// Panics if allocating the buckets fails.
    pub fn with_hasher(hasher: B) -> HashMap<K, V, B> {
        HashMap::with_config_in(Config::default(), hasher, Global)
    }

    /// Creates a new HashMap according to `config`, using the provided `hasher`.
    ///
    /// # Panics
    /// Panics if allocating the buckets fails.
    pub fn with_config_and_hasher(config: Config, hasher: B) -> HashMap<K, V, B> {
        HashMap::with_config_in(config, hasher, Global)
    }
}

impl<K: Hash + Eq, V, B: BuildHasher, A: Allocator + Clone> HashMap<K, V, B, A> {
    /// Creates a new HashMap according to `config`, using the provided `hasher` and allocating
    /// through `alloc`.
    ///
    /// # Panics
    /// Panics if allocating the buckets fails.
    pub fn with_config_in(config: Config, hasher: B, alloc: A) -> HashMap<K, V, B, A> {
        HashMap::try_with_config_in(config, hasher, alloc).throw()
    }

    /// Creates a new HashMap according to `config`, returning an error if allocating the buckets
    /// fails.
    pub fn try_with_config_in(
        config: Config,
        hasher: B,
        alloc: A,
    ) -> Result<HashMap<K, V, B, A>, AllocError> {
        Ok(HashMap {
            buckets: Self::try_empty_buckets(config.bucket_count(), alloc)?,
            len: 0,
            max_load: config.max_load,
            hasher,
        })
    }

    /// Returns the number of entries in the HashMap.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the HashMap contains no entries.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current number of buckets.
    pub const fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the current ratio of entries to buckets.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.bucket_count() as f64
    }

    /// Returns the load factor at which the HashMap rehashes, or None if it never does.
    pub const fn max_load(&self) -> Option<LoadFactor> {
        self.max_load
    }

    /// Returns a reference to the map's [`BuildHasher`].
    pub const fn hasher(&self) -> &B {
        &self.hasher
    }

    /// Returns a reference to the allocator backing the map.
    pub const fn allocator(&self) -> &A {
        self.buckets.allocator()
    }

    /// Inserts the provided `key`-`value` pair into the HashMap, rehashing first if one more entry
    /// would put the map above its load factor. If the key was already associated with a value, the value is
    /// replaced and the previous one is returned.
    ///
    /// As with the standard library, the key isn't changed if it already exists.
    ///
    /// # Panics
    /// Panics if an allocation fails.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.try_insert(key, value).throw()
    }

    /// Inserts the provided `key`-`value` pair, returning an error rather than panicking if an
    /// allocation fails. On failure, no entry has been added or changed.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<Option<V>, AllocError> {
        let hash = self.hasher.hash_one(&key);
        // Keys are unique, so an equal key must be in this chain if it is anywhere.
        let is_new = !self.buckets[self.index_for_hash(hash)]
            .iter()
            .any(|e| e.hash == hash && e.key == key);

        if self.should_grow() {
            let target = self.len.checked_add(1).ok_or(CapacityOverflow)?;
            if let Some(bucket_count) = self.grown_bucket_count(target)? {
                // A new key's slot is allocated along with the rest of the rehash, so the push
                // below can't fail once the buckets have been replaced.
                self.try_rehash_with(bucket_count, is_new.then_some(hash))?;
            }
        }

        let index = self.index_for_hash(hash);
        let chain = &mut self.buckets[index];

        let existing = if is_new {
            None
        } else {
            chain.iter_mut().find(|e| e.hash == hash && e.key == key)
        };
        if let Some(existing) = existing {
            return Ok(Some(mem::replace(&mut existing.value, value)));
        }

        chain.try_push(Entry { hash, key, value })?;
        self.len += 1;
        Ok(None)
    }

    /// Returns a reference to the value associated with `key`, or None if there isn't one.
    pub fn find<Q>(&self, key: &Q) -> Option<&V>
    where
        // We're introducing a new type parameter here, Q which represents a borrowed version of K
        // where equality and hashing carries over the borrow.
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_entry(key).map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value associated with `key`, or None if there isn't one.
    pub fn find_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (index, pos) = self.locate(key);
        let entry = &mut self.buckets[index][pos?];
        Some(&mut entry.value)
    }

    /// Returns the entry for `key` as a key-value pair, or None if there isn't one.
    pub fn find_entry<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (index, pos) = self.locate(key);
        let entry = &self.buckets[index][pos?];
        Some((&entry.key, &entry.value))
    }

    /// Returns a reference to the value associated with `key`.
    ///
    /// The same functionality can be achieved using the [`Index`] operator.
    ///
    /// # Panics
    /// Panics if the map doesn't contain `key`.
    pub fn at<Q>(&self, key: &Q) -> &V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.try_at(key).throw()
    }

    /// Returns a reference to the value associated with `key`, or [`KeyNotFound`] if there isn't
    /// one. Unlike [`find`](HashMap::find), a miss is treated as an error.
    pub fn try_at<Q>(&self, key: &Q) -> Result<&V, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).ok_or(KeyNotFound)
    }

    /// Returns true if there is a value associated with `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.locate(key).1.is_some()
    }

    /// Removes the entry associated with `key`, returning the value if it existed. The map never
    /// shrinks as a result.
    pub fn erase<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.erase_entry(key).map(|(_, v)| v)
    }

    /// Removes the entry associated with `key`, returning it if it existed.
    pub fn erase_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (index, pos) = self.locate(key);
        let entry = self.buckets[index].remove(pos?);
        self.len -= 1;
        Some((entry.key, entry.value))
    }

    /// Removes all entries, keeping the buckets.
    pub fn clear(&mut self) {
        for chain in self.buckets.iter_mut() {
            chain.clear();
        }
        self.len = 0;
    }

    /// Rehashes the HashMap into `bucket_count` buckets (at least one).
    ///
    /// # Panics
    /// Panics if an allocation fails.
    pub fn rehash(&mut self, bucket_count: usize) {
        self.try_rehash(bucket_count).throw()
    }

    /// Rehashes the HashMap into `bucket_count` buckets (at least one), returning an error rather
    /// than panicking if an allocation fails.
    ///
    /// All storage for the new bucket array is allocated before any entry is moved. If any of
    /// those allocations fail, the new storage is dropped and the map is left untouched. Once
    /// every entry has been moved, the old bucket array is released.
    pub fn try_rehash(&mut self, bucket_count: usize) -> Result<(), AllocError> {
        self.try_rehash_with(Config::fixed(bucket_count).bucket_count(), None)
    }

    /// Rehashes into exactly `bucket_count` buckets. When `incoming` holds the hash of an entry
    /// about to be inserted, its chain gets a free slot for it.
    pub(crate) fn try_rehash_with(
        &mut self,
        bucket_count: usize,
        incoming: Option<u64>,
    ) -> Result<(), AllocError> {
        let alloc = self.allocator().clone();

        // Work out how long each new chain will be, so it can be allocated at its final size.
        let mut lengths = Vector::try_with_cap_in(bucket_count, alloc.clone())?;
        for _ in 0..bucket_count {
            // SAFETY: lengths was created with room for bucket_count elements.
            unsafe { lengths.push_unchecked(0_usize) }
        }
        let hashes = self.buckets.iter().flat_map(|chain| chain.iter()).map(|entry| entry.hash);
        for hash in hashes.chain(incoming) {
            lengths[reduce(hash, bucket_count)] += 1;
        }

        let mut buckets = Vector::try_with_cap_in(bucket_count, alloc.clone())?;
        for &len in lengths.iter() {
            let chain = Vector::try_with_cap_in(len, alloc.clone())?;
            // SAFETY: buckets was created with room for bucket_count chains.
            unsafe { buckets.push_unchecked(chain) }
        }

        // Nothing past this point can fail: each chain has room for the entries which reduce to
        // it (plus the incoming one), and no user code is called because hashes are cached.
        let old_buckets = mem::replace(&mut self.buckets, buckets);
        for entry in old_buckets.into_iter().flatten() {
            let index = reduce(entry.hash, bucket_count);
            // SAFETY: The chain at index was allocated with room for every entry reducing to it.
            unsafe { self.buckets[index].push_unchecked(entry) }
        }

        Ok(())
    }

    /// Rehashes ahead of time so that `extra` more entries can be inserted without an automatic
    /// rehash. Does nothing for a map with a fixed bucket count.
    ///
    /// # Panics
    /// Panics if an allocation fails.
    pub fn reserve(&mut self, extra: usize) {
        self.try_reserve(extra).throw()
    }

    /// Rehashes ahead of time to make room for `extra` entries, returning an error rather than
    /// panicking if an allocation fails.
    pub fn try_reserve(&mut self, extra: usize) -> Result<(), AllocError> {
        let target = self.len.checked_add(extra).ok_or(CapacityOverflow)?;
        match self.grown_bucket_count(target)? {
            Some(bucket_count) => self.try_rehash_with(bucket_count, None),
            None => Ok(()),
        }
    }

    /// Returns an iterator over all key-value pairs in the HashMap, as references.
    pub fn iter(&self) -> Iter<'_, K, V, A> {
        self.into_iter()
    }

    /// Returns an iterator over all key-value pairs in the HashMap, with mutable references to the
    /// values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V, A> {
        self.into_iter()
    }

    /// Consumes self and returns an iterator over all contained keys.
    pub fn into_keys(self) -> IntoKeys<K, V, A> {
        IntoKeys(self.into_iter())
    }

    /// Returns an iterator over all keys in the HashMap, as references.
    pub fn keys(&self) -> Keys<'_, K, V, A> {
        Keys(self.iter())
    }

    /// Consumes self and returns an iterator over all contained values.
    pub fn into_values(self) -> IntoValues<K, V, A> {
        IntoValues(self.into_iter())
    }

    /// Returns an iterator over all values in the HashMap, as mutable references.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V, A> {
        ValuesMut(self.iter_mut())
    }

    /// Returns an iterator over all values in the HashMap, as references.
    pub fn values(&self) -> Values<'_, K, V, A> {
        Values(self.iter())
    }
}

impl<K: Hash + Eq, V, B: BuildHasher, A: Allocator + Clone> HashMap<K, V, B, A> {
    /// Determines whether one more entry would put the HashMap above its load factor, meaning
    /// that it should grow before inserting.
    pub(crate) fn should_grow(&self) -> bool {
        match self.max_load {
            Some(max_load) => {
                max_load.is_exceeded_by(self.len.saturating_add(1), self.bucket_count())
            },
            None => false,
        }
    }

    /// Returns the smallest power-of-two multiple of the current bucket count that can hold
    /// `target` entries without exceeding the load factor, or None if no growth is needed.
    pub(crate) fn grown_bucket_count(&self, target: usize) -> Result<Option<usize>, AllocError> {
        let Some(max_load) = self.max_load else { return Ok(None) };

        let mut bucket_count = self.bucket_count();
        while max_load.is_exceeded_by(target, bucket_count) {
            bucket_count = bucket_count.checked_mul(GROWTH_FACTOR).ok_or(CapacityOverflow)?;
        }

        Ok((bucket_count != self.bucket_count()).then_some(bucket_count))
    }

    /// Calculates the index of the bucket responsible for the provided hash.
    pub(crate) const fn index_for_hash(&self, hash: u64) -> usize {
        reduce(hash, self.bucket_count())
    }

    /// Finds the bucket responsible for `key` and, if the key is present, its position in that
    /// bucket's chain.
    pub(crate) fn locate<Q>(&self, key: &Q) -> (usize, Option<usize>)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hasher.hash_one(key);
        let index = self.index_for_hash(hash);

        // This is where Eq comes in: the cached hash rules out most entries cheaply, and equality
        // decides between keys with the same hash.
        let pos = self.buckets[index]
            .iter()
            .position(|e| e.hash == hash && Borrow::<Q>::borrow(&e.key) == key);

        (index, pos)
    }

    /// Allocates `count` empty chains. Empty chains don't allocate, so this is a single
    /// allocation.
    pub(crate) fn try_empty_buckets(
        count: usize,
        alloc: A,
    ) -> Result<Vector<Chain<K, V, A>, A>, AllocError> {
        let mut buckets = Vector::try_with_cap_in(count, alloc.clone())?;
        for _ in 0..count {
            // SAFETY: buckets was created with room for count chains.
            unsafe { buckets.push_unchecked(Vector::new_in(alloc.clone())) }
        }
        Ok(buckets)
    }
}

/// Reduces a hash to a bucket index. `bucket_count` is never zero.
const fn reduce(hash: u64, bucket_count: usize) -> usize {
    (hash % bucket_count as u64) as usize
}

impl<K, V, Q, B, A> Index<&Q> for HashMap<K, V, B, A>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    B: BuildHasher,
    A: Allocator + Clone,
{
    type Output = V;

    fn index(&self, key: &Q) -> &Self::Output {
        self.at(key)
    }
}

impl<K, V, B, A> Default for HashMap<K, V, B, A>
where
    K: Hash + Eq,
    B: BuildHasher + Default,
    A: Allocator + Clone + Default,
{
    fn default() -> Self {
        HashMap::with_config_in(Config::default(), B::default(), A::default())
    }
}

impl<K, V, B, A> Extend<(K, V)> for HashMap<K, V, B, A>
where
    K: Hash + Eq,
    B: BuildHasher,
    A: Allocator + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, B, A> FromIterator<(K, V)> for HashMap<K, V, B, A>
where
    K: Hash + Eq,
    B: BuildHasher + Default,
    A: Allocator + Clone + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = HashMap::default();
        map.extend(iter);
        map
    }
}

impl<K, V, B, A> Clone for HashMap<K, V, B, A>
where
    K: Hash + Eq + Clone,
    V: Clone,
    B: BuildHasher + Clone,
    A: Allocator + Clone,
{
    fn clone(&self) -> Self {
        // The hasher is cloned along with the cached hashes, so every entry stays in place.
        HashMap {
            buckets: self.buckets.clone(),
            len: self.len,
            max_load: self.max_load,
            hasher: self.hasher.clone(),
        }
    }
}

impl<K, V, B, A> PartialEq for HashMap<K, V, B, A>
where
    K: Hash + Eq,
    V: PartialEq,
    B: BuildHasher,
    A: Allocator + Clone,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().all(|(k, v)| other.find(k) == Some(v))
    }
}

impl<K, V, B, A> Eq for HashMap<K, V, B, A>
where
    K: Hash + Eq,
    V: Eq,
    B: BuildHasher,
    A: Allocator + Clone,
{}

impl<K, V, B, A> Debug for HashMap<K, V, B, A>
where
    K: Hash + Eq + Debug,
    V: Debug,
    B: BuildHasher + Debug,
    A: Allocator + Clone,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashMap")
            .field("buckets", &BucketsDebug(&self.buckets))
            .field("len", &self.len)
            .field("bucket_count", &self.bucket_count())
            .field("max_load", &self.max_load)
            .field("hasher", &self.hasher)
            .finish()
    }
}

/// Prints the buckets as a list, each chain shown as its entries joined by arrows, or `-` when
/// empty.
struct BucketsDebug<'a, K, V, A: Allocator>(&'a Vector<Chain<K, V, A>, A>);

impl<K: Debug, V: Debug, A: Allocator> Debug for BucketsDebug<'_, K, V, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter().map(ChainDebug)).finish()
    }
}

struct ChainDebug<'a, K, V, A: Allocator>(&'a Chain<K, V, A>);

impl<K: Debug, V: Debug, A: Allocator> Debug for ChainDebug<'_, K, V, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("-");
        }
        for (i, Entry { key, value, .. }) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "({key:?}: {value:?})")?;
        }
        Ok(())
    }
}

impl<K, V, B, A> Display for HashMap<K, V, B, A>
where
    K: Hash + Eq + Debug,
    V: Debug,
    B: BuildHasher,
    A: Allocator + Clone,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#")?;
        f.debug_map().entries(self.iter()).finish()
    }
}
