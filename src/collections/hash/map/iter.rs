use std::hash::{BuildHasher, Hash};
use std::iter::FusedIterator;
use std::slice;

use super::hash_map::{Chain, Entry, HashMap};
use crate::alloc::{Allocator, Global};
use crate::collections::contiguous::vector::IntoIter as VecIntoIter;

impl<K: Hash + Eq, V, B: BuildHasher, A: Allocator + Clone> IntoIterator for HashMap<K, V, B, A> {
    type Item = (K, V);

    type IntoIter = IntoIter<K, V, A>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            len: self.len,
            chains: self.buckets.into_iter(),
            current: None,
        }
    }
}

/// A type for owned iteration over a [`HashMap`], yielding entries bucket by bucket.
pub struct IntoIter<K, V, A: Allocator = Global> {
    pub(crate) chains: VecIntoIter<Chain<K, V, A>, A>,
    pub(crate) current: Option<VecIntoIter<Entry<K, V>, A>>,
    pub(crate) len: usize,
}

impl<K, V, A: Allocator> Iterator for IntoIter<K, V, A> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current.as_mut().and_then(Iterator::next) {
                self.len -= 1;
                return Some((entry.key, entry.value));
            }
            self.current = Some(self.chains.next()?.into_iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<K, V, A: Allocator> ExactSizeIterator for IntoIter<K, V, A> {}

impl<K, V, A: Allocator> FusedIterator for IntoIter<K, V, A> {}

impl<'a, K: Hash + Eq, V, B: BuildHasher, A: Allocator + Clone> IntoIterator
    for &'a mut HashMap<K, V, B, A>
{
    type Item = (&'a K, &'a mut V);

    type IntoIter = IterMut<'a, K, V, A>;

    fn into_iter(self) -> Self::IntoIter {
        IterMut {
            len: self.len,
            chains: self.buckets.iter_mut(),
            current: Default::default(),
        }
    }
}

/// A type for iteration over a [`HashMap`] with mutable access to the values.
pub struct IterMut<'a, K, V, A: Allocator = Global> {
    pub(crate) chains: slice::IterMut<'a, Chain<K, V, A>>,
    pub(crate) current: slice::IterMut<'a, Entry<K, V>>,
    pub(crate) len: usize,
}

impl<'a, K, V, A: Allocator> Iterator for IterMut<'a, K, V, A> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current.next() {
                self.len -= 1;
                return Some((&entry.key, &mut entry.value));
            }
            self.current = self.chains.next()?.iter_mut();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<K, V, A: Allocator> ExactSizeIterator for IterMut<'_, K, V, A> {}

impl<K, V, A: Allocator> FusedIterator for IterMut<'_, K, V, A> {}

impl<'a, K: Hash + Eq, V, B: BuildHasher, A: Allocator + Clone> IntoIterator
    for &'a HashMap<K, V, B, A>
{
    type Item = (&'a K, &'a V);

    type IntoIter = Iter<'a, K, V, A>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            len: self.len,
            chains: self.buckets.iter(),
            current: Default::default(),
        }
    }
}

/// A type for borrowed iteration over a [`HashMap`].
pub struct Iter<'a, K, V, A: Allocator = Global> {
    pub(crate) chains: slice::Iter<'a, Chain<K, V, A>>,
    pub(crate) current: slice::Iter<'a, Entry<K, V>>,
    pub(crate) len: usize,
}

impl<'a, K, V, A: Allocator> Iterator for Iter<'a, K, V, A> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current.next() {
                self.len -= 1;
                return Some((&entry.key, &entry.value));
            }
            self.current = self.chains.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<K, V, A: Allocator> ExactSizeIterator for Iter<'_, K, V, A> {}

impl<K, V, A: Allocator> FusedIterator for Iter<'_, K, V, A> {}

impl<K, V, A: Allocator> Clone for Iter<'_, K, V, A> {
    fn clone(&self) -> Self {
        Iter {
            chains: self.chains.clone(),
            current: self.current.clone(),
            len: self.len,
        }
    }
}

/// An owned iterator over the keys of a [`HashMap`]. See [`HashMap::into_keys`].
pub struct IntoKeys<K, V, A: Allocator = Global>(pub(crate) IntoIter<K, V, A>);

impl<K, V, A: Allocator> Iterator for IntoKeys<K, V, A> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V, A: Allocator> ExactSizeIterator for IntoKeys<K, V, A> {}

/// A borrowed iterator over the keys of a [`HashMap`]. See [`HashMap::keys`].
pub struct Keys<'a, K, V, A: Allocator = Global>(pub(crate) Iter<'a, K, V, A>);

impl<'a, K, V, A: Allocator> Iterator for Keys<'a, K, V, A> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V, A: Allocator> ExactSizeIterator for Keys<'_, K, V, A> {}

/// An owned iterator over the values of a [`HashMap`]. See [`HashMap::into_values`].
pub struct IntoValues<K, V, A: Allocator = Global>(pub(crate) IntoIter<K, V, A>);

impl<K, V, A: Allocator> Iterator for IntoValues<K, V, A> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V, A: Allocator> ExactSizeIterator for IntoValues<K, V, A> {}

/// An iterator over mutable references to the values of a [`HashMap`]. See
/// [`HashMap::values_mut`].
pub struct ValuesMut<'a, K, V, A: Allocator = Global>(pub(crate) IterMut<'a, K, V, A>);

impl<'a, K, V, A: Allocator> Iterator for ValuesMut<'a, K, V, A> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V, A: Allocator> ExactSizeIterator for ValuesMut<'_, K, V, A> {}

/// A borrowed iterator over the values of a [`HashMap`]. See [`HashMap::values`].
pub struct Values<'a, K, V, A: Allocator = Global>(pub(crate) Iter<'a, K, V, A>);

impl<'a, K, V, A: Allocator> Iterator for Values<'a, K, V, A> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V, A: Allocator> ExactSizeIterator for Values<'_, K, V, A> {}
