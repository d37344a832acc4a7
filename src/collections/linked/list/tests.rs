#![cfg(test)]

use std::iter;

use super::*;
use crate::alloc::AllocError;
use crate::collections::contiguous::Vector;
use crate::util::alloc::{CountedDrop, FailingAllocator, ZeroSizedType};
use crate::util::panic::assert_panics;

fn contents<T: Copy>(list: &LinkedList<T>) -> Vector<T> {
    list.iter().copied().collect()
}

#[test]
fn test_push_pop() {
    let mut list = LinkedList::new();
    assert_eq!(list.pop_front(), None);
    assert_eq!(list.front(), None);

    list.push_back(2);
    list.push_back(3);
    list.push_front(1);
    list.verify_double_links();

    assert_eq!(list.len(), 3);
    assert_eq!(list.front(), Some(&1));
    assert_eq!(list.back(), Some(&3));

    assert_eq!(list.pop_back(), Some(3));
    assert_eq!(list.pop_front(), Some(1));
    list.verify_double_links();
    assert_eq!(list.pop_front(), Some(2));
    assert!(list.is_empty());
    assert_eq!(list.pop_back(), None);
}

#[test]
fn test_front_back_mut() {
    let mut list: LinkedList<_> = (1..=3).collect();
    *list.front_mut().expect("List isn't empty.") *= 10;
    *list.back_mut().expect("List isn't empty.") *= 10;
    assert_eq!(*contents(&list), [10, 2, 30]);
}

#[test]
fn test_get_and_index() {
    let mut list: LinkedList<_> = (0..10).collect();
    for i in 0..10 {
        assert_eq!(*list.get(i), i, "Seeking from either end should find the same element.");
    }

    list[4] = 40;
    assert_eq!(list[4], 40);
    assert_eq!(list.try_get(10), Err(IndexOutOfBounds { index: 10, len: 10 }));

    let message = assert_panics!({
        let list: LinkedList<u8> = LinkedList::new();
        list.get(0);
    });
    assert_eq!(message, IndexOutOfBounds { index: 0, len: 0 }.to_string());
}

#[test]
fn test_insert() {
    let mut list: LinkedList<_> = (0..4).collect();
    list.insert(2, 100);
    list.verify_double_links();
    list.insert(0, -1);
    list.insert(list.len(), 200);
    list.verify_double_links();
    assert_eq!(*contents(&list), [-1, 0, 1, 100, 2, 3, 200]);

    assert_eq!(
        list.try_insert(8, 0),
        Err(IndexOrAllocError::IndexOutOfBounds(IndexOutOfBounds { index: 8, len: 7 })),
        "Inserting past len should fail."
    );

    let mut empty = LinkedList::new();
    empty.insert(0, 'a');
    assert_eq!(empty.front(), Some(&'a'));
}

#[test]
fn test_remove() {
    let mut list: LinkedList<_> = (0..6).collect();
    assert_eq!(list.remove(3), 3);
    list.verify_double_links();
    assert_eq!(list.remove(0), 0);
    assert_eq!(list.remove(3), 5);
    list.verify_double_links();
    assert_eq!(*contents(&list), [1, 2, 4]);

    assert_eq!(list.try_remove(3), Err(IndexOutOfBounds { index: 3, len: 3 }));
    assert_eq!(list.replace(1, 20), 2);
    assert_eq!(*contents(&list), [1, 20, 4]);
}

#[test]
fn test_contains() {
    let list: LinkedList<_> = ["a", "b", "c"].into_iter().collect();
    assert!(list.contains(&"b"));
    assert!(!list.contains(&"d"));
    assert_eq!(list.index_of(&"c"), Some(2));
}

#[test]
fn test_iterators() {
    let mut list: LinkedList<_> = (1..=5).collect();

    let mut iter = list.iter();
    assert_eq!(iter.len(), 5);
    assert_eq!(iter.next(), Some(&1));
    assert_eq!(iter.next_back(), Some(&5));
    assert_eq!(iter.clone().count(), 3);
    assert_eq!(*iter.collect::<Vector<_>>(), [&2, &3, &4]);

    for value in list.iter_mut().rev().take(2) {
        *value = 0;
    }
    assert_eq!(*contents(&list), [1, 2, 3, 0, 0]);

    let mut owned = list.into_iter();
    assert_eq!(owned.next_back(), Some(0));
    assert_eq!(owned.next(), Some(1));
    assert_eq!(owned.len(), 3);
}

#[test]
fn test_drop() {
    let counter = CountedDrop::new(0);
    let mut list: LinkedList<_> = iter::repeat_with(|| counter.clone()).take(8).collect();

    drop(list.remove(4));
    assert_eq!(counter.take(), 1);

    list.clear();
    assert_eq!(counter.take(), 7, "Clearing should drop every element.");
    assert!(list.is_empty());

    let list: LinkedList<_> = iter::repeat_with(|| counter.clone()).take(5).collect();
    let mut iter = list.into_iter();
    drop(iter.next());
    drop(iter);
    assert_eq!(counter.take(), 5, "Dropping the iterator should drop the remaining elements.");
}

#[test]
fn test_zst_support() {
    let mut list = LinkedList::new();
    for _ in 0..5 {
        list.push_back(ZeroSizedType);
    }
    list.verify_double_links();
    assert_eq!(list.len(), 5);
    assert_eq!(list.remove(2), ZeroSizedType);
}

#[test]
fn test_allocator() {
    let alloc = FailingAllocator::new(3);
    let mut list = LinkedList::new_in(alloc.clone());

    list.try_push_back(1).expect("Within budget.");
    list.try_push_front(0).expect("Within budget.");
    list.try_insert(1, 5).expect("Within budget.");
    assert_eq!(alloc.live(), 3, "Each element should own one node.");

    assert!(matches!(list.try_push_back(2), Err(AllocError::OutOfMemory(_))));
    assert!(matches!(list.try_insert(1, 2), Err(IndexOrAllocError::Alloc(_))));
    list.verify_double_links();
    assert_eq!(list.len(), 3, "A failed push shouldn't change the list.");

    list.pop_front();
    assert_eq!(alloc.live(), 2, "Popping should release the node.");

    drop(list);
    assert_eq!(alloc.live(), 0, "Dropping the list should release every node.");
}

#[test]
fn test_equality_and_clone() {
    let a: LinkedList<_> = (0..5).collect();
    let b = a.clone();
    assert_eq!(a, b);
    b.verify_double_links();

    let c: LinkedList<_> = (0..4).collect();
    assert_ne!(a, c);
}

#[test]
fn test_fmt() {
    let list: LinkedList<_> = (1..=3).collect();
    assert_eq!(format!("{list}"), "(1) -> (2) -> (3)");
    assert_eq!(format!("{list:?}"), "LinkedList { contents: [1, 2, 3], len: 3 }");
}
