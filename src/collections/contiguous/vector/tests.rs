#![cfg(test)]

use std::hash::{BuildHasher, RandomState};
use std::iter;

use super::*;
use crate::alloc::{AllocError, Global};
use crate::util::alloc::{CountedDrop, FailingAllocator, ZeroSizedType};
use crate::util::panic::assert_panics;

#[test]
fn test_growth() {
    let mut vec = Vector::new();
    assert_eq!(vec.cap(), 0, "A new Vector shouldn't allocate.");

    for i in 1..=4 {
        vec.push(i);
        assert_eq!(vec.cap(), 4, "The first growth should allocate the initial capacity.");
    }

    vec.push(5);
    assert_eq!(vec.cap(), 8, "The capacity should double when a push finds the Vector full.");
    assert_eq!(vec.len(), 5);
    assert_eq!(*vec.front(), 1);
    assert_eq!(*vec.back(), 5);

    for i in 6..=17 {
        vec.push(i);
    }
    assert_eq!(vec.cap(), 32);
    assert_eq!(*vec, *(1..=17).collect::<Vector<_>>());
}

#[test]
fn test_push_preserves_order() {
    for n in [0, 1, 4, 5, 100] {
        let mut vec = Vector::new();
        for i in 0..n {
            vec.push(i);
        }

        assert_eq!(vec.len(), n, "Length should equal the number of pushes.");
        for (index, value) in vec.iter().enumerate() {
            assert_eq!(*value, index, "Each element should equal the value pushed at its index.");
        }
    }
}

#[test]
fn test_front_back_empty() {
    let vec = Vector::<u8>::new();
    assert_eq!(vec.try_front(), Err(EmptyContainer));
    assert_eq!(vec.try_back(), Err(EmptyContainer));

    assert_panics!({
        Vector::<u8>::new().front();
    });
    assert_panics!({
        Vector::<u8>::new().back();
    });
}

#[test]
fn test_index_out_of_bounds() {
    let mut vec: Vector<_> = (0..3).collect();

    assert_eq!(vec.try_get(2), Ok(&2));
    assert_eq!(vec.try_get(3), Err(IndexOutOfBounds { index: 3, len: 3 }));
    assert_eq!(vec.try_remove(3), Err(IndexOutOfBounds { index: 3, len: 3 }));
    assert_eq!(vec.try_replace(5, 0), Err(IndexOutOfBounds { index: 5, len: 3 }));
    assert_eq!(
        vec.try_insert(4, 0),
        Err(IndexOrAllocError::IndexOutOfBounds(IndexOutOfBounds { index: 4, len: 3 })),
        "Inserting past len should fail."
    );
    assert_eq!(*vec, [0, 1, 2], "Failed operations shouldn't modify the Vector.");

    assert_panics!({
        let vec: Vector<u8> = Vector::new();
        let _ = vec[0];
    });
}

#[test]
fn test_insert_remove() {
    let mut vec: Vector<_> = (0..4).collect();
    assert_eq!(vec.cap(), 4);

    vec.insert(4, 4);
    assert_eq!(vec.cap(), 8, "Inserting into a full Vector should grow it.");
    vec.insert(0, -1);
    vec.insert(3, 100);
    assert_eq!(*vec, [-1, 0, 1, 100, 2, 3, 4]);

    assert_eq!(vec.remove(3), 100);
    assert_eq!(vec.remove(0), -1);
    assert_eq!(vec.remove(4), 4);
    assert_eq!(*vec, [0, 1, 2, 3]);

    assert_eq!(vec.replace(1, 10), 1);
    assert_eq!(vec.pop(), Some(3));
    assert_eq!(*vec, [0, 10, 2]);
}

#[test]
fn test_reserve_and_shrink() {
    let mut vec: Vector<u8> = Vector::with_cap(2);
    vec.reserve(10);
    assert!(vec.cap() >= 10, "Reserve should make room for the extra elements.");

    vec.extend([1, 2, 3]);
    vec.shrink_to_fit();
    assert_eq!(vec.cap(), 3, "Shrinking should make the capacity equal to the length.");
    assert_eq!(*vec, [1, 2, 3]);

    assert_eq!(
        Vector::<u64>::new().try_reserve(usize::MAX),
        Err(AllocError::CapacityOverflow(crate::alloc::CapacityOverflow)),
        "Reserving more than can be described should fail instead of allocating."
    );
}

#[test]
fn test_append() {
    let mut a: Vector<_> = (0..3).collect();
    let b: Vector<_> = (3..10).collect();
    a.append(b);
    assert_eq!(*a, *(0..10).collect::<Vector<_>>());

    let counter = CountedDrop::new(0);
    let mut a: Vector<_> = iter::repeat_with(|| counter.clone()).take(3).collect();
    a.append(iter::repeat_with(|| counter.clone()).take(4).collect());
    assert_eq!(counter.take(), 0, "Appending shouldn't drop any of the moved elements.");
    drop(a);
    assert_eq!(counter.take(), 7, "All appended elements should be owned by the target.");
}

#[test]
fn test_zst_support() {
    let mut vec = Vector::new();
    for _ in 0..10 {
        vec.push(ZeroSizedType);
    }

    assert_eq!(vec.len(), 10);
    assert_eq!(vec[9], ZeroSizedType);
    assert_eq!(vec.pop(), Some(ZeroSizedType));
    assert_eq!(vec.iter().count(), 9);
}

#[test]
fn test_drop() {
    let counter = CountedDrop::new(0);
    let mut vec: Vector<_> = iter::repeat_with(|| counter.clone()).take(10).collect();

    vec.truncate(6);
    assert_eq!(counter.take(), 4, "Truncating should drop the removed elements.");

    drop(vec);
    assert_eq!(counter.take(), 6, "Dropping should drop every live element.");
}

#[test]
fn test_small_extends_grow_geometrically() {
    let mut vec: Vector<usize> = Vector::new();
    let mut reallocs = 0;
    let mut cap = vec.cap();
    for i in 0..1000 {
        vec.extend([i]);
        if vec.cap() != cap {
            reallocs += 1;
            cap = vec.cap();
        }
    }
    assert_eq!(vec.len(), 1000);
    assert_eq!(reallocs, 9, "Capacity should go 4, 8, 16 and so on up to 1024.");
    assert_eq!(vec.cap(), 1024);

    let mut exact: Vector<u8> = Vector::with_cap(4);
    exact.reserve_exact(6);
    assert_eq!(exact.cap(), 6, "An exact reservation shouldn't grow any further.");
    exact.reserve_exact(2);
    assert_eq!(exact.cap(), 6, "An exact reservation with room to spare does nothing.");
    exact.reserve(7);
    assert_eq!(exact.cap(), 12, "A plain reservation should at least double the capacity.");
    exact.reserve(30);
    assert_eq!(exact.cap(), 30, "A reservation beyond double should allocate what it needs.");
}

#[test]
fn test_alloc_failure_leaves_vector_unchanged() {
    let alloc = FailingAllocator::new(1);
    let mut vec = Vector::new_in(alloc.clone());

    for i in 0..4 {
        vec.try_push(i).expect("The first allocation is within budget.");
    }
    assert_eq!(vec.cap(), 4);

    assert!(
        matches!(vec.try_push(4), Err(AllocError::OutOfMemory(_))),
        "Growing past the allocation budget should report out of memory."
    );
    assert_eq!(*vec, [0, 1, 2, 3], "A failed push shouldn't change the contents.");
    assert_eq!(vec.cap(), 4, "A failed push shouldn't change the capacity.");

    alloc.set_budget(1);
    vec.try_push(4).expect("The budget allows one more allocation.");
    assert_eq!(*vec, [0, 1, 2, 3, 4]);
    assert_eq!(alloc.live(), 1, "The old block should be released after relocation.");

    drop(vec);
    assert_eq!(alloc.live(), 0, "Dropping the Vector should release its block.");
}

#[test]
fn test_equality_and_hash() {
    let vec: Vector<_> = (0_usize..5).collect();
    let mut pushed = Vector::with_cap(1);
    pushed.extend(0_usize..5);

    assert_eq!(vec, pushed, "Equality shouldn't depend on capacity.");
    assert_ne!(vec, [0, 1, 2, 5, 4].into_iter().collect());

    let state = RandomState::new();
    assert_eq!(
        state.hash_one(&vec),
        state.hash_one(&pushed),
        "Equal Vectors should produce the same hash."
    );
    assert_eq!(
        state.hash_one(&vec),
        state.hash_one([0_usize, 1, 2, 3, 4].as_slice()),
        "Borrow hash equality should be upheld."
    );
}

#[test]
fn test_iterators() {
    let mut vec: Vector<_> = (0_usize..5).collect();

    for i in &mut vec {
        *i *= 2;
    }
    assert_eq!(*vec, [0, 2, 4, 6, 8]);
    assert_eq!(vec.clone(), vec, "A clone should equal the original.");

    let mut iter = vec.into_iter();
    assert_eq!(iter.len(), 5);
    assert_eq!(iter.next(), Some(0));
    assert_eq!(iter.next_back(), Some(8));
    assert_eq!(iter.next_back(), Some(6));
    assert_eq!(iter.next(), Some(2));
    assert_eq!(iter.next_back(), Some(4));
    assert_eq!(iter.next(), None);

    let counter = CountedDrop::new(0);
    let vec: Vector<_> = iter::repeat_with(|| counter.clone()).take(10).collect();
    let mut iter = vec.into_iter();
    drop(iter.next());
    drop(iter);
    assert_eq!(
        counter.take(),
        10,
        "Dropping a partially consumed owned iterator should drop the remaining elements."
    );
}

#[test]
fn test_cursor_arithmetic() {
    let vec: Vector<_> = (1..=5).collect();
    let begin = vec.begin();
    let end = vec.end();

    assert_eq!(end - begin, 5, "The distance between begin and end should be the length.");
    assert_eq!(begin.get(), Some(&1));
    assert_eq!(end.get(), None, "The end Cursor shouldn't point at an element.");
    assert_eq!((end - 1).get(), Some(&5));
    assert_eq!(begin[3], 4);
    assert_eq!((begin - 1).get(), None, "Positions before begin shouldn't dereference.");

    let mut cursor = begin;
    cursor += 2;
    assert_eq!(cursor.position(), 2);
    assert_eq!(cursor[-1], 2);
    cursor -= 2;
    assert_eq!(cursor, begin);
    assert!(cursor.is_begin());
    assert!(end.is_end());

    assert!(begin < end);
    assert!(begin <= begin + 0);
    assert!(end > begin + 4);
    assert!(end >= end);
    assert!(begin != end);

    assert_eq!((begin + 1).until(&(end - 1)), Some(&[2, 3, 4][..]));
    assert_eq!(end.until(&begin), None, "Out of order Cursors shouldn't form a range.");

    let other: Vector<_> = (1..=5).collect();
    assert!(begin != other.begin(), "Cursors over different Vectors should never be equal.");
    assert_eq!(begin.partial_cmp(&other.begin()), None);
    assert_eq!(begin.until(&other.end()), None);

    assert_panics!({
        let vec: Vector<_> = (1..=5).collect();
        let _ = vec.begin()[5];
    });
}

#[test]
fn test_cursor_identity_without_elements() {
    let first: Vector<u32> = Vector::new();
    let second: Vector<u32> = Vector::new();
    assert_eq!(first.begin(), first.end(), "An empty Vector's begin and end should coincide.");
    assert!(first.begin() != second.begin(), "Empty Vectors shouldn't share Cursors.");
    assert_eq!(first.begin().partial_cmp(&second.end()), None);
    assert_eq!(first.begin().until(&second.end()), None);

    let units: Vector<()> = [(), (), ()].into_iter().collect();
    let more_units: Vector<()> = [(), (), ()].into_iter().collect();
    assert!(
        units.begin() != more_units.begin(),
        "Vectors of zero-sized elements shouldn't share Cursors."
    );
    assert_eq!(units.begin().until(&more_units.end()), None);
    assert_eq!(units.begin().until(&units.end()), Some(&[(), (), ()][..]));
}

#[test]
fn test_cursor_empty() {
    let vec = Vector::<u8>::new_in(Global);
    assert_eq!(vec.begin(), vec.end(), "Begin and end should coincide for an empty Vector.");
    assert_eq!(vec.begin().until(&vec.end()), Some(&[][..]));
}

#[test]
fn test_display() {
    let vec: Vector<_> = (1..=3).collect();
    assert_eq!(format!("{vec}"), "![1, 2, 3]");
}
