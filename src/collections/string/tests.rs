#![cfg(test)]

use std::hash::{BuildHasher, RandomState};

use super::*;
use crate::alloc::AllocError;
use crate::util::alloc::FailingAllocator;
use crate::util::panic::assert_panics;

#[test]
fn test_construction() {
    let empty = ByteString::new();
    assert_eq!(empty.len(), 0);
    assert_eq!(empty.cap(), 0, "An empty ByteString shouldn't allocate.");
    assert_eq!(empty, "");

    let s = ByteString::from("hello");
    assert_eq!(s.len(), 5);
    assert_eq!(s.as_bytes(), b"hello");
    assert_eq!(s.to_str(), Ok("hello"));
    assert_eq!(s, ByteString::from_bytes(b"hello"));
}

#[test]
fn test_append_and_concat() {
    let mut s = ByteString::from("foo");
    s.push(b'-');
    s.push_str("bar");
    assert_eq!(s, "foo-bar");

    let suffix = ByteString::from("!");
    s.append(&suffix);
    assert_eq!(s, "foo-bar!");

    let joined = &ByteString::from("ab") + &ByteString::from("cd");
    assert_eq!(joined, "abcd");
    assert_eq!(joined.clone() + "ef", "abcdef");

    let mut total = ByteString::new();
    total += &joined;
    total += "!";
    assert_eq!(total, "abcd!");
    assert_eq!(joined, "abcd", "Concatenating by reference shouldn't change the operands.");
}

#[test]
fn test_clear() {
    let mut s = ByteString::from("some text");
    let cap = s.cap();
    s.clear();
    assert!(s.is_empty());
    assert_eq!(s.cap(), cap, "Clearing should keep the capacity.");
    s.push_str("new");
    assert_eq!(s, "new");
}

#[test]
fn test_repeated_appends_grow_geometrically() {
    let mut s = ByteString::new();
    let mut reallocs = 0;
    let mut cap = s.cap();
    for _ in 0..1000 {
        s += "x";
        if s.cap() != cap {
            reallocs += 1;
            cap = s.cap();
        }
    }
    assert_eq!(s.len(), 1000);
    assert!(reallocs <= 10, "Appending one byte at a time reallocated {reallocs} times.");
}

#[test]
fn test_front_back() {
    let s = ByteString::from("xyz");
    assert_eq!(s.front(), b'x');
    assert_eq!(s.back(), b'z');
    assert_eq!(s[1], b'y');

    assert_eq!(ByteString::new().try_front(), Err(EmptyContainer));
    assert_eq!(ByteString::new().try_back(), Err(EmptyContainer));
    assert_panics!({
        ByteString::new().front();
    });
}

#[test]
fn test_cursors() {
    let s = ByteString::from("cursor");
    assert_eq!(s.end() - s.begin(), 6);
    assert_eq!((s.begin() + 2).get(), Some(&b'r'));
    assert_eq!((s.begin() + 1).until(&(s.end() - 1)), Some(&b"urso"[..]));

    let (a, b) = (ByteString::new(), ByteString::new());
    assert_eq!(a.begin(), a.end());
    assert!(a.begin() != b.begin(), "Different empty ByteStrings shouldn't share Cursors.");
}

#[test]
fn test_non_utf8() {
    let s = ByteString::from_bytes(&[b'a', 0xFF, b'b']);
    assert!(s.to_str().is_err(), "Invalid UTF-8 should be reported by to_str.");
    assert_eq!(format!("{s}"), "a\u{FFFD}b", "Display should replace invalid sequences.");
    assert_eq!(format!("{s:?}"), "b\"a\\xffb\"");
}

#[test]
fn test_alloc_failure() {
    let alloc = FailingAllocator::new(1);
    let mut s = ByteString::new_in(alloc.clone());
    s.try_push_str("abc").expect("Within budget.");

    assert!(matches!(s.try_push_str("defgh"), Err(AllocError::OutOfMemory(_))));
    assert_eq!(s.as_bytes(), b"abc", "A failed push shouldn't change the contents.");

    drop(s);
    assert_eq!(alloc.live(), 0);
}

#[test]
fn test_hash_matches_bytes() {
    let state = RandomState::new();
    let s = ByteString::from("key");
    assert_eq!(state.hash_one(&s), state.hash_one(b"key".as_slice()));
}
