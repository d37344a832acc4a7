#![cfg(test)]

use std::alloc::Layout;
use std::ptr::NonNull;

use super::*;
use crate::util::alloc::{CountedDrop, FailingAllocator, ZeroSizedType};

fn exercise_backend<A: Allocator>(alloc: A) {
    for align in [1, 2, 8, 16, 64, 4096] {
        let layout = Layout::from_size_align(100, align).expect("Alignment is a power of two.");
        let ptr = alloc.allocate(layout).expect("A small allocation should succeed.");
        assert_eq!(ptr.as_ptr() as usize % align, 0, "Allocations should honour the alignment.");

        // SAFETY: The block is valid for layout.size() bytes and is released right after.
        unsafe {
            ptr.as_ptr().write_bytes(0xAB, layout.size());
            assert_eq!(*ptr.as_ptr().add(99), 0xAB, "The whole block should be writable.");
            alloc.deallocate(ptr, layout);
        }
    }

    let slots = alloc.allocate_slots::<u64>(16).expect("Sixteen slots should be allocated.");
    // SAFETY: Every slot is written before being read and the block is released afterwards.
    unsafe {
        for i in 0..16 {
            alloc.construct(slots.add(i), i as u64);
        }
        assert_eq!(*slots.add(15).as_ptr(), 15);
        alloc.deallocate_slots(slots, 16);
    }
}

#[test]
fn test_global() {
    exercise_backend(Global);
}

#[cfg(feature = "malloc")]
#[test]
fn test_malloc() {
    exercise_backend(Malloc);
}

#[test]
fn test_borrowed_allocator() {
    exercise_backend(&Global);
}

#[test]
fn test_zero_sized_requests() {
    let alloc = FailingAllocator::new(0);

    let empty = alloc.allocate_slots::<u32>(0);
    assert_eq!(empty, Ok(NonNull::dangling()), "Zero slots shouldn't reach the backend.");
    let zsts = alloc.allocate_slots::<ZeroSizedType>(1_000);
    assert_eq!(zsts, Ok(NonNull::dangling()), "Zero-sized values shouldn't reach the backend.");

    // SAFETY: Both pointers came from allocate_slots with the same counts.
    unsafe {
        alloc.deallocate_slots(NonNull::<u32>::dangling(), 0);
        alloc.deallocate_slots(NonNull::<ZeroSizedType>::dangling(), 1_000);
    }
    assert_eq!(alloc.live(), 0);
}

#[test]
fn test_capacity_overflow() {
    assert_eq!(
        Global.allocate_slots::<u64>(usize::MAX / 2),
        Err(AllocError::CapacityOverflow(CapacityOverflow)),
        "A request larger than isize::MAX bytes should be rejected before allocating."
    );
    assert!(
        Block::<u8>::try_with_cap_in(usize::MAX, Global).is_err_and(|e| e.is_capacity_overflow())
    );
}

#[test]
fn test_out_of_memory() {
    let alloc = FailingAllocator::new(0);
    let layout = Layout::new::<[u8; 32]>();
    assert_eq!(
        alloc.allocate(layout),
        Err(AllocError::OutOfMemory(OutOfMemory { size: 32, align: 1 }))
    );
    assert_eq!(
        OutOfMemory::for_layout(layout).to_string(),
        "Out of memory while allocating 32 bytes with alignment 1!"
    );
}

#[test]
fn test_construct_destroy() {
    let counter = CountedDrop::new(0);
    let slots = Global.allocate_slots::<CountedDrop>(3).expect("Three slots should be allocated.");

    // SAFETY: Each slot is constructed once and destroyed once, then the block is released.
    unsafe {
        for i in 0..3 {
            Global.construct(slots.add(i), counter.clone());
        }
        assert_eq!(counter.take(), 0, "Constructing shouldn't drop anything.");

        for i in 0..3 {
            Global.destroy(slots.add(i));
        }
        assert_eq!(counter.take(), 3, "Destroying should drop each value exactly once.");

        Global.deallocate_slots(slots, 3);
    }
}

#[test]
fn test_block_relocate() {
    let alloc = FailingAllocator::new(2);
    let mut block = Block::try_with_cap_in(2, alloc.clone()).expect("Within budget.");
    let counter = CountedDrop::new(0);

    // SAFETY: Only the first two slots are initialized, and each is dropped once below.
    unsafe {
        for i in 0..2 {
            block.allocator().construct(block.slot(i), counter.clone());
        }

        block.try_relocate(4, 2).expect("Within budget.");
        assert_eq!(block.cap(), 4);
        assert_eq!(alloc.live(), 1, "The old allocation should be released.");
        assert_eq!(counter.take(), 0, "Relocation should move values, not drop them.");

        assert!(block.try_relocate(8, 2).is_err(), "Relocation past the budget should fail.");
        assert_eq!(block.cap(), 4, "A failed relocation should leave the Block unchanged.");

        for i in 0..2 {
            block.allocator().destroy(block.slot(i));
        }
    }

    assert_eq!(counter.take(), 2, "Both values should still be live after the failed relocation.");
    drop(block);
    assert_eq!(alloc.live(), 0);
}
