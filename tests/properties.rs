// Property tests comparing the containers against std models.
//
// HashMap: a random sequence of insert / erase / find on a small key space.
//  - Model: std::collections::HashMap.
//  - Invariants after every step: len matches the model, lookups agree, and a growable map
//    never sits above its load factor once an insert returns.
//  - A fixed map runs the same operations and must agree as well, with its bucket count unchanged.
//
// Vector: pushing any sequence keeps it in order, and the capacity follows the doubling schedule.
//
// LinkedList: random pushes and pops at both ends agree with std::collections::VecDeque.
use std::collections::{HashMap as StdHashMap, VecDeque};

use hand_std::collections::contiguous::Vector;
use hand_std::collections::hash::{Config, HashMap};
use hand_std::collections::linked::LinkedList;
use proptest::prelude::*;

fn check_against_model(
    map: &mut HashMap<u16, u32>,
    model: &mut StdHashMap<u16, u32>,
    ops: &[(u8, u16, u32)],
) -> Result<(), TestCaseError> {
    for &(op, key, value) in ops {
        match op % 3 {
            0 => {
                prop_assert_eq!(map.insert(key, value), model.insert(key, value));
                if let Some(max_load) = map.max_load() {
                    prop_assert!(map.load_factor() <= max_load.get() + f64::EPSILON);
                }
            },
            1 => prop_assert_eq!(map.erase(&key), model.remove(&key)),
            _ => prop_assert_eq!(map.find(&key), model.get(&key)),
        }
        prop_assert_eq!(map.len(), model.len());
    }

    for (key, value) in model.iter() {
        prop_assert_eq!(map.find(key), Some(value));
    }
    prop_assert_eq!(map.iter().count(), model.len());
    Ok(())
}

proptest! {
    #[test]
    fn prop_hash_map_matches_model(
        ops in proptest::collection::vec((0u8..3, 0u16..64, any::<u32>()), 1..400),
    ) {
        let mut map = HashMap::new();
        let mut model = StdHashMap::new();
        check_against_model(&mut map, &mut model, &ops)?;
    }

    #[test]
    fn prop_small_initial_map_matches_model(
        buckets in 0usize..4,
        ops in proptest::collection::vec((0u8..3, 0u16..64, any::<u32>()), 1..200),
    ) {
        let mut map = HashMap::with_buckets(buckets);
        let mut model = StdHashMap::new();
        check_against_model(&mut map, &mut model, &ops)?;
    }

    #[test]
    fn prop_fixed_map_matches_model(
        buckets in 1usize..8,
        ops in proptest::collection::vec((0u8..3, 0u16..64, any::<u32>()), 1..200),
    ) {
        let mut map = HashMap::with_config(Config::fixed(buckets));
        let mut model = StdHashMap::new();
        check_against_model(&mut map, &mut model, &ops)?;
        prop_assert_eq!(map.bucket_count(), buckets);
    }

    #[test]
    fn prop_size_counts_distinct_keys(keys in proptest::collection::vec(0u8..32, 0..200)) {
        let mut map = HashMap::new();
        for &key in &keys {
            map.insert(key, ());
        }

        let mut distinct = keys.clone();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(map.len(), distinct.len());
    }

    #[test]
    fn prop_vector_push_preserves_order(values in proptest::collection::vec(any::<i64>(), 0..300)) {
        let mut vec = Vector::new();
        for &value in &values {
            vec.push(value);
        }

        prop_assert_eq!(&*vec, values.as_slice());
        let expected_cap = match values.len() {
            0 => 0,
            len => len.next_power_of_two().max(4),
        };
        prop_assert_eq!(vec.cap(), expected_cap);
    }

    #[test]
    fn prop_linked_list_matches_deque(ops in proptest::collection::vec((0u8..4, any::<i32>()), 1..200)) {
        let mut list = LinkedList::new();
        let mut model = VecDeque::new();

        for (op, value) in ops {
            match op {
                0 => { list.push_front(value); model.push_front(value); },
                1 => { list.push_back(value); model.push_back(value); },
                2 => prop_assert_eq!(list.pop_front(), model.pop_front()),
                _ => prop_assert_eq!(list.pop_back(), model.pop_back()),
            }
            prop_assert_eq!(list.len(), model.len());
            prop_assert_eq!(list.front(), model.front());
            prop_assert_eq!(list.back(), model.back());
        }

        prop_assert!(list.iter().eq(model.iter()));
        prop_assert!(list.iter().rev().eq(model.iter().rev()));
    }
}
