#![cfg(test)]

// Property tests for BoundedHashTable kept inside the crate so they can
// inspect geometry and the row hash directly.

use crate::bounded_hash_table::BoundedHashTable;
use crate::error::InsertError;
use core::hash::BuildHasher;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Delete(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            idx.clone().prop_map(OpI::Delete),
            idx.clone().prop_map(OpI::Get),
            "[a-z]{0,5}".prop_map(OpI::Contains),
            (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - insert on a present key overwrites and returns the old value; len unchanged.
// - insert on an absent key takes a slot; BucketFull only when its row is full.
// - delete returns the model's value and leaves the key absent.
// - iter yields each live entry exactly once; key set equals the model's key set.
// - load() == len / slot_count after every op.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(), capacity in 0usize..200) {
        let mut sut: BoundedHashTable<i32> = BoundedHashTable::with_capacity(capacity);
        let mut model: HashMap<String, i32> = HashMap::new();

        for op in ops {
            match op {
                OpI::Insert(i, v) => {
                    let k = &pool[i];
                    match sut.insert(k, v) {
                        Ok(prev) => {
                            prop_assert_eq!(prev, model.insert(k.clone(), v));
                        }
                        Err(InsertError::BucketFull) => {
                            prop_assert!(!model.contains_key(k), "present keys always update");
                            let row = sut.geometry().row_of(sut.hasher().hash_one(k.as_str()));
                            let in_row = sut
                                .iter()
                                .filter(|(kk, _)| {
                                    sut.geometry().row_of(sut.hasher().hash_one(*kk)) == row
                                })
                                .count();
                            prop_assert_eq!(in_row, sut.bucket_width());
                        }
                        Err(InsertError::CapacityReached) => {
                            prop_assert!(false, "pool is far below the admission cap");
                        }
                    }
                }
                OpI::Delete(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.delete(k), model.remove(k));
                    prop_assert!(sut.get(k).is_none());
                }
                OpI::Get(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.get(k), model.get(k));
                }
                OpI::Contains(s) => {
                    prop_assert_eq!(sut.contains_key(&s), model.contains_key(&s));
                }
                OpI::Mutate(i, d) => {
                    let k = &pool[i];
                    match (sut.get_mut(k), model.get_mut(k)) {
                        (Some(a), Some(b)) => {
                            *a = a.wrapping_add(d);
                            *b = b.wrapping_add(d);
                        }
                        (None, None) => {}
                        (a, b) => {
                            prop_assert!(false, "get_mut parity: {:?} vs {:?}", a, b);
                        }
                    }
                }
                OpI::Iterate => {
                    let seen: Vec<&str> = sut.iter().map(|(k, _)| k).collect();
                    let unique: BTreeSet<&str> = seen.iter().copied().collect();
                    prop_assert_eq!(seen.len(), unique.len(), "iter yields duplicates");
                    let expected: BTreeSet<&str> = model.keys().map(String::as_str).collect();
                    prop_assert_eq!(unique, expected);
                    for (k, v) in sut.iter() {
                        prop_assert_eq!(Some(v), model.get(k));
                    }
                }
            }
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            let load = sut.load();
            prop_assert!((0.0..=1.0).contains(&load));
            prop_assert_eq!(load, sut.len() as f64 / sut.geometry().slot_count() as f64);
        }
    }
}

// Property: every stored key sits in the row its hash selects, and no row
// holds the same key twice.
proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]
    #[test]
    fn prop_keys_stay_in_their_row(keys in proptest::collection::vec("[a-z0-9]{1,8}", 0..200)) {
        let mut sut: BoundedHashTable<usize> = BoundedHashTable::with_capacity(100);
        for (i, k) in keys.iter().enumerate() {
            let _ = sut.insert(k, i);
        }
        let g = sut.geometry();
        let mut per_row: HashMap<usize, BTreeSet<&str>> = HashMap::new();
        for (k, _) in sut.iter() {
            let row = g.row_of(sut.hasher().hash_one(k));
            prop_assert!(per_row.entry(row).or_default().insert(k), "duplicate key in row");
        }
        for set in per_row.values() {
            prop_assert!(set.len() <= g.bucket_width());
        }
    }
}
