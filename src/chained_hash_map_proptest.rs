#![cfg(test)]

// Property tests for ChainedHashMap kept inside the crate so they can
// check chain links and slot placement directly.

use crate::chained_hash_map::{ChainedHashMap, Insert};
use crate::hash::{BuildHasherFn, DefaultHashFn, SumHash};
use proptest::prelude::*;
use std::collections::hash_map::RandomState;
use std::collections::HashMap;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum Op {
    Insert(usize, i64),
    InsertSum(usize, i64),
    InsertReplace(usize, i64),
    Remove(usize),
    Get(usize),
    SetHash(u8),
    Resize(usize),
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<Op>)> {
    (1usize..8, proptest::collection::vec("[a-d]{0,3}", 1..=8)).prop_flat_map(
        |(key_space, pool)| {
            let idx = 0..pool.len();
            let value = -1000i64..1000;
            let op = prop_oneof![
                3 => (idx.clone(), value.clone()).prop_map(|(i, v)| Op::Insert(i, v)),
                2 => (idx.clone(), value.clone()).prop_map(|(i, v)| Op::InsertSum(i, v)),
                1 => (idx.clone(), value).prop_map(|(i, v)| Op::InsertReplace(i, v)),
                2 => idx.clone().prop_map(Op::Remove),
                1 => idx.prop_map(Op::Get),
                1 => (0u8..5).prop_map(Op::SetHash),
                1 => (1usize..12).prop_map(Op::Resize),
            ];
            proptest::collection::vec(op, 1..60)
                .prop_map(move |ops| (key_space, pool.clone(), ops))
        },
    )
}

fn swap_hash(m: &mut ChainedHashMap<i64>, which: u8) {
    let res = match which {
        0 => m.set_hash_function(SumHash),
        1 => m.set_hash_function(|k: &str| {
            k.len() as u32 + k.bytes().next().map_or(0, u32::from)
        }),
        2 => m.set_hash_function(|_: &str| 0u32),
        3 => m.set_hash_function(BuildHasherFn::new(RandomState::new())),
        _ => m.set_hash_function(DefaultHashFn::default()),
    };
    res.unwrap();
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - Chain links are intact in both directions and chain counts sum to `len`.
// - Every key sits in the slot its current hash selects, including after
//   `set_hash_function` and `resize`.
// - Duplicate inserts without a resolver leave the stored value untouched
//   and hand the new one back.
// - Iteration yields exactly the live entries, slot-ascending, and within a
//   slot in the order the entries arrived (a rehash replays the previous
//   iteration order).
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((key_space, pool, ops) in arb_scenario()) {
        let mut sut: ChainedHashMap<i64> = ChainedHashMap::new(key_space).unwrap();
        let mut model: HashMap<String, i64> = HashMap::new();
        // Live keys in arrival order.
        let mut order: Vec<String> = Vec::new();

        for op in ops {
            match op {
                Op::Insert(i, v) => {
                    let k = &pool[i];
                    match sut.insert(k, v) {
                        Insert::Created => {
                            prop_assert!(!k.is_empty());
                            prop_assert!(model.insert(k.clone(), v).is_none());
                            order.push(k.clone());
                        }
                        Insert::Ignored(back) => {
                            prop_assert_eq!(back, v);
                            prop_assert!(k.is_empty() || model.contains_key(k));
                        }
                        Insert::Resolved => prop_assert!(false, "no resolver was given"),
                    }
                }
                Op::InsertSum(i, v) | Op::InsertReplace(i, v) => {
                    let k = &pool[i];
                    let sum = matches!(op, Op::InsertSum(..));
                    let outcome = if sum {
                        sut.insert_with(k, v, |old, new| old + new)
                    } else {
                        sut.insert_with(k, v, |_, new| new)
                    };
                    match outcome {
                        Insert::Created => {
                            model.insert(k.clone(), v);
                            order.push(k.clone());
                        }
                        Insert::Resolved => {
                            let slot = model.get_mut(k).unwrap();
                            *slot = if sum { *slot + v } else { v };
                        }
                        Insert::Ignored(_) => prop_assert!(k.is_empty()),
                    }
                }
                Op::Remove(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.remove(k), model.remove(k));
                    order.retain(|o| o != k);
                    prop_assert!(!sut.contains_key(k));
                }
                Op::Get(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.get(k), model.get(k));
                }
                Op::SetHash(which) => {
                    order = sut.iter().map(|(k, _)| k.to_string()).collect();
                    swap_hash(&mut sut, which);
                }
                Op::Resize(n) => {
                    order = sut.iter().map(|(k, _)| k.to_string()).collect();
                    sut.resize(n).unwrap();
                    prop_assert_eq!(sut.key_space(), n);
                }
            }

            sut.check_invariants();
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());

            let mut expected = order.clone();
            expected.sort_by_key(|k| sut.slot_of(k));
            let seen: Vec<(String, i64)> =
                sut.iter().map(|(k, v)| (k.to_string(), *v)).collect();
            let expected: Vec<(String, i64)> =
                expected.into_iter().map(|k| { let v = model[&k]; (k, v) }).collect();
            prop_assert_eq!(seen, expected);
        }

        let mut destroyed = Vec::new();
        sut.destroy_with(|v| destroyed.push(v));
        let mut remaining: Vec<i64> = model.into_values().collect();
        destroyed.sort_unstable();
        remaining.sort_unstable();
        prop_assert_eq!(destroyed, remaining);
    }
}
