#![cfg(test)]

// Property tests for Table kept inside the crate so they can read the slot
// array and tombstone count directly.

use crate::config::TableConfig;
use crate::error::TableError;
use crate::key_ops::{FnOps, HasherOps, KeyOps};
use crate::table::Table;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Update(usize, i32),
    Delete(usize),
    Find(usize),
    Contains(String),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<OpI>)> {
    (1usize..=8, proptest::collection::vec("[a-z]{0,5}", 1..=24)).prop_flat_map(
        |(capacity, pool)| {
            let idxs: Vec<usize> = (0..pool.len()).collect();
            let idx = proptest::sample::select(idxs);
            let contains_pool = proptest::sample::select(pool.clone());
            let op = prop_oneof![
                3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
                2 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Update(i, d)),
                3 => idx.clone().prop_map(OpI::Delete),
                1 => idx.clone().prop_map(OpI::Find),
                1 => prop_oneof![
                    contains_pool.prop_map(|s: String| s),
                    "[a-z]{0,5}".prop_map(|s| s)
                ]
                .prop_map(OpI::Contains),
                1 => Just(OpI::Iterate),
            ];
            proptest::collection::vec(op, 1..120)
                .prop_map(move |ops| (capacity, pool.clone(), ops))
        },
    )
}

// Drives one table through `ops`, checking it against a HashMap model after
// every step. Shared by the plain and colliding variants.
fn run_state_machine<O>(
    mut sut: Table<String, i32, O>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError>
where
    O: KeyOps<String> + KeyOps<str>,
{
    let mut model: HashMap<String, i32> = HashMap::new();
    let resizable = sut.config().resizable;

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = pool[i].clone();
                let prev = sut.insert(k.clone(), v).expect("resizable insert succeeds");
                prop_assert_eq!(prev, model.insert(k.clone(), v));
                // Round-trip: the value is visible right away.
                prop_assert_eq!(sut.find(k.as_str()), Some(&v));
            }
            OpI::Update(i, d) => {
                let k = pool[i].clone();
                let v = sut.update(k.clone()).expect("resizable update succeeds");
                *v = v.wrapping_add(d);
                let mv = model.entry(k.clone()).or_default();
                *mv = mv.wrapping_add(d);
                // A second update with no mutation in between hits the same slot.
                let before = sut.slot_index(k.as_str());
                let again = *sut.update(k.clone()).expect("key present");
                prop_assert_eq!(again, *mv);
                prop_assert_eq!(sut.slot_index(k.as_str()), before);
            }
            OpI::Delete(i) => {
                let k = &pool[i];
                match (sut.delete(k.as_str()), model.remove(k)) {
                    (Ok(v), Some(mv)) => prop_assert_eq!(v, mv),
                    (Err(TableError::NotFound), None) => {}
                    (got, want) => {
                        prop_assert!(false, "delete {:?}: got {:?}, model {:?}", k, got, want)
                    }
                }
                prop_assert!(!sut.contains_key(k.as_str()));
            }
            OpI::Find(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.find(k.as_str()), model.get(k));
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains_key(s.as_str()), model.contains_key(&s));
            }
            OpI::Iterate => {
                let s_keys: BTreeSet<_> = sut.keys().cloned().collect();
                let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                prop_assert_eq!(s_keys, m_keys);
            }
        }

        // Post-conditions after each op
        // 1) Count parity and bounds
        prop_assert_eq!(sut.len(), model.len());
        prop_assert!(sut.len() + sut.tombstones() <= sut.capacity());
        let occupied = sut.slots().iter().filter(|s| s.is_occupied()).count();
        let tombs = sut.slots().iter().filter(|s| s.is_tombstone()).count();
        prop_assert_eq!(occupied, sut.len());
        prop_assert_eq!(tombs, sut.tombstones());
        // 2) A resizable table always keeps an empty slot to stop probes.
        if resizable {
            prop_assert!(sut.slots().iter().any(|s| s.is_empty()));
        }
        // 3) Every key in the model is found with its value; no extras.
        for k in pool {
            prop_assert_eq!(sut.find(k.as_str()), model.get(k));
        }
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences, starting from tiny
// capacities so grow, shrink and same-capacity rehashes all happen:
// - insert round-trips and returns the overwritten value.
// - update is get-or-insert-default and idempotent on the slot it returns.
// - delete returns the stored value or NotFound.
// - len equals the occupied slot count and the model's size.
// - every model key stays reachable across resizes and tombstones.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((capacity, pool, ops) in arb_scenario()) {
        let sut: Table<String, i32, HasherOps> =
            Table::with_capacity_and_ops(capacity, HasherOps::default()).unwrap();
        run_state_machine(sut, &pool, ops)?;
    }
}

fn low_bits(s: &str) -> u64 {
    // Two bits of hash: at most four home slots, long collision chains.
    s.len() as u64 & 3
}

fn str_eq(a: &str, b: &str) -> bool {
    a == b
}

// The same key ops for owned and borrowed keys.
#[derive(Clone, Copy)]
struct Colliding;

impl KeyOps<str> for Colliding {
    fn hash(&self, key: &str) -> u64 {
        low_bits(key)
    }
    fn eq(&self, a: &str, b: &str) -> bool {
        str_eq(a, b)
    }
}

impl KeyOps<String> for Colliding {
    fn hash(&self, key: &String) -> u64 {
        low_bits(key)
    }
    fn eq(&self, a: &String, b: &String) -> bool {
        str_eq(a, b)
    }
}

// Property: Same state-machine invariants as above, under heavy collisions.
// This stresses tombstone handling inside long probe chains.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((capacity, pool, ops) in arb_scenario()) {
        let sut: Table<String, i32, Colliding> =
            Table::with_capacity_and_ops(capacity, Colliding).unwrap();
        run_state_machine(sut, &pool, ops)?;
    }
}

// Property: with resizing disabled, inserts succeed until every slot holds a
// live key, then report Full; capacity never changes.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_fixed_capacity(
        capacity in 1usize..=16,
        ops in proptest::collection::vec((any::<bool>(), 0u32..32), 1..100),
    ) {
        let ops_fn = FnOps::new(|k: &u32| u64::from(*k), |a: &u32, b: &u32| a == b);
        let cfg = TableConfig::default().with_resizable(false);
        let mut sut = Table::with_config(capacity, ops_fn, cfg).unwrap();
        let mut model: HashMap<u32, u32> = HashMap::new();
        for (is_insert, k) in ops {
            if is_insert {
                match sut.insert(k, k) {
                    Ok(_) => { model.insert(k, k); }
                    Err(TableError::Full { capacity: c }) => {
                        prop_assert_eq!(c, capacity);
                        prop_assert_eq!(model.len(), capacity);
                        prop_assert!(!model.contains_key(&k));
                    }
                    Err(e) => prop_assert!(false, "unexpected error {:?}", e),
                }
            } else {
                let _ = sut.delete(&k);
                model.remove(&k);
            }
            prop_assert_eq!(sut.capacity(), capacity);
            prop_assert_eq!(sut.len(), model.len());
            for k in 0u32..32 {
                prop_assert_eq!(sut.find(&k), model.get(&k));
            }
        }
    }
}
