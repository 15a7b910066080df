// Table property tests (public API).
//
// Property 1: resizes preserve membership.
//  - Insert a random key set into a tiny table (forcing grows), then delete a
//    random subset (forcing shrinks and tombstones).
//  - Invariant: after each phase, exactly the expected keys are found with
//    their values, and len() matches.
//
// Property 2: the grow trigger.
//  - Invariant: inserting a new key grows the table iff len + 1 would reach
//    capacity · grow_at, and then only by doubling.
//
// Property 3: no grow/shrink flip.
//  - For any valid policy, a delete followed by re-inserting the same key
//    never shrinks and then grows the table back.
use proptest::prelude::*;
use probe_table::{Djb2, Table, TableConfig};
use std::collections::BTreeMap;

proptest! {
    #[test]
    fn prop_resize_preserves_membership(
        keys in proptest::collection::btree_set("[a-z0-9]{1,6}", 1..200),
        delete_mask in proptest::collection::vec(any::<bool>(), 200),
    ) {
        let mut t: Table<String, usize, Djb2> = Table::with_capacity_and_ops(1, Djb2).unwrap();
        let mut model = BTreeMap::new();
        for (i, k) in keys.iter().enumerate() {
            t.insert(k.clone(), i).unwrap();
            model.insert(k.clone(), i);
        }
        prop_assert_eq!(t.len(), model.len());
        for (k, v) in &model {
            prop_assert_eq!(t.find(k.as_str()), Some(v));
        }

        for (k, del) in keys.iter().zip(delete_mask) {
            if del {
                prop_assert_eq!(t.delete(k.as_str()), Ok(model[k]));
                model.remove(k);
            }
        }
        prop_assert_eq!(t.len(), model.len());
        prop_assert!(t.len() <= t.capacity());
        let live: BTreeMap<String, usize> = t.iter().map(|(k, v)| (k.clone(), *v)).collect();
        prop_assert_eq!(live, model);
    }
}

proptest! {
    #[test]
    fn prop_grow_trigger(
        start in 1usize..=32,
        grow_at in 0.1f64..=1.0,
        n in 1usize..=64,
    ) {
        let cfg = TableConfig::default()
            .with_grow_at(grow_at)
            .with_shrink_below(grow_at / 4.0);
        let mut t: Table<u32, (), Djb2Bytes> = Table::with_config(start, Djb2Bytes, cfg).unwrap();
        for k in 0..n as u32 {
            let before = t.capacity();
            let expect_grow = (t.len() + 1) as f64 >= before as f64 * grow_at;
            t.insert(k, ()).unwrap();
            let after = t.capacity();
            if expect_grow {
                prop_assert!(after > before);
                prop_assert!(after % before == 0 && (after / before).is_power_of_two());
            } else {
                prop_assert_eq!(after, before);
            }
            prop_assert!((t.len() as f64) < after as f64 * grow_at);
        }
    }
}

proptest! {
    #[test]
    fn prop_delete_then_reinsert_resizes_at_most_once(
        start in 1usize..=16,
        grow_at in 0.1f64..=1.0,
        shrink_frac in 0.0f64..0.99,
        min_capacity in 1usize..=8,
        n in 1usize..=48,
    ) {
        let cfg = TableConfig::default()
            .with_grow_at(grow_at)
            .with_shrink_below(grow_at / 2.0 * shrink_frac)
            .with_min_capacity(min_capacity);
        prop_assume!(cfg.validate().is_ok());
        let mut t: Table<u32, u32, Djb2Bytes> = Table::with_config(start, Djb2Bytes, cfg).unwrap();
        for k in 0..n as u32 {
            t.insert(k, k).unwrap();
        }
        // Walk back down: every delete is followed by a re-insert of the same
        // key, which must not undo a shrink that delete just did.
        for k in (0..n as u32).rev() {
            let before = t.capacity();
            prop_assert_eq!(t.delete(&k), Ok(k));
            let shrunk = t.capacity();
            t.insert(k, k).unwrap();
            let regrown = t.capacity();
            prop_assert!(
                !(shrunk < before && regrown > shrunk),
                "capacity flipped {} -> {} -> {}", before, shrunk, regrown
            );
            t.delete(&k).unwrap();
        }
        prop_assert!(t.is_empty());
    }
}

// u32 keys hashed through their little-endian bytes.
#[derive(Clone, Copy)]
struct Djb2Bytes;

impl probe_table::KeyOps<u32> for Djb2Bytes {
    fn hash(&self, key: &u32) -> u64 {
        Djb2::hash_bytes(&key.to_le_bytes())
    }
    fn eq(&self, a: &u32, b: &u32) -> bool {
        a == b
    }
}
