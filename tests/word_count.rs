// End-to-end: token and character frequency reports built on two table
// instantiations over the same buffer.
use probe_table::report::{render, top_n};
use probe_table::text::{count_bytes, count_tokens};
use probe_table::{Djb2, Identity, Table};

const TEXT: &[u8] = b"the cat and the hat\nthe end\n";

#[test]
fn top_tokens_report() {
    let mut t: Table<&[u8], u64, Djb2> = Table::with_capacity_and_ops(1000, Djb2).unwrap();
    assert_eq!(count_tokens(TEXT, &mut t).unwrap(), 7);

    let out = render("Top 3 tokens", &top_n(&t, 3));
    assert_eq!(out, "Top 3 tokens:\n  the: 3\n  and: 1\n  cat: 1\n");
}

#[test]
fn top_characters_report() {
    let mut t: Table<u8, u64, Identity> = Table::with_capacity_and_ops(256, Identity).unwrap();
    assert_eq!(count_bytes(TEXT, &mut t).unwrap(), TEXT.len() as u64);

    let top = top_n(&t, 2);
    // 5 spaces and 5 't'; the tie breaks by byte value.
    assert_eq!(*top[0].0, b' ');
    assert_eq!(*top[0].1, 5);
    assert_eq!(*top[1].0, b't');
    assert_eq!(*top[1].1, 5);
    assert_eq!(t.find(&b'e'), Some(&4));
    assert_eq!(t.find(&b'\n'), Some(&2));
    // Every byte value maps to its own slot: no probing ever happened.
    for (k, _) in t.iter() {
        assert_eq!(t.slot_index(k), Some(*k as usize));
    }
}

// Test: a small initial capacity forces many grows while counting.
// Verifies: counts are identical to a table that never had to grow.
#[test]
fn counts_survive_growth() {
    let words: Vec<u8> = (0..500)
        .flat_map(|i| format!("w{} w{} ", i % 37, i % 11).into_bytes())
        .collect();
    let mut small: Table<&[u8], u64, Djb2> = Table::with_capacity_and_ops(1, Djb2).unwrap();
    let mut large: Table<&[u8], u64, Djb2> = Table::with_capacity_and_ops(4096, Djb2).unwrap();
    count_tokens(&words, &mut small).unwrap();
    count_tokens(&words, &mut large).unwrap();
    assert_eq!(large.capacity(), 4096);
    assert_eq!(small.len(), large.len());
    for (k, v) in large.iter() {
        assert_eq!(small.find(*k), Some(v));
    }
    let top_small: Vec<_> = top_n(&small, 5);
    let top_large: Vec<_> = top_n(&large, 5);
    assert_eq!(top_small, top_large);
}
