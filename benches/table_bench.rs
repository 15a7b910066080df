use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use probe_table::text::count_tokens;
use probe_table::{Djb2, HasherOps, Table};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn filled(seed: u64, n: usize) -> (Table<String, u64, Djb2>, Vec<String>) {
    let mut t = Table::with_capacity_and_ops(16, Djb2).unwrap();
    let keys: Vec<_> = lcg(seed).take(n).map(key).collect();
    for (i, k) in keys.iter().enumerate() {
        t.insert(k.clone(), i as u64).unwrap();
    }
    (t, keys)
}

fn bench_insert(c: &mut Criterion) {
    c.bench_function("table_insert_10k_from_16", |b| {
        let keys: Vec<_> = lcg(1).take(10_000).map(key).collect();
        b.iter_batched(
            || Table::<String, u64, Djb2>::with_capacity_and_ops(16, Djb2).unwrap(),
            |mut t| {
                for (i, k) in keys.iter().enumerate() {
                    t.insert(k.clone(), i as u64).unwrap();
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
    c.bench_function("table_insert_10k_presized_hasher_ops", |b| {
        let keys: Vec<_> = lcg(1).take(10_000).map(key).collect();
        b.iter_batched(
            || Table::<String, u64, HasherOps>::with_capacity(16_384).unwrap(),
            |mut t| {
                for (i, k) in keys.iter().enumerate() {
                    t.insert(k.clone(), i as u64).unwrap();
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_find_hit(c: &mut Criterion) {
    c.bench_function("table_find_hit", |b| {
        let (t, keys) = filled(7, 20_000);
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(t.find(k.as_str()));
        })
    });
}

fn bench_find_miss(c: &mut Criterion) {
    c.bench_function("table_find_miss", |b| {
        let (t, _) = filled(11, 10_000);
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // generate keys unlikely in table
            let k = key(miss.next().unwrap());
            black_box(t.find(k.as_str()));
        })
    });
}

fn bench_delete_reinsert(c: &mut Criterion) {
    c.bench_function("table_delete_reinsert_churn", |b| {
        let (mut t, keys) = filled(23, 10_000);
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            let v = t.delete(k.as_str()).unwrap();
            t.insert(k.clone(), v).unwrap();
        })
    });
}

fn bench_count_tokens(c: &mut Criterion) {
    c.bench_function("count_tokens_100k_words", |b| {
        let text: Vec<u8> = lcg(99)
            .take(100_000)
            .flat_map(|x| format!("w{} ", x % 2_000).into_bytes())
            .collect();
        b.iter(|| {
            let mut t: Table<&[u8], u64, Djb2> = Table::with_capacity_and_ops(1000, Djb2).unwrap();
            count_tokens(&text, &mut t).unwrap();
            black_box(t.len());
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert, bench_find_hit, bench_find_miss, bench_delete_reinsert, bench_count_tokens
}
criterion_main!(benches);
