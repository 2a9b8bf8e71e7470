use bounded_hash_table::BoundedHashTable;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
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

fn bench_insert(c: &mut Criterion) {
    let keys: Vec<_> = lcg(1).take(10_000).map(key).collect();
    c.bench_function("bounded_hash_table_insert_10k", |b| {
        b.iter_batched(
            || BoundedHashTable::<u64>::with_capacity(20_000),
            |mut m| {
                for (i, k) in keys.iter().enumerate() {
                    black_box(m.set(k, i as u64));
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("bounded_hash_table_get_hit", |b| {
        let mut m = BoundedHashTable::with_capacity(20_000);
        let keys: Vec<_> = lcg(7).take(10_000).map(key).collect();
        // Only cycle over keys that were admitted.
        let mut stored = Vec::with_capacity(keys.len());
        for (i, k) in keys.iter().enumerate() {
            if m.set(k, i as u64) {
                stored.push(k.clone());
            }
        }
        let mut it = stored.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.get(k));
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("bounded_hash_table_get_miss", |b| {
        let mut m = BoundedHashTable::with_capacity(20_000);
        for (i, x) in lcg(11).take(10_000).enumerate() {
            let _ = m.set(&key(x), i as u64);
        }
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // generate keys unlikely in table
            let k = key(miss.next().unwrap());
            black_box(m.get(&k));
        })
    });
}

fn bench_set_delete_cycle(c: &mut Criterion) {
    c.bench_function("bounded_hash_table_set_delete", |b| {
        let mut m = BoundedHashTable::with_capacity(1_000);
        let mut keys = lcg(3).map(key);
        b.iter(|| {
            let k = keys.next().unwrap();
            black_box(m.set(&k, 1u64));
            black_box(m.delete(&k));
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
    targets = bench_insert, bench_get_hit, bench_get_miss, bench_set_delete_cycle
}
criterion_main!(benches);
