use chained_hashmap::{ChainedHashMap, DefaultHashFn, SumHash};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn filled(hash: DefaultHashFn, n: usize, seed: u64) -> (ChainedHashMap<u64>, Vec<String>) {
    let mut m = ChainedHashMap::with_hash_function(4096, hash).unwrap();
    let keys: Vec<String> = lcg(seed).take(n).map(key).collect();
    for (i, k) in keys.iter().enumerate() {
        m.insert(k, i as u64);
    }
    (m, keys)
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("chained::insert");
    group.throughput(Throughput::Elements(10_000));
    let keys: Vec<String> = lcg(1).take(10_000).map(key).collect();
    // The byte-sum hash clusters these keys heavily; compare against aHash.
    group.bench_function("sum_hash_10k", |b| {
        b.iter_batched(
            || ChainedHashMap::with_hash_function(4096, SumHash).unwrap(),
            |mut m| {
                for (i, k) in keys.iter().enumerate() {
                    m.insert(k, i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function("default_hash_10k", |b| {
        b.iter_batched(
            || ChainedHashMap::with_hash_function(4096, DefaultHashFn::default()).unwrap(),
            |mut m| {
                for (i, k) in keys.iter().enumerate() {
                    m.insert(k, i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function("count_10k_resolve", |b| {
        b.iter_batched(
            || ChainedHashMap::with_hash_function(4096, DefaultHashFn::default()).unwrap(),
            |mut m| {
                for k in keys.iter().cycle().take(10_000) {
                    m.insert_with(&k[..4], 1u64, |a, b| a + b);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let (m, keys) = filled(DefaultHashFn::default(), 20_000, 7);
    c.bench_function("chained::get_hit_10k", |b| {
        b.iter(|| {
            let mut acc = 0u64;
            for k in keys.iter().take(10_000) {
                acc = acc.wrapping_add(*m.get(k).unwrap());
            }
            black_box(acc)
        })
    });
    let misses: Vec<String> = lcg(8).take(10_000).map(key).collect();
    c.bench_function("chained::get_miss_10k", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for k in &misses {
                hits += m.get(k).is_some() as usize;
            }
            black_box(hits)
        })
    });
}

fn bench_rehash(c: &mut Criterion) {
    c.bench_function("chained::set_hash_function_20k", |b| {
        b.iter_batched(
            || filled(DefaultHashFn::default(), 20_000, 11).0,
            |mut m| {
                m.set_hash_function(SumHash).unwrap();
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    c.bench_function("chained::resize_20k", |b| {
        b.iter_batched(
            || filled(DefaultHashFn::default(), 20_000, 12).0,
            |mut m| {
                m.resize(16_384).unwrap();
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_iterate(c: &mut Criterion) {
    let (m, _) = filled(DefaultHashFn::default(), 20_000, 13);
    c.bench_function("chained::iter_20k", |b| {
        b.iter(|| black_box(m.iter().map(|(_, v)| *v).fold(0u64, u64::wrapping_add)))
    });
}

criterion_group!(benches, bench_insert, bench_get, bench_rehash, bench_iterate);
criterion_main!(benches);
