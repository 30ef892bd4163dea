use criterion::{black_box, criterion_group, criterion_main, Criterion};
use recycle_pool::*;

const BUFFER_SIZE: usize = 64 * 1024;

struct Buffers;

impl Produce<Vec<u8>> for Buffers {
    #[inline(always)]
    fn produce(&self, _default_value: Option<&Vec<u8>>) -> Result<Vec<u8>> {
        Ok(Vec::with_capacity(BUFFER_SIZE))
    }
}

fn untracked() -> Pool<Vec<u8>, Buffers> {
    Pool::builder()
        .producer(Buffers)
        .track_outstanding(false)
        .on_pull(|buffer: &Vec<u8>| debug_assert!(buffer.is_empty()))
        .build()
}

fn pull_toss(c: &mut Criterion) {
    c.bench_function("recycle_pool", |b| {
        let pool = untracked();
        b.iter(|| {
            let mut buffer = black_box(pool.pull().unwrap());
            buffer.clear();
            pool.toss(buffer);
        })
    });
    c.bench_function("recycle_pool_scoped", |b| {
        let pool = untracked();
        b.iter(|| {
            let buffer = black_box(pool.pull_scoped().unwrap());
            black_box(buffer.capacity())
        })
    });
    c.bench_function("recycle_pool_tracked", |b| {
        let pool = Pool::<u64>::new();
        b.iter(|| {
            let mut items = Vec::with_capacity(16);
            pool.pull_many(16, &mut items).unwrap();
            pool.toss_all_back().unwrap();
            black_box(pool.len())
        })
    });
    c.bench_function("system", |b| {
        b.iter(|| {
            let buffer = black_box(Produce::<Vec<u8>>::produce(&Buffers, None).unwrap());
            black_box(buffer.capacity())
        })
    });
}

fn pull_toss_multi(c: &mut Criterion) {
    use rayon::prelude::*;
    // Pools are not `Send`, each rayon worker builds its own.
    c.bench_function("recycle_pool_per_worker", |b| {
        b.iter(|| {
            (0..8192).into_par_iter().for_each_init(untracked, |pool, _i| {
                let buffer = black_box(pool.pull().unwrap());
                black_box(buffer.capacity());
                pool.toss(buffer);
            });
        })
    });

    c.bench_function("system_multi", |b| {
        b.iter(|| {
            (0..8192).into_par_iter().for_each(|_i| {
                let buffer = black_box(Produce::<Vec<u8>>::produce(&Buffers, None).unwrap());
                black_box(buffer.capacity());
            });
        })
    });
}

criterion_group!(benches, pull_toss, pull_toss_multi);
criterion_main!(benches);
