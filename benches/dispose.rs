use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ferrous_dispose::*;
use std::sync::Arc;

// ===== Micro Benchmarks =====

fn bench_single_dispose(c: &mut Criterion) {
    c.bench_function("dispose_base", |b| {
        b.iter_batched(
            Disposable::new,
            |disposable| {
                disposable.dispose().unwrap();
                black_box(disposable)
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_redundant_dispose(c: &mut Criterion) {
    let disposable = Disposable::new();
    disposable.dispose().unwrap();

    c.bench_function("dispose_already_released", |b| {
        b.iter(|| black_box(disposable.dispose()))
    });
}

fn bench_action_dispose(c: &mut Criterion) {
    c.bench_function("dispose_action", |b| {
        b.iter_batched(
            || ActionDisposable::from_action(|| {}),
            |disposable| {
                disposable.dispose().unwrap();
                black_box(disposable)
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

// ===== Container Benchmarks =====

fn filled_collection(size: usize) -> DisposableCollection {
    (0..size)
        .map(|_| Member::both(Arc::new(Disposable::new())))
        .collect()
}

fn bench_collection_sync(c: &mut Criterion) {
    let mut group = c.benchmark_group("collection_dispose_sync");
    for size in [1usize, 16, 256] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched(
                || filled_collection(size),
                |collection| {
                    collection.dispose().unwrap();
                    black_box(collection)
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_collection_async(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap();

    let mut group = c.benchmark_group("collection_dispose_async");
    for size in [1usize, 16, 256] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched(
                || filled_collection(size),
                |collection| {
                    runtime.block_on(collection.dispose_async()).unwrap();
                    black_box(collection)
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_contended_push(c: &mut Criterion) {
    c.bench_function("list_push_4_threads", |b| {
        b.iter(|| {
            let list: Arc<DisposableList> = Arc::new(DisposableList::new());
            std::thread::scope(|s| {
                for _ in 0..4 {
                    let list = list.clone();
                    s.spawn(move || {
                        for i in 0..64usize {
                            list.push(Member::value(Arc::new(i))).unwrap();
                        }
                    });
                }
            });
            list.dispose().unwrap();
            black_box(list)
        })
    });
}

criterion_group!(
    benches,
    bench_single_dispose,
    bench_redundant_dispose,
    bench_action_dispose,
    bench_collection_sync,
    bench_collection_async,
    bench_contended_push
);
criterion_main!(benches);
