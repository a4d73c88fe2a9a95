use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use intake_context::{ExecutionContext, Key};
use std::hint::black_box;

/// Builds a context with `size` string-keyed integer entries.
fn populated_context(size: usize) -> ExecutionContext {
    let mut ctx = ExecutionContext::new();
    for i in 0..size {
        let _ = ctx.put(format!("key-{i}"), i).unwrap();
    }
    ctx
}

/// Benchmark keyed writes into a fresh context
fn bench_put(c: &mut Criterion) {
    let mut group = c.benchmark_group("put");
    group.throughput(Throughput::Elements(1));

    group.bench_function("put_new_key", |b| {
        b.iter_batched(
            ExecutionContext::new,
            |mut ctx| black_box(ctx.put("actor", "alice").unwrap()),
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function("put_replace", |b| {
        let mut ctx = populated_context(1);
        b.iter(|| black_box(ctx.put("key-0", 7_usize).unwrap()));
    });

    group.finish();
}

/// Benchmark keyed and type-keyed reads
fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("get");
    group.throughput(Throughput::Elements(1));

    for size in [1, 16, 256] {
        let ctx = populated_context(size);
        let key = Key::from("key-0");

        group.bench_with_input(BenchmarkId::new("get", size), &ctx, |b, ctx| {
            b.iter(|| black_box(ctx.get(&key)));
        });

        group.bench_with_input(BenchmarkId::new("get_as", size), &ctx, |b, ctx| {
            b.iter(|| black_box(ctx.get_as::<usize>(&key).unwrap()));
        });
    }

    let mut ctx = populated_context(16);
    let _ = ctx.put_typed(String::from("typed")).unwrap();
    group.bench_function("get_typed", |b| {
        b.iter(|| black_box(ctx.get_typed::<String>().unwrap()));
    });

    group.finish();
}

/// Benchmark the linear value scan
fn bench_contains_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("contains_value");

    for size in [16_usize, 256, 4096] {
        let ctx = populated_context(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("miss", size), &ctx, |b, ctx| {
            b.iter(|| black_box(ctx.contains_value(&usize::MAX)));
        });
    }

    group.finish();
}

/// Benchmark creating a child context
fn bench_inherit(c: &mut Criterion) {
    let mut group = c.benchmark_group("inherit");

    for size in [16_usize, 256] {
        let ctx = populated_context(size);
        group.bench_with_input(BenchmarkId::new("inherit", size), &ctx, |b, ctx| {
            b.iter(|| black_box(ctx.inherit()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_put,
    bench_get,
    bench_contains_value,
    bench_inherit
);
criterion_main!(benches);
