//! Criterion benchmarks for the engine's cache and receiver sampling.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use raypath_bench::{receiver_grid, reference_city, reference_transmitter};
use raypath_core::ModelKind;
use raypath_engine::{sample_receivers, EngineConfig, PropagationEngine, ResultCache};
use raypath_models::RayTracingConfig;

fn engine(cache_enabled: bool) -> PropagationEngine {
    let config = EngineConfig {
        cache_enabled,
        ..EngineConfig::default()
    };
    PropagationEngine::with_default_models(config, RayTracingConfig::default()).unwrap()
}

fn bench_cache_hit(c: &mut Criterion) {
    let scene = reference_city(42).unwrap();
    let e = engine(true);
    let ctx = reference_transmitter(ModelKind::RayTracing);
    e.received_power_dbm(&ctx, &scene);

    c.bench_function("engine_cache_hit", |b| {
        b.iter(|| black_box(e.received_power_dbm(black_box(&ctx), &scene)));
    });
}

fn bench_cache_churn_at_capacity(c: &mut Criterion) {
    let base = reference_transmitter(ModelKind::RayTracing);
    let contexts: Vec<_> = receiver_grid(40)
        .into_iter()
        .map(|rx| base.with_receiver_position(rx))
        .collect();
    let mut cache = ResultCache::new(1000);

    c.bench_function("cache_store_evict_1600", |b| {
        b.iter(|| {
            for (i, ctx) in contexts.iter().enumerate() {
                cache.store(ctx, 0, i as f32);
            }
            black_box(cache.len());
        });
    });
}

fn bench_sample_grid(c: &mut Criterion) {
    let scene = reference_city(42).unwrap();
    let base = reference_transmitter(ModelKind::RayTracing);
    let receivers = receiver_grid(16);

    let mut group = c.benchmark_group("sample_256_receivers");
    for workers in [1, 4] {
        group.bench_function(format!("workers_{workers}"), |b| {
            b.iter(|| {
                let e = engine(false);
                black_box(sample_receivers(&e, &base, &receivers, &scene, workers).unwrap());
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_cache_hit,
    bench_cache_churn_at_capacity,
    bench_sample_grid
);
criterion_main!(benches);
