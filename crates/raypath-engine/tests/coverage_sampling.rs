//! Integration test: parallel coverage sampling over a street canyon.
//!
//! A grid of receivers is sampled with several worker counts; results
//! must match one-at-a-time queries exactly and arrive in input order.

use raypath_core::{ModelKind, PropagationContext, Vec3};
use raypath_engine::{sample_receivers, EngineConfig, PropagationEngine};
use raypath_models::RayTracingConfig;
use raypath_test_utils::{street_canyon_scene, TEST_FREQUENCY_MHZ};

fn engine(cache_enabled: bool) -> PropagationEngine {
    let config = EngineConfig {
        cache_enabled,
        ..EngineConfig::default()
    };
    PropagationEngine::with_default_models(config, RayTracingConfig::default()).unwrap()
}

fn grid() -> Vec<Vec3> {
    let mut out = Vec::new();
    for ix in 0..12 {
        for iz in -3..=3 {
            out.push(Vec3::new(5.0 + ix as f32 * 9.0, 1.5, iz as f32 * 2.5));
        }
    }
    out
}

fn base() -> PropagationContext {
    PropagationContext::new(
        Vec3::new(-5.0, 8.0, 0.0),
        Vec3::new(1.0, 1.5, 0.0),
        TEST_FREQUENCY_MHZ,
        ModelKind::RayTracing,
    )
}

#[test]
fn parallel_grid_matches_sequential_queries() {
    let scene = street_canyon_scene();
    let receivers = grid();
    let sequential = engine(false);
    let expected: Vec<f32> = receivers
        .iter()
        .map(|&rx| sequential.received_power_dbm(&base().with_receiver_position(rx), &scene))
        .collect();

    for workers in [1, 3, 8] {
        let got = sample_receivers(&engine(false), &base(), &receivers, &scene, workers).unwrap();
        assert_eq!(got, expected, "workers = {workers}");
    }
    assert!(expected.iter().all(|v| v.is_finite()));
}

#[test]
fn shared_cache_serves_second_pass() {
    let scene = street_canyon_scene();
    let receivers = grid();
    let e = engine(true);
    let first = sample_receivers(&e, &base(), &receivers, &scene, 4).unwrap();
    let misses = e.metrics().cache_misses;
    let second = sample_receivers(&e, &base(), &receivers, &scene, 4).unwrap();
    assert_eq!(first, second);
    let m = e.metrics();
    assert_eq!(m.cache_misses, misses);
    assert_eq!(m.cache_hits, receivers.len() as u64);
}
