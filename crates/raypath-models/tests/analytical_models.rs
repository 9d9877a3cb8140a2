//! Integration test: analytical models against closed-form references.
//!
//! Every model is driven through the registry built by
//! `standard_registry`, the same way the engine dispatches them.

use raypath_core::{ModelKind, PropagationContext, Vec3};
use raypath_model::{EvalContext, ModelRegistry, PropagationModel};
use raypath_models::kernels::free_space_path_loss_db;
use raypath_models::{
    standard_registry, CityKind, Cost231Model, HataModel, LogDistanceModel,
    LogNormalShadowingModel, RayTracingConfig, TwoRayGroundModel,
};
use raypath_test_utils::{blocking_wall_scene, empty_scene, reference_link};

fn registry() -> ModelRegistry {
    standard_registry(RayTracingConfig::default()).unwrap()
}

fn loss(model: &dyn PropagationModel, ctx: &PropagationContext) -> f32 {
    let scene = empty_scene();
    model.path_loss_db(ctx, &EvalContext::new(&scene)).unwrap()
}

fn level_link(d: f32, model: ModelKind) -> PropagationContext {
    PropagationContext::new(Vec3::new(0.0, 10.0, 0.0), Vec3::new(d, 10.0, 0.0), 900.0, model)
}

#[test]
fn standard_registry_covers_every_kind() {
    let reg = registry();
    assert_eq!(reg.len(), ModelKind::ALL.len());
    for kind in ModelKind::ALL {
        let model = reg.get(kind).unwrap();
        assert_eq!(model.kind(), kind);
    }
}

#[test]
fn standard_registry_rejects_bad_ray_tracing_config() {
    let bad = RayTracingConfig {
        blocked_loss_db: f32::NAN,
        ..RayTracingConfig::default()
    };
    assert!(standard_registry(bad).is_err());
}

#[test]
fn log_distance_adds_ten_n_per_decade() {
    let model = LogDistanceModel::new(3.5, 1.0).unwrap();
    let at_ref = loss(&model, &level_link(1.0, ModelKind::LogDistance));
    assert!((at_ref - free_space_path_loss_db(1.0, 900.0)).abs() < 1e-3);
    let decade = loss(&model, &level_link(10.0, ModelKind::LogDistance));
    assert!((decade - at_ref - 35.0).abs() < 1e-3);
    let two_decades = loss(&model, &level_link(100.0, ModelKind::LogDistance));
    assert!((two_decades - at_ref - 70.0).abs() < 1e-3);
}

#[test]
fn log_distance_with_exponent_two_is_free_space() {
    let model = LogDistanceModel::new(2.0, 1.0).unwrap();
    for d in [5.0, 50.0, 500.0] {
        let ctx = level_link(d, ModelKind::LogDistance);
        assert!((loss(&model, &ctx) - free_space_path_loss_db(d, 900.0)).abs() < 1e-3);
    }
}

#[test]
fn shadowing_is_reproducible_per_seed() {
    let a = LogNormalShadowingModel::builder().seed(7).build().unwrap();
    let b = LogNormalShadowingModel::builder().seed(7).build().unwrap();
    let ctx = reference_link(ModelKind::LogNormalShadowing);
    assert_eq!(loss(&a, &ctx).to_bits(), loss(&b, &ctx).to_bits());
    assert_eq!(a.cache_fingerprint(), b.cache_fingerprint());
    let c = LogNormalShadowingModel::builder().seed(8).build().unwrap();
    assert_ne!(a.cache_fingerprint(), c.cache_fingerprint());
}

#[test]
fn zero_sigma_shadowing_is_log_distance() {
    let shadowed = LogNormalShadowingModel::builder().sigma_db(0.0).build().unwrap();
    let plain = LogDistanceModel::default();
    let ctx = reference_link(ModelKind::LogNormalShadowing);
    assert!((loss(&shadowed, &ctx) - loss(&plain, &ctx)).abs() < 1e-4);
}

#[test]
fn shadowing_spread_tracks_sigma() {
    let model = LogNormalShadowingModel::builder().sigma_db(8.0).seed(3).build().unwrap();
    let n = 400;
    let samples: Vec<f32> = (0..n)
        .map(|i| {
            let ctx = reference_link(ModelKind::LogNormalShadowing)
                .with_receiver_position(Vec3::new(100.0, 1.5, i as f32));
            model.shadowing_db(&ctx)
        })
        .collect();
    let mean = samples.iter().sum::<f32>() / n as f32;
    let var = samples.iter().map(|s| (s - mean).powi(2)).sum::<f32>() / n as f32;
    assert!(mean.abs() < 1.5, "mean {mean}");
    assert!((var.sqrt() - 8.0).abs() < 1.5, "std {}", var.sqrt());
}

#[test]
fn metropolitan_cost231_adds_at_least_three_db() {
    let ctx = PropagationContext::new(
        Vec3::new(0.0, 30.0, 0.0),
        Vec3::new(1000.0, 1.5, 0.0),
        1800.0,
        ModelKind::Cost231,
    );
    let medium = loss(&Cost231Model::default(), &ctx);
    let metro = loss(
        &Cost231Model {
            city: CityKind::Metropolitan,
        },
        &ctx,
    );
    assert!(metro > medium + 2.9, "{metro} vs {medium}");
}

#[test]
fn hata_reference_value() {
    // 900 MHz, h_b = 30 m, h_m = 1.5 m, 1 km, small/medium city.
    let ctx = PropagationContext::new(
        Vec3::new(0.0, 30.0, 0.0),
        Vec3::new(1000.0, 1.5, 0.0),
        900.0,
        ModelKind::Hata,
    );
    let got = loss(&HataModel::default(), &ctx);
    assert!((got - 126.4).abs() < 0.5, "hata {got}");
}

#[test]
fn two_ray_switches_at_crossover() {
    let ctx = PropagationContext::new(
        Vec3::new(0.0, 30.0, 0.0),
        Vec3::new(5000.0, 30.0, 0.0),
        900.0,
        ModelKind::TwoRayGround,
    )
    .with_heights(30.0, 2.0);
    let crossover = TwoRayGroundModel::crossover_distance_m(&ctx);
    assert!(crossover < 5000.0);
    let far = loss(&TwoRayGroundModel, &ctx);
    let expected = 40.0 * 5000f32.log10() - 20.0 * 30f32.log10() - 20.0 * 2f32.log10();
    assert!((far - expected).abs() < 1e-3);

    let near = ctx.with_receiver_position(Vec3::new(100.0, 30.0, 0.0));
    assert!((loss(&TwoRayGroundModel, &near) - free_space_path_loss_db(100.0, 900.0)).abs() < 1e-3);
}

#[test]
fn analytical_models_ignore_the_scene() {
    let reg = registry();
    let ctx = reference_link(ModelKind::Hata);
    let walled = blocking_wall_scene();
    let kinds = [
        ModelKind::FreeSpace,
        ModelKind::LogDistance,
        ModelKind::Hata,
        ModelKind::TwoRayGround,
    ];
    for kind in kinds {
        let ctx = ctx.with_model(kind);
        let open = reg.path_loss_db(&ctx, &EvalContext::new(&empty_scene())).unwrap();
        let blocked = reg.path_loss_db(&ctx, &EvalContext::new(&walled)).unwrap();
        assert_eq!(open, blocked, "{kind}");
    }
}

#[test]
fn models_reject_invalid_contexts() {
    let reg = registry();
    let scene = empty_scene();
    for kind in ModelKind::ALL {
        let ctx = reference_link(kind).with_receiver_position(Vec3::new(0.0, 10.05, 0.0));
        assert!(reg.path_loss_db(&ctx, &EvalContext::new(&scene)).is_err(), "{kind}");
    }
}
