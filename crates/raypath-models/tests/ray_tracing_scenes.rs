//! Integration test: ray tracing over the canned test scenes.
//!
//! Checks which mechanisms contribute in each scene, that budgets cap
//! the search, and that the observer sees exactly the accepted paths.

use raypath_core::{ModelKind, PathMechanism, PropagationContext, Vec3};
use raypath_model::{EvalContext, PathOutcome, PropagationModel, RejectReason};
use raypath_models::kernels::free_space_path_loss_db;
use raypath_models::{CombineMode, RayTracingConfig, RayTracingModel, TraceReport};
use raypath_scene::BoxScene;
use raypath_test_utils::{
    low_block_scene, rooftop_link, street_canyon_scene, RecordingObserver, TEST_FREQUENCY_MHZ,
};

/// Centered in the canyon so both facades mirror the link at x = 50.
fn canyon_link() -> PropagationContext {
    PropagationContext::new(
        Vec3::new(5.0, 8.0, 0.0),
        Vec3::new(95.0, 1.5, 0.0),
        TEST_FREQUENCY_MHZ,
        ModelKind::RayTracing,
    )
}

fn trace_with(config: RayTracingConfig, scene: &BoxScene, ctx: &PropagationContext) -> TraceReport {
    RayTracingModel::new(config)
        .unwrap()
        .trace(ctx, &EvalContext::new(scene))
        .unwrap()
}

#[test]
fn canyon_reflects_off_both_facades() {
    let scene = street_canyon_scene();
    let ctx = canyon_link();
    let r = trace_with(RayTracingConfig::default(), &scene, &ctx);
    assert_eq!(r.count(PathMechanism::Direct), 1);
    assert_eq!(r.count(PathMechanism::Reflection), 2);
    assert_eq!(r.count(PathMechanism::Diffraction), 0);
    assert!(r.loss_db < free_space_path_loss_db(ctx.distance(), TEST_FREQUENCY_MHZ));
}

#[test]
fn reflection_budget_caps_paths() {
    let scene = street_canyon_scene();
    let config = RayTracingConfig {
        max_reflections: 1,
        ..RayTracingConfig::default()
    };
    let r = trace_with(config, &scene, &canyon_link());
    assert_eq!(r.count(PathMechanism::Reflection), 1);
}

#[test]
fn coherent_combining_stays_bounded() {
    let scene = street_canyon_scene();
    let config = RayTracingConfig {
        combine_mode: CombineMode::Coherent,
        ..RayTracingConfig::default()
    };
    let r = trace_with(config, &scene, &canyon_link());
    assert_eq!(r.paths.len(), 3);
    assert!(r.loss_db.is_finite());
    assert!(r.loss_db <= 200.0);
}

#[test]
fn observer_accepts_exactly_the_reported_paths() {
    let scene = street_canyon_scene();
    let observer = RecordingObserver::new();
    let env = EvalContext::new(&scene).with_observer(&observer);
    let r = RayTracingModel::default().trace(&canyon_link(), &env).unwrap();
    let accepted = observer.events().iter().filter(|e| e.is_accepted()).count();
    assert_eq!(accepted, r.paths.len());
    assert_eq!(observer.accepted(PathMechanism::Reflection), 2);
}

#[test]
fn rooftop_link_diffracts_and_reports_blocked_direct() {
    let scene = low_block_scene();
    let observer = RecordingObserver::new();
    let env = EvalContext::new(&scene).with_observer(&observer);
    let ctx = rooftop_link(ModelKind::RayTracing);
    let r = RayTracingModel::default().trace(&ctx, &env).unwrap();
    assert_eq!(observer.rejected(PathMechanism::Direct), 1);
    assert_eq!(observer.accepted(PathMechanism::Diffraction), 1);
    assert!(!r.is_blocked());
    assert!(r.loss_db > free_space_path_loss_db(ctx.distance(), TEST_FREQUENCY_MHZ));
}

#[test]
fn far_roof_edge_of_wide_block_is_occluded() {
    let scene = low_block_scene();
    let observer = RecordingObserver::new();
    let env = EvalContext::new(&scene).with_observer(&observer);
    let r = RayTracingModel::default()
        .trace(&rooftop_link(ModelKind::RayTracing), &env)
        .unwrap();
    assert_eq!(r.count(PathMechanism::Diffraction), 1);

    let roof_events: Vec<_> = observer
        .events()
        .into_iter()
        .filter(|e| e.mechanism == PathMechanism::Diffraction)
        .filter(|e| e.points.len() == 3 && (e.points[1].y - 15.0).abs() < 0.05)
        .filter(|e| e.points[1].z.abs() < 0.05)
        .collect();
    let near = roof_events
        .iter()
        .find(|e| (e.points[1].x - 45.0).abs() < 0.05)
        .expect("near roof edge considered");
    let far = roof_events
        .iter()
        .find(|e| (e.points[1].x - 55.0).abs() < 0.05)
        .expect("far roof edge considered");
    assert!(near.is_accepted());
    assert_eq!(far.outcome, PathOutcome::Rejected(RejectReason::Occluded));
}

#[test]
fn level_link_over_wide_block_is_blocked() {
    let scene = low_block_scene();
    let ctx = PropagationContext::new(
        Vec3::new(0.0, 10.0, 0.0),
        Vec3::new(100.0, 10.0, 0.0),
        TEST_FREQUENCY_MHZ,
        ModelKind::RayTracing,
    );
    let r = trace_with(RayTracingConfig::default(), &scene, &ctx);
    assert_eq!(r.count(PathMechanism::Diffraction), 0);
    assert!(r.is_blocked());
}

#[test]
fn diffraction_budget_of_zero_blocks_rooftop_link() {
    let scene = low_block_scene();
    let config = RayTracingConfig {
        max_diffractions: 0,
        max_reflections: 0,
        ..RayTracingConfig::default()
    };
    let r = trace_with(config, &scene, &rooftop_link(ModelKind::RayTracing));
    assert!(r.is_blocked());
    assert_eq!(r.loss_db, 200.0);
}

#[test]
fn path_loss_equals_trace_loss() {
    let scene = street_canyon_scene();
    let model = RayTracingModel::default();
    let env = EvalContext::new(&scene);
    let ctx = canyon_link();
    assert_eq!(
        model.path_loss_db(&ctx, &env).unwrap(),
        model.trace(&ctx, &env).unwrap().loss_db
    );
}

#[test]
fn scattering_is_seeded_and_capped() {
    let scene = street_canyon_scene();
    let config = RayTracingConfig {
        enable_scattering: true,
        max_scatter_paths: 5,
        scatter_seed: 11,
        ..RayTracingConfig::default()
    };
    let a = trace_with(config.clone(), &scene, &canyon_link());
    let b = trace_with(config, &scene, &canyon_link());
    assert_eq!(a, b);
    assert!(a.count(PathMechanism::Scattering) <= 5);
    assert!(a.count(PathMechanism::Scattering) > 0);
}
