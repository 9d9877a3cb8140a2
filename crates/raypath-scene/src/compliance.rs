//! Scene trait compliance test helpers.
//!
//! These functions verify that a Scene implementation satisfies the
//! invariants required by the trait contract. They probe the scene with
//! a fixed fan of rays so results are reproducible.

use glam::Vec3;
use raypath_core::LayerMask;

use crate::scene::Scene;

fn probe_rays() -> Vec<(Vec3, Vec3)> {
    let origins = [
        Vec3::new(0.0, 1.5, 0.0),
        Vec3::new(-50.0, 10.0, -50.0),
        Vec3::new(25.0, 60.0, 0.0),
    ];
    let mut rays = Vec::new();
    for origin in origins {
        for i in 0..16 {
            let yaw = i as f32 * std::f32::consts::TAU / 16.0;
            for pitch in [-0.6f32, -0.1, 0.0, 0.3] {
                let dir = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos());
                rays.push((origin, dir));
            }
        }
    }
    rays
}

/// Assert that every hit lies on its reported obstacle's bounds, at the
/// reported distance, with a unit normal facing the ray.
pub fn assert_hits_consistent(scene: &dyn Scene) {
    for (origin, dir) in probe_rays() {
        if let Some(hit) = scene.raycast(origin, dir, 500.0, LayerMask::ALL) {
            let bounds = scene
                .bounds(hit.obstacle)
                .unwrap_or_else(|| panic!("hit unknown obstacle {}", hit.obstacle));
            assert!(
                bounds.expanded(1e-3).contains_point(hit.point),
                "hit point {:?} outside bounds {bounds:?}",
                hit.point
            );
            assert!(
                (origin.distance(hit.point) - hit.distance).abs() < 1e-3,
                "distance {} disagrees with point {:?}",
                hit.distance,
                hit.point
            );
            assert!((hit.normal.length() - 1.0).abs() < 1e-5);
            assert!(hit.normal.dot(dir) <= 0.0, "normal faces away from ray");
            assert!(hit.distance <= 500.0);
        }
    }
}

/// Assert that every hit obstacle is also reported by `overlap_box`
/// around the hit point.
pub fn assert_overlap_covers_hits(scene: &dyn Scene) {
    for (origin, dir) in probe_rays() {
        if let Some(hit) = scene.raycast(origin, dir, 500.0, LayerMask::ALL) {
            let ids = scene.overlap_box(hit.point, Vec3::splat(0.5), LayerMask::ALL);
            assert!(
                ids.contains(&hit.obstacle),
                "overlap_box around {:?} misses {}",
                hit.point,
                hit.obstacle
            );
            assert!(ids.windows(2).all(|w| w[0] < w[1]), "ids not sorted: {ids:?}");
        }
    }
}

/// Assert that an empty layer mask hides every obstacle.
pub fn assert_empty_mask_sees_nothing(scene: &dyn Scene) {
    for (origin, dir) in probe_rays() {
        assert!(scene.raycast(origin, dir, 500.0, LayerMask::NONE).is_none());
    }
    assert!(scene
        .overlap_box(Vec3::ZERO, Vec3::splat(1e4), LayerMask::NONE)
        .is_empty());
}

/// Run every compliance check.
pub fn run_full_compliance(scene: &dyn Scene) {
    assert_hits_consistent(scene);
    assert_overlap_covers_hits(scene);
    assert_empty_mask_sees_nothing(scene);
}
