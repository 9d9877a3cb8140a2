//! Segment clearance and surface snapping on top of [`Scene`] raycasts.

use glam::Vec3;
use raypath_core::{LayerMask, ObstacleId};

use crate::scene::Scene;

/// Offset applied at a segment's start so a ray leaving a surface does
/// not re-hit it.
pub const START_EPSILON: f32 = 0.01;
/// Trimmed from a segment's end so the endpoint surface is not counted.
pub const END_EPSILON: f32 = 0.01;
/// Slack allowed when checking that a ray reaches a surface point.
pub const SURFACE_TOLERANCE: f32 = 0.1;
/// Half-length of the probe ray used by [`snap_to_surface`].
pub const SNAP_OFFSET: f32 = 0.5;
/// Distance an edge point is pulled into its owner before snapping.
pub const EDGE_INSET: f32 = 0.01;

/// A point on an obstacle surface together with its outward normal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSnap {
    /// Point on the surface.
    pub point: Vec3,
    /// Outward unit normal at `point`.
    pub normal: Vec3,
}

/// Whether the segment `from`–`to` passes no obstacle.
///
/// Hits on `ignore` do not count; the ray is restarted just past them.
/// Degenerate segments are clear.
pub fn is_segment_clear(
    scene: &dyn Scene,
    from: Vec3,
    to: Vec3,
    layers: LayerMask,
    ignore: Option<ObstacleId>,
) -> bool {
    let delta = to - from;
    let length = delta.length();
    if length <= START_EPSILON + END_EPSILON {
        return true;
    }
    let dir = delta / length;
    let mut origin = from + dir * START_EPSILON;
    let mut remaining = length - START_EPSILON - END_EPSILON;

    // Each pass skips at most one ignored entry; bounded by the scene size.
    for _ in 0..=scene.obstacle_count() {
        match scene.raycast(origin, dir, remaining, layers) {
            None => return true,
            Some(hit) if Some(hit.obstacle) == ignore => {
                let step = hit.distance + START_EPSILON;
                origin += dir * step;
                remaining -= step;
                if remaining <= 0.0 {
                    return true;
                }
            }
            Some(_) => return false,
        }
    }
    false
}

/// Whether a ray from `from` arrives at `surface_point` on `owner`
/// without being stopped by something else first.
pub fn reaches_surface(
    scene: &dyn Scene,
    from: Vec3,
    surface_point: Vec3,
    owner: ObstacleId,
    layers: LayerMask,
) -> bool {
    let delta = surface_point - from;
    let length = delta.length();
    if length <= f32::EPSILON {
        return false;
    }
    match scene.raycast(from, delta, length + SURFACE_TOLERANCE, layers) {
        Some(hit) => hit.obstacle == owner && hit.distance >= length - SURFACE_TOLERANCE,
        None => false,
    }
}

/// Whether the leg from `from` to `surface_point` on `owner` is clear.
///
/// Any other obstacle blocks the leg anywhere along it. `owner` blocks
/// only when struck more than [`SURFACE_TOLERANCE`] short of
/// `surface_point`: the leg may end on its owner but not pass through it.
pub fn is_leg_clear_to_surface(
    scene: &dyn Scene,
    from: Vec3,
    surface_point: Vec3,
    owner: ObstacleId,
    layers: LayerMask,
) -> bool {
    let delta = surface_point - from;
    let length = delta.length();
    if length <= START_EPSILON + END_EPSILON {
        return true;
    }
    let dir = delta / length;
    let remaining = length - START_EPSILON;
    match scene.raycast(from + dir * START_EPSILON, dir, remaining, layers) {
        None => true,
        Some(hit) if hit.obstacle == owner => hit.distance >= remaining - SURFACE_TOLERANCE,
        Some(hit) => hit.distance >= remaining - END_EPSILON,
    }
}

/// Project `approx` onto the surface of `expected` by casting along
/// `cast_dir` from just outside it.
///
/// Returns `None` if the probe misses or strikes a different obstacle.
pub fn snap_to_surface(
    scene: &dyn Scene,
    approx: Vec3,
    cast_dir: Vec3,
    expected: ObstacleId,
    layers: LayerMask,
) -> Option<SurfaceSnap> {
    let dir = cast_dir.try_normalize()?;
    let origin = approx - dir * SNAP_OFFSET;
    let hit = scene.raycast(origin, dir, 2.0 * SNAP_OFFSET, layers)?;
    (hit.obstacle == expected).then_some(SurfaceSnap {
        point: hit.point,
        normal: hit.normal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoxScene;
    use raypath_core::{Aabb, SurfaceMaterial};

    fn wall_scene() -> BoxScene {
        let mut s = BoxScene::new();
        s.add_building(
            Aabb::new(Vec3::new(49.0, 0.0, -20.0), Vec3::new(51.0, 30.0, 20.0)),
            SurfaceMaterial::CONCRETE,
        )
        .unwrap();
        s.add_building(
            Aabb::new(Vec3::new(70.0, 0.0, -20.0), Vec3::new(72.0, 30.0, 20.0)),
            SurfaceMaterial::BRICK,
        )
        .unwrap();
        s
    }

    #[test]
    fn blocked_and_clear_segments() {
        let s = wall_scene();
        let a = Vec3::new(0.0, 10.0, 0.0);
        assert!(!is_segment_clear(&s, a, Vec3::new(60.0, 10.0, 0.0), LayerMask::ALL, None));
        assert!(is_segment_clear(&s, a, Vec3::new(40.0, 10.0, 0.0), LayerMask::ALL, None));
        assert!(is_segment_clear(&s, a, Vec3::new(60.0, 40.0, 0.0), LayerMask::ALL, None));
        assert!(is_segment_clear(&s, a, a, LayerMask::ALL, None));
    }

    #[test]
    fn ignored_obstacle_is_skipped_but_others_block() {
        let s = wall_scene();
        let a = Vec3::new(0.0, 10.0, 0.0);
        let mid = Vec3::new(60.0, 10.0, 0.0);
        assert!(is_segment_clear(&s, a, mid, LayerMask::ALL, Some(ObstacleId(0))));
        let far = Vec3::new(90.0, 10.0, 0.0);
        assert!(!is_segment_clear(&s, a, far, LayerMask::ALL, Some(ObstacleId(0))));
    }

    #[test]
    fn segment_ending_on_surface_is_clear() {
        let s = wall_scene();
        let a = Vec3::new(0.0, 10.0, 0.0);
        assert!(is_segment_clear(&s, a, Vec3::new(49.0, 10.0, 0.0), LayerMask::ALL, None));
    }

    #[test]
    fn reaches_surface_checks_owner_and_distance() {
        let s = wall_scene();
        let a = Vec3::new(0.0, 10.0, 0.0);
        assert!(reaches_surface(&s, a, Vec3::new(49.0, 10.0, 0.0), ObstacleId(0), LayerMask::ALL));
        assert!(!reaches_surface(&s, a, Vec3::new(70.0, 10.0, 0.0), ObstacleId(1), LayerMask::ALL));
        assert!(!reaches_surface(&s, a, Vec3::new(49.0, 10.0, 0.0), ObstacleId(1), LayerMask::ALL));
    }

    #[test]
    fn leg_may_end_on_owner_but_not_cross_it() {
        let s = wall_scene();
        let a = Vec3::new(0.0, 10.0, 0.0);
        let owner = ObstacleId(0);
        assert!(is_leg_clear_to_surface(&s, a, Vec3::new(49.0, 10.0, 0.0), owner, LayerMask::ALL));
        // Far face: the near face of the same wall is struck 2 m short.
        assert!(!is_leg_clear_to_surface(&s, a, Vec3::new(51.0, 10.0, 0.0), owner, LayerMask::ALL));
        assert!(!is_leg_clear_to_surface(&s, a, Vec3::new(50.0, 30.0, 0.0), owner, LayerMask::ALL));
    }

    #[test]
    fn leg_is_blocked_by_other_obstacles() {
        let s = wall_scene();
        let roof = Vec3::new(71.0, 30.0, 0.0);
        let owner = ObstacleId(1);
        assert!(!is_leg_clear_to_surface(&s, Vec3::new(0.0, 10.0, 0.0), roof, owner, LayerMask::ALL));
        assert!(is_leg_clear_to_surface(&s, Vec3::new(0.0, 40.0, 0.0), roof, owner, LayerMask::ALL));
    }

    #[test]
    fn snap_finds_roof() {
        let s = wall_scene();
        let snap = snap_to_surface(
            &s,
            Vec3::new(50.0, 30.0, 3.0),
            Vec3::NEG_Y,
            ObstacleId(0),
            LayerMask::ALL,
        )
        .unwrap();
        assert!((snap.point - Vec3::new(50.0, 30.0, 3.0)).length() < 1e-4);
        assert_eq!(snap.normal, Vec3::Y);
    }

    #[test]
    fn snap_rejects_wrong_obstacle_and_miss() {
        let s = wall_scene();
        assert!(snap_to_surface(&s, Vec3::new(50.0, 30.0, 3.0), Vec3::NEG_Y, ObstacleId(1), LayerMask::ALL)
            .is_none());
        assert!(snap_to_surface(&s, Vec3::new(60.0, 30.0, 3.0), Vec3::NEG_Y, ObstacleId(0), LayerMask::ALL)
            .is_none());
        assert!(snap_to_surface(&s, Vec3::new(50.0, 30.0, 3.0), Vec3::ZERO, ObstacleId(0), LayerMask::ALL)
            .is_none());
    }
}
