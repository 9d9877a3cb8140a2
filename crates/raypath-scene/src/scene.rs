//! The core `Scene` trait.

use glam::Vec3;
use raypath_core::{Aabb, Hit, LayerMask, ObstacleId, SurfaceMaterial};
use smallvec::SmallVec;

/// Obstacle IDs returned by a volume query.
///
/// Inline capacity covers a typical urban neighbourhood without
/// touching the heap.
pub type ObstacleList = SmallVec<[ObstacleId; 16]>;

/// Read-only obstacle queries used by path discovery.
///
/// The scene is owned by the caller; propagation models only borrow
/// it for the duration of one evaluation and never mutate it.
///
/// # Thread Safety
///
/// `Sync` is required because receiver sampling evaluates many links
/// against the same `&dyn Scene` from worker threads.
pub trait Scene: Send + Sync {
    /// Cast a ray and return the nearest hit within `max_distance`.
    ///
    /// `direction` need not be normalized; a zero direction never hits.
    /// Obstacles that contain `origin` are not reported. Only obstacles
    /// on a layer selected by `layers` participate.
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<Hit>;

    /// Obstacles whose bounds overlap the given box, in ascending ID order.
    fn overlap_box(&self, center: Vec3, half_extents: Vec3, layers: LayerMask) -> ObstacleList;

    /// Bounding box of an obstacle, or `None` for an unknown ID.
    fn bounds(&self, id: ObstacleId) -> Option<Aabb>;

    /// Surface material of an obstacle, or `None` for an unknown ID.
    fn material(&self, id: ObstacleId) -> Option<SurfaceMaterial>;

    /// Number of obstacles that can currently be hit.
    fn obstacle_count(&self) -> usize;
}
