//! Axis-aligned bounding boxes and ray hits.

use glam::Vec3;

use crate::id::ObstacleId;

/// An axis-aligned box, `min <= max` on every axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Lower corner.
    pub min: Vec3,
    /// Upper corner.
    pub max: Vec3,
}

impl Aabb {
    /// Box spanning two arbitrary corners.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Box with the given center and half extents.
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let h = half_extents.abs();
        Self {
            min: center - h,
            max: center + h,
        }
    }

    /// Center point.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half the size along each axis.
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Full size along each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Returns `true` if both corners are finite and ordered.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min.cmple(self.max).all()
    }

    /// Inclusive point containment.
    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Inclusive box overlap.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }

    /// Box grown by `margin` on every side.
    pub fn expanded(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec3::splat(margin),
            max: self.max + Vec3::splat(margin),
        }
    }

    /// Slab intersection of the ray `origin + t * direction`.
    ///
    /// Returns the entry distance `t` and the outward normal of the
    /// entered face. Rays that start inside the box report no hit, and
    /// hits beyond `max_t` are ignored. `direction` need not be unit
    /// length; `t` is measured in multiples of it.
    pub fn ray_entry(&self, origin: Vec3, direction: Vec3, max_t: f32) -> Option<(f32, Vec3)> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut normal = Vec3::ZERO;

        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];
            let lo = self.min[axis];
            let hi = self.max[axis];
            if d.abs() < 1e-12 {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let t1 = (lo - o) / d;
            let t2 = (hi - o) / d;
            let (near, far) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
            if near > t_enter {
                t_enter = near;
                normal = Vec3::ZERO;
                normal[axis] = -d.signum();
            }
            t_exit = t_exit.min(far);
            if t_enter > t_exit {
                return None;
            }
        }

        if t_enter < 0.0 || t_enter > max_t {
            return None;
        }
        Some((t_enter, normal))
    }

    /// Whether the closed segment `a`–`b` touches the box, including
    /// segments that start or end inside it.
    pub fn intersects_segment(&self, a: Vec3, b: Vec3) -> bool {
        if self.contains_point(a) || self.contains_point(b) {
            return true;
        }
        self.ray_entry(a, b - a, 1.0).is_some()
    }
}

/// Result of a successful raycast against a scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    /// World-space hit point.
    pub point: Vec3,
    /// Outward unit normal of the struck surface.
    pub normal: Vec3,
    /// Distance from the ray origin, meters.
    pub distance: f32,
    /// The struck obstacle.
    pub obstacle: ObstacleId,
}
