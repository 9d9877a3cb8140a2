//! Wall planes, building edges and closest-point helpers.
//!
//! Buildings are axis-aligned boxes in a Y-up world, so every reflecting
//! wall is one of four vertical faces and every diffracting edge is
//! either a roof edge (horizontal, at the top of a face) or a vertical
//! corner.

use glam::Vec3;
use raypath_core::{Aabb, ObstacleId};
use smallvec::SmallVec;

/// Tolerance used when testing whether a point lies on a wall face.
pub const WALL_EPSILON: f32 = 1e-3;

const PARALLEL_EPSILON: f32 = 1e-6;

// ── Faces and wall planes ───────────────────────────────────────

/// A vertical face of an axis-aligned building.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    /// Face whose outward normal is `+X`.
    PosX,
    /// Face whose outward normal is `−X`.
    NegX,
    /// Face whose outward normal is `+Z`.
    PosZ,
    /// Face whose outward normal is `−Z`.
    NegZ,
}

impl Face {
    /// All four vertical faces, in index order.
    pub const ALL: [Face; 4] = [Face::PosX, Face::NegX, Face::PosZ, Face::NegZ];

    /// Stable index in `0..4`.
    pub fn index(self) -> u32 {
        match self {
            Self::PosX => 0,
            Self::NegX => 1,
            Self::PosZ => 2,
            Self::NegZ => 3,
        }
    }

    /// Outward unit normal.
    pub fn normal(self) -> Vec3 {
        match self {
            Self::PosX => Vec3::X,
            Self::NegX => Vec3::NEG_X,
            Self::PosZ => Vec3::Z,
            Self::NegZ => Vec3::NEG_Z,
        }
    }

    /// Horizontal axis lying in the face.
    pub fn tangent(self) -> Vec3 {
        match self {
            Self::PosX | Self::NegX => Vec3::Z,
            Self::PosZ | Self::NegZ => Vec3::X,
        }
    }
}

/// One vertical face of a building, treated as a bounded mirror.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallPlane {
    /// Owning obstacle.
    pub obstacle: ObstacleId,
    /// Which face of the owner this is.
    pub face: Face,
    /// A point on the plane (the face center).
    pub point: Vec3,
    /// Outward unit normal.
    pub normal: Vec3,
    /// The owner's bounds, which also bound the face.
    pub bounds: Aabb,
}

impl WallPlane {
    /// Horizontal tangent of the face.
    pub fn tangent(&self) -> Vec3 {
        self.face.tangent()
    }

    /// Signed distance of `p` from the plane, positive on the outside.
    pub fn signed_distance(&self, p: Vec3) -> f32 {
        (p - self.point).dot(self.normal)
    }

    /// Whether `p` lies on the face rectangle within `eps`.
    pub fn contains(&self, p: Vec3, eps: f32) -> bool {
        let axis = if self.tangent().x != 0.0 { 0 } else { 2 };
        let within = |v: f32, lo: f32, hi: f32| v >= lo - eps && v <= hi + eps;
        self.signed_distance(p).abs() <= eps
            && within(p[axis], self.bounds.min[axis], self.bounds.max[axis])
            && within(p.y, self.bounds.min.y, self.bounds.max.y)
    }

    /// Face center.
    pub fn center(&self) -> Vec3 {
        self.point
    }

    /// Mirror image of `p` across the plane.
    pub fn mirror(&self, p: Vec3) -> Vec3 {
        p - self.normal * (2.0 * self.signed_distance(p))
    }

    /// Image-method specular point for a bounce from `tx` to `rx`.
    ///
    /// Both endpoints must lie strictly outside the face, and the
    /// reflection point must fall on the bounded face rectangle.
    pub fn specular_point(&self, tx: Vec3, rx: Vec3) -> Option<Vec3> {
        let sd_tx = self.signed_distance(tx);
        let sd_rx = self.signed_distance(rx);
        if sd_tx <= WALL_EPSILON || sd_rx <= WALL_EPSILON {
            return None;
        }
        let image = self.mirror(rx);
        let denom = (image - tx).dot(self.normal);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = -sd_tx / denom;
        if t <= 0.0 || t >= 1.0 {
            return None;
        }
        let p = tx + (image - tx) * t;
        self.contains(p, WALL_EPSILON).then_some(p)
    }
}

/// The four vertical wall planes of a building.
pub fn wall_planes(bounds: Aabb, obstacle: ObstacleId) -> SmallVec<[WallPlane; 4]> {
    let c = bounds.center();
    Face::ALL
        .iter()
        .map(|&face| {
            let point = match face {
                Face::PosX => Vec3::new(bounds.max.x, c.y, c.z),
                Face::NegX => Vec3::new(bounds.min.x, c.y, c.z),
                Face::PosZ => Vec3::new(c.x, c.y, bounds.max.z),
                Face::NegZ => Vec3::new(c.x, c.y, bounds.min.z),
            };
            WallPlane {
                obstacle,
                face,
                point,
                normal: face.normal(),
                bounds,
            }
        })
        .collect()
}

// ── Edges ───────────────────────────────────────────────────────

/// Whether an edge runs along a roof or up a corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Horizontal edge where a wall meets the roof.
    Roof,
    /// Vertical edge where two walls meet.
    Corner,
}

/// A convex building edge that can diffract.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    /// Owning obstacle.
    pub obstacle: ObstacleId,
    /// Roof or corner.
    pub kind: EdgeKind,
    /// First endpoint.
    pub start: Vec3,
    /// Second endpoint.
    pub end: Vec3,
    /// Outward normal of the first adjacent face. For roof edges this
    /// is the wall normal.
    pub normal_a: Vec3,
    /// Outward normal of the second adjacent face. For roof edges this
    /// is `+Y`.
    pub normal_b: Vec3,
}

impl Edge {
    /// Edge length, meters.
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Edge midpoint.
    pub fn midpoint(&self) -> Vec3 {
        (self.start + self.end) * 0.5
    }

    /// Unit vector bisecting the two adjacent face normals.
    pub fn outward(&self) -> Vec3 {
        (self.normal_a + self.normal_b).normalize_or_zero()
    }
}

/// The four roof edges followed by the four vertical corners of a
/// building.
pub fn roof_and_corner_edges(bounds: Aabb, obstacle: ObstacleId) -> SmallVec<[Edge; 8]> {
    let (lo, hi) = (bounds.min, bounds.max);
    let top = hi.y;
    let mut edges = SmallVec::new();

    let roof = |start: Vec3, end: Vec3, wall: Vec3| Edge {
        obstacle,
        kind: EdgeKind::Roof,
        start,
        end,
        normal_a: wall,
        normal_b: Vec3::Y,
    };
    edges.push(roof(
        Vec3::new(hi.x, top, lo.z),
        Vec3::new(hi.x, top, hi.z),
        Vec3::X,
    ));
    edges.push(roof(
        Vec3::new(lo.x, top, lo.z),
        Vec3::new(lo.x, top, hi.z),
        Vec3::NEG_X,
    ));
    edges.push(roof(
        Vec3::new(lo.x, top, hi.z),
        Vec3::new(hi.x, top, hi.z),
        Vec3::Z,
    ));
    edges.push(roof(
        Vec3::new(lo.x, top, lo.z),
        Vec3::new(hi.x, top, lo.z),
        Vec3::NEG_Z,
    ));

    for (x, nx) in [(lo.x, Vec3::NEG_X), (hi.x, Vec3::X)] {
        for (z, nz) in [(lo.z, Vec3::NEG_Z), (hi.z, Vec3::Z)] {
            edges.push(Edge {
                obstacle,
                kind: EdgeKind::Corner,
                start: Vec3::new(x, lo.y, z),
                end: Vec3::new(x, top, z),
                normal_a: nx,
                normal_b: nz,
            });
        }
    }
    edges
}

// ── Closest points ──────────────────────────────────────────────

/// Closest point to `p` on segment `a`–`b`.
pub fn closest_point_on_segment(p: Vec3, a: Vec3, b: Vec3) -> Vec3 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 < f32::EPSILON {
        return a;
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    a + ab * t
}

/// Closest points between segments `p1`–`q1` and `p2`–`q2`.
///
/// Returns `(s, t, c1, c2)` where `c1 = p1 + s·(q1 − p1)` and
/// `c2 = p2 + t·(q2 − p2)`, with `s, t ∈ [0, 1]`.
pub fn closest_points_between_segments(
    p1: Vec3,
    q1: Vec3,
    p2: Vec3,
    q2: Vec3,
) -> (f32, f32, Vec3, Vec3) {
    let d1 = q1 - p1;
    let d2 = q2 - p2;
    let r = p1 - p2;
    let a = d1.length_squared();
    let e = d2.length_squared();
    let f = d2.dot(r);

    let (s, t) = if a <= f32::EPSILON && e <= f32::EPSILON {
        (0.0, 0.0)
    } else if a <= f32::EPSILON {
        (0.0, (f / e).clamp(0.0, 1.0))
    } else {
        let c = d1.dot(r);
        if e <= f32::EPSILON {
            ((-c / a).clamp(0.0, 1.0), 0.0)
        } else {
            let b = d1.dot(d2);
            let denom = a * e - b * b;
            let mut s = if denom > f32::EPSILON {
                ((b * f - c * e) / denom).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let mut t = (b * s + f) / e;
            if t < 0.0 {
                t = 0.0;
                s = (-c / a).clamp(0.0, 1.0);
            } else if t > 1.0 {
                t = 1.0;
                s = ((b - c) / a).clamp(0.0, 1.0);
            }
            (s, t)
        }
    };
    (s, t, p1 + d1 * s, p2 + d2 * t)
}

/// Point on segment `start`–`end` closest to the infinite line through
/// `line_origin` along `line_dir`.
///
/// Returns `None` when the segment is degenerate or parallel to the
/// line, since no unique closest point exists.
pub fn closest_point_on_edge_to_line(
    start: Vec3,
    end: Vec3,
    line_origin: Vec3,
    line_dir: Vec3,
) -> Option<Vec3> {
    let d1 = end - start;
    let d2 = line_dir;
    let a = d1.length_squared();
    let e = d2.length_squared();
    if a <= f32::EPSILON || e <= f32::EPSILON {
        return None;
    }
    let b = d1.dot(d2);
    let denom = a * e - b * b;
    if denom <= PARALLEL_EPSILON * a * e {
        return None;
    }
    let r = start - line_origin;
    let c = d1.dot(r);
    let f = d2.dot(r);
    let s = ((b * f - c * e) / denom).clamp(0.0, 1.0);
    Some(start + d1 * s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn block() -> Aabb {
        Aabb::new(Vec3::new(20.0, 0.0, 10.0), Vec3::new(80.0, 30.0, 12.0))
    }

    fn neg_z_wall() -> WallPlane {
        wall_planes(block(), ObstacleId(0))
            .into_iter()
            .find(|w| w.face == Face::NegZ)
            .unwrap()
    }

    #[test]
    fn wall_planes_sit_on_faces() {
        let walls = wall_planes(block(), ObstacleId(4));
        assert_eq!(walls.len(), 4);
        for w in &walls {
            assert_eq!(w.obstacle, ObstacleId(4));
            assert!(w.contains(w.center(), WALL_EPSILON));
            assert!(block().contains_point(w.point));
        }
    }

    #[test]
    fn specular_point_is_symmetric() {
        let wall = neg_z_wall();
        let tx = Vec3::new(40.0, 10.0, 0.0);
        let rx = Vec3::new(60.0, 10.0, 0.0);
        let p = wall.specular_point(tx, rx).unwrap();
        assert!((p - Vec3::new(50.0, 10.0, 10.0)).length() < 1e-4);
    }

    #[test]
    fn specular_point_requires_both_in_front() {
        let wall = neg_z_wall();
        let tx = Vec3::new(40.0, 10.0, 0.0);
        assert!(wall.specular_point(tx, Vec3::new(60.0, 10.0, 20.0)).is_none());
    }

    #[test]
    fn specular_point_outside_face_is_rejected() {
        let wall = neg_z_wall();
        // Bounce point would land at x = 90, past the wall end.
        let tx = Vec3::new(85.0, 10.0, 0.0);
        let rx = Vec3::new(95.0, 10.0, 0.0);
        assert!(wall.specular_point(tx, rx).is_none());
        // Bounce point above the roof.
        let tx = Vec3::new(40.0, 50.0, 0.0);
        let rx = Vec3::new(60.0, 50.0, 0.0);
        assert!(wall.specular_point(tx, rx).is_none());
    }

    #[test]
    fn mirror_is_involutive() {
        let wall = neg_z_wall();
        let p = Vec3::new(3.0, 4.0, -7.0);
        assert!((wall.mirror(wall.mirror(p)) - p).length() < 1e-4);
        assert!((wall.signed_distance(wall.mirror(p)) + wall.signed_distance(p)).abs() < 1e-4);
    }

    #[test]
    fn edges_cover_roof_and_corners() {
        let edges = roof_and_corner_edges(block(), ObstacleId(1));
        assert_eq!(edges.len(), 8);
        let roofs: Vec<_> = edges.iter().filter(|e| e.kind == EdgeKind::Roof).collect();
        assert_eq!(roofs.len(), 4);
        for e in &roofs {
            assert_eq!(e.start.y, 30.0);
            assert_eq!(e.end.y, 30.0);
            assert_eq!(e.normal_b, Vec3::Y);
        }
        for e in edges.iter().filter(|e| e.kind == EdgeKind::Corner) {
            assert!((e.length() - 30.0).abs() < 1e-5);
            assert!((e.outward().length() - 1.0).abs() < 1e-5);
            assert_eq!(e.outward().y, 0.0);
        }
    }

    #[test]
    fn closest_point_on_segment_clamps() {
        let a = Vec3::ZERO;
        let b = Vec3::new(10.0, 0.0, 0.0);
        assert_eq!(closest_point_on_segment(Vec3::new(-5.0, 1.0, 0.0), a, b), a);
        assert_eq!(closest_point_on_segment(Vec3::new(4.0, 3.0, 0.0), a, b), Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(closest_point_on_segment(Vec3::ONE, a, a), a);
    }

    #[test]
    fn closest_points_between_crossing_segments() {
        let (s, t, c1, c2) = closest_points_between_segments(
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, -1.0),
            Vec3::new(0.0, 2.0, 1.0),
        );
        assert!((s - 0.5).abs() < 1e-6);
        assert!((t - 0.5).abs() < 1e-6);
        assert!((c1 - Vec3::ZERO).length() < 1e-6);
        assert!((c2 - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn edge_to_line_finds_crossing() {
        let q = closest_point_on_edge_to_line(
            Vec3::new(50.0, 30.0, -10.0),
            Vec3::new(50.0, 30.0, 10.0),
            Vec3::new(0.0, 10.0, 2.0),
            Vec3::X,
        )
        .unwrap();
        assert!((q - Vec3::new(50.0, 30.0, 2.0)).length() < 1e-4);
    }

    #[test]
    fn edge_to_line_rejects_parallel() {
        assert!(closest_point_on_edge_to_line(
            Vec3::new(0.0, 30.0, 0.0),
            Vec3::new(10.0, 30.0, 0.0),
            Vec3::ZERO,
            Vec3::X,
        )
        .is_none());
    }

    proptest! {
        #[test]
        fn specular_point_equalizes_angles(
            tx_x in 21.0f32..79.0, rx_x in 21.0f32..79.0,
            tx_z in -40.0f32..-1.0, rx_z in -40.0f32..-1.0,
            y in 1.0f32..29.0,
        ) {
            let wall = neg_z_wall();
            let tx = Vec3::new(tx_x, y, tx_z);
            let rx = Vec3::new(rx_x, y, rx_z);
            if let Some(p) = wall.specular_point(tx, rx) {
                let cos_in = (tx - p).normalize().dot(wall.normal);
                let cos_out = (rx - p).normalize().dot(wall.normal);
                prop_assert!((cos_in - cos_out).abs() < 1e-3);
                prop_assert!(wall.contains(p, WALL_EPSILON));
            }
        }
    }
}
