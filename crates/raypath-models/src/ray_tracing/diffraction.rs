//! Knife-edge diffraction over roof edges and around vertical corners.
//!
//! Only obstacles whose bounds cut the TX–RX segment are considered;
//! an edge of a building that does not block the direct path would
//! otherwise add a near-lossless duplicate of it. A leg may touch the
//! diffracting building only at the edge itself, so the far roof edge
//! of a wide building never qualifies.

use std::f32::consts::FRAC_PI_4;

use glam::Vec3;
use raypath_core::{ObstacleId, PathContribution, PathMechanism};
use raypath_model::{EvalContext, PathEvent, RejectReason};
use raypath_scene::geometry::{closest_point_on_edge_to_line, roof_and_corner_edges, Edge, EdgeKind};
use raypath_scene::obstruction::{is_leg_clear_to_surface, snap_to_surface, EDGE_INSET};
use raypath_scene::{Scene, SurfaceSnap};
use tracing::trace;

use super::config::RayTracingConfig;
use super::Link;
use crate::kernels::{free_space_path_loss_db, fresnel_parameter, knife_edge_loss_db};

/// Phase shift attributed to edge diffraction.
const DIFFRACTION_PHASE_RAD: f32 = -FRAC_PI_4;
const MIN_SEGMENT_M: f32 = 1e-3;
const MIN_CLEARANCE_M: f32 = 1e-4;

/// Frame of the direct path: unit direction, horizontal side vector
/// and the "up" normal of the vertical plane containing the path.
struct PathFrame {
    dir: Vec3,
    side: Vec3,
    up: Vec3,
    length: f32,
    mid: Vec3,
}

impl PathFrame {
    fn new(link: &Link) -> Option<Self> {
        let delta = link.rx - link.tx;
        let length = delta.length();
        let dir = delta.try_normalize()?;
        let side = dir.cross(Vec3::Y).try_normalize()?;
        let up = side.cross(dir);
        Some(Self {
            dir,
            side,
            up,
            length,
            mid: (link.tx + link.rx) * 0.5,
        })
    }

    /// Edges whose midpoint lies near the path and projects onto it.
    fn is_plausible(&self, link: &Link, edge: &Edge) -> bool {
        let mid = edge.midpoint();
        let reach = 0.5 * self.length + 0.5 * edge.length();
        let along = (mid - link.tx).dot(self.dir);
        mid.distance(self.mid) <= reach && (0.0..=self.length).contains(&along)
    }

    /// Height of the direct path at the horizontal station of `p`.
    fn los_height_at(&self, link: &Link, p: Vec3) -> f32 {
        let t = ((p - link.tx).dot(self.dir) / self.length).clamp(0.0, 1.0);
        link.tx.y + t * (link.rx.y - link.tx.y)
    }
}

pub(crate) fn discover(
    link: &Link,
    nearby: &[ObstacleId],
    cfg: &RayTracingConfig,
    env: &EvalContext<'_>,
    out: &mut Vec<PathContribution>,
) {
    if cfg.max_diffractions == 0 {
        return;
    }
    // Vertical links have no horizontal frame to diffract around.
    let Some(frame) = PathFrame::new(link) else {
        return;
    };
    let scene = env.scene();
    let mut found = 0u32;

    for &id in nearby {
        let Some(bounds) = scene.bounds(id) else {
            continue;
        };
        if !bounds.intersects_segment(link.tx, link.rx) {
            continue;
        }
        for edge in roof_and_corner_edges(bounds, id) {
            if !frame.is_plausible(link, &edge) {
                continue;
            }
            if let Some(path) = try_edge(link, &frame, &edge, cfg, scene, env) {
                out.push(path);
                found += 1;
                if found >= cfg.max_diffractions {
                    return;
                }
            }
        }
    }
}

fn try_edge(
    link: &Link,
    frame: &PathFrame,
    edge: &Edge,
    cfg: &RayTracingConfig,
    scene: &dyn Scene,
    env: &EvalContext<'_>,
) -> Option<PathContribution> {
    let q = closest_point_on_edge_to_line(edge.start, edge.end, link.tx, frame.dir)?;
    let reject = |at: Vec3, reason: RejectReason| {
        trace!("{:?} edge of {} rejected: {reason}", edge.kind, edge.obstacle);
        env.emit(|| PathEvent::rejected(PathMechanism::Diffraction, &[link.tx, at, link.rx], reason));
    };

    if edge.kind == EdgeKind::Roof && q.y <= frame.los_height_at(link, q) {
        reject(q, RejectReason::NotObstructing);
        return None;
    }

    let Some(SurfaceSnap { point: p, .. }) = snap_edge(edge, q, scene, link) else {
        reject(q, RejectReason::SnapFailed);
        return None;
    };

    let d1 = link.tx.distance(p);
    let d2 = p.distance(link.rx);
    if d1 < MIN_SEGMENT_M || d2 < MIN_SEGMENT_M {
        return None;
    }
    if d1 + d2 > cfg.max_distance_m {
        reject(p, RejectReason::OutOfRange);
        return None;
    }
    // Both legs are cast toward the edge so the owner only counts where
    // the leg lands on it.
    if !is_leg_clear_to_surface(scene, link.tx, p, edge.obstacle, link.layers)
        || !is_leg_clear_to_surface(scene, link.rx, p, edge.obstacle, link.layers)
    {
        reject(p, RejectReason::Occluded);
        return None;
    }

    let offset = p - link.tx;
    let h = match edge.kind {
        EdgeKind::Roof => offset.dot(frame.up),
        EdgeKind::Corner => offset.dot(frame.side).abs(),
    };
    if h.abs() < MIN_CLEARANCE_M {
        reject(p, RejectReason::NotObstructing);
        return None;
    }

    let v = fresnel_parameter(h, d1, d2, link.wavelength_m);
    let loss_db = free_space_path_loss_db(d1 + d2, link.frequency_mhz) + knife_edge_loss_db(v);
    env.emit(|| PathEvent::accepted(PathMechanism::Diffraction, &[link.tx, p, link.rx], loss_db));
    Some(PathContribution {
        mechanism: PathMechanism::Diffraction,
        loss_db,
        distance_m: d1 + d2,
        extra_phase_rad: DIFFRACTION_PHASE_RAD,
    })
}

/// Snap the edge point onto its owner: roofs from above, corners from
/// outside along the bisector of the two walls.
fn snap_edge(edge: &Edge, q: Vec3, scene: &dyn Scene, link: &Link) -> Option<SurfaceSnap> {
    match edge.kind {
        EdgeKind::Roof => {
            let approx = q - edge.normal_a * EDGE_INSET;
            snap_to_surface(scene, approx, Vec3::NEG_Y, edge.obstacle, link.layers)
        }
        EdgeKind::Corner => {
            let outward = edge.outward();
            let approx = q - outward * EDGE_INSET;
            snap_to_surface(scene, approx, -outward, edge.obstacle, link.layers)
        }
    }
}
