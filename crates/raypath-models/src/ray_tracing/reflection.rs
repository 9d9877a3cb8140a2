//! Single-bounce specular reflection via the image method.
//!
//! For each nearby obstacle the first wall yielding a valid, reachable
//! and unoccluded specular point contributes one path. The search stops
//! once `max_reflections` paths are found.

use raypath_core::{ObstacleId, PathContribution, PathMechanism};
use raypath_model::{EvalContext, PathEvent, RejectReason};
use raypath_scene::geometry::wall_planes;
use raypath_scene::obstruction::{is_segment_clear, reaches_surface};
use tracing::trace;

use super::config::RayTracingConfig;
use super::Link;
use crate::kernels::{free_space_path_loss_db, reflection_loss_db, reflection_phase_rad};

pub(crate) fn discover(
    link: &Link,
    nearby: &[ObstacleId],
    cfg: &RayTracingConfig,
    env: &EvalContext<'_>,
    out: &mut Vec<PathContribution>,
) {
    let scene = env.scene();
    let mut found = 0u32;

    'obstacles: for &id in nearby {
        if found >= cfg.max_reflections {
            break;
        }
        let (Some(bounds), Some(material)) = (scene.bounds(id), scene.material(id)) else {
            continue;
        };
        for wall in wall_planes(bounds, id) {
            let Some(p) = wall.specular_point(link.tx, link.rx) else {
                continue;
            };
            let points = [link.tx, p, link.rx];
            let reject = |reason: RejectReason| {
                trace!("reflection off {id} {:?} rejected: {reason}", wall.face);
                env.emit(|| PathEvent::rejected(PathMechanism::Reflection, &points, reason));
            };

            let d1 = link.tx.distance(p);
            let d2 = p.distance(link.rx);
            if d1 + d2 > cfg.max_distance_m {
                reject(RejectReason::OutOfRange);
                continue;
            }
            if !reaches_surface(scene, link.tx, p, id, link.layers) {
                reject(RejectReason::Unreachable);
                continue;
            }
            if !is_segment_clear(scene, p, link.rx, link.layers, Some(id)) {
                reject(RejectReason::Occluded);
                continue;
            }

            let cos_i = (link.tx - p).normalize_or_zero().dot(wall.normal).abs();
            let gamma = material.reflection_coefficient(link.frequency_mhz, cos_i);
            let loss_db =
                free_space_path_loss_db(d1 + d2, link.frequency_mhz) + reflection_loss_db(gamma);
            out.push(PathContribution {
                mechanism: PathMechanism::Reflection,
                loss_db,
                distance_m: d1 + d2,
                extra_phase_rad: reflection_phase_rad(gamma),
            });
            env.emit(|| PathEvent::accepted(PathMechanism::Reflection, &points, loss_db));
            found += 1;
            continue 'obstacles;
        }
    }
}
