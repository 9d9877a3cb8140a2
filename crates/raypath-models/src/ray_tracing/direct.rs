//! Line-of-sight path.

use raypath_core::{PathContribution, PathMechanism};
use raypath_model::{EvalContext, PathEvent, RejectReason};
use raypath_scene::obstruction::{is_segment_clear, END_EPSILON, START_EPSILON};
use tracing::trace;

use super::config::RayTracingConfig;
use super::Link;
use crate::kernels::free_space_path_loss_db;

pub(crate) fn discover(
    link: &Link,
    cfg: &RayTracingConfig,
    env: &EvalContext<'_>,
    out: &mut Vec<PathContribution>,
) {
    let points = [link.tx, link.rx];
    let reject = |reason: RejectReason| {
        trace!("direct path rejected: {reason}");
        env.emit(|| PathEvent::rejected(PathMechanism::Direct, &points, reason));
    };

    let distance = link.tx.distance(link.rx);
    if distance < START_EPSILON + END_EPSILON || distance > cfg.max_distance_m {
        reject(RejectReason::OutOfRange);
        return;
    }
    if !is_segment_clear(env.scene(), link.tx, link.rx, link.layers, None) {
        reject(RejectReason::Occluded);
        return;
    }

    let loss_db = free_space_path_loss_db(distance, link.frequency_mhz);
    out.push(PathContribution::direct(loss_db, distance));
    env.emit(|| PathEvent::accepted(PathMechanism::Direct, &points, loss_db));
}
