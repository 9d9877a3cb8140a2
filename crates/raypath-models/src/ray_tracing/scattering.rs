//! Diffuse scattering from wall sample clusters.
//!
//! Each wall facing both ends gets a small cluster of samples centered
//! on the specular point (or the wall center when there is none). The
//! jitter RNG is seeded per wall from `scatter_seed`, the obstacle ID
//! and the face, so results are reproducible. The cluster shares one
//! wall's worth of power: each sample carries `10·log10(N)` extra loss.

use glam::Vec3;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use raypath_core::{ObstacleId, PathContribution, PathMechanism, SurfaceMaterial};
use raypath_model::{EvalContext, PathEvent, RejectReason};
use raypath_scene::geometry::{wall_planes, WallPlane, WALL_EPSILON};
use raypath_scene::obstruction::{is_segment_clear, reaches_surface, snap_to_surface};
use tracing::trace;

use super::config::RayTracingConfig;
use super::Link;
use crate::kernels::{free_space_path_loss_db, rough_reflectivity, scatter_loss_db};

pub(crate) fn discover(
    link: &Link,
    nearby: &[ObstacleId],
    cfg: &RayTracingConfig,
    env: &EvalContext<'_>,
    out: &mut Vec<PathContribution>,
) {
    let scene = env.scene();
    let samples = cfg.scatter_samples_per_wall.max(1);
    let split_loss_db = 10.0 * (samples as f32).log10();
    let mut found = 0u32;

    for &id in nearby {
        let (Some(bounds), Some(material)) = (scene.bounds(id), scene.material(id)) else {
            continue;
        };
        for wall in wall_planes(bounds, id) {
            if wall.signed_distance(link.tx) <= WALL_EPSILON
                || wall.signed_distance(link.rx) <= WALL_EPSILON
            {
                continue;
            }
            let center = wall
                .specular_point(link.tx, link.rx)
                .unwrap_or_else(|| wall.center());
            let seed = cfg.scatter_seed ^ ((u64::from(id.0) << 8) | u64::from(wall.face.index()));
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let j = cfg.scatter_jitter_m;
            let scatter = Sample {
                link,
                wall: &wall,
                material: &material,
                cfg,
                split_loss_db,
            };

            for i in 0..samples {
                if found >= cfg.max_scatter_paths {
                    return;
                }
                let sample = if i == 0 {
                    center
                } else {
                    center
                        + wall.tangent() * rng.random_range(-j..=j)
                        + Vec3::Y * rng.random_range(-j..=j)
                };
                if !wall.contains(sample, WALL_EPSILON) {
                    continue;
                }
                if let Some(path) = scatter.evaluate(sample, env) {
                    out.push(path);
                    found += 1;
                }
            }
        }
    }
}

struct Sample<'a> {
    link: &'a Link,
    wall: &'a WallPlane,
    material: &'a SurfaceMaterial,
    cfg: &'a RayTracingConfig,
    split_loss_db: f32,
}

impl Sample<'_> {
    fn evaluate(&self, approx: Vec3, env: &EvalContext<'_>) -> Option<PathContribution> {
        let (link, wall, cfg) = (self.link, self.wall, self.cfg);
        let scene = env.scene();
        let reject = |at: Vec3, reason: RejectReason| {
            trace!("scatter sample on {} {:?} rejected: {reason}", wall.obstacle, wall.face);
            env.emit(|| PathEvent::rejected(PathMechanism::Scattering, &[link.tx, at, link.rx], reason));
        };

        let Some(snap) = snap_to_surface(scene, approx, -wall.normal, wall.obstacle, link.layers)
        else {
            reject(approx, RejectReason::SnapFailed);
            return None;
        };
        let p = snap.point;
        let cos_i = (link.tx - p).normalize_or_zero().dot(snap.normal);
        let cos_s = (link.rx - p).normalize_or_zero().dot(snap.normal);
        if cos_i <= 0.0 || cos_s <= 0.0 {
            reject(p, RejectReason::BackFacing);
            return None;
        }
        let d1 = link.tx.distance(p);
        let d2 = p.distance(link.rx);
        if d1 + d2 > cfg.max_distance_m {
            reject(p, RejectReason::OutOfRange);
            return None;
        }
        if !reaches_surface(scene, link.tx, p, wall.obstacle, link.layers) {
            reject(p, RejectReason::Unreachable);
            return None;
        }
        if !is_segment_clear(scene, p, link.rx, link.layers, Some(wall.obstacle)) {
            reject(p, RejectReason::Occluded);
            return None;
        }

        let gamma = self.material.reflection_coefficient(link.frequency_mhz, cos_i);
        let rho = rough_reflectivity(gamma, link.wavelength_m, self.material.roughness_sigma_m, cos_i);
        let albedo = self.material.scatter_albedo.unwrap_or(cfg.scatter_albedo);
        let loss_db = free_space_path_loss_db(d1 + d2, link.frequency_mhz)
            + cfg.scatter_base_loss_db
            + scatter_loss_db(albedo, rho, cos_i, cos_s, cfg.scatter_lobe_exponent)
            + self.split_loss_db;

        env.emit(|| PathEvent::accepted(PathMechanism::Scattering, &[link.tx, p, link.rx], loss_db));
        Some(PathContribution {
            mechanism: PathMechanism::Scattering,
            loss_db,
            distance_m: d1 + d2,
            extra_phase_rad: 0.0,
        })
    }
}
