//! Benchmark profiles for the raypath propagation engine.
//!
//! Provides deterministic city scenes and receiver sets:
//!
//! - [`reference_city`]: 8x8 blocks (64 buildings) on a 60 m pitch
//! - [`stress_city`]: 20x20 blocks (400 buildings)
//! - [`receiver_grid`]: street-level receivers on a regular grid
//! - [`random_receivers`]: seeded receivers scattered over the streets

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use glam::Vec3;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use raypath_core::{Aabb, ModelKind, PropagationContext, SurfaceMaterial};
use raypath_scene::{BoxScene, SceneError};

/// Block footprint edge, meters.
pub const BLOCK_SIZE_M: f32 = 40.0;
/// Street width between blocks, meters.
pub const STREET_WIDTH_M: f32 = 20.0;
/// Distance between neighbouring block origins, meters.
pub const PITCH_M: f32 = BLOCK_SIZE_M + STREET_WIDTH_M;

const MATERIALS: [SurfaceMaterial; 4] = [
    SurfaceMaterial::CONCRETE,
    SurfaceMaterial::BRICK,
    SurfaceMaterial::GLASS,
    SurfaceMaterial::WOOD,
];

/// Build an `n` x `n` grid of blocks with seeded heights (10–60 m) and
/// materials. Block `(i, j)` spans `[i·PITCH, i·PITCH + BLOCK_SIZE]` on X
/// and likewise on Z; streets run between them.
pub fn city(n: u32, seed: u64) -> Result<BoxScene, SceneError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut scene = BoxScene::new();
    for i in 0..n {
        for j in 0..n {
            let x0 = i as f32 * PITCH_M;
            let z0 = j as f32 * PITCH_M;
            let height = rng.random_range(10.0f32..60.0);
            let material = MATERIALS[rng.random_range(0..MATERIALS.len())];
            scene.add_building(
                Aabb::new(
                    Vec3::new(x0, 0.0, z0),
                    Vec3::new(x0 + BLOCK_SIZE_M, height, z0 + BLOCK_SIZE_M),
                ),
                material,
            )?;
        }
    }
    Ok(scene)
}

/// Reference benchmark city: 8x8 blocks.
pub fn reference_city(seed: u64) -> Result<BoxScene, SceneError> {
    city(8, seed)
}

/// Stress benchmark city: 20x20 blocks.
pub fn stress_city(seed: u64) -> Result<BoxScene, SceneError> {
    city(20, seed)
}

/// A rooftop-height transmitter at the first street crossing.
pub fn reference_transmitter(model: ModelKind) -> PropagationContext {
    let crossing = BLOCK_SIZE_M + STREET_WIDTH_M / 2.0;
    PropagationContext::new(
        Vec3::new(crossing, 25.0, crossing),
        Vec3::new(crossing + PITCH_M * 3.0, 1.5, crossing),
        2400.0,
        model,
    )
}

/// `n` x `n` street-level receivers along the X-running streets of a
/// city built with [`city`], spaced `PITCH / 2` apart.
pub fn receiver_grid(n: u32) -> Vec<Vec3> {
    let mut out = Vec::with_capacity((n * n) as usize);
    for i in 0..n {
        for j in 0..n {
            out.push(Vec3::new(
                5.0 + i as f32 * PITCH_M / 2.0,
                1.5,
                BLOCK_SIZE_M + STREET_WIDTH_M / 2.0 + j as f32 * PITCH_M,
            ));
        }
    }
    out
}

/// `n` seeded receivers in the street between block rows, within
/// `extent` meters of the origin.
pub fn random_receivers(n: usize, extent: f32, seed: u64) -> Vec<Vec3> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let rows = (extent / PITCH_M).floor().max(1.0) as u32;
    (0..n)
        .map(|_| {
            let row = rng.random_range(0..rows);
            let z = BLOCK_SIZE_M
                + row as f32 * PITCH_M
                + rng.random_range(1.0f32..STREET_WIDTH_M - 1.0);
            Vec3::new(rng.random_range(0.0f32..extent), 1.5, z)
        })
        .collect()
}
