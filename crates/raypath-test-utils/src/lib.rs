//! Test utilities and mock types for raypath development.
//!
//! Provides canned obstacle scenes and links, a [`RecordingObserver`]
//! that captures path events, and mock models in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::Mutex;

use glam::Vec3;
use raypath_core::{Aabb, ModelKind, PathMechanism, PropagationContext, SurfaceMaterial};
use raypath_model::{PathEvent, PathObserver};
use raypath_scene::BoxScene;

/// Reference carrier used by most scenarios, MHz.
pub const TEST_FREQUENCY_MHZ: f32 = 2400.0;

fn building(scene: &mut BoxScene, min: [f32; 3], max: [f32; 3], material: SurfaceMaterial) {
    scene
        .add_building(Aabb::new(Vec3::from(min), Vec3::from(max)), material)
        .expect("fixture building is valid");
}

/// A scene with nothing in it.
pub fn empty_scene() -> BoxScene {
    BoxScene::new()
}

/// One concrete wall parallel to the X axis, spanning x 20..80,
/// 30 m tall, occupying z 10..12. Pairs with [`street_link`].
pub fn single_wall_scene() -> BoxScene {
    let mut s = BoxScene::new();
    building(&mut s, [20.0, 0.0, 10.0], [80.0, 30.0, 12.0], SurfaceMaterial::CONCRETE);
    s
}

/// A slab at x 49..51 extending 5 km in Y and Z: nothing gets around
/// it within the default 2 km range. Pairs with [`reference_link`].
pub fn blocking_wall_scene() -> BoxScene {
    let mut s = BoxScene::new();
    building(
        &mut s,
        [49.0, -5000.0, -5000.0],
        [51.0, 5000.0, 5000.0],
        SurfaceMaterial::CONCRETE,
    );
    s
}

/// A 15 m tall block across the X axis between x 45 and 55.
/// The direct path of [`rooftop_link`] passes through it.
pub fn low_block_scene() -> BoxScene {
    let mut s = BoxScene::new();
    building(&mut s, [45.0, 0.0, -20.0], [55.0, 15.0, 20.0], SurfaceMaterial::BRICK);
    s
}

/// Two facing rows of buildings forming a street along X, with the
/// street between z = -10 and z = 10.
pub fn street_canyon_scene() -> BoxScene {
    let mut s = BoxScene::new();
    for i in 0..4 {
        let x0 = i as f32 * 30.0;
        building(&mut s, [x0, 0.0, 10.0], [x0 + 25.0, 24.0, 25.0], SurfaceMaterial::CONCRETE);
        building(&mut s, [x0, 0.0, -25.0], [x0 + 25.0, 18.0, -10.0], SurfaceMaterial::BRICK);
    }
    s
}

/// TX at (0, 10, 0), RX at (100, 1.5, 0), 2400 MHz: free-space loss
/// of about 80.07 dB.
pub fn reference_link(model: ModelKind) -> PropagationContext {
    PropagationContext::new(
        Vec3::new(0.0, 10.0, 0.0),
        Vec3::new(100.0, 1.5, 0.0),
        TEST_FREQUENCY_MHZ,
        model,
    )
}

/// Link running alongside [`single_wall_scene`] with a specular
/// bounce at (50, 5, 10).
pub fn street_link(model: ModelKind) -> PropagationContext {
    PropagationContext::new(
        Vec3::new(30.0, 5.0, 0.0),
        Vec3::new(70.0, 5.0, 0.0),
        TEST_FREQUENCY_MHZ,
        model,
    )
}

/// Link climbing from 8 m to 16 m over [`low_block_scene`]: the near
/// roof edge at x = 45 is visible from both ends, the far one at x = 55
/// is hidden from TX by the block itself.
pub fn rooftop_link(model: ModelKind) -> PropagationContext {
    PropagationContext::new(
        Vec3::new(0.0, 8.0, 0.0),
        Vec3::new(100.0, 16.0, 0.0),
        TEST_FREQUENCY_MHZ,
        model,
    )
}

/// Observer that keeps every event it sees.
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<PathEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every recorded event.
    pub fn events(&self) -> Vec<PathEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of accepted events for `mechanism`.
    pub fn accepted(&self, mechanism: PathMechanism) -> usize {
        self.events()
            .iter()
            .filter(|e| e.mechanism == mechanism && e.is_accepted())
            .count()
    }

    /// Number of rejected events for `mechanism`.
    pub fn rejected(&self, mechanism: PathMechanism) -> usize {
        self.events()
            .iter()
            .filter(|e| e.mechanism == mechanism && !e.is_accepted())
            .count()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

impl PathObserver for RecordingObserver {
    fn on_path(&self, event: &PathEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event.clone());
    }
}
