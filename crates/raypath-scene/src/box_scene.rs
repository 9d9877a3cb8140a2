//! A scene of axis-aligned buildings.

use glam::Vec3;
use raypath_core::{Aabb, Hit, LayerMask, ObstacleId, SurfaceMaterial};

use crate::error::SceneError;
use crate::scene::{ObstacleList, Scene};

/// One axis-aligned building.
#[derive(Clone, Debug, PartialEq)]
pub struct Building {
    /// World-space bounds.
    pub bounds: Aabb,
    /// Facade material.
    pub material: SurfaceMaterial,
    /// Layer bit index in `0..32`.
    pub layer: u32,
    /// Disabled buildings are invisible to every query.
    pub enabled: bool,
}

/// Linear-scan scene of axis-aligned buildings.
///
/// Suited to the neighbourhood-sized scenes the ray tracer queries:
/// every query touches each building once and rejects it with a box
/// test. [`revision`](Self::revision) increments on every mutation so
/// callers can tell when cached results went stale.
#[derive(Clone, Debug, Default)]
pub struct BoxScene {
    buildings: Vec<Building>,
    revision: u64,
}

impl BoxScene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a building on the default layer (0).
    pub fn add_building(
        &mut self,
        bounds: Aabb,
        material: SurfaceMaterial,
    ) -> Result<ObstacleId, SceneError> {
        self.add_building_on_layer(bounds, material, 0)
    }

    /// Add a building on a specific layer.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the bounds are non-finite or have zero volume,
    /// the material is unphysical, or `layer >= 32`.
    pub fn add_building_on_layer(
        &mut self,
        bounds: Aabb,
        material: SurfaceMaterial,
        layer: u32,
    ) -> Result<ObstacleId, SceneError> {
        if !bounds.is_valid() {
            return Err(SceneError::InvalidBounds {
                reason: format!("bounds {bounds:?} are not finite and ordered"),
            });
        }
        if bounds.size().min_element() <= 0.0 {
            return Err(SceneError::InvalidBounds {
                reason: format!("bounds {bounds:?} have zero volume"),
            });
        }
        if !material.is_physical() {
            return Err(SceneError::InvalidMaterial {
                reason: format!("{material:?}"),
            });
        }
        if layer >= 32 {
            return Err(SceneError::InvalidLayer { layer });
        }
        let id = ObstacleId(self.buildings.len() as u32);
        self.buildings.push(Building {
            bounds,
            material,
            layer,
            enabled: true,
        });
        self.revision += 1;
        Ok(id)
    }

    /// Enable or disable a building.
    pub fn set_enabled(&mut self, id: ObstacleId, enabled: bool) -> Result<(), SceneError> {
        let building = self
            .buildings
            .get_mut(id.0 as usize)
            .ok_or(SceneError::UnknownObstacle { id })?;
        if building.enabled != enabled {
            building.enabled = enabled;
            self.revision += 1;
        }
        Ok(())
    }

    /// Look up a building by ID.
    pub fn building(&self, id: ObstacleId) -> Option<&Building> {
        self.buildings.get(id.0 as usize)
    }

    /// Mutation counter. Changes whenever a building is added or toggled.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of buildings, enabled or not.
    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    /// Returns `true` if no building was ever added.
    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    fn active(&self, layers: LayerMask) -> impl Iterator<Item = (ObstacleId, &Building)> {
        self.buildings
            .iter()
            .enumerate()
            .filter(move |(_, b)| b.enabled && layers.contains_layer(b.layer))
            .map(|(i, b)| (ObstacleId(i as u32), b))
    }
}

impl Scene for BoxScene {
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<Hit> {
        let dir = direction.try_normalize()?;
        if max_distance.is_nan() || max_distance <= 0.0 {
            return None;
        }
        let mut best: Option<Hit> = None;
        for (id, building) in self.active(layers) {
            let limit = best.map_or(max_distance, |h| h.distance);
            if let Some((t, normal)) = building.bounds.ray_entry(origin, dir, limit) {
                if best.is_none_or(|h| t < h.distance) {
                    best = Some(Hit {
                        point: origin + dir * t,
                        normal,
                        distance: t,
                        obstacle: id,
                    });
                }
            }
        }
        best
    }

    fn overlap_box(&self, center: Vec3, half_extents: Vec3, layers: LayerMask) -> ObstacleList {
        let query = Aabb::from_center_half_extents(center, half_extents);
        self.active(layers)
            .filter(|(_, b)| b.bounds.intersects(&query))
            .map(|(id, _)| id)
            .collect()
    }

    fn bounds(&self, id: ObstacleId) -> Option<Aabb> {
        self.building(id).map(|b| b.bounds)
    }

    fn material(&self, id: ObstacleId) -> Option<SurfaceMaterial> {
        self.building(id).map(|b| b.material)
    }

    fn obstacle_count(&self) -> usize {
        self.buildings.iter().filter(|b| b.enabled).count()
    }
}
