//! Propagation models for raypath.
//!
//! # Analytical models
//!
//! | Model | Kind | Scene-aware |
//! |-------|------|-------------|
//! | [`FreeSpaceModel`] | `FreeSpace` | no |
//! | [`LogDistanceModel`] | `LogDistance` | no |
//! | [`LogNormalShadowingModel`] | `LogNormalShadowing` | no |
//! | [`HataModel`] | `Hata` | no |
//! | [`Cost231Model`] | `Cost231` | no |
//! | [`TwoRayGroundModel`] | `TwoRayGround` | no |
//! | [`RayTracingModel`] | `RayTracing` | yes |
//!
//! The closed-form building blocks shared by all of them live in
//! [`kernels`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod free_space;
pub mod hata;
pub mod kernels;
pub mod log_distance;
pub mod ray_tracing;
pub mod shadowing;
pub mod two_ray;

pub use free_space::FreeSpaceModel;
pub use hata::{CityKind, Cost231Model, HataModel};
pub use log_distance::LogDistanceModel;
pub use ray_tracing::{CombineMode, RayTracingConfig, RayTracingModel, TraceReport};
pub use shadowing::{LogNormalShadowingBuilder, LogNormalShadowingModel};
pub use two_ray::TwoRayGroundModel;

use raypath_core::ConfigError;
use raypath_model::ModelRegistry;

/// A registry holding every model in this crate with default
/// parameters, and ray tracing configured by `ray_tracing`.
///
/// # Errors
///
/// Returns `Err` if `ray_tracing` fails validation.
pub fn standard_registry(ray_tracing: RayTracingConfig) -> Result<ModelRegistry, ConfigError> {
    Ok(ModelRegistry::new()
        .with(FreeSpaceModel)
        .with(LogDistanceModel::default())
        .with(LogNormalShadowingModel::builder().build()?)
        .with(HataModel::default())
        .with(Cost231Model::default())
        .with(TwoRayGroundModel)
        .with(RayTracingModel::new(ray_tracing)?))
}
