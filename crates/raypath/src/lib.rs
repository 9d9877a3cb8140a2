//! Raypath: urban radio propagation estimation.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all raypath sub-crates. For most users, adding `raypath` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use raypath::prelude::*;
//!
//! // One concrete building beside the street.
//! let mut scene = BoxScene::new();
//! scene
//!     .add_building(
//!         Aabb::new(Vec3::new(20.0, 0.0, 10.0), Vec3::new(80.0, 30.0, 12.0)),
//!         SurfaceMaterial::CONCRETE,
//!     )
//!     .unwrap();
//!
//! let engine = PropagationEngine::with_default_models(
//!     EngineConfig::default(),
//!     RayTracingConfig::default(),
//! )
//! .unwrap();
//!
//! let ctx = PropagationContext::new(
//!     Vec3::new(30.0, 5.0, 0.0),
//!     Vec3::new(70.0, 5.0, 0.0),
//!     2400.0,
//!     ModelKind::RayTracing,
//! );
//! let dbm = engine.received_power_dbm(&ctx, &scene);
//! assert!(dbm.is_finite());
//!
//! // Too-short links are "no signal", never an error.
//! let bad = ctx.with_receiver_position(Vec3::new(30.05, 5.0, 0.0));
//! assert_eq!(engine.received_power_dbm(&bad, &scene), f32::NEG_INFINITY);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `raypath-core` | Context, IDs, bounds, materials, errors |
//! | [`scene`] | `raypath-scene` | `Scene` trait, `BoxScene`, wall and edge geometry |
//! | [`model`] | `raypath-model` | `PropagationModel` trait, registry, path observer |
//! | [`models`] | `raypath-models` | Kernels, analytical models, ray tracing |
//! | [`engine`] | `raypath-engine` | Cached facade, metrics, receiver sampling |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, IDs and errors (`raypath-core`).
///
/// Contains [`types::PropagationContext`], [`types::SurfaceMaterial`] and
/// the error enums shared by every layer.
pub use raypath_core as types;

/// Obstacle scenes and geometric queries (`raypath-scene`).
///
/// Implement [`scene::Scene`] to plug in your own spatial index, or use
/// [`scene::BoxScene`].
pub use raypath_scene as scene;

/// Model trait, evaluation context and registry (`raypath-model`).
pub use raypath_model as model;

/// Path-loss kernels and bundled propagation models (`raypath-models`).
///
/// [`models::RayTracingModel`] plus the analytical references used as
/// fallbacks and baselines.
pub use raypath_models as models;

/// The cached propagation facade (`raypath-engine`).
pub use raypath_engine as engine;

/// Common imports for typical raypath usage.
///
/// ```rust
/// use raypath::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use raypath_core::{
        Aabb, LayerMask, ModelKind, ObstacleId, PathMechanism, PropagationContext,
        SurfaceMaterial, Vec3,
    };

    // Errors
    pub use raypath_core::{ConfigError, ContextError, ModelError};

    // Scene
    pub use raypath_scene::{BoxScene, Scene, SceneError};

    // Models
    pub use raypath_model::{EvalContext, ModelRegistry, PathEvent, PathObserver, PropagationModel};
    pub use raypath_models::{CombineMode, RayTracingConfig, RayTracingModel};

    // Engine
    pub use raypath_engine::{
        sample_receivers, EngineConfig, EngineError, EngineMetrics, PropagationEngine,
    };
}
