//! Core types for the raypath radio propagation engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the values that flow between the scene, the propagation models and
//! the caching facade: the per-query [`PropagationContext`], obstacle
//! identifiers and bounds, surface materials, per-path contributions,
//! and the error types shared by every layer.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod context;
pub mod error;
pub mod geom;
pub mod hash;
pub mod id;
pub mod material;
pub mod path;

pub use context::{
    ModelKind, PropagationContext, MAX_TX_POWER_DBM, MIN_DISTANCE, MIN_TX_POWER_DBM,
    SPEED_OF_LIGHT,
};
pub use error::{ConfigError, ContextError, ModelError};
pub use geom::{Aabb, Hit};
pub use hash::{quantize, quantize_vec3, Fnv1a};
pub use id::{LayerMask, ObstacleId};
pub use material::SurfaceMaterial;
pub use path::{PathContribution, PathMechanism};

pub use glam::Vec3;
