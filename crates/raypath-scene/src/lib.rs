//! Obstacle scenes and geometric queries for raypath.
//!
//! This crate defines the [`Scene`] trait: the obstacle-query
//! collaborator through which every path-discovery routine sees the
//! world. It also provides a concrete [`BoxScene`] of axis-aligned
//! buildings and the geometry the ray tracer builds on.
//!
//! # Geometry
//!
//! - [`geometry`]: wall-plane and edge extraction, image-method
//!   specular points, closest-point helpers.
//! - [`obstruction`]: segment clearance tests and surface snapping.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod box_scene;
pub mod error;
pub mod geometry;
pub mod obstruction;
pub mod scene;

#[cfg(test)]
pub(crate) mod compliance;

pub use box_scene::{BoxScene, Building};
pub use error::SceneError;
pub use geometry::{Edge, EdgeKind, Face, WallPlane};
pub use obstruction::SurfaceSnap;
pub use scene::{ObstacleList, Scene};
