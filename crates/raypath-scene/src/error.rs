//! Error types for scene construction and mutation.

use raypath_core::ObstacleId;
use thiserror::Error;

/// Errors arising from scene construction or mutation.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SceneError {
    /// The obstacle ID was not issued by this scene.
    #[error("unknown obstacle {id}")]
    UnknownObstacle {
        /// The offending ID.
        id: ObstacleId,
    },
    /// A bounding box is degenerate or non-finite.
    #[error("invalid bounds: {reason}")]
    InvalidBounds {
        /// What went wrong.
        reason: String,
    },
    /// A material parameter lies outside its physical range.
    #[error("invalid material: {reason}")]
    InvalidMaterial {
        /// What went wrong.
        reason: String,
    },
    /// The layer index does not fit in a [`LayerMask`](raypath_core::LayerMask).
    #[error("layer {layer} out of range 0..32")]
    InvalidLayer {
        /// The offending layer index.
        layer: u32,
    },
}
