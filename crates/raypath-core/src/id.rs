//! Strongly-typed identifiers for scene obstacles and geometry layers.

use std::fmt;

/// Identifies an obstacle (building) within a scene.
///
/// Scenes assign sequential IDs at insertion. `ObstacleId(n)` is only
/// meaningful for the scene that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObstacleId(pub u32);

impl fmt::Display for ObstacleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ObstacleId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Bit set of geometry layers that participate in occlusion tests.
///
/// Each obstacle lives on exactly one layer (a bit index in `0..32`).
/// A query only sees obstacles whose layer bit is set in the mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Every layer participates.
    pub const ALL: LayerMask = LayerMask(u32::MAX);
    /// No layer participates; every query against it is empty.
    pub const NONE: LayerMask = LayerMask(0);
    /// The layer buildings are placed on when none is specified.
    pub const DEFAULT: LayerMask = LayerMask(1);

    /// Mask containing the single layer `index`.
    ///
    /// Indices outside `0..32` produce an empty mask.
    pub fn layer(index: u32) -> Self {
        Self(1u32.checked_shl(index).unwrap_or(0))
    }

    /// Whether the layer at bit `index` is selected.
    pub fn contains_layer(self, index: u32) -> bool {
        self.0 & Self::layer(index).0 != 0
    }

    /// Union of two masks.
    pub fn union(self, other: LayerMask) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns `true` if no layer is selected.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

impl fmt::Display for LayerMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}
