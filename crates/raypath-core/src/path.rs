//! Per-path results produced by ray-tracing path discovery.

use std::fmt;

/// Propagation mechanism that produced a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathMechanism {
    /// Unobstructed line of sight.
    Direct,
    /// Single specular bounce off a wall.
    Reflection,
    /// Knife-edge diffraction over a roof edge or around a corner.
    Diffraction,
    /// Diffuse scattering from a wall sample point.
    Scattering,
}

impl PathMechanism {
    /// Lower-case mechanism name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Reflection => "reflection",
            Self::Diffraction => "diffraction",
            Self::Scattering => "scattering",
        }
    }
}

impl fmt::Display for PathMechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One discovered propagation path.
///
/// Ephemeral: created by a discovery routine and consumed by the
/// combiner within the same evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathContribution {
    /// How the path was formed.
    pub mechanism: PathMechanism,
    /// Total one-way loss along this path, dB (spreading included).
    pub loss_db: f32,
    /// Total geometric length of every segment, meters.
    pub distance_m: f32,
    /// Mechanism phase offset added to the propagation phase, radians.
    pub extra_phase_rad: f32,
}

impl PathContribution {
    /// Line-of-sight contribution with zero extra phase.
    pub fn direct(loss_db: f32, distance_m: f32) -> Self {
        Self {
            mechanism: PathMechanism::Direct,
            loss_db,
            distance_m,
            extra_phase_rad: 0.0,
        }
    }

    /// Linear power fraction `10^(−loss/10)`.
    pub fn power_fraction(&self) -> f64 {
        10f64.powf(-f64::from(self.loss_db) / 10.0)
    }
}
