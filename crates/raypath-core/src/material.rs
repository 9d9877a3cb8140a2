//! Electromagnetic surface descriptors for obstacles.

use num_complex::Complex64;

use crate::context::SPEED_OF_LIGHT;

/// Electrical and roughness properties of a building surface.
///
/// The reflection coefficient is derived from the complex relative
/// permittivity `ε_c = ε_r − j·60·λ·σ` unless `reflection_override`
/// pins it to a fixed magnitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceMaterial {
    /// Real relative permittivity `ε_r` (≥ 1).
    pub relative_permittivity: f32,
    /// Conductivity `σ`, S/m.
    pub conductivity_s_per_m: f32,
    /// Diffuse scattering albedo `S` in `[0, 1]`. `None` uses the
    /// ray tracer's configured default.
    pub scatter_albedo: Option<f32>,
    /// RMS surface height deviation `σ_h`, meters.
    pub roughness_sigma_m: f32,
    /// Fixed reflection coefficient magnitude, bypassing the Fresnel
    /// computation.
    pub reflection_override: Option<f32>,
}

impl SurfaceMaterial {
    /// Poured concrete.
    pub const CONCRETE: SurfaceMaterial = SurfaceMaterial {
        relative_permittivity: 5.31,
        conductivity_s_per_m: 0.0326,
        scatter_albedo: None,
        roughness_sigma_m: 0.005,
        reflection_override: None,
    };

    /// Fired brick.
    pub const BRICK: SurfaceMaterial = SurfaceMaterial {
        relative_permittivity: 3.75,
        conductivity_s_per_m: 0.038,
        scatter_albedo: None,
        roughness_sigma_m: 0.01,
        reflection_override: None,
    };

    /// Float glass.
    pub const GLASS: SurfaceMaterial = SurfaceMaterial {
        relative_permittivity: 6.27,
        conductivity_s_per_m: 0.0043,
        scatter_albedo: None,
        roughness_sigma_m: 0.0,
        reflection_override: None,
    };

    /// Sheet metal cladding.
    pub const METAL: SurfaceMaterial = SurfaceMaterial {
        relative_permittivity: 1.0,
        conductivity_s_per_m: 1.0e7,
        scatter_albedo: None,
        roughness_sigma_m: 0.001,
        reflection_override: None,
    };

    /// Timber.
    pub const WOOD: SurfaceMaterial = SurfaceMaterial {
        relative_permittivity: 1.99,
        conductivity_s_per_m: 0.0047,
        scatter_albedo: None,
        roughness_sigma_m: 0.003,
        reflection_override: None,
    };

    /// Material with a fixed reflection coefficient magnitude.
    pub fn with_fixed_reflection(magnitude: f32) -> Self {
        Self {
            reflection_override: Some(magnitude),
            ..Self::CONCRETE
        }
    }

    /// Returns `true` if every parameter lies in its physical range.
    pub fn is_physical(&self) -> bool {
        let albedo_ok = self
            .scatter_albedo
            .is_none_or(|s| s.is_finite() && (0.0..=1.0).contains(&s));
        let override_ok = self
            .reflection_override
            .is_none_or(|g| g.is_finite() && (0.0..=1.0).contains(&g));
        self.relative_permittivity.is_finite()
            && self.relative_permittivity >= 1.0
            && self.conductivity_s_per_m.is_finite()
            && self.conductivity_s_per_m >= 0.0
            && self.roughness_sigma_m.is_finite()
            && self.roughness_sigma_m >= 0.0
            && albedo_ok
            && override_ok
    }

    /// Magnitude of the smooth-surface Fresnel reflection coefficient
    /// (perpendicular polarization) at `frequency_mhz`.
    ///
    /// `cos_incidence` is the cosine of the angle between the incoming
    /// ray and the surface normal; it is clamped to `[0, 1]`.
    pub fn reflection_coefficient(&self, frequency_mhz: f32, cos_incidence: f32) -> f32 {
        if let Some(g) = self.reflection_override {
            return g.clamp(0.0, 1.0);
        }
        let freq_hz = f64::from(frequency_mhz.max(f32::EPSILON)) * 1e6;
        let wavelength = SPEED_OF_LIGHT / freq_hz;
        let eps = Complex64::new(
            f64::from(self.relative_permittivity),
            -60.0 * wavelength * f64::from(self.conductivity_s_per_m),
        );

        let cos_t = f64::from(cos_incidence.clamp(0.0, 1.0));
        let sin2 = 1.0 - cos_t * cos_t;
        let root = (eps - sin2).sqrt();
        let gamma = (cos_t - root) / (cos_t + root);
        let mag = gamma.norm();
        if mag.is_finite() {
            mag.clamp(0.0, 1.0) as f32
        } else {
            1.0
        }
    }
}

impl Default for SurfaceMaterial {
    fn default() -> Self {
        Self::CONCRETE
    }
}
