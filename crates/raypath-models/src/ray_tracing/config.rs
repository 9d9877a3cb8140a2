//! Ray-tracing configuration.

use raypath_core::{ConfigError, Fnv1a, LayerMask};

/// Largest accepted `cos_s^m` lobe exponent.
pub const MAX_LOBE_EXPONENT: u32 = 64;

/// How per-path contributions are summed into one loss.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CombineMode {
    /// Sum linear powers, ignoring phase. Smooth and deterministic.
    #[default]
    Incoherent,
    /// Sum complex phasors including propagation and mechanism phase.
    /// Shows small-scale fading; sensitive to sub-wavelength moves.
    Coherent,
}

/// Immutable tuning for [`RayTracingModel`](super::RayTracingModel).
///
/// Built and validated once, then shared by every evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct RayTracingConfig {
    /// Maximum reflected paths per evaluation. Default: 3.
    pub max_reflections: u32,
    /// Maximum diffracted paths per evaluation. Default: 2.
    pub max_diffractions: u32,
    /// Paths longer than this are discarded, meters. Default: 2000.
    pub max_distance_m: f32,
    /// Loss reported when no path survives, dB. Default: 200.
    pub blocked_loss_db: f32,
    /// Margin around the TX–RX box searched for obstacles, meters. Default: 30.
    pub search_margin_m: f32,
    /// Enable diffuse scattering paths. Default: false.
    pub enable_scattering: bool,
    /// Albedo for materials that do not specify one, `[0, 1]`. Default: 0.3.
    pub scatter_albedo: f32,
    /// Exponent `m` of the `cos_s^m` scattering lobe, at most
    /// [`MAX_LOBE_EXPONENT`]. Default: 2.
    pub scatter_lobe_exponent: u32,
    /// Fixed loss added to every scattered path, dB. Default: 20.
    pub scatter_base_loss_db: f32,
    /// Sample points per wall (the first is the wall's center). Default: 4.
    pub scatter_samples_per_wall: u32,
    /// Half-width of the sample jitter, meters. Default: 1.
    pub scatter_jitter_m: f32,
    /// Maximum scattered paths per evaluation. Default: 32.
    pub max_scatter_paths: u32,
    /// Seed for sample jitter. Default: 0.
    pub scatter_seed: u64,
    /// Combining policy. Default: [`CombineMode::Incoherent`].
    pub combine_mode: CombineMode,
    /// Layers considered when the context does not select any. Default: all.
    pub layers: LayerMask,
}

impl Default for RayTracingConfig {
    fn default() -> Self {
        Self {
            max_reflections: 3,
            max_diffractions: 2,
            max_distance_m: 2000.0,
            blocked_loss_db: 200.0,
            search_margin_m: 30.0,
            enable_scattering: false,
            scatter_albedo: 0.3,
            scatter_lobe_exponent: 2,
            scatter_base_loss_db: 20.0,
            scatter_samples_per_wall: 4,
            scatter_jitter_m: 1.0,
            max_scatter_paths: 32,
            scatter_seed: 0,
            combine_mode: CombineMode::Incoherent,
            layers: LayerMask::ALL,
        }
    }
}

impl RayTracingConfig {
    /// Check every field against its accepted range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("max_distance_m", self.max_distance_m)?;
        positive("blocked_loss_db", self.blocked_loss_db)?;
        non_negative("search_margin_m", self.search_margin_m)?;
        non_negative("scatter_base_loss_db", self.scatter_base_loss_db)?;
        non_negative("scatter_jitter_m", self.scatter_jitter_m)?;
        if !self.scatter_albedo.is_finite() || !(0.0..=1.0).contains(&self.scatter_albedo) {
            return Err(ConfigError::invalid(
                "scatter_albedo",
                format!("must lie in [0, 1], got {}", self.scatter_albedo),
            ));
        }
        if self.scatter_lobe_exponent > MAX_LOBE_EXPONENT {
            return Err(ConfigError::invalid(
                "scatter_lobe_exponent",
                format!(
                    "must be at most {MAX_LOBE_EXPONENT}, got {}",
                    self.scatter_lobe_exponent
                ),
            ));
        }
        if self.enable_scattering && self.scatter_samples_per_wall == 0 {
            return Err(ConfigError::invalid(
                "scatter_samples_per_wall",
                "must be at least 1 when scattering is enabled",
            ));
        }
        Ok(())
    }

    /// Hash of every field, folded into result-cache keys.
    pub fn fingerprint(&self) -> u64 {
        Fnv1a::new()
            .u32(self.max_reflections)
            .u32(self.max_diffractions)
            .f32(self.max_distance_m)
            .f32(self.blocked_loss_db)
            .f32(self.search_margin_m)
            .bool(self.enable_scattering)
            .f32(self.scatter_albedo)
            .u32(self.scatter_lobe_exponent)
            .f32(self.scatter_base_loss_db)
            .u32(self.scatter_samples_per_wall)
            .f32(self.scatter_jitter_m)
            .u32(self.max_scatter_paths)
            .u64(self.scatter_seed)
            .bool(self.combine_mode == CombineMode::Coherent)
            .u32(self.layers.0)
            .finish()
    }
}

fn positive(field: &'static str, v: f32) -> Result<(), ConfigError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be finite and positive, got {v}"),
        ))
    }
}

fn non_negative(field: &'static str, v: f32) -> Result<(), ConfigError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be finite and >= 0, got {v}"),
        ))
    }
}
