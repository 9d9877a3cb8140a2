//! Log-distance path loss.

use raypath_core::{ConfigError, Fnv1a, ModelError, ModelKind, PropagationContext, MIN_DISTANCE};
use raypath_model::{EvalContext, PropagationModel};

use crate::kernels::free_space_path_loss_db;

/// Free-space loss out to a reference distance `d0`, then
/// `10·n·log10(d/d0)` beyond it.
///
/// Links shorter than `d0` fall back to pure free-space loss.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogDistanceModel {
    exponent: f32,
    reference_distance_m: f32,
}

impl LogDistanceModel {
    /// Create a model with path-loss exponent `n` and reference distance `d0`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `exponent` is not finite and positive, or if
    /// `reference_distance_m` is not finite or below [`MIN_DISTANCE`].
    pub fn new(exponent: f32, reference_distance_m: f32) -> Result<Self, ConfigError> {
        if !exponent.is_finite() || exponent <= 0.0 {
            return Err(ConfigError::invalid(
                "exponent",
                format!("must be finite and positive, got {exponent}"),
            ));
        }
        if !reference_distance_m.is_finite() || reference_distance_m < MIN_DISTANCE {
            return Err(ConfigError::invalid(
                "reference_distance_m",
                format!("must be at least {MIN_DISTANCE} m, got {reference_distance_m}"),
            ));
        }
        Ok(Self {
            exponent,
            reference_distance_m,
        })
    }

    /// Path-loss exponent `n`.
    pub fn exponent(&self) -> f32 {
        self.exponent
    }

    /// Reference distance `d0`, meters.
    pub fn reference_distance_m(&self) -> f32 {
        self.reference_distance_m
    }

    /// Loss for an already validated context.
    pub(crate) fn loss_unchecked(&self, ctx: &PropagationContext) -> f32 {
        let d = ctx.distance();
        let d0 = self.reference_distance_m;
        if d <= d0 {
            return free_space_path_loss_db(d, ctx.frequency_mhz);
        }
        let toward_rx = (ctx.receiver_position - ctx.transmitter_position) / d;
        let reference = ctx.with_receiver_position(ctx.transmitter_position + toward_rx * d0);
        let pl0 = free_space_path_loss_db(reference.distance(), reference.frequency_mhz);
        pl0 + 10.0 * self.exponent * (d / d0).log10()
    }

    pub(crate) fn hash_into(&self, h: Fnv1a) -> Fnv1a {
        h.f32(self.exponent).f32(self.reference_distance_m)
    }
}

impl Default for LogDistanceModel {
    /// Urban exponent `n = 3`, `d0 = 1 m`.
    fn default() -> Self {
        Self {
            exponent: 3.0,
            reference_distance_m: 1.0,
        }
    }
}

impl PropagationModel for LogDistanceModel {
    fn name(&self) -> &str {
        "LogDistance"
    }

    fn kind(&self) -> ModelKind {
        ModelKind::LogDistance
    }

    fn path_loss_db(
        &self,
        ctx: &PropagationContext,
        _env: &EvalContext<'_>,
    ) -> Result<f32, ModelError> {
        ctx.validate()?;
        Ok(self.loss_unchecked(ctx))
    }

    fn cache_fingerprint(&self) -> u64 {
        self.hash_into(Fnv1a::new()).finish()
    }
}
