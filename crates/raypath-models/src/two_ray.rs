//! Two-ray ground reflection model.

use std::f32::consts::PI;

use raypath_core::{ModelError, ModelKind, PropagationContext};
use raypath_model::{EvalContext, PropagationModel};

use crate::kernels::free_space_path_loss_db;

const MIN_HEIGHT_M: f32 = 0.1;

/// Free space up to the crossover distance `d_c = 4π·h_t·h_r/λ`, then
/// the flat-earth approximation `40·log10 d − 20·log10 h_t − 20·log10 h_r`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TwoRayGroundModel;

impl TwoRayGroundModel {
    /// Crossover distance for `ctx`, meters.
    pub fn crossover_distance_m(ctx: &PropagationContext) -> f32 {
        let ht = ctx.transmitter_height.max(MIN_HEIGHT_M);
        let hr = ctx.receiver_height.max(MIN_HEIGHT_M);
        4.0 * PI * ht * hr / ctx.wavelength_m()
    }
}

impl PropagationModel for TwoRayGroundModel {
    fn name(&self) -> &str {
        "TwoRayGround"
    }

    fn kind(&self) -> ModelKind {
        ModelKind::TwoRayGround
    }

    fn path_loss_db(
        &self,
        ctx: &PropagationContext,
        _env: &EvalContext<'_>,
    ) -> Result<f32, ModelError> {
        ctx.validate()?;
        let d = ctx.distance();
        if d < Self::crossover_distance_m(ctx) {
            return Ok(free_space_path_loss_db(d, ctx.frequency_mhz));
        }
        let ht = ctx.transmitter_height.max(MIN_HEIGHT_M);
        let hr = ctx.receiver_height.max(MIN_HEIGHT_M);
        Ok(40.0 * d.log10() - 20.0 * ht.log10() - 20.0 * hr.log10())
    }
}
