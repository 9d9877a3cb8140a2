//! Friis free-space model.

use raypath_core::{ModelError, ModelKind, PropagationContext};
use raypath_model::{EvalContext, PropagationModel};

use crate::kernels::free_space_path_loss_db;

/// Free-space spreading only. Ignores the scene.
///
/// Also serves as the engine's fallback when another model fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FreeSpaceModel;

impl PropagationModel for FreeSpaceModel {
    fn name(&self) -> &str {
        "FreeSpace"
    }

    fn kind(&self) -> ModelKind {
        ModelKind::FreeSpace
    }

    fn path_loss_db(
        &self,
        ctx: &PropagationContext,
        _env: &EvalContext<'_>,
    ) -> Result<f32, ModelError> {
        ctx.validate()?;
        Ok(free_space_path_loss_db(ctx.distance(), ctx.frequency_mhz))
    }
}
