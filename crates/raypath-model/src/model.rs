//! The [`PropagationModel`] trait.

use std::sync::Arc;

use raypath_core::{ModelError, ModelKind, PropagationContext};

use crate::context::EvalContext;

/// Estimates the one-way path loss of a radio link.
///
/// # Contract
///
/// - `path_loss_db` MUST be deterministic: the same context, scene and
///   configuration yield the same loss.
/// - `&self`: models hold only immutable configuration. Anything that
///   varies per query arrives through the arguments.
/// - Degenerate geometry is not an error. Only internal failures are
///   reported as [`ModelError`].
///
/// # Object safety
///
/// This trait is object-safe; the registry stores models as
/// `Box<dyn PropagationModel>`.
///
/// # Examples
///
/// ```
/// use raypath_core::{ModelError, ModelKind, PropagationContext, Vec3};
/// use raypath_model::{EvalContext, PropagationModel};
/// use raypath_scene::BoxScene;
///
/// struct Fixed(f32);
///
/// impl PropagationModel for Fixed {
///     fn name(&self) -> &str { "fixed" }
///     fn kind(&self) -> ModelKind { ModelKind::FreeSpace }
///     fn path_loss_db(
///         &self,
///         _ctx: &PropagationContext,
///         _env: &EvalContext<'_>,
///     ) -> Result<f32, ModelError> {
///         Ok(self.0)
///     }
/// }
///
/// let scene = BoxScene::new();
/// let ctx = PropagationContext::new(Vec3::ZERO, Vec3::X * 10.0, 900.0, ModelKind::FreeSpace);
/// let dbm = Fixed(60.0).received_power_dbm(&ctx, &EvalContext::new(&scene)).unwrap();
/// assert_eq!(dbm, -40.0);
/// ```
pub trait PropagationModel: Send + Sync {
    /// Human-readable name for logs and error reporting.
    fn name(&self) -> &str;

    /// The selector this model answers to.
    fn kind(&self) -> ModelKind;

    /// One-way path loss for `ctx`, dB.
    fn path_loss_db(&self, ctx: &PropagationContext, env: &EvalContext<'_>)
        -> Result<f32, ModelError>;

    /// Hash of every tuning parameter that affects results.
    ///
    /// Folded into result-cache keys so that two differently configured
    /// models never share entries. Default: `0` (no tuning).
    fn cache_fingerprint(&self) -> u64 {
        0
    }

    /// Received power for `ctx`, dBm.
    fn received_power_dbm(
        &self,
        ctx: &PropagationContext,
        env: &EvalContext<'_>,
    ) -> Result<f32, ModelError> {
        let loss = self.path_loss_db(ctx, env)?;
        Ok(ctx.received_power_dbm(loss))
    }
}

/// Shared models can be registered while the caller keeps a handle.
impl<M: PropagationModel + ?Sized> PropagationModel for Arc<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn kind(&self) -> ModelKind {
        (**self).kind()
    }

    fn path_loss_db(
        &self,
        ctx: &PropagationContext,
        env: &EvalContext<'_>,
    ) -> Result<f32, ModelError> {
        (**self).path_loss_db(ctx, env)
    }

    fn cache_fingerprint(&self) -> u64 {
        (**self).cache_fingerprint()
    }
}
