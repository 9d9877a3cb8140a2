//! Model lookup by [`ModelKind`].

use std::fmt;

use indexmap::IndexMap;
use raypath_core::{ModelError, ModelKind, PropagationContext};

use crate::context::EvalContext;
use crate::model::PropagationModel;

/// Maps each [`ModelKind`] to at most one model.
///
/// Iteration follows registration order.
#[derive(Default)]
pub struct ModelRegistry {
    models: IndexMap<ModelKind, Box<dyn PropagationModel>>,
}

impl ModelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model under its own [`kind`](PropagationModel::kind).
    ///
    /// Returns the model previously registered for that kind, if any.
    pub fn register(
        &mut self,
        model: Box<dyn PropagationModel>,
    ) -> Option<Box<dyn PropagationModel>> {
        self.models.insert(model.kind(), model)
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, model: impl PropagationModel + 'static) -> Self {
        self.register(Box::new(model));
        self
    }

    /// Look up the model for `kind`.
    pub fn get(&self, kind: ModelKind) -> Option<&dyn PropagationModel> {
        self.models.get(&kind).map(|m| m.as_ref())
    }

    /// Returns `true` if a model is registered for `kind`.
    pub fn contains(&self, kind: ModelKind) -> bool {
        self.models.contains_key(&kind)
    }

    /// Registered kinds, in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = ModelKind> + '_ {
        self.models.keys().copied()
    }

    /// Number of registered models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Cache fingerprint of the model registered for `kind`, or `0`.
    pub fn fingerprint(&self, kind: ModelKind) -> u64 {
        self.get(kind).map_or(0, |m| m.cache_fingerprint())
    }

    /// Evaluate `ctx` with the model selected by `ctx.model`.
    ///
    /// # Errors
    ///
    /// [`ModelError::Unregistered`] if no model handles `ctx.model`;
    /// otherwise whatever the model reports.
    pub fn path_loss_db(
        &self,
        ctx: &PropagationContext,
        env: &EvalContext<'_>,
    ) -> Result<f32, ModelError> {
        let model = self
            .get(ctx.model)
            .ok_or(ModelError::Unregistered { model: ctx.model })?;
        model.path_loss_db(ctx, env)
    }
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.models.iter().map(|(k, m)| (k, m.name())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raypath_core::Vec3;
    use raypath_scene::BoxScene;

    struct Fixed {
        kind: ModelKind,
        loss: f32,
    }

    impl PropagationModel for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }
        fn kind(&self) -> ModelKind {
            self.kind
        }
        fn path_loss_db(
            &self,
            _ctx: &PropagationContext,
            _env: &EvalContext<'_>,
        ) -> Result<f32, ModelError> {
            Ok(self.loss)
        }
        fn cache_fingerprint(&self) -> u64 {
            self.loss.to_bits() as u64
        }
    }

    fn ctx(model: ModelKind) -> PropagationContext {
        PropagationContext::new(Vec3::ZERO, Vec3::new(50.0, 0.0, 0.0), 900.0, model)
    }

    #[test]
    fn dispatches_by_kind() {
        let reg = ModelRegistry::new()
            .with(Fixed {
                kind: ModelKind::FreeSpace,
                loss: 10.0,
            })
            .with(Fixed {
                kind: ModelKind::Hata,
                loss: 20.0,
            });
        let scene = BoxScene::new();
        let env = EvalContext::new(&scene);
        assert_eq!(reg.path_loss_db(&ctx(ModelKind::FreeSpace), &env), Ok(10.0));
        assert_eq!(reg.path_loss_db(&ctx(ModelKind::Hata), &env), Ok(20.0));
        assert_eq!(
            reg.kinds().collect::<Vec<_>>(),
            vec![ModelKind::FreeSpace, ModelKind::Hata]
        );
    }

    #[test]
    fn unregistered_kind_is_an_error() {
        let reg = ModelRegistry::new();
        let scene = BoxScene::new();
        assert_eq!(
            reg.path_loss_db(&ctx(ModelKind::RayTracing), &EvalContext::new(&scene)),
            Err(ModelError::Unregistered {
                model: ModelKind::RayTracing
            })
        );
        assert!(reg.is_empty());
        assert_eq!(reg.fingerprint(ModelKind::RayTracing), 0);
    }

    #[test]
    fn register_replaces_and_returns_previous() {
        let mut reg = ModelRegistry::new();
        assert!(reg
            .register(Box::new(Fixed {
                kind: ModelKind::FreeSpace,
                loss: 1.0
            }))
            .is_none());
        let old = reg
            .register(Box::new(Fixed {
                kind: ModelKind::FreeSpace,
                loss: 2.0,
            }))
            .unwrap();
        assert_eq!(old.cache_fingerprint(), 1.0f32.to_bits() as u64);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.fingerprint(ModelKind::FreeSpace), 2.0f32.to_bits() as u64);
        assert!(format!("{reg:?}").contains("fixed"));
    }
}
