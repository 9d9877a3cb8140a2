//! Borrowed collaborators for one model evaluation.

use raypath_scene::Scene;

use crate::observer::{PathEvent, PathObserver};

/// Everything a model may consult besides the propagation context.
///
/// Built per query by the caller and borrowed for the duration of one
/// [`path_loss_db`](crate::PropagationModel::path_loss_db) call.
#[derive(Clone, Copy)]
pub struct EvalContext<'a> {
    scene: &'a dyn Scene,
    observer: Option<&'a dyn PathObserver>,
}

impl<'a> EvalContext<'a> {
    /// Evaluate against `scene` with no observer.
    pub fn new(scene: &'a dyn Scene) -> Self {
        Self {
            scene,
            observer: None,
        }
    }

    /// Attach an observer.
    pub fn with_observer(self, observer: &'a dyn PathObserver) -> Self {
        Self {
            observer: Some(observer),
            ..self
        }
    }

    /// The obstacle scene.
    pub fn scene(&self) -> &'a dyn Scene {
        self.scene
    }

    /// Returns `true` if an observer is attached.
    pub fn is_observed(&self) -> bool {
        self.observer.is_some()
    }

    /// Report a candidate to the observer, if any.
    ///
    /// The event is built lazily so unobserved evaluations pay nothing.
    pub fn emit(&self, event: impl FnOnce() -> PathEvent) {
        if let Some(obs) = self.observer {
            obs.on_path(&event());
        }
    }
}
