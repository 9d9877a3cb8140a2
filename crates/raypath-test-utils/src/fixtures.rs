//! Reusable model test fixtures.
//!
//! - [`ConstModel`]: returns a fixed loss and counts calls.
//! - [`FailingModel`]: fails deterministically after N calls.

use std::sync::atomic::{AtomicUsize, Ordering};

use raypath_core::{ModelError, ModelKind, PropagationContext};
use raypath_model::{EvalContext, PropagationModel};

/// Returns a fixed loss for every context and counts calls.
///
/// Useful for cache tests: a hit leaves the counter untouched. A
/// non-finite `loss_db` exercises the engine's output checks.
pub struct ConstModel {
    pub kind: ModelKind,
    pub loss_db: f32,
    pub fingerprint: u64,
    call_count: AtomicUsize,
}

impl ConstModel {
    pub fn new(kind: ModelKind, loss_db: f32) -> Self {
        Self {
            kind,
            loss_db,
            fingerprint: 0,
            call_count: AtomicUsize::new(0),
        }
    }

    /// Builder-style fingerprint override.
    pub fn with_fingerprint(mut self, fingerprint: u64) -> Self {
        self.fingerprint = fingerprint;
        self
    }

    /// How many times `path_loss_db()` has been called.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl PropagationModel for ConstModel {
    fn name(&self) -> &str {
        "Const"
    }

    fn kind(&self) -> ModelKind {
        self.kind
    }

    fn path_loss_db(
        &self,
        _ctx: &PropagationContext,
        _env: &EvalContext<'_>,
    ) -> Result<f32, ModelError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        Ok(self.loss_db)
    }

    fn cache_fingerprint(&self) -> u64 {
        self.fingerprint
    }
}

/// Fails deterministically after a configurable number of successful calls.
///
/// Successful calls return `loss_db`. Uses `AtomicUsize` for the call
/// counter so it satisfies `Sync`.
pub struct FailingModel {
    pub kind: ModelKind,
    pub loss_db: f32,
    pub succeed_count: usize,
    call_count: AtomicUsize,
}

impl FailingModel {
    /// Create a model that succeeds `succeed_count` times then fails.
    pub fn new(kind: ModelKind, succeed_count: usize) -> Self {
        Self {
            kind,
            loss_db: 100.0,
            succeed_count,
            call_count: AtomicUsize::new(0),
        }
    }

    /// How many times `path_loss_db()` has been called.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Reset the call counter.
    pub fn reset(&self) {
        self.call_count.store(0, Ordering::Relaxed);
    }
}

impl PropagationModel for FailingModel {
    fn name(&self) -> &str {
        "Failing"
    }

    fn kind(&self) -> ModelKind {
        self.kind
    }

    fn path_loss_db(
        &self,
        _ctx: &PropagationContext,
        _env: &EvalContext<'_>,
    ) -> Result<f32, ModelError> {
        let n = self.call_count.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            return Err(ModelError::ComputationFailed {
                model: self.name().to_string(),
                reason: format!(
                    "deliberate failure after {} successful calls",
                    self.succeed_count
                ),
            });
        }
        Ok(self.loss_db)
    }
}
