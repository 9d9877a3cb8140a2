//! The cached, validating propagation facade.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use raypath_core::{ConfigError, ModelError, PropagationContext};
use raypath_model::{EvalContext, ModelRegistry, PathObserver, PropagationModel};
use raypath_models::{standard_registry, FreeSpaceModel, RayTracingConfig};
use raypath_scene::Scene;
use tracing::{debug, warn};

use crate::cache::{CacheKey, ResultCache};
use crate::config::EngineConfig;
use crate::metrics::{Counters, EngineMetrics};

/// Received-power front door for callers.
///
/// Each query runs the same pipeline:
///
/// 1. Validate the context. Invalid input yields `f32::NEG_INFINITY`
///    ("no signal") and is never cached.
/// 2. Look the quantized context up in the result cache.
/// 3. On a miss, evaluate the model selected by `ctx.model`. If it is
///    unregistered, fails, or returns a non-finite loss, retry with
///    free-space when fallback is enabled, else yield
///    `f32::NEG_INFINITY`.
/// 4. Store whatever value was produced and return it.
///
/// Queries never panic and never return an error.
///
/// # Thread Safety
///
/// `PropagationEngine` is `Sync`. The cache sits behind a `Mutex` that
/// is held only for lookups and stores, never across a model
/// evaluation, so concurrent queries evaluate in parallel. Two threads
/// missing on the same key may both evaluate it; the results are
/// identical because models are deterministic.
pub struct PropagationEngine {
    config: EngineConfig,
    registry: ModelRegistry,
    fallback: FreeSpaceModel,
    cache: Mutex<ResultCache>,
    counters: Counters,
    observer: Option<Arc<dyn PathObserver>>,
}

impl PropagationEngine {
    /// Build an engine over an existing registry.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `config` fails [`EngineConfig::validate`].
    pub fn new(config: EngineConfig, registry: ModelRegistry) -> Result<Self, ConfigError> {
        config.validate()?;
        let cache = Mutex::new(ResultCache::new(config.cache_capacity));
        Ok(Self {
            config,
            registry,
            fallback: FreeSpaceModel,
            cache,
            counters: Counters::default(),
            observer: None,
        })
    }

    /// Build an engine with every bundled model registered.
    ///
    /// # Errors
    ///
    /// Returns `Err` if either configuration fails validation.
    pub fn with_default_models(
        config: EngineConfig,
        ray_tracing: RayTracingConfig,
    ) -> Result<Self, ConfigError> {
        Self::new(config, standard_registry(ray_tracing)?)
    }

    /// Attach an observer that receives path events from every model
    /// evaluation. Cache hits do not evaluate and so emit nothing.
    pub fn with_observer(mut self, observer: Arc<dyn PathObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Received power for `ctx` against `scene`, dBm.
    ///
    /// Returns `f32::NEG_INFINITY` for invalid input, or when the model
    /// fails and fallback is disabled.
    pub fn received_power_dbm(&self, ctx: &PropagationContext, scene: &dyn Scene) -> f32 {
        Counters::bump(&self.counters.queries);
        if let Err(err) = ctx.validate() {
            Counters::bump(&self.counters.invalid_inputs);
            warn!("rejecting {} query: {err}", ctx.model);
            return f32::NEG_INFINITY;
        }

        let key = CacheKey::new(ctx, self.registry.fingerprint(ctx.model));
        if self.config.cache_enabled {
            if let Some(value) = self.lock_cache().get_key(&key) {
                Counters::bump(&self.counters.cache_hits);
                return value;
            }
        }
        Counters::bump(&self.counters.cache_misses);

        let value = self.evaluate(ctx, scene);
        if self.config.cache_enabled {
            self.lock_cache().store_key(key, value);
        }
        value
    }

    /// One-way path loss for `ctx` against `scene`, dB.
    ///
    /// Derived from [`received_power_dbm`](Self::received_power_dbm), so
    /// it shares its cache entries. "No signal" maps to `f32::INFINITY`.
    pub fn path_loss_db(&self, ctx: &PropagationContext, scene: &dyn Scene) -> f32 {
        let received = self.received_power_dbm(ctx, scene);
        if received == f32::NEG_INFINITY {
            return f32::INFINITY;
        }
        ctx.path_loss_from_received(received)
    }

    fn evaluate(&self, ctx: &PropagationContext, scene: &dyn Scene) -> f32 {
        let mut env = EvalContext::new(scene);
        if let Some(observer) = &self.observer {
            env = env.with_observer(observer.as_ref());
        }

        let err = match self.run_model(ctx, &env) {
            Ok(loss) => return ctx.received_power_dbm(loss),
            Err(err) => err,
        };
        Counters::bump(&self.counters.model_failures);

        if !self.config.fallback_to_free_space {
            warn!("{} evaluation failed with fallback disabled: {err}", ctx.model);
            return f32::NEG_INFINITY;
        }
        warn!("{} evaluation failed, falling back to free-space: {err}", ctx.model);
        Counters::bump(&self.counters.fallbacks);
        match self.fallback.path_loss_db(ctx, &env) {
            Ok(loss) => ctx.received_power_dbm(loss),
            Err(err) => {
                warn!("free-space fallback failed: {err}");
                f32::NEG_INFINITY
            }
        }
    }

    fn run_model(&self, ctx: &PropagationContext, env: &EvalContext<'_>) -> Result<f32, ModelError> {
        let model = self
            .registry
            .get(ctx.model)
            .ok_or(ModelError::Unregistered { model: ctx.model })?;
        let loss = model.path_loss_db(ctx, env)?;
        if !loss.is_finite() {
            return Err(ModelError::NonFiniteResult {
                model: model.name().to_string(),
                value: loss,
            });
        }
        Ok(loss)
    }

    fn lock_cache(&self) -> MutexGuard<'_, ResultCache> {
        // Every cache mutation completes under the guard; poison carries no torn state.
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drop every cached result. Call after the scene changes.
    pub fn clear_cache(&self) {
        let mut cache = self.lock_cache();
        debug!("clearing {} cached results", cache.len());
        cache.clear();
    }

    /// Number of cached results.
    pub fn cache_len(&self) -> usize {
        self.lock_cache().len()
    }

    /// Snapshot of the query counters.
    pub fn metrics(&self) -> EngineMetrics {
        let evictions = self.lock_cache().evictions();
        self.counters.snapshot(evictions)
    }

    /// The model registry.
    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl fmt::Debug for PropagationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropagationEngine")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("cache_len", &self.cache_len())
            .field("observed", &self.observer.is_some())
            .finish()
    }
}
