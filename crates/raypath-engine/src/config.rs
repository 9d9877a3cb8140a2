//! Engine configuration.
//!
//! [`EngineConfig`] is built once, checked with
//! [`validate()`](EngineConfig::validate), and then owned immutably by
//! the [`PropagationEngine`](crate::PropagationEngine).

use raypath_core::ConfigError;

/// Upper bound on receiver-sampling worker threads.
pub const MAX_SAMPLING_WORKERS: usize = 64;

// ── EngineConfig ───────────────────────────────────────────────────

/// Configuration for the cached propagation facade.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Keep computed results in the LRU cache. Default: `true`.
    pub cache_enabled: bool,
    /// Maximum number of cached results. Default: 1000.
    pub cache_capacity: usize,
    /// Retry with free-space when the selected model is missing or
    /// fails. Default: `true`.
    pub fallback_to_free_space: bool,
    /// Worker threads for receiver sampling. `None` = auto-detect
    /// (`available_parallelism`, clamped to `[1, 64]`).
    pub sampling_workers: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            cache_capacity: 1000,
            fallback_to_free_space: true,
            sampling_workers: None,
        }
    }
}

impl EngineConfig {
    /// Check structural invariants.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ZeroCacheCapacity`] if the cache is enabled with
    ///   a capacity of zero.
    /// - [`ConfigError::InvalidValue`] if `sampling_workers` is `Some(0)`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_enabled && self.cache_capacity == 0 {
            return Err(ConfigError::ZeroCacheCapacity);
        }
        if self.sampling_workers == Some(0) {
            return Err(ConfigError::invalid(
                "sampling_workers",
                "must be at least 1 when set",
            ));
        }
        Ok(())
    }

    /// Resolve the sampling worker count, applying auto-detection if `None`.
    pub fn resolved_worker_count(&self) -> usize {
        match self.sampling_workers {
            Some(n) => n.clamp(1, MAX_SAMPLING_WORKERS),
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
                .clamp(1, MAX_SAMPLING_WORKERS),
        }
    }
}
