//! Errors surfaced by the engine's own operations.
//!
//! Propagation queries never fail: they map every problem onto the
//! sentinel policy. Only construction and receiver sampling report
//! errors.

use raypath_core::ConfigError;
use thiserror::Error;

/// Failure building an engine or running a sampling batch.
#[derive(Debug, PartialEq, Error)]
pub enum EngineError {
    /// The engine or a model configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// A sampling worker thread panicked.
    #[error("sampling worker {worker} panicked")]
    WorkerPanicked {
        /// Index of the worker that panicked.
        worker: usize,
    },
    /// A sampling worker stopped before answering every receiver.
    #[error("sampling worker failed: {reason}")]
    WorkerFailed {
        /// Description of the failure.
        reason: String,
    },
}
