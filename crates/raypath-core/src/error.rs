//! Error types shared across the raypath workspace.
//!
//! Every error here is recoverable: the propagation facade converts
//! them into the "no signal" sentinel or a free-space fallback rather
//! than surfacing them to the caller.

use thiserror::Error;

use crate::context::ModelKind;

/// A [`PropagationContext`](crate::PropagationContext) violates its invariants.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ContextError {
    /// TX and RX are closer than [`MIN_DISTANCE`](crate::MIN_DISTANCE).
    #[error("distance {distance} m is below the minimum of 0.1 m")]
    DistanceTooShort {
        /// The offending separation, meters.
        distance: f32,
    },
    /// The carrier frequency is zero or negative.
    #[error("frequency must be positive, got {frequency_mhz} MHz")]
    NonPositiveFrequency {
        /// The offending frequency, MHz.
        frequency_mhz: f32,
    },
    /// The transmit power lies outside the accepted range.
    #[error("transmitter power {power_dbm} dBm outside [-50, 100] dBm")]
    PowerOutOfRange {
        /// The offending power, dBm.
        power_dbm: f32,
    },
    /// A numeric field is NaN or infinite.
    #[error("field `{field}` is not finite")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
    },
}

/// A propagation model could not produce a path loss.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ModelError {
    /// No model is registered for the requested kind.
    #[error("no model registered for `{model}`")]
    Unregistered {
        /// The requested model kind.
        model: ModelKind,
    },
    /// The context failed validation.
    #[error("invalid context: {0}")]
    InvalidContext(#[from] ContextError),
    /// The model hit an internal failure.
    #[error("model `{model}` failed: {reason}")]
    ComputationFailed {
        /// Name of the failing model.
        model: String,
        /// Human-readable description of the failure.
        reason: String,
    },
    /// The model produced NaN or an infinite loss.
    #[error("model `{model}` produced non-finite loss {value}")]
    NonFiniteResult {
        /// Name of the failing model.
        model: String,
        /// The non-finite value.
        value: f32,
    },
}

/// A configuration struct failed validation.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// A field holds a value outside its accepted range.
    #[error("invalid `{field}`: {reason}")]
    InvalidValue {
        /// Name of the offending field.
        field: &'static str,
        /// Description of the violated constraint.
        reason: String,
    },
    /// The result cache is enabled with zero capacity.
    #[error("cache_capacity must be at least 1 when the cache is enabled")]
    ZeroCacheCapacity,
}

impl ConfigError {
    /// Shorthand for [`ConfigError::InvalidValue`].
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}
