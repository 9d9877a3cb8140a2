//! Cached propagation facade for raypath.
//!
//! [`PropagationEngine`] is what callers talk to. It validates each
//! [`PropagationContext`](raypath_core::PropagationContext), serves
//! repeated queries from a quantized LRU [`ResultCache`], dispatches
//! misses to the model registry, and applies the free-space fallback
//! policy when a model is missing or fails. Invalid input and
//! unrecoverable failures surface as `f32::NEG_INFINITY` dBm, never as
//! panics or errors.
//!
//! [`sample_receivers`] fans a receiver grid out to worker threads for
//! coverage maps.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod batch;
pub mod cache;
pub mod config;
pub mod error;
pub mod facade;
pub mod metrics;

pub use batch::sample_receivers;
pub use cache::{CacheKey, ResultCache};
pub use config::EngineConfig;
pub use error::EngineError;
pub use facade::PropagationEngine;
pub use metrics::EngineMetrics;
