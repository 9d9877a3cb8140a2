//! Propagation model trait, evaluation context and model registry.
//!
//! A [`PropagationModel`] turns a [`PropagationContext`] into a one-way
//! path loss. Models are stateless with respect to queries: everything
//! a single evaluation may consult beyond the context is carried by the
//! borrowed [`EvalContext`], namely the obstacle [`Scene`] and an
//! optional [`PathObserver`].
//!
//! [`PropagationContext`]: raypath_core::PropagationContext
//! [`Scene`]: raypath_scene::Scene

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod context;
pub mod model;
pub mod observer;
pub mod registry;

pub use context::EvalContext;
pub use model::PropagationModel;
pub use observer::{PathEvent, PathObserver, PathOutcome, PathPoints, RejectReason};
pub use registry::ModelRegistry;
