//! Core domain types for the Glide route-fitness engine.
//!
//! This crate defines the data-model contract between the engine and its
//! collaborators: the road-network [`RoadGraph`], candidate [`Route`]s, the
//! resolved [`Traversal`] view the evaluators consume, the immutable
//! [`CriterionConfig`], and the [`Criterion`] trait with its tagged
//! [`Verdict`]. Constructors validate their input and return `Result` so
//! malformed data surfaces early, before any scoring happens.
//!
//! Graph acquisition, filter management, and route generation live in
//! external collaborators; nothing here performs I/O.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod criterion;
pub mod geometry;
pub mod graph;
pub mod route;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;
pub mod traversal;

pub use config::{
    ConfigError, CriterionConfig, CriterionWeights, DrivingSide, LanePreferences, RoadPreferences,
};
pub use criterion::{Criterion, EvaluateError, MissingAttributeError, Verdict};
pub use graph::{Edge, GraphError, Node, NodeId, RoadClass, RoadGraph};
pub use route::{Route, RouteError};
pub use traversal::{InvalidRouteError, Junction, Step, Traversal};
