//! Facade crate for the Glide route-fitness engine.
//!
//! Re-exports the domain model from `glide-core` and the scoring engine
//! from `glide-fitness` so callers can depend on a single crate.

#![forbid(unsafe_code)]

pub use glide_core::{
    ConfigError, Criterion, CriterionConfig, CriterionWeights, DrivingSide, Edge, EvaluateError,
    GraphError, InvalidRouteError, Junction, LanePreferences, MissingAttributeError, Node, NodeId,
    RoadClass, RoadGraph, RoadPreferences, Route, RouteError, Step, Traversal, Verdict,
};

pub use glide_fitness::{FitnessEngine, standard_criteria};

#[cfg(feature = "test-support")]
pub use glide_core::test_support;
