//! Multi-criteria route fitness scoring.
//!
//! [`FitnessEngine`] consumes a road graph and a candidate route, runs the
//! criterion evaluators over the resolved traversal, and reduces their
//! verdicts to a single scalar: a weighted sum of normalised scores, or
//! negative infinity when any hard constraint is violated. The engine holds
//! no state between evaluations, so one engine can score any number of
//! routes against the same configuration, from any number of threads.
//!
//! # Examples
//!
//! ```
//! use geo::Coord;
//! use glide_core::{CriterionConfig, Edge, Node, RoadClass, RoadGraph, Route};
//! use glide_fitness::FitnessEngine;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut graph = RoadGraph::new();
//! graph.add_node(Node::new(1, Coord { x: 0.0, y: 0.0 }).with_elevation(12.0));
//! graph.add_node(Node::new(2, Coord { x: 0.009, y: 0.0 }).with_elevation(12.0));
//! graph.add_edge(Edge::new(1, 2, RoadClass::Residential, 1000.0).with_one_way())?;
//!
//! let engine = FitnessEngine::new(CriterionConfig::new(1000.0, 50.0))?;
//! let route = Route::new(vec![1, 2])?;
//!
//! // Every criterion scores its neutral 1.0 at weight 1.0.
//! assert_eq!(engine.fitness(&graph, &route)?, 11.0);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use log::{debug, warn};

use glide_core::{
    ConfigError, Criterion, CriterionConfig, EvaluateError, RoadGraph, Route, Traversal, Verdict,
};

pub mod criteria;

pub use criteria::standard_criteria;

/// Scores candidate routes against one immutable configuration.
///
/// Construction validates the configuration once; every call to
/// [`FitnessEngine::fitness`] then reuses it unchanged. For a fixed graph,
/// route, and configuration the result is exactly reproducible.
pub struct FitnessEngine {
    config: CriterionConfig,
    criteria: Vec<Box<dyn Criterion>>,
}

impl FitnessEngine {
    /// Build an engine running the standard evaluator set.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when a weight or threshold falls outside its
    /// documented range.
    pub fn new(config: CriterionConfig) -> Result<Self, ConfigError> {
        Self::with_criteria(config, criteria::standard_criteria())
    }

    /// Build an engine running a caller-supplied evaluator set.
    ///
    /// Intended for tests with synthetic criteria and for callers extending
    /// the standard set.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when a weight or threshold falls outside its
    /// documented range.
    pub fn with_criteria(
        config: CriterionConfig,
        criteria: Vec<Box<dyn Criterion>>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, criteria })
    }

    /// The configuration this engine scores against.
    #[must_use]
    pub const fn config(&self) -> &CriterionConfig {
        &self.config
    }

    /// Score `route` over `graph`.
    ///
    /// Returns the weighted sum of all enabled criterion scores, or
    /// [`f64::NEG_INFINITY`] when any enabled criterion reports the route
    /// unfit. Disabled criteria (weight zero) are skipped entirely: they
    /// contribute nothing, cannot veto, and their graph attributes are
    /// never read.
    ///
    /// # Errors
    /// Returns [`EvaluateError::InvalidRoute`] when the route cannot be
    /// resolved against the graph, and [`EvaluateError::MissingAttribute`]
    /// when an enabled criterion needs data the graph lacks. Neither is a
    /// fitness verdict; there is no meaningful partial score for malformed
    /// input.
    pub fn fitness(&self, graph: &RoadGraph, route: &Route) -> Result<f64, EvaluateError> {
        let traversal = Traversal::resolve(graph, route)?;
        let mut total = 0.0;
        for criterion in &self.criteria {
            let weight = criterion.weight(&self.config);
            if weight == 0.0 {
                continue;
            }
            match criterion.evaluate(&traversal, &self.config)? {
                Verdict::Unfit => {
                    warn!("route disqualified by criterion '{}'", criterion.name());
                    return Ok(f64::NEG_INFINITY);
                }
                Verdict::Fit(score) => {
                    debug!("criterion '{}' scored {score}", criterion.name());
                    total += weight * score;
                }
            }
        }
        Ok(total)
    }
}
