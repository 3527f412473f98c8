//! The criterion contract shared by all evaluators.
//!
//! Each criterion scores one dimension of route quality. Scores are
//! normalised before the aggregator ever sees them, so the weighted sum
//! stays commensurable across criteria measured in different units. Hard
//! constraints are expressed through [`Verdict::Unfit`] rather than a
//! sentinel score, keeping the veto path explicit.

use thiserror::Error;

use crate::config::CriterionConfig;
use crate::traversal::{InvalidRouteError, Traversal};

/// The tagged outcome of one criterion evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    /// The route passes this criterion with a normalised score.
    Fit(f64),
    /// The route violates a hard constraint and must be disqualified.
    Unfit,
}

impl Verdict {
    /// The score when fit.
    #[must_use]
    pub const fn score(self) -> Option<f64> {
        match self {
            Self::Fit(score) => Some(score),
            Self::Unfit => None,
        }
    }

    /// Whether this verdict disqualifies the route.
    #[must_use]
    pub const fn is_unfit(self) -> bool {
        matches!(self, Self::Unfit)
    }
}

/// An enabled criterion needed a graph attribute the data does not carry.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("criterion '{criterion}' requires the '{attribute}' attribute, which is missing from the graph")]
pub struct MissingAttributeError {
    /// Name of the criterion that needed the attribute.
    pub criterion: &'static str,
    /// Name of the missing attribute.
    pub attribute: &'static str,
}

/// Errors surfaced by a fitness evaluation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvaluateError {
    /// The route could not be resolved against the graph.
    #[error(transparent)]
    InvalidRoute(#[from] InvalidRouteError),
    /// The graph lacks an attribute an enabled criterion requires.
    #[error(transparent)]
    MissingAttribute(#[from] MissingAttributeError),
}

/// One independently computed, weighted dimension of route quality.
///
/// Implementations must be pure: no shared mutable state, no I/O, and a
/// result that depends only on the traversal and the configuration. The
/// aggregator may therefore run criteria in any order, or in parallel, and
/// the reduction stays deterministic.
///
/// Scores must be normalised to `0.0..=1.0` before they are returned; the
/// aggregator performs no re-normalisation.
///
/// # Examples
/// ```
/// use glide_core::{Criterion, CriterionConfig, EvaluateError, Traversal, Verdict};
///
/// struct AlwaysFit;
///
/// impl Criterion for AlwaysFit {
///     fn name(&self) -> &'static str {
///         "always-fit"
///     }
///
///     fn weight(&self, _config: &CriterionConfig) -> f64 {
///         1.0
///     }
///
///     fn evaluate(
///         &self,
///         _traversal: &Traversal<'_>,
///         _config: &CriterionConfig,
///     ) -> Result<Verdict, EvaluateError> {
///         Ok(Verdict::Fit(1.0))
///     }
/// }
/// ```
pub trait Criterion: Send + Sync {
    /// Stable name used in errors and logging.
    fn name(&self) -> &'static str;

    /// The weight this criterion carries under `config`; zero disables it.
    fn weight(&self, config: &CriterionConfig) -> f64;

    /// Score the traversal, or veto it.
    ///
    /// # Errors
    /// Returns [`EvaluateError::MissingAttribute`] when the graph lacks data
    /// this criterion requires.
    fn evaluate(
        &self,
        traversal: &Traversal<'_>,
        config: &CriterionConfig,
    ) -> Result<Verdict, EvaluateError>;
}
