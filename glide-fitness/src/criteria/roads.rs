//! Criteria derived from per-edge road attributes.

use glide_core::{Criterion, CriterionConfig, EvaluateError, Traversal, Verdict};

use super::{length_fraction, length_weighted_mean};

/// Length-weighted road-class preference.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoadType;

impl Criterion for RoadType {
    fn name(&self) -> &'static str {
        "road-type"
    }

    fn weight(&self, config: &CriterionConfig) -> f64 {
        config.weights.road_type
    }

    fn evaluate(
        &self,
        traversal: &Traversal<'_>,
        config: &CriterionConfig,
    ) -> Result<Verdict, EvaluateError> {
        let mean = length_weighted_mean(traversal, |step| {
            config.road_preferences.preference(step.edge.road_class)
        });
        Ok(Verdict::Fit(mean))
    }
}

/// Length-weighted lane-count preference.
///
/// Untagged edges fall back to the conventional default of one lane for a
/// one-way arc and two for a two-way street.
#[derive(Debug, Default, Clone, Copy)]
pub struct LaneCount;

impl Criterion for LaneCount {
    fn name(&self) -> &'static str {
        "lane-count"
    }

    fn weight(&self, config: &CriterionConfig) -> f64 {
        config.weights.lane_count
    }

    fn evaluate(
        &self,
        traversal: &Traversal<'_>,
        config: &CriterionConfig,
    ) -> Result<Verdict, EvaluateError> {
        let mean = length_weighted_mean(traversal, |step| {
            config.lane_preferences.preference(step.edge.lanes_or_default())
        });
        Ok(Verdict::Fit(mean))
    }
}

/// Share of the route running along one-way edges.
///
/// One-way travel avoids opposing traffic altogether, so the fraction is
/// used directly as the score.
#[derive(Debug, Default, Clone, Copy)]
pub struct OneWay;

impl Criterion for OneWay {
    fn name(&self) -> &'static str {
        "one-way"
    }

    fn weight(&self, config: &CriterionConfig) -> f64 {
        config.weights.one_way
    }

    fn evaluate(
        &self,
        traversal: &Traversal<'_>,
        _config: &CriterionConfig,
    ) -> Result<Verdict, EvaluateError> {
        Ok(Verdict::Fit(length_fraction(traversal, |step| {
            step.edge.one_way
        })))
    }
}

/// Penalty for narrow two-way carriageways.
///
/// Scores one minus the share of route length that is both two-way and
/// narrower than the configured threshold. An edge without a width tag is
/// treated as not narrow; the criterion penalises but never disqualifies.
#[derive(Debug, Default, Clone, Copy)]
pub struct NarrowTwoWay;

impl Criterion for NarrowTwoWay {
    fn name(&self) -> &'static str {
        "narrow-two-way"
    }

    fn weight(&self, config: &CriterionConfig) -> f64 {
        config.weights.narrow_two_way
    }

    fn evaluate(
        &self,
        traversal: &Traversal<'_>,
        config: &CriterionConfig,
    ) -> Result<Verdict, EvaluateError> {
        let fraction = length_fraction(traversal, |step| {
            !step.edge.one_way
                && step
                    .edge
                    .width_m
                    .is_some_and(|width| width < config.narrow_width_m)
        });
        Ok(Verdict::Fit(1.0 - fraction))
    }
}
