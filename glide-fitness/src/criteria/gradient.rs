//! Criteria over the route's elevation profile.
//!
//! All three evaluators read per-step grades, so both endpoint nodes of
//! every step must carry elevation data whenever one of them is enabled.
//! Extracts shipped without a terrain model surface a missing-attribute
//! error instead of a silently neutral score.

use glide_core::{
    Criterion, CriterionConfig, EvaluateError, MissingAttributeError, Step, Traversal, Verdict,
};

fn step_grade(step: &Step<'_>, criterion: &'static str) -> Result<f64, MissingAttributeError> {
    step.grade().ok_or(MissingAttributeError {
        criterion,
        attribute: "elevation",
    })
}

/// Climb steepness, disqualifying anything beyond the configured limit.
///
/// Any single climbing edge steeper than the maximum uphill grade makes the
/// route unfit. Otherwise the score falls linearly from 1.0 for a route
/// with no climbing at all to 0.0 for one that averages the limit.
#[derive(Debug, Default, Clone, Copy)]
pub struct Uphill;

impl Criterion for Uphill {
    fn name(&self) -> &'static str {
        "uphill"
    }

    fn weight(&self, config: &CriterionConfig) -> f64 {
        config.weights.uphill
    }

    fn evaluate(
        &self,
        traversal: &Traversal<'_>,
        config: &CriterionConfig,
    ) -> Result<Verdict, EvaluateError> {
        let mut weighted_grade = 0.0;
        let mut climbing_length = 0.0;
        for step in traversal.steps() {
            let grade = step_grade(step, self.name())?;
            if grade > config.max_uphill_grade {
                return Ok(Verdict::Unfit);
            }
            if grade > 0.0 {
                weighted_grade += grade * step.edge.length_m;
                climbing_length += step.edge.length_m;
            }
        }
        if climbing_length == 0.0 {
            return Ok(Verdict::Fit(1.0));
        }
        let mean = weighted_grade / climbing_length;
        Ok(Verdict::Fit(
            (1.0 - mean / config.max_uphill_grade).clamp(0.0, 1.0),
        ))
    }
}

/// Descent steepness, rewarded up to a sweet spot.
///
/// Descents are the point of the exercise, so the score rises with the
/// mean descent grade until the sweet spot, then decays back towards 0.0
/// at the maximum downhill grade. Any single edge beyond that maximum
/// disqualifies the route.
#[derive(Debug, Default, Clone, Copy)]
pub struct Downhill;

impl Criterion for Downhill {
    fn name(&self) -> &'static str {
        "downhill"
    }

    fn weight(&self, config: &CriterionConfig) -> f64 {
        config.weights.downhill
    }

    fn evaluate(
        &self,
        traversal: &Traversal<'_>,
        config: &CriterionConfig,
    ) -> Result<Verdict, EvaluateError> {
        let mut weighted_grade = 0.0;
        let mut descending_length = 0.0;
        for step in traversal.steps() {
            let grade = step_grade(step, self.name())?;
            let descent = -grade;
            if descent > config.max_downhill_grade {
                return Ok(Verdict::Unfit);
            }
            if descent > 0.0 {
                weighted_grade += descent * step.edge.length_m;
                descending_length += step.edge.length_m;
            }
        }
        if descending_length == 0.0 {
            return Ok(Verdict::Fit(1.0));
        }
        let mean = weighted_grade / descending_length;
        let score = if mean <= config.downhill_sweet_spot {
            mean / config.downhill_sweet_spot
        } else {
            (config.max_downhill_grade - mean)
                / (config.max_downhill_grade - config.downhill_sweet_spot)
        };
        Ok(Verdict::Fit(score.clamp(0.0, 1.0)))
    }
}

/// Traffic-control devices at the foot of descents.
///
/// Scores one minus the fraction of descending edges whose terminal node
/// carries a signal, counted per edge. Braking from a descent into a
/// controlled stop is the interaction being penalised.
#[derive(Debug, Default, Clone, Copy)]
pub struct DownhillSignals;

impl Criterion for DownhillSignals {
    fn name(&self) -> &'static str {
        "downhill-signals"
    }

    fn weight(&self, config: &CriterionConfig) -> f64 {
        config.weights.downhill_signals
    }

    fn evaluate(
        &self,
        traversal: &Traversal<'_>,
        _config: &CriterionConfig,
    ) -> Result<Verdict, EvaluateError> {
        let mut descending = 0_u32;
        let mut signalled = 0_u32;
        for step in traversal.steps() {
            let grade = step_grade(step, self.name())?;
            if grade < 0.0 {
                descending += 1;
                if step.edge.signal_at_end {
                    signalled += 1;
                }
            }
        }
        if descending == 0 {
            return Ok(Verdict::Fit(1.0));
        }
        Ok(Verdict::Fit(1.0 - f64::from(signalled) / f64::from(descending)))
    }
}
