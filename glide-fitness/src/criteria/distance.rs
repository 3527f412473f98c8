//! Closeness to the desired route distance.

use glide_core::{Criterion, CriterionConfig, EvaluateError, Traversal, Verdict};

/// Scores how close the resolved length lands to the configured target.
///
/// Inside the tolerance band the score falls linearly from 1.0 at an exact
/// match to 0.0 at the band's edge. Outside the band the route is
/// disqualified outright; distance is a hard constraint, not a soft
/// penalty.
#[derive(Debug, Default, Clone, Copy)]
pub struct Distance;

impl Criterion for Distance {
    fn name(&self) -> &'static str {
        "distance"
    }

    fn weight(&self, config: &CriterionConfig) -> f64 {
        config.weights.distance
    }

    fn evaluate(
        &self,
        traversal: &Traversal<'_>,
        config: &CriterionConfig,
    ) -> Result<Verdict, EvaluateError> {
        let deviation = (traversal.total_length_m() - config.desired_distance_m).abs();
        if deviation > config.distance_tolerance_m {
            return Ok(Verdict::Unfit);
        }
        Ok(Verdict::Fit(1.0 - deviation / config.distance_tolerance_m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_core::test_support::residential_chain;
    use rstest::rstest;

    #[rstest]
    #[case(1000.0, 50.0, Verdict::Fit(1.0))]
    #[case(1025.0, 50.0, Verdict::Fit(0.5))]
    #[case(975.0, 50.0, Verdict::Fit(0.5))]
    #[case(1050.0, 50.0, Verdict::Fit(0.0))]
    #[case(1051.0, 50.0, Verdict::Unfit)]
    #[case(2000.0, 50.0, Verdict::Unfit)]
    fn scores_linearly_inside_the_band(
        #[case] desired: f64,
        #[case] tolerance: f64,
        #[case] expected: Verdict,
    ) {
        let (graph, route) = residential_chain(&[400.0, 600.0]);
        let traversal = Traversal::resolve(&graph, &route).unwrap();
        let config = CriterionConfig::new(desired, tolerance);
        assert_eq!(Distance.evaluate(&traversal, &config).unwrap(), expected);
    }
}
