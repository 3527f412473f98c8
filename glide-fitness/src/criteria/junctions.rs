//! Criteria over the junctions a route passes through.

use glide_core::geometry::TurnKind;
use glide_core::{Criterion, CriterionConfig, EvaluateError, Traversal, Verdict};

/// Number of junctions traversed, inverted to stay bounded.
///
/// Zero junctions score 1.0 and every additional junction decays the score
/// monotonically; inversion rather than subtraction keeps the value
/// positive however long the route gets.
#[derive(Debug, Default, Clone, Copy)]
pub struct JunctionCount;

impl Criterion for JunctionCount {
    fn name(&self) -> &'static str {
        "junction-count"
    }

    fn weight(&self, config: &CriterionConfig) -> f64 {
        config.weights.junction_count
    }

    fn evaluate(
        &self,
        traversal: &Traversal<'_>,
        _config: &CriterionConfig,
    ) -> Result<Verdict, EvaluateError> {
        let count = traversal.junctions().count();
        Ok(Verdict::Fit(1.0 / (1.0 + count as f64)))
    }
}

/// Junction complexity as a density over the route length.
///
/// Each junction contributes its side arms beyond a plain crossing times
/// the road-class diversity; the sum is divided by the route length in
/// kilometres so routes of different sizes stay comparable, then inverted
/// like the count.
#[derive(Debug, Default, Clone, Copy)]
pub struct JunctionComplexity;

impl Criterion for JunctionComplexity {
    fn name(&self) -> &'static str {
        "junction-complexity"
    }

    fn weight(&self, config: &CriterionConfig) -> f64 {
        config.weights.junction_complexity
    }

    fn evaluate(
        &self,
        traversal: &Traversal<'_>,
        _config: &CriterionConfig,
    ) -> Result<Verdict, EvaluateError> {
        let total: f64 = traversal.junctions().map(|j| j.complexity()).sum();
        let density = total / (traversal.total_length_m() / 1000.0);
        Ok(Verdict::Fit(1.0 / (1.0 + density)))
    }
}

/// Turn ergonomics at junctions under the configured driving side.
///
/// Straight continuations and kerb-side turns score 1.0, gentle
/// cross-traffic turns 0.5, and sharp cross-traffic turns 0.0; the score is
/// the mean over all junctions traversed.
#[derive(Debug, Default, Clone, Copy)]
pub struct TurnQuality;

impl Criterion for TurnQuality {
    fn name(&self) -> &'static str {
        "turn-quality"
    }

    fn weight(&self, config: &CriterionConfig) -> f64 {
        config.weights.turn_quality
    }

    fn evaluate(
        &self,
        traversal: &Traversal<'_>,
        config: &CriterionConfig,
    ) -> Result<Verdict, EvaluateError> {
        let mut total = 0.0;
        let mut junctions = 0_u32;
        for junction in traversal.junctions() {
            let kind = TurnKind::classify(
                junction.inbound.arrival_bearing(),
                junction.outbound.departure_bearing(),
                config.driving_side,
            );
            total += match kind {
                TurnKind::Straight | TurnKind::GentleKerbSide | TurnKind::SharpKerbSide => 1.0,
                TurnKind::GentleCrossTraffic => 0.5,
                TurnKind::SharpCrossTraffic => 0.0,
            };
            junctions += 1;
        }
        if junctions == 0 {
            return Ok(Verdict::Fit(1.0));
        }
        Ok(Verdict::Fit(total / f64::from(junctions)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_core::test_support::{build_graph, flat_node, route_through};
    use glide_core::{DrivingSide, Edge, RoadClass, RoadGraph, Route};
    use rstest::rstest;

    /// A crossroads at node 2 with enough side arms to count as a junction:
    /// the route runs west to east, with exits north, south, and back west.
    fn crossroads(route_exit: u64) -> (RoadGraph, Route) {
        let graph = build_graph(
            [
                flat_node(1, 0.0, 0.0),
                flat_node(2, 0.001, 0.0),
                flat_node(3, 0.002, 0.0),
                flat_node(4, 0.001, 0.001),
                flat_node(5, 0.001, -0.001),
            ],
            [
                Edge::new(1, 2, RoadClass::Residential, 111.0),
                Edge::new(2, 3, RoadClass::Residential, 111.0),
                Edge::new(2, 4, RoadClass::Service, 111.0),
                Edge::new(2, 5, RoadClass::Service, 111.0),
                Edge::new(2, 1, RoadClass::Residential, 111.0),
            ],
        );
        (graph, route_through(&[1, 2, route_exit]))
    }

    fn config() -> CriterionConfig {
        CriterionConfig::new(222.0, 50.0)
    }

    #[rstest]
    fn junction_free_routes_score_one() {
        let graph = build_graph(
            [flat_node(1, 0.0, 0.0), flat_node(2, 0.001, 0.0)],
            [Edge::new(1, 2, RoadClass::Residential, 111.0)],
        );
        let route = route_through(&[1, 2]);
        let traversal = Traversal::resolve(&graph, &route).unwrap();
        assert_eq!(
            JunctionCount.evaluate(&traversal, &config()).unwrap(),
            Verdict::Fit(1.0)
        );
        assert_eq!(
            JunctionComplexity.evaluate(&traversal, &config()).unwrap(),
            Verdict::Fit(1.0)
        );
        assert_eq!(
            TurnQuality.evaluate(&traversal, &config()).unwrap(),
            Verdict::Fit(1.0)
        );
    }

    #[rstest]
    fn each_junction_halves_then_thirds_the_count_score() {
        let (graph, route) = crossroads(3);
        let traversal = Traversal::resolve(&graph, &route).unwrap();
        assert_eq!(
            JunctionCount.evaluate(&traversal, &config()).unwrap(),
            Verdict::Fit(0.5)
        );
    }

    #[rstest]
    fn complexity_is_a_density_over_route_length() {
        let (graph, route) = crossroads(3);
        let traversal = Traversal::resolve(&graph, &route).unwrap();
        // One junction: 3 side arms, 2 road classes -> complexity 2 over
        // 0.222 km -> density ~9.009.
        let expected = 1.0 / (1.0 + 2.0 / 0.222);
        let verdict = JunctionComplexity.evaluate(&traversal, &config()).unwrap();
        assert!((verdict.score().unwrap() - expected).abs() < 1e-9);
    }

    #[rstest]
    fn straight_through_the_crossroads_scores_one() {
        let (graph, route) = crossroads(3);
        let traversal = Traversal::resolve(&graph, &route).unwrap();
        assert_eq!(
            TurnQuality.evaluate(&traversal, &config()).unwrap(),
            Verdict::Fit(1.0)
        );
    }

    #[rstest]
    #[case(DrivingSide::Left, 4, 1.0)]
    #[case(DrivingSide::Left, 5, 0.0)]
    #[case(DrivingSide::Right, 5, 1.0)]
    #[case(DrivingSide::Right, 4, 0.0)]
    fn full_turns_score_by_driving_side(
        #[case] side: DrivingSide,
        #[case] exit: u64,
        #[case] expected: f64,
    ) {
        // Exiting north (node 4) is a left turn; south (node 5) a right.
        let (graph, route) = crossroads(exit);
        let traversal = Traversal::resolve(&graph, &route).unwrap();
        let config = config().with_driving_side(side);
        let verdict = TurnQuality.evaluate(&traversal, &config).unwrap();
        assert_eq!(verdict, Verdict::Fit(expected));
    }
}
