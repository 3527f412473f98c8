//! Property-based tests for the fitness engine.
//!
//! These assert invariants that must hold for every well-formed input,
//! complementing the pinned scenarios in the behaviour suite.
//!
//! # Invariants tested
//!
//! - **No NaN:** fitness is always a finite real or negative infinity.
//! - **Bounded sum:** with unit weights the finite total never exceeds the
//!   number of criteria.
//! - **Hard distance band:** a route outside the band is unfit no matter
//!   how the rest of the configuration looks.
//! - **Idempotence:** re-evaluating identical inputs is bit-identical.
//! - **Weight linearity:** doubling every weight exactly doubles a finite
//!   fitness.

use proptest::prelude::*;

use glide_core::CriterionConfig;
use glide_core::test_support::residential_chain;
use glide_fitness::FitnessEngine;

/// Edge-length lists for flat residential chains.
fn chain_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(50.0_f64..500.0, 1..8)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Fitness inside the distance band is finite, never NaN, and bounded
    /// by the criterion count under unit weights.
    #[test]
    fn in_band_fitness_is_finite_and_bounded(
        lengths in chain_strategy(),
        offset in -0.04_f64..0.04,
    ) {
        let (graph, route) = residential_chain(&lengths);
        let total: f64 = lengths.iter().sum();
        let config = CriterionConfig::new(total * (1.0 + offset), total * 0.05);
        let engine = FitnessEngine::new(config).expect("valid config");

        let fitness = engine.fitness(&graph, &route).expect("resolvable route");
        prop_assert!(fitness.is_finite(), "got {fitness}");
        prop_assert!((0.0..=11.0).contains(&fitness), "got {fitness}");
    }

    /// A route beyond the tolerance band is unfit regardless of the rest
    /// of the configuration.
    #[test]
    fn out_of_band_routes_are_always_unfit(
        lengths in chain_strategy(),
        overshoot in 1.1_f64..3.0,
    ) {
        let (graph, route) = residential_chain(&lengths);
        let total: f64 = lengths.iter().sum();
        let tolerance = total * 0.05;
        let config = CriterionConfig::new(total + tolerance * overshoot, tolerance);
        let engine = FitnessEngine::new(config).expect("valid config");

        let fitness = engine.fitness(&graph, &route).expect("resolvable route");
        prop_assert_eq!(fitness, f64::NEG_INFINITY);
    }

    /// Identical inputs give bit-identical results.
    #[test]
    fn evaluation_is_idempotent(
        lengths in chain_strategy(),
        offset in -0.04_f64..0.04,
    ) {
        let (graph, route) = residential_chain(&lengths);
        let total: f64 = lengths.iter().sum();
        let config = CriterionConfig::new(total * (1.0 + offset), total * 0.05);
        let engine = FitnessEngine::new(config).expect("valid config");

        let first = engine.fitness(&graph, &route).expect("resolvable route");
        let second = engine.fitness(&graph, &route).expect("resolvable route");
        prop_assert_eq!(first.to_bits(), second.to_bits());
    }

    /// Doubling every weight exactly doubles a finite fitness.
    #[test]
    fn fitness_is_linear_in_the_weights(
        lengths in chain_strategy(),
        offset in -0.04_f64..0.04,
    ) {
        let (graph, route) = residential_chain(&lengths);
        let total: f64 = lengths.iter().sum();
        let config = CriterionConfig::new(total * (1.0 + offset), total * 0.05);

        let single = FitnessEngine::new(config.clone()).expect("valid config");
        let mut doubled_config = config;
        for weight in [
            &mut doubled_config.weights.distance,
            &mut doubled_config.weights.road_type,
            &mut doubled_config.weights.junction_count,
            &mut doubled_config.weights.junction_complexity,
            &mut doubled_config.weights.turn_quality,
            &mut doubled_config.weights.uphill,
            &mut doubled_config.weights.downhill,
            &mut doubled_config.weights.lane_count,
            &mut doubled_config.weights.one_way,
            &mut doubled_config.weights.narrow_two_way,
            &mut doubled_config.weights.downhill_signals,
        ] {
            *weight *= 2.0;
        }
        let doubled = FitnessEngine::new(doubled_config).expect("valid config");

        let base = single.fitness(&graph, &route).expect("resolvable route");
        let scaled = doubled.fitness(&graph, &route).expect("resolvable route");
        prop_assert_eq!(scaled, base * 2.0);
    }
}
