//! The eleven criterion evaluators.
//!
//! Every evaluator is a pure function of the traversal and the
//! configuration, returns a score normalised to `0.0..=1.0`, and treats a
//! route with nothing relevant to its criterion as a neutral 1.0. Hard
//! constraints surface as [`Verdict::Unfit`](glide_core::Verdict::Unfit),
//! never as a sentinel score.

use glide_core::{Criterion, Step, Traversal};

mod distance;
mod gradient;
mod junctions;
mod roads;

pub use distance::Distance;
pub use gradient::{Downhill, DownhillSignals, Uphill};
pub use junctions::{JunctionComplexity, JunctionCount, TurnQuality};
pub use roads::{LaneCount, NarrowTwoWay, OneWay, RoadType};

/// The full evaluator set the engine runs by default.
#[must_use]
pub fn standard_criteria() -> Vec<Box<dyn Criterion>> {
    vec![
        Box::new(Distance),
        Box::new(RoadType),
        Box::new(JunctionCount),
        Box::new(JunctionComplexity),
        Box::new(TurnQuality),
        Box::new(Uphill),
        Box::new(Downhill),
        Box::new(LaneCount),
        Box::new(OneWay),
        Box::new(NarrowTwoWay),
        Box::new(DownhillSignals),
    ]
}

/// Share of the route length on steps matching the predicate.
pub(crate) fn length_fraction(
    traversal: &Traversal<'_>,
    matches: impl Fn(&Step<'_>) -> bool,
) -> f64 {
    let matched: f64 = traversal
        .steps()
        .iter()
        .filter(|step| matches(step))
        .map(|step| step.edge.length_m)
        .sum();
    matched / traversal.total_length_m()
}

/// Mean of a per-step value, weighted by step length.
pub(crate) fn length_weighted_mean(
    traversal: &Traversal<'_>,
    value: impl Fn(&Step<'_>) -> f64,
) -> f64 {
    let weighted: f64 = traversal
        .steps()
        .iter()
        .map(|step| value(step) * step.edge.length_m)
        .sum();
    weighted / traversal.total_length_m()
}
