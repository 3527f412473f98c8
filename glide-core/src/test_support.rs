//! Test-only graph, route, and criterion fixtures shared across the
//! workspace.

use geo::Coord;

use crate::config::CriterionConfig;
use crate::criterion::{Criterion, EvaluateError, Verdict};
use crate::graph::{Edge, Node, NodeId, RoadClass, RoadGraph};
use crate::route::Route;
use crate::traversal::Traversal;

/// A node at sea level, for graphs where gradients should stay neutral.
#[must_use]
pub fn flat_node(id: NodeId, x: f64, y: f64) -> Node {
    Node::new(id, Coord { x, y }).with_elevation(0.0)
}

/// Assemble a graph from fixture nodes and edges.
///
/// # Panics
/// Panics when an edge references an absent node or carries a non-positive
/// length; fixtures should be well formed by construction.
#[must_use]
pub fn build_graph(
    nodes: impl IntoIterator<Item = Node>,
    edges: impl IntoIterator<Item = Edge>,
) -> RoadGraph {
    let mut graph = RoadGraph::new();
    for node in nodes {
        graph.add_node(node);
    }
    for edge in edges {
        if let Err(err) = graph.add_edge(edge) {
            panic!("invalid fixture edge: {err}");
        }
    }
    graph
}

/// Build a route through the given nodes.
///
/// # Panics
/// Panics when fewer than two nodes are given.
#[must_use]
pub fn route_through(nodes: &[NodeId]) -> Route {
    match Route::new(nodes.to_vec()) {
        Ok(route) => route,
        Err(err) => panic!("invalid fixture route: {err}"),
    }
}

/// An eastward chain of flat residential edges with the given lengths,
/// node identifiers counting up from 1, plus the route along it.
#[must_use]
pub fn residential_chain(lengths: &[f64]) -> (RoadGraph, Route) {
    let nodes = (0..=lengths.len()).map(|i| flat_node(node_id(i + 1), 0.001 * i as f64, 0.0));
    let edges = lengths.iter().enumerate().map(|(i, &length_m)| {
        Edge::new(
            node_id(i + 1),
            node_id(i + 2),
            RoadClass::Residential,
            length_m,
        )
    });
    let graph = build_graph(nodes, edges);
    let ids: Vec<NodeId> = (1..=lengths.len() + 1).map(node_id).collect();
    (graph, route_through(&ids))
}

/// A single 1000 m one-way residential edge between two flat nodes.
///
/// With default weights every criterion scores its neutral 1.0 against a
/// 1000 m target, which makes this the reference fixture for aggregate
/// scoring tests.
#[must_use]
pub fn one_way_residential() -> (RoadGraph, Route) {
    let graph = build_graph(
        [flat_node(1, 0.0, 0.0), flat_node(2, 0.009, 0.0)],
        [Edge::new(1, 2, RoadClass::Residential, 1000.0).with_one_way()],
    );
    (graph, route_through(&[1, 2]))
}

fn node_id(index: usize) -> NodeId {
    index as NodeId
}

/// A criterion returning a fixed verdict regardless of the route.
#[derive(Debug, Clone, Copy)]
pub struct FixedCriterion {
    name: &'static str,
    weight: f64,
    verdict: Verdict,
}

impl FixedCriterion {
    /// A criterion that always passes with `score`.
    #[must_use]
    pub const fn fit(name: &'static str, weight: f64, score: f64) -> Self {
        Self {
            name,
            weight,
            verdict: Verdict::Fit(score),
        }
    }

    /// A criterion that always disqualifies the route.
    #[must_use]
    pub const fn unfit(name: &'static str, weight: f64) -> Self {
        Self {
            name,
            weight,
            verdict: Verdict::Unfit,
        }
    }
}

impl Criterion for FixedCriterion {
    fn name(&self) -> &'static str {
        self.name
    }

    fn weight(&self, _config: &CriterionConfig) -> f64 {
        self.weight
    }

    fn evaluate(
        &self,
        _traversal: &Traversal<'_>,
        _config: &CriterionConfig,
    ) -> Result<Verdict, EvaluateError> {
        Ok(self.verdict)
    }
}
