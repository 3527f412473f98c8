//! Resolution of a route against a concrete graph.
//!
//! A [`Traversal`] pins every consecutive node pair of a route to one
//! concrete edge, caches the total length, and exposes the junction views
//! the evaluators reason about. Resolution is deterministic: where parallel
//! edges connect a pair, the shortest one wins, and the first inserted wins
//! among equal lengths.

use thiserror::Error;

use crate::geometry;
use crate::graph::{Edge, Node, NodeId, RoadGraph};
use crate::route::Route;

/// A route could not be resolved against the graph.
///
/// This is a programming or data error, never a fitness verdict; an unfit
/// route is reported through [`Verdict::Unfit`](crate::Verdict::Unfit)
/// instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidRouteError {
    /// The route visits a node the graph does not contain.
    #[error("route references node {node}, which is not in the graph")]
    UnknownNode {
        /// The unknown node identifier.
        node: NodeId,
    },
    /// No directed edge connects two consecutive route nodes.
    #[error("no edge connects {from} to {to}")]
    DisconnectedStep {
        /// Tail of the unresolvable step.
        from: NodeId,
        /// Head of the unresolvable step.
        to: NodeId,
    },
}

/// One resolved leg of a traversal: two nodes and the edge joining them.
#[derive(Debug, Clone, Copy)]
pub struct Step<'g> {
    /// The node the step leaves.
    pub from: &'g Node,
    /// The node the step arrives at.
    pub to: &'g Node,
    /// The concrete edge travelled.
    pub edge: &'g Edge,
}

impl Step<'_> {
    /// Elevation change divided by arc length, when both endpoints carry
    /// elevation data. Positive grades climb, negative grades descend.
    #[must_use]
    pub fn grade(&self) -> Option<f64> {
        let start = self.from.elevation?;
        let end = self.to.elevation?;
        Some((end - start) / self.edge.length_m)
    }

    /// Bearing at which the step leaves its tail node.
    #[must_use]
    pub fn departure_bearing(&self) -> f64 {
        geometry::departure_bearing(self.from.location, self.to.location, &self.edge.geometry)
    }

    /// Bearing at which the step arrives at its head node.
    #[must_use]
    pub fn arrival_bearing(&self) -> f64 {
        geometry::arrival_bearing(self.from.location, self.to.location, &self.edge.geometry)
    }
}

/// An interior route node with more side arms than a simple continuation.
///
/// The degree excludes the two edges the route itself travels; a node only
/// becomes a junction when more than two further directed edges touch it.
#[derive(Debug, Clone, Copy)]
pub struct Junction<'g> {
    /// The node at the centre of the junction.
    pub node: &'g Node,
    /// The step the route arrives on.
    pub inbound: Step<'g>,
    /// The step the route leaves on.
    pub outbound: Step<'g>,
    /// Directed edges touching the node, excluding the route's own pair.
    pub branch_degree: usize,
    /// Distinct road classes meeting at the node.
    pub road_class_count: usize,
}

impl Junction<'_> {
    /// Complexity contribution of this junction: side arms beyond a plain
    /// crossing, multiplied by the classification diversity.
    #[must_use]
    pub fn complexity(&self) -> f64 {
        (self.branch_degree.saturating_sub(2) * self.road_class_count) as f64
    }
}

/// A route resolved into concrete steps over one graph.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use glide_core::{Edge, Node, RoadClass, RoadGraph, Route, Traversal};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut graph = RoadGraph::new();
/// graph.add_node(Node::new(1, Coord { x: 0.0, y: 0.0 }));
/// graph.add_node(Node::new(2, Coord { x: 0.001, y: 0.0 }));
/// graph.add_edge(Edge::new(1, 2, RoadClass::Residential, 111.0))?;
///
/// let route = Route::new(vec![1, 2])?;
/// let traversal = Traversal::resolve(&graph, &route)?;
/// assert_eq!(traversal.total_length_m(), 111.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Traversal<'g> {
    graph: &'g RoadGraph,
    steps: Vec<Step<'g>>,
    total_length_m: f64,
}

impl<'g> Traversal<'g> {
    /// Resolve `route` against `graph`.
    ///
    /// # Errors
    /// Returns [`InvalidRouteError::UnknownNode`] when the route visits a
    /// node absent from the graph, and
    /// [`InvalidRouteError::DisconnectedStep`] when a consecutive pair has
    /// no connecting edge.
    pub fn resolve(graph: &'g RoadGraph, route: &Route) -> Result<Self, InvalidRouteError> {
        let nodes = route.nodes();
        let mut steps = Vec::with_capacity(nodes.len().saturating_sub(1));
        let mut total_length_m = 0.0;
        for (&from_id, &to_id) in nodes.iter().zip(nodes.iter().skip(1)) {
            let from = graph
                .node(from_id)
                .ok_or(InvalidRouteError::UnknownNode { node: from_id })?;
            let to = graph
                .node(to_id)
                .ok_or(InvalidRouteError::UnknownNode { node: to_id })?;
            let edge = shortest_edge(graph, from_id, to_id).ok_or(
                InvalidRouteError::DisconnectedStep {
                    from: from_id,
                    to: to_id,
                },
            )?;
            total_length_m += edge.length_m;
            steps.push(Step { from, to, edge });
        }
        Ok(Self {
            graph,
            steps,
            total_length_m,
        })
    }

    /// The graph this traversal was resolved against.
    #[must_use]
    pub const fn graph(&self) -> &'g RoadGraph {
        self.graph
    }

    /// The resolved steps in route order.
    #[must_use]
    pub fn steps(&self) -> &[Step<'g>] {
        &self.steps
    }

    /// Total resolved length in metres.
    #[must_use]
    pub const fn total_length_m(&self) -> f64 {
        self.total_length_m
    }

    /// Junctions traversed at interior nodes, in route order.
    ///
    /// Endpoints never appear: a junction needs both an inbound and an
    /// outbound step.
    pub fn junctions(&self) -> impl Iterator<Item = Junction<'g>> + '_ {
        self.steps
            .iter()
            .zip(self.steps.iter().skip(1))
            .filter_map(|(&inbound, &outbound)| {
                let node = inbound.to;
                let branch_degree = self.graph.touching_degree(node.id).saturating_sub(2);
                (branch_degree > 2).then(|| Junction {
                    node,
                    inbound,
                    outbound,
                    branch_degree,
                    road_class_count: self.graph.touching_classes(node.id),
                })
            })
    }
}

/// Deterministic tie-break over parallel edges: shortest length wins, first
/// inserted wins among equals.
fn shortest_edge<'g>(graph: &'g RoadGraph, from: NodeId, to: NodeId) -> Option<&'g Edge> {
    let mut best: Option<&Edge> = None;
    for edge in graph.edges_between(from, to) {
        if best.is_none_or(|shortest| edge.length_m < shortest.length_m) {
            best = Some(edge);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use rstest::rstest;

    use crate::graph::RoadClass;

    fn corridor() -> RoadGraph {
        // Three nodes west to east, one edge per consecutive pair.
        let mut graph = RoadGraph::new();
        for (id, x) in [(1, 0.0), (2, 0.001), (3, 0.002)] {
            graph.add_node(Node::new(id, Coord { x, y: 0.0 }));
        }
        graph
            .add_edge(Edge::new(1, 2, RoadClass::Residential, 100.0))
            .unwrap();
        graph
            .add_edge(Edge::new(2, 3, RoadClass::Residential, 120.0))
            .unwrap();
        graph
    }

    #[rstest]
    fn resolves_steps_and_total_length() {
        let graph = corridor();
        let route = Route::new(vec![1, 2, 3]).unwrap();
        let traversal = Traversal::resolve(&graph, &route).unwrap();
        assert_eq!(traversal.steps().len(), 2);
        assert_eq!(traversal.total_length_m(), 220.0);
    }

    #[rstest]
    fn reports_unknown_nodes() {
        let graph = corridor();
        let route = Route::new(vec![1, 99]).unwrap();
        assert_eq!(
            Traversal::resolve(&graph, &route),
            Err(InvalidRouteError::UnknownNode { node: 99 })
        );
    }

    #[rstest]
    fn reports_disconnected_steps() {
        let graph = corridor();
        let route = Route::new(vec![3, 1]).unwrap();
        assert_eq!(
            Traversal::resolve(&graph, &route),
            Err(InvalidRouteError::DisconnectedStep { from: 3, to: 1 })
        );
    }

    #[rstest]
    fn picks_the_shortest_parallel_edge() {
        let mut graph = corridor();
        graph
            .add_edge(Edge::new(1, 2, RoadClass::Service, 80.0))
            .unwrap();
        let route = Route::new(vec![1, 2]).unwrap();
        let traversal = Traversal::resolve(&graph, &route).unwrap();
        assert_eq!(traversal.total_length_m(), 80.0);
    }

    #[rstest]
    fn equal_length_parallel_edges_resolve_to_the_first_inserted() {
        let mut graph = corridor();
        graph
            .add_edge(Edge::new(1, 2, RoadClass::Service, 100.0))
            .unwrap();
        let route = Route::new(vec![1, 2]).unwrap();
        let traversal = Traversal::resolve(&graph, &route).unwrap();
        let step = traversal.steps().first().unwrap();
        assert_eq!(step.edge.road_class, RoadClass::Residential);
    }

    #[rstest]
    fn plain_interior_nodes_are_not_junctions() {
        let graph = corridor();
        let route = Route::new(vec![1, 2, 3]).unwrap();
        let traversal = Traversal::resolve(&graph, &route).unwrap();
        assert_eq!(traversal.junctions().count(), 0);
    }

    #[rstest]
    fn side_arms_beyond_two_make_a_junction() {
        let mut graph = corridor();
        // Three further arms at node 2: two spurs plus a return edge.
        graph.add_node(Node::new(4, Coord { x: 0.001, y: 0.001 }));
        graph.add_node(Node::new(5, Coord { x: 0.001, y: -0.001 }));
        graph
            .add_edge(Edge::new(2, 4, RoadClass::Service, 50.0))
            .unwrap();
        graph
            .add_edge(Edge::new(5, 2, RoadClass::Track, 50.0))
            .unwrap();
        graph
            .add_edge(Edge::new(2, 1, RoadClass::Residential, 100.0))
            .unwrap();
        let route = Route::new(vec![1, 2, 3]).unwrap();
        let traversal = Traversal::resolve(&graph, &route).unwrap();
        let junction = traversal.junctions().next().unwrap();
        assert_eq!(junction.node.id, 2);
        assert_eq!(junction.branch_degree, 3);
        assert_eq!(junction.road_class_count, 3);
        assert_eq!(junction.complexity(), 3.0);
    }

    #[rstest]
    fn two_side_arms_are_still_a_plain_crossing() {
        let mut graph = corridor();
        graph.add_node(Node::new(4, Coord { x: 0.001, y: 0.001 }));
        graph
            .add_edge(Edge::new(2, 4, RoadClass::Service, 50.0))
            .unwrap();
        graph
            .add_edge(Edge::new(4, 2, RoadClass::Service, 50.0))
            .unwrap();
        let route = Route::new(vec![1, 2, 3]).unwrap();
        let traversal = Traversal::resolve(&graph, &route).unwrap();
        assert_eq!(traversal.junctions().count(), 0);
    }

    #[rstest]
    fn grade_needs_elevation_on_both_endpoints() {
        let mut graph = RoadGraph::new();
        graph.add_node(Node::new(1, Coord { x: 0.0, y: 0.0 }).with_elevation(10.0));
        graph.add_node(Node::new(2, Coord { x: 0.001, y: 0.0 }));
        graph
            .add_edge(Edge::new(1, 2, RoadClass::Residential, 100.0))
            .unwrap();
        let route = Route::new(vec![1, 2]).unwrap();
        let traversal = Traversal::resolve(&graph, &route).unwrap();
        assert_eq!(traversal.steps().first().unwrap().grade(), None);
    }
}
