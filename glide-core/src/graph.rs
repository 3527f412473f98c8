//! The road-network graph consumed by the fitness engine.
//!
//! A [`RoadGraph`] is a directed multigraph: parallel edges between the same
//! node pair represent distinct real-world carriageways. The graph is built
//! once by a data collaborator and then treated as an immutable snapshot;
//! nothing in this crate mutates it after construction.

use std::collections::HashMap;

use geo::Coord;
use thiserror::Error;

/// Opaque node identifier, typically an OpenStreetMap node id.
pub type NodeId = u64;

/// Road classification derived from OSM-style `highway` values.
///
/// Unrecognised values map to [`RoadClass::Other`] so graph loaders never
/// have to reject an edge over an exotic tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RoadClass {
    /// Grade-separated trunk routes.
    Motorway,
    /// Major inter-town roads below motorway standard.
    Trunk,
    /// Primary distributor roads.
    Primary,
    /// Secondary distributor roads.
    Secondary,
    /// Tertiary link roads.
    Tertiary,
    /// Minor public roads with no more specific class.
    Unclassified,
    /// Streets providing access to housing.
    Residential,
    /// Access roads, car parks, and similar.
    Service,
    /// Streets where pedestrians share the carriageway.
    LivingStreet,
    /// Dedicated cycle tracks.
    Cycleway,
    /// Minor pedestrian ways alongside or between roads.
    Footway,
    /// Streets or areas reserved for pedestrians.
    Pedestrian,
    /// Unsurfaced paths.
    Path,
    /// Agricultural and forestry tracks.
    Track,
    /// Anything else.
    Other,
}

impl RoadClass {
    /// Map an OSM `highway` tag value to a road class.
    ///
    /// # Examples
    /// ```
    /// use glide_core::RoadClass;
    ///
    /// assert_eq!(RoadClass::from_tag("residential"), RoadClass::Residential);
    /// assert_eq!(RoadClass::from_tag("escalator"), RoadClass::Other);
    /// ```
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "motorway" => Self::Motorway,
            "trunk" => Self::Trunk,
            "primary" => Self::Primary,
            "secondary" => Self::Secondary,
            "tertiary" => Self::Tertiary,
            "unclassified" => Self::Unclassified,
            "residential" => Self::Residential,
            "service" => Self::Service,
            "living_street" => Self::LivingStreet,
            "cycleway" => Self::Cycleway,
            "footway" => Self::Footway,
            "pedestrian" => Self::Pedestrian,
            "path" => Self::Path,
            "track" => Self::Track,
            _ => Self::Other,
        }
    }
}

/// A graph node: a surveyed point on the road network.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. Elevation
/// is optional because many extracts ship without a terrain model; the
/// gradient criteria report a missing-attribute error when they need it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Elevation above sea level in metres, when known.
    pub elevation: Option<f64>,
}

impl Node {
    /// Construct a node without elevation data.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use glide_core::Node;
    ///
    /// let node = Node::new(1, Coord { x: -1.5, y: 53.8 });
    /// assert!(node.elevation.is_none());
    /// ```
    #[must_use]
    pub fn new(id: NodeId, location: Coord<f64>) -> Self {
        Self {
            id,
            location,
            elevation: None,
        }
    }

    /// Attach an elevation while consuming `self`, enabling chaining.
    #[must_use]
    pub fn with_elevation(mut self, metres: f64) -> Self {
        self.elevation = Some(metres);
        self
    }
}

/// A directed arc between two nodes.
///
/// `length_m` is the surveyed arc length, which may exceed the straight-line
/// distance between the endpoints. `geometry`, when present, is the full
/// polyline including both endpoints and is used to compute entry and exit
/// bearings; an empty polyline means the arc is treated as straight.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    /// Tail node identifier.
    pub from: NodeId,
    /// Head node identifier.
    pub to: NodeId,
    /// Road classification.
    pub road_class: RoadClass,
    /// Arc length in metres; always positive.
    pub length_m: f64,
    /// Total lane count, when tagged.
    pub lanes: Option<u8>,
    /// Whether travel is restricted to this direction only.
    pub one_way: bool,
    /// Whether a traffic-control device stands at the head node.
    pub signal_at_end: bool,
    /// Carriageway width in metres, when tagged.
    pub width_m: Option<f64>,
    /// Optional shape polyline including both endpoints.
    pub geometry: Vec<Coord<f64>>,
}

impl Edge {
    /// Construct an edge with no optional attributes set.
    ///
    /// # Examples
    /// ```
    /// use glide_core::{Edge, RoadClass};
    ///
    /// let edge = Edge::new(1, 2, RoadClass::Residential, 120.0);
    /// assert_eq!(edge.lanes_or_default(), 2);
    /// ```
    #[must_use]
    pub fn new(from: NodeId, to: NodeId, road_class: RoadClass, length_m: f64) -> Self {
        Self {
            from,
            to,
            road_class,
            length_m,
            lanes: None,
            one_way: false,
            signal_at_end: false,
            width_m: None,
            geometry: Vec::new(),
        }
    }

    /// Set the lane count while consuming `self`, enabling chaining.
    #[must_use]
    pub fn with_lanes(mut self, lanes: u8) -> Self {
        self.lanes = Some(lanes);
        self
    }

    /// Mark the edge one-way while consuming `self`.
    #[must_use]
    pub fn with_one_way(mut self) -> Self {
        self.one_way = true;
        self
    }

    /// Mark a traffic-control device at the head node while consuming `self`.
    #[must_use]
    pub fn with_signal_at_end(mut self) -> Self {
        self.signal_at_end = true;
        self
    }

    /// Set the carriageway width while consuming `self`.
    #[must_use]
    pub fn with_width_m(mut self, metres: f64) -> Self {
        self.width_m = Some(metres);
        self
    }

    /// Attach a shape polyline while consuming `self`.
    #[must_use]
    pub fn with_geometry(mut self, polyline: Vec<Coord<f64>>) -> Self {
        self.geometry = polyline;
        self
    }

    /// The tagged lane count, or the conventional default when untagged:
    /// one lane for a one-way arc, two for a two-way street.
    #[must_use]
    pub fn lanes_or_default(&self) -> u8 {
        self.lanes.unwrap_or(if self.one_way { 1 } else { 2 })
    }
}

/// Errors raised while assembling a [`RoadGraph`].
#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    /// An edge referenced a node that has not been added.
    #[error("edge endpoint {node} is not present in the graph")]
    MissingEndpoint {
        /// The absent node identifier.
        node: NodeId,
    },
    /// An edge carried a zero or negative length.
    #[error("edge length must be positive, got {length_m}")]
    NonPositiveLength {
        /// The offending length in metres.
        length_m: f64,
    },
}

/// A directed multigraph of road-network nodes and edges.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use glide_core::{Edge, Node, RoadClass, RoadGraph};
///
/// # fn main() -> Result<(), glide_core::GraphError> {
/// let mut graph = RoadGraph::new();
/// graph.add_node(Node::new(1, Coord { x: 0.0, y: 0.0 }));
/// graph.add_node(Node::new(2, Coord { x: 0.001, y: 0.0 }));
/// graph.add_edge(Edge::new(1, 2, RoadClass::Residential, 111.0))?;
/// assert_eq!(graph.edge_count(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default, Clone)]
pub struct RoadGraph {
    nodes: HashMap<NodeId, Node>,
    edges: Vec<Edge>,
    outgoing: HashMap<NodeId, Vec<usize>>,
    incoming: HashMap<NodeId, Vec<usize>>,
}

impl RoadGraph {
    /// Construct an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, replacing any previous node with the same id.
    pub fn add_node(&mut self, node: Node) {
        self.nodes.insert(node.id, node);
    }

    /// Insert a directed edge.
    ///
    /// # Errors
    /// Returns [`GraphError::MissingEndpoint`] when either endpoint has not
    /// been added, and [`GraphError::NonPositiveLength`] for a length that is
    /// not strictly positive.
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        if !(edge.length_m > 0.0) {
            return Err(GraphError::NonPositiveLength {
                length_m: edge.length_m,
            });
        }
        for endpoint in [edge.from, edge.to] {
            if !self.nodes.contains_key(&endpoint) {
                return Err(GraphError::MissingEndpoint { node: endpoint });
            }
        }
        let index = self.edges.len();
        self.outgoing.entry(edge.from).or_default().push(index);
        self.incoming.entry(edge.to).or_default().push(index);
        self.edges.push(edge);
        Ok(())
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Number of nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All directed edges leaving `from` towards `to`, in insertion order.
    pub fn edges_between(&self, from: NodeId, to: NodeId) -> impl Iterator<Item = &Edge> {
        self.indices(&self.outgoing, from)
            .iter()
            .filter_map(|&i| self.edges.get(i))
            .filter(move |e| e.to == to)
    }

    /// All directed edges touching `id`, outgoing first. A self-loop is
    /// yielded once.
    pub fn touching(&self, id: NodeId) -> impl Iterator<Item = &Edge> {
        let outgoing = self.indices(&self.outgoing, id);
        let incoming = self.indices(&self.incoming, id);
        outgoing
            .iter()
            .chain(incoming.iter().filter(|&&i| {
                self.edges.get(i).is_some_and(|e| e.from != e.to)
            }))
            .filter_map(|&i| self.edges.get(i))
    }

    /// Count of directed edges touching `id`.
    #[must_use]
    pub fn touching_degree(&self, id: NodeId) -> usize {
        self.touching(id).count()
    }

    /// Count of distinct road classes among the edges touching `id`.
    #[must_use]
    pub fn touching_classes(&self, id: NodeId) -> usize {
        let mut classes: Vec<RoadClass> = self.touching(id).map(|e| e.road_class).collect();
        classes.sort_unstable_by_key(|c| *c as u8);
        classes.dedup();
        classes.len()
    }

    fn indices<'a>(&self, table: &'a HashMap<NodeId, Vec<usize>>, id: NodeId) -> &'a [usize] {
        table.get(&id).map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn two_node_graph() -> RoadGraph {
        let mut graph = RoadGraph::new();
        graph.add_node(Node::new(1, Coord { x: 0.0, y: 0.0 }));
        graph.add_node(Node::new(2, Coord { x: 0.001, y: 0.0 }));
        graph
    }

    #[rstest]
    fn rejects_edge_with_unknown_endpoint() {
        let mut graph = two_node_graph();
        let result = graph.add_edge(Edge::new(1, 9, RoadClass::Residential, 50.0));
        assert_eq!(result, Err(GraphError::MissingEndpoint { node: 9 }));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-12.5)]
    #[case(f64::NAN)]
    fn rejects_non_positive_length(#[case] length_m: f64) {
        let mut graph = two_node_graph();
        let result = graph.add_edge(Edge::new(1, 2, RoadClass::Residential, length_m));
        assert!(matches!(result, Err(GraphError::NonPositiveLength { .. })));
    }

    #[rstest]
    fn parallel_edges_are_kept() {
        let mut graph = two_node_graph();
        graph
            .add_edge(Edge::new(1, 2, RoadClass::Residential, 100.0))
            .unwrap();
        graph
            .add_edge(Edge::new(1, 2, RoadClass::Service, 80.0))
            .unwrap();
        assert_eq!(graph.edges_between(1, 2).count(), 2);
    }

    #[rstest]
    fn touching_counts_both_directions_once_each() {
        let mut graph = two_node_graph();
        graph.add_node(Node::new(3, Coord { x: 0.0, y: 0.001 }));
        graph
            .add_edge(Edge::new(1, 2, RoadClass::Residential, 100.0))
            .unwrap();
        graph
            .add_edge(Edge::new(2, 1, RoadClass::Residential, 100.0))
            .unwrap();
        graph
            .add_edge(Edge::new(2, 3, RoadClass::Service, 90.0))
            .unwrap();
        assert_eq!(graph.touching_degree(2), 3);
        assert_eq!(graph.touching_classes(2), 2);
    }

    #[rstest]
    fn lane_default_depends_on_direction() {
        let two_way = Edge::new(1, 2, RoadClass::Residential, 10.0);
        let one_way = Edge::new(1, 2, RoadClass::Residential, 10.0).with_one_way();
        assert_eq!(two_way.lanes_or_default(), 2);
        assert_eq!(one_way.lanes_or_default(), 1);
    }

    #[rstest]
    fn unknown_highway_tag_maps_to_other() {
        assert_eq!(RoadClass::from_tag("bus_guideway"), RoadClass::Other);
    }
}
