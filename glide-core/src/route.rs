//! Candidate routes over the road graph.
//!
//! A route is an ordered list of node identifiers proposed by an external
//! search collaborator. Construction validates only the shape of the
//! sequence; resolution against a concrete graph happens in
//! [`Traversal`](crate::traversal::Traversal).

use thiserror::Error;

use crate::graph::NodeId;

/// Errors returned by [`Route::new`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    /// Fewer than two nodes were supplied.
    #[error("route must visit at least two nodes, got {count}")]
    TooShort {
        /// Number of nodes supplied.
        count: usize,
    },
}

/// An ordered sequence of node identifiers describing a candidate path.
///
/// Repeated nodes are permitted and represent loops; every consecutive pair
/// must still resolve to a concrete edge when the route is traversed.
///
/// # Examples
/// ```
/// use glide_core::Route;
///
/// # fn main() -> Result<(), glide_core::RouteError> {
/// let route = Route::new(vec![10, 11, 12, 10])?;
/// assert_eq!(route.nodes().len(), 4);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    nodes: Vec<NodeId>,
}

impl Route {
    /// Validate and construct a route.
    ///
    /// # Errors
    /// Returns [`RouteError::TooShort`] when fewer than two nodes are given.
    pub fn new(nodes: Vec<NodeId>) -> Result<Self, RouteError> {
        if nodes.len() < 2 {
            return Err(RouteError::TooShort { count: nodes.len() });
        }
        Ok(Self { nodes })
    }

    /// The visited node identifiers in order.
    #[must_use]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }
}
