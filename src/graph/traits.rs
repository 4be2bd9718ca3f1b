use std::fmt::Debug;
use num_traits::{Float, Zero};

use crate::graph::network::Edge;
use crate::{Error, Result};

/// Trait representing a weighted directed graph whose nodes carry a location
///
/// Node ids are dense: every id in `0..vertex_count()` exists.
pub trait Graph<W>: Debug
where
    W: Float + Zero + Debug + Copy,
{
    /// Opaque per-node payload, passed through to reconstructed paths unchanged
    type Location: Clone + Debug;

    /// Returns the number of vertices in the graph
    fn vertex_count(&self) -> usize;

    /// Returns the number of edges in the graph
    fn edge_count(&self) -> usize;

    /// Returns an iterator over the outgoing edges from a vertex, in adjacency order
    fn outgoing_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = Edge<W>> + '_>;

    /// Returns the location of a vertex, if it exists
    fn location(&self, vertex: usize) -> Option<&Self::Location>;

    /// Returns true if the vertex exists in the graph
    fn has_vertex(&self, vertex: usize) -> bool {
        vertex < self.vertex_count()
    }

    /// Returns true if there's an edge between the two vertices
    fn has_edge(&self, from: usize, to: usize) -> bool {
        self.outgoing_edges(from).any(|edge| edge.dest == to)
    }

    /// Checks that every edge stays inside the graph and has a usable length
    fn validate(&self) -> Result<()> {
        for vertex in 0..self.vertex_count() {
            for edge in self.outgoing_edges(vertex) {
                check_edge(vertex, &edge, self.vertex_count())?;
            }
        }
        Ok(())
    }
}

/// Validates a single edge leaving `vertex` in a graph of `vertex_count` nodes
pub(crate) fn check_edge<W>(vertex: usize, edge: &Edge<W>, vertex_count: usize) -> Result<()>
where
    W: Float + Zero + Debug + Copy,
{
    if edge.source != vertex {
        return Err(Error::InvalidGraph(format!(
            "edge {} -> {} is listed under node {}",
            edge.source, edge.dest, vertex
        )));
    }
    if edge.dest >= vertex_count {
        return Err(Error::InvalidGraph(format!(
            "edge {} -> {} references a missing node",
            edge.source, edge.dest
        )));
    }
    if edge.length.is_nan() || edge.length < W::zero() {
        return Err(Error::InvalidGraph(format!(
            "edge {} -> {} has length {:?}; lengths must be non-negative",
            edge.source, edge.dest, edge.length
        )));
    }
    Ok(())
}
