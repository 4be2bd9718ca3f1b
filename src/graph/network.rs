use crate::graph::traits::{check_edge, Graph};
use crate::{Error, Result};
use num_traits::{Float, Zero};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A point in the plane, the location type used by generated networks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A directed, weighted edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge<W> {
    pub source: usize,
    pub dest: usize,
    pub length: W,
}

impl<W> Edge<W> {
    pub fn new(source: usize, dest: usize, length: W) -> Self {
        Edge { source, dest, length }
    }
}

/// A network node: stable id, opaque location and ordered outgoing edges
#[derive(Debug, Clone)]
pub struct Node<L, W> {
    pub id: usize,
    pub location: L,
    pub neighbors: Vec<Edge<W>>,
}

impl<L, W> Node<L, W> {
    pub fn new(id: usize, location: L) -> Self {
        Node {
            id,
            location,
            neighbors: Vec::new(),
        }
    }
}

/// An immutable directed network using adjacency lists
///
/// Can only be obtained through [`Network::from_nodes`] or [`NetworkBuilder`], both of
/// which reject dangling edges, gaps in the id range and negative or NaN lengths.
#[derive(Debug, Clone)]
pub struct Network<L, W>
where
    W: Float + Zero + Debug + Copy,
{
    nodes: Vec<Node<L, W>>,
    edge_count: usize,
}

impl<L, W> Network<L, W>
where
    L: Clone + Debug,
    W: Float + Zero + Debug + Copy,
{
    /// Builds a network from fully formed nodes
    ///
    /// Node `i` must have id `i`, and every edge must leave the node it is listed under.
    pub fn from_nodes(nodes: Vec<Node<L, W>>) -> Result<Self> {
        for (index, node) in nodes.iter().enumerate() {
            if node.id != index {
                return Err(Error::InvalidGraph(format!(
                    "node at position {} has id {}; ids must be 0..{} without gaps",
                    index,
                    node.id,
                    nodes.len()
                )));
            }
        }

        let edge_count = nodes.iter().map(|node| node.neighbors.len()).sum();
        let network = Network { nodes, edge_count };
        network.validate()?;
        Ok(network)
    }

    /// Returns all nodes in id order
    pub fn nodes(&self) -> &[Node<L, W>] {
        &self.nodes
    }

    /// Returns the length of the first edge `from -> to`, if any
    pub fn edge_length(&self, from: usize, to: usize) -> Option<W> {
        self.nodes
            .get(from)?
            .neighbors
            .iter()
            .find(|edge| edge.dest == to)
            .map(|edge| edge.length)
    }
}

impl<L, W> Graph<W> for Network<L, W>
where
    L: Clone + Debug,
    W: Float + Zero + Debug + Copy,
{
    type Location = L;

    fn vertex_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn outgoing_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = Edge<W>> + '_> {
        if let Some(node) = self.nodes.get(vertex) {
            Box::new(node.neighbors.iter().copied())
        } else {
            Box::new(std::iter::empty())
        }
    }

    fn location(&self, vertex: usize) -> Option<&L> {
        self.nodes.get(vertex).map(|node| &node.location)
    }
}

/// Incremental construction of a [`Network`]
///
/// Each edge is checked as it is added, so `build` cannot fail.
#[derive(Debug, Clone)]
pub struct NetworkBuilder<L, W> {
    nodes: Vec<Node<L, W>>,
}

impl<L, W> NetworkBuilder<L, W>
where
    L: Clone + Debug,
    W: Float + Zero + Debug + Copy,
{
    pub fn new() -> Self {
        NetworkBuilder { nodes: Vec::new() }
    }

    pub fn with_capacity(nodes: usize) -> Self {
        NetworkBuilder {
            nodes: Vec::with_capacity(nodes),
        }
    }

    /// Adds a node and returns its id
    pub fn add_node(&mut self, location: L) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node::new(id, location));
        id
    }

    /// Appends the edge `from -> to` to `from`'s adjacency list
    pub fn add_edge(&mut self, from: usize, to: usize, length: W) -> Result<()> {
        let vertex_count = self.nodes.len();
        let node = self.nodes.get_mut(from).ok_or_else(|| {
            Error::InvalidGraph(format!("edge {} -> {} leaves a missing node", from, to))
        })?;
        let edge = Edge::new(from, to, length);
        check_edge(from, &edge, vertex_count)?;
        node.neighbors.push(edge);
        Ok(())
    }

    pub fn build(self) -> Network<L, W> {
        let edge_count = self.nodes.iter().map(|node| node.neighbors.len()).sum();
        Network {
            nodes: self.nodes,
            edge_count,
        }
    }
}

impl<L, W> Default for NetworkBuilder<L, W>
where
    L: Clone + Debug,
    W: Float + Zero + Debug + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}
