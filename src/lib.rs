//! netroute - single-source shortest paths over sparse directed networks
//!
//! Dijkstra's algorithm with two interchangeable priority queues: a linear-scan
//! queue with lazy decrease-key (O(V²) overall) and an indexed binary min-heap
//! with true decrease-key (O((V+E) log V) overall). Both strategies produce
//! identical distance tables for any network with non-negative edge lengths.

pub mod algorithm;
pub mod data_structures;
pub mod graph;
pub mod web;

pub use algorithm::{
    PathEdge, PathOutcome, PathReconstructor, QueueStrategy, RoutePath, RunStats,
    ShortestPathEngine, ShortestPathTables,
};
/// Re-export main types for convenient use
pub use graph::{Edge, Graph, Network, Node, Point};

/// Error types for the library
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid vertex ID: {0}")]
    InvalidVertex(usize),

    #[error("Invalid graph: {0}")]
    InvalidGraph(String),

    #[error("Priority queue logic error: {0}")]
    LogicError(String),

    #[error("No shortest paths have been computed yet")]
    NotComputed,
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
