use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::algorithm::{QueueStrategy, RunStats};

/// A network node as exchanged over the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebNode {
    pub id: usize,
    pub x: f64,
    pub y: f64,
}

/// A directed edge as exchanged over the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebEdge {
    pub source: usize,
    pub target: usize,
    pub length: f64,
}

/// A complete network as exchanged over the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebGraph {
    pub nodes: Vec<WebNode>,
    pub links: Vec<WebEdge>,
}

/// Parameters for network generation
#[derive(Debug, Deserialize)]
pub struct GraphGenerationRequest {
    pub node_count: usize,
    #[serde(default = "default_edges_per_node")]
    pub edges_per_node: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_edges_per_node() -> usize { 3 }

fn default_strategy() -> QueueStrategy { QueueStrategy::Heap }

/// Parameters for a shortest path run
#[derive(Debug, Deserialize)]
pub struct RunRequest {
    pub source: usize,
    #[serde(default = "default_strategy")]
    pub strategy: QueueStrategy,
}

/// Parameters for running both strategies side by side
#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub source: usize,
}

/// Response containing the tables of one run
#[derive(Debug, Clone, Serialize)]
pub struct RunResponse {
    pub execution_id: Uuid,
    pub strategy: QueueStrategy,
    pub source: usize,
    pub execution_time_ms: f64,
    pub reachable: usize,
    /// Finite distances only; unreachable nodes are omitted
    pub distances: HashMap<usize, f64>,
    pub predecessors: HashMap<usize, Option<usize>>,
    pub stats: RunStats,
}

/// Side-by-side timing of both strategies from one source
#[derive(Debug, Clone, Serialize)]
pub struct CompareResponse {
    pub source: usize,
    pub array_time_ms: f64,
    pub heap_time_ms: f64,
    pub speedup: f64,
    pub distances_match: bool,
    pub array_stats: RunStats,
    pub heap_stats: RunStats,
}

/// One hop of a path response
#[derive(Debug, Clone, Serialize)]
pub struct PathEdgeResponse {
    pub from: usize,
    pub to: usize,
    pub from_location: (f64, f64),
    pub to_location: (f64, f64),
    pub length: f64,
    pub label: String,
}

/// Response for a path query against the session's last run
#[derive(Debug, Clone, Serialize)]
pub struct PathResponse {
    pub source: usize,
    pub dest: usize,
    pub reachable: bool,
    pub outcome: crate::algorithm::PathOutcome,
    /// `None` when the destination is unreachable
    pub cost: Option<f64>,
    pub edges: Vec<PathEdgeResponse>,
}

/// Error response for API
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

/// Summary of the last run kept on a session
#[derive(Debug, Clone, Serialize)]
pub struct LastRun {
    pub source: usize,
    pub strategy: QueueStrategy,
    pub execution_time_ms: f64,
    pub stats: RunStats,
}

/// Session containing network data and the last run summary
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub graph: WebGraph,
    pub last_run: Option<LastRun>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(graph: WebGraph) -> Self {
        Self {
            id: Uuid::new_v4(),
            graph,
            last_run: None,
            created_at: Utc::now(),
        }
    }
}
