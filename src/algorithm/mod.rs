pub mod engine;
pub mod path;

pub use engine::{
    compute_shortest_paths, compute_with_queue, QueueStrategy, RunStats, ShortestPathEngine, ShortestPathTables,
};
pub use path::{format_length, PathEdge, PathOutcome, PathReconstructor, RoutePath};
