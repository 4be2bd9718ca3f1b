use std::fmt::{self, Debug};
use std::str::FromStr;
use std::time::{Duration, Instant};

use num_traits::{Float, Zero};
use serde::{Deserialize, Serialize};

use crate::algorithm::path::{PathReconstructor, RoutePath};
use crate::data_structures::{IndexedMinHeap, LinearQueue, PriorityQueue};
use crate::graph::Graph;
use crate::{Error, Result};

/// Which priority queue drives the relaxation loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueStrategy {
    /// Unsorted array with linear-scan extract-min, O(V²) overall
    Array,
    /// Indexed binary heap with decrease-key, O((V+E) log V) overall
    Heap,
}

impl QueueStrategy {
    pub const ALL: [QueueStrategy; 2] = [QueueStrategy::Array, QueueStrategy::Heap];
}

impl fmt::Display for QueueStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueStrategy::Array => write!(f, "array"),
            QueueStrategy::Heap => write!(f, "heap"),
        }
    }
}

impl FromStr for QueueStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "array" | "linear" => Ok(QueueStrategy::Array),
            "heap" => Ok(QueueStrategy::Heap),
            other => Err(format!(
                "unknown queue strategy '{}', expected 'array' or 'heap'",
                other
            )),
        }
    }
}

/// Counters collected during one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Ids removed from the queue; always equals the vertex count
    pub extractions: usize,
    /// Successful relaxations, each followed by one decrease-key; at most the edge count
    pub relaxations: usize,
}

/// Distance and predecessor tables produced by one run from a fixed source
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPathTables<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Source vertex ID
    pub source: usize,
    /// Queue used to produce these tables
    pub strategy: QueueStrategy,
    /// Distances from source to each vertex; infinity when unreachable
    pub dist: Vec<W>,
    /// Predecessor vertices in the shortest path tree; `None` for the source and unreachable nodes
    pub prev: Vec<Option<usize>>,
    /// Length of the edge `prev[v] -> v` that set `dist[v]`
    pub via: Vec<Option<W>>,
    pub stats: RunStats,
    pub elapsed: Duration,
}

impl<W> ShortestPathTables<W>
where
    W: Float + Zero + Debug + Copy,
{
    pub fn vertex_count(&self) -> usize {
        self.dist.len()
    }

    pub fn is_reachable(&self, vertex: usize) -> bool {
        self.dist.get(vertex).map_or(false, |d| d.is_finite())
    }

    pub fn reachable_count(&self) -> usize {
        self.dist.iter().filter(|d| d.is_finite()).count()
    }
}

/// Mutable state owned by a single run
///
/// Created at the start of a run, threaded by reference through the helpers and
/// consumed into [`ShortestPathTables`] when the queue drains.
#[derive(Debug)]
struct RunContext<W, Q> {
    source: usize,
    dist: Vec<W>,
    prev: Vec<Option<usize>>,
    via: Vec<Option<W>>,
    queue: Q,
    stats: RunStats,
}

impl<W, Q> RunContext<W, Q>
where
    W: Float + Zero + Debug + Copy,
    Q: PriorityQueue<W>,
{
    fn new(vertex_count: usize, source: usize, queue: Q) -> Self {
        let mut dist = vec![W::infinity(); vertex_count];
        dist[source] = W::zero();
        RunContext {
            source,
            dist,
            prev: vec![None; vertex_count],
            via: vec![None; vertex_count],
            queue,
            stats: RunStats::default(),
        }
    }

    /// Relaxes every edge leaving `u`, which was just extracted with distance `du`
    fn relax_from<G>(&mut self, graph: &G, u: usize, du: W) -> Result<()>
    where
        G: Graph<W> + ?Sized,
    {
        for edge in graph.outgoing_edges(u) {
            let v = edge.dest;
            let candidate = du + edge.length;
            if candidate < self.dist[v] {
                log::trace!("relax {} -> {}: {:?} -> {:?}", u, v, self.dist[v], candidate);
                self.dist[v] = candidate;
                self.prev[v] = Some(u);
                self.via[v] = Some(edge.length);
                self.queue.decrease_key(v, candidate)?;
                self.stats.relaxations += 1;
            }
        }
        Ok(())
    }

    fn drain<G>(&mut self, graph: &G) -> Result<()>
    where
        G: Graph<W> + ?Sized,
    {
        while let Some((u, du)) = self.queue.extract_min() {
            self.stats.extractions += 1;
            self.relax_from(graph, u, du)?;
        }
        Ok(())
    }

    fn finish(self, strategy: QueueStrategy, elapsed: Duration) -> ShortestPathTables<W> {
        ShortestPathTables {
            source: self.source,
            strategy,
            dist: self.dist,
            prev: self.prev,
            via: self.via,
            stats: self.stats,
            elapsed,
        }
    }
}

/// Runs Dijkstra from `source` with an already loaded queue
///
/// The queue must hold every vertex id, keyed by its initial distance.
fn dijkstra_with<W, G, Q>(
    graph: &G,
    source: usize,
    queue: Q,
    strategy: QueueStrategy,
) -> Result<ShortestPathTables<W>>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W> + ?Sized,
    Q: PriorityQueue<W>,
{
    let start = Instant::now();
    let mut context = RunContext::new(graph.vertex_count(), source, queue);
    context.drain(graph)?;
    let tables = context.finish(strategy, start.elapsed());

    log::debug!(
        "{} run from {}: {} extractions, {} relaxations, {} reachable, {:?}",
        strategy,
        source,
        tables.stats.extractions,
        tables.stats.relaxations,
        tables.reachable_count(),
        tables.elapsed
    );
    Ok(tables)
}

/// Rejects an out-of-range source and any malformed edge before a run starts
fn check_run_inputs<W, G>(graph: &G, source: usize) -> Result<()>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W> + ?Sized,
{
    if source >= graph.vertex_count() {
        return Err(Error::InvalidVertex(source));
    }
    graph.validate()
}

/// Computes shortest path tables from `source` using the chosen queue
///
/// Fails with [`Error::InvalidGraph`] before doing any work if an edge is
/// dangling or has a negative length.
pub fn compute_shortest_paths<W, G>(
    graph: &G,
    source: usize,
    strategy: QueueStrategy,
) -> Result<ShortestPathTables<W>>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W> + ?Sized,
{
    check_run_inputs(graph, source)?;
    let n = graph.vertex_count();

    match strategy {
        QueueStrategy::Array => {
            let mut queue = LinearQueue::with_capacity(n);
            for id in 0..n {
                let key = if id == source { W::zero() } else { W::infinity() };
                queue.insert(id, key)?;
            }
            dijkstra_with(graph, source, queue, strategy)
        }
        QueueStrategy::Heap => {
            let queue = IndexedMinHeap::build(n, source)?;
            dijkstra_with(graph, source, queue, strategy)
        }
    }
}

/// Computes shortest path tables with a caller-loaded queue
///
/// `queue` must hold every vertex id, the source keyed at zero and the rest at
/// infinity. `strategy` is only recorded in the returned tables.
pub fn compute_with_queue<W, G, Q>(
    graph: &G,
    source: usize,
    queue: Q,
    strategy: QueueStrategy,
) -> Result<ShortestPathTables<W>>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W> + ?Sized,
    Q: PriorityQueue<W>,
{
    check_run_inputs(graph, source)?;
    dijkstra_with(graph, source, queue, strategy)
}

/// Dijkstra engine bound to one graph that remembers its last run
///
/// `run` replaces the stored tables; `get_path` reads them until the next run.
#[derive(Debug)]
pub struct ShortestPathEngine<'g, W, G>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    graph: &'g G,
    last: Option<ShortestPathTables<W>>,
}

impl<'g, W, G> ShortestPathEngine<'g, W, G>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    /// Creates an engine over `graph` with no computed tables
    pub fn new(graph: &'g G) -> Self {
        ShortestPathEngine { graph, last: None }
    }

    /// Computes distances and predecessors from `source` and returns the elapsed time
    ///
    /// On error the previously stored tables are dropped.
    pub fn run(&mut self, source: usize, strategy: QueueStrategy) -> Result<Duration> {
        self.last = None;
        let tables = compute_shortest_paths(self.graph, source, strategy)?;
        let elapsed = tables.elapsed;
        self.last = Some(tables);
        Ok(elapsed)
    }

    /// Tables of the last successful run
    pub fn tables(&self) -> Option<&ShortestPathTables<W>> {
        self.last.as_ref()
    }

    /// Reconstructs the path from the last run's source to `dest`
    pub fn get_path(&self, dest: usize) -> Result<RoutePath<G::Location, W>> {
        let tables = self.last.as_ref().ok_or(Error::NotComputed)?;
        PathReconstructor::new(self.graph, tables).extract(dest)
    }
}
