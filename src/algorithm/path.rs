use std::fmt::Debug;

use num_traits::{Float, ToPrimitive, Zero};
use rayon::prelude::*;
use serde::Serialize;

use crate::algorithm::engine::ShortestPathTables;
use crate::graph::Graph;
use crate::{Error, Result};

/// How a path query ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathOutcome {
    /// The walk reached the source; `cost` equals the destination's distance
    Reached,
    /// The destination has infinite distance; `cost` is infinity and there are no edges
    Unreachable,
    /// The predecessor chain ended before the source; `cost` is zero and `edges`
    /// holds what was collected before the break
    Broken,
}

/// One hop of a reconstructed route
#[derive(Debug, Clone, PartialEq)]
pub struct PathEdge<L, W> {
    pub from: usize,
    pub to: usize,
    pub from_location: L,
    pub to_location: L,
    pub length: W,
    /// Length rounded to zero decimals, for display only
    pub label: String,
}

/// Result of a path query; `edges` run from the destination back to the source
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePath<L, W> {
    pub source: usize,
    pub dest: usize,
    pub cost: W,
    pub edges: Vec<PathEdge<L, W>>,
    pub outcome: PathOutcome,
}

impl<L, W> RoutePath<L, W>
where
    W: Float + Zero + Debug + Copy,
{
    pub fn is_reachable(&self) -> bool {
        self.outcome == PathOutcome::Reached
    }

    /// Node ids along the route in travel order, source first
    pub fn nodes(&self) -> Vec<usize> {
        if self.outcome != PathOutcome::Reached {
            return Vec::new();
        }
        let mut nodes: Vec<usize> = self.edges.iter().map(|edge| edge.to).collect();
        nodes.push(self.source);
        nodes.reverse();
        nodes
    }

    /// Sum of the edge lengths, accumulated in travel order
    pub fn total_length(&self) -> W {
        self.edges
            .iter()
            .rev()
            .fold(W::zero(), |total, edge| total + edge.length)
    }
}

/// Renders a length with zero decimals
pub fn format_length<W: ToPrimitive>(length: W) -> String {
    format!("{:.0}", length.to_f64().unwrap_or(f64::NAN))
}

/// Walks a predecessor table back from a destination
///
/// Pure reads only: any number of queries can run against the same tables.
#[derive(Debug)]
pub struct PathReconstructor<'a, W, G>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W> + ?Sized,
{
    graph: &'a G,
    tables: &'a ShortestPathTables<W>,
}

impl<'a, W, G> PathReconstructor<'a, W, G>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W> + ?Sized,
{
    pub fn new(graph: &'a G, tables: &'a ShortestPathTables<W>) -> Self {
        PathReconstructor { graph, tables }
    }

    /// Reconstructs the route from the tables' source to `dest`
    pub fn extract(&self, dest: usize) -> Result<RoutePath<G::Location, W>> {
        let tables = self.tables;
        let n = tables.vertex_count();
        if self.graph.vertex_count() != n {
            return Err(Error::InvalidGraph(format!(
                "tables cover {} nodes but the graph has {}",
                n,
                self.graph.vertex_count()
            )));
        }
        if dest >= n {
            return Err(Error::InvalidVertex(dest));
        }

        let source = tables.source;
        if !tables.dist[dest].is_finite() {
            return Ok(RoutePath {
                source,
                dest,
                cost: W::infinity(),
                edges: Vec::new(),
                outcome: PathOutcome::Unreachable,
            });
        }

        let mut edges = Vec::new();
        let mut current = dest;
        while current != source {
            // A chain longer than the node count can only be a cycle
            let prev = match tables.prev[current] {
                Some(prev) if edges.len() < n => prev,
                _ => {
                    log::warn!(
                        "predecessor chain from {} broke at {} before reaching source {}",
                        dest,
                        current,
                        source
                    );
                    return Ok(RoutePath {
                        source,
                        dest,
                        cost: W::zero(),
                        edges,
                        outcome: PathOutcome::Broken,
                    });
                }
            };

            let length = tables.via[current]
                .unwrap_or_else(|| tables.dist[current] - tables.dist[prev]);
            edges.push(PathEdge {
                from: prev,
                to: current,
                from_location: self.location(prev)?,
                to_location: self.location(current)?,
                length,
                label: format_length(length),
            });
            current = prev;
        }

        log::debug!("path {} -> {}: {} edges", source, dest, edges.len());

        Ok(RoutePath {
            source,
            dest,
            cost: tables.dist[dest],
            edges,
            outcome: PathOutcome::Reached,
        })
    }

    fn location(&self, vertex: usize) -> Result<G::Location> {
        self.graph
            .location(vertex)
            .cloned()
            .ok_or(Error::InvalidVertex(vertex))
    }
}

impl<'a, W, G> PathReconstructor<'a, W, G>
where
    W: Float + Zero + Debug + Copy + Send + Sync,
    G: Graph<W> + Sync + ?Sized,
    G::Location: Send,
{
    /// Resolves several destinations in parallel, preserving input order
    pub fn extract_many(&self, dests: &[usize]) -> Vec<Result<RoutePath<G::Location, W>>> {
        dests.par_iter().map(|&dest| self.extract(dest)).collect()
    }
}
