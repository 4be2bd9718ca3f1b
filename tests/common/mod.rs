#![allow(dead_code)]

use netroute::graph::{Network, NetworkBuilder, Point};
use ordered_float::OrderedFloat;

pub type TestNetwork = Network<Point, OrderedFloat<f64>>;

/// Builds a network with `n` nodes laid out on the x axis and the given edges
pub fn network(n: usize, edges: &[(usize, usize, f64)]) -> TestNetwork {
    let mut builder = NetworkBuilder::with_capacity(n);
    for i in 0..n {
        builder.add_node(Point::new(i as f64, 0.0));
    }
    for &(from, to, length) in edges {
        builder.add_edge(from, to, OrderedFloat(length)).unwrap();
    }
    builder.build()
}

/// The three-node example: the direct edge 0 -> 1 loses to the detour through 2
pub fn triangle() -> TestNetwork {
    network(3, &[(0, 1, 4.0), (0, 2, 1.0), (2, 1, 1.0)])
}

/// Triangle plus a node with only an outgoing edge back into it
pub fn triangle_with_island() -> TestNetwork {
    network(4, &[(0, 1, 4.0), (0, 2, 1.0), (2, 1, 1.0), (3, 0, 5.0)])
}

/// Bellman-Ford reference distances
pub fn reference_distances(n: usize, edges: &[(usize, usize, f64)], source: usize) -> Vec<f64> {
    let mut dist = vec![f64::INFINITY; n];
    dist[source] = 0.0;
    for _ in 0..n {
        let mut changed = false;
        for &(u, v, w) in edges {
            if dist[u] + w < dist[v] {
                dist[v] = dist[u] + w;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    dist
}
