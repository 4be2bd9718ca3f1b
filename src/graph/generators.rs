use crate::graph::network::{Network, NetworkBuilder, Point};
use crate::Result;
use ordered_float::OrderedFloat;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand::seq::index::sample;

/// Side length of the square the generated points are scattered over
const FIELD_SIZE: f64 = 1000.0;

/// Generates a random geometric network with `n` points in the plane
///
/// Every node gets `edges_per_node` outgoing edges to distinct random targets
/// (never itself), weighted by the Euclidean distance between the endpoints.
/// The same seed always yields the same network.
pub fn generate_random_network(
    n: usize,
    edges_per_node: usize,
    seed: u64,
) -> Result<Network<Point, OrderedFloat<f64>>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = NetworkBuilder::with_capacity(n);

    let points: Vec<Point> = (0..n)
        .map(|_| Point::new(rng.gen_range(0.0..FIELD_SIZE), rng.gen_range(0.0..FIELD_SIZE)))
        .collect();
    for point in &points {
        builder.add_node(*point);
    }

    // Cap the degree so a node never needs more distinct targets than exist
    let degree = edges_per_node.min(n.saturating_sub(1));

    for u in 0..n {
        for pick in sample(&mut rng, n - 1, degree).into_iter() {
            // Shift indices at or past `u` to skip the self-loop
            let v = if pick >= u { pick + 1 } else { pick };
            let length = points[u].distance_to(&points[v]);
            builder.add_edge(u, v, OrderedFloat(length))?;
        }
    }

    log::debug!(
        "generated random network with {} nodes and out-degree {}",
        n,
        degree
    );

    Ok(builder.build())
}

/// Generates a `width` x `height` grid with unit-length edges in both directions
/// between horizontal and vertical neighbours
pub fn generate_grid_network(width: usize, height: usize) -> Result<Network<Point, OrderedFloat<f64>>> {
    let mut builder = NetworkBuilder::with_capacity(width * height);

    for y in 0..height {
        for x in 0..width {
            builder.add_node(Point::new(x as f64, y as f64));
        }
    }

    let index = |x: usize, y: usize| y * width + x;

    for y in 0..height {
        for x in 0..width {
            let current = index(x, y);
            if x > 0 {
                builder.add_edge(current, index(x - 1, y), OrderedFloat(1.0))?;
            }
            if x + 1 < width {
                builder.add_edge(current, index(x + 1, y), OrderedFloat(1.0))?;
            }
            if y > 0 {
                builder.add_edge(current, index(x, y - 1), OrderedFloat(1.0))?;
            }
            if y + 1 < height {
                builder.add_edge(current, index(x, y + 1), OrderedFloat(1.0))?;
            }
        }
    }

    Ok(builder.build())
}
