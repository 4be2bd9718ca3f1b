use std::time::Duration;

use netroute::graph::generators::generate_random_network;
use netroute::graph::{Graph, Network, Point};
use netroute::{QueueStrategy, ShortestPathEngine};
use ordered_float::OrderedFloat;

const EDGES_PER_NODE: usize = 3;
const SEED: u64 = 312;

// Runs one strategy from node 0 and returns its elapsed time
fn benchmark_strategy(
    graph: &Network<Point, OrderedFloat<f64>>,
    strategy: QueueStrategy,
) -> Result<Duration, netroute::Error> {
    let mut engine = ShortestPathEngine::new(graph);
    let elapsed = engine.run(0, strategy)?;

    let reachable = engine.tables().map_or(0, |tables| tables.reachable_count());
    println!("  - {:<5} reached {} nodes in {:?}", strategy, reachable, elapsed);

    Ok(elapsed)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // The array queue is quadratic, so sizes stay moderate
    let graph_sizes = vec![100, 1_000, 5_000, 10_000, 20_000];

    println!("=====================================================");
    println!("Benchmark: linear-scan array vs indexed heap");
    println!("Out-degree: {} edges per node, seed {}", EDGES_PER_NODE, SEED);
    println!("=====================================================");

    let mut results = Vec::new();

    for &size in &graph_sizes {
        println!("\nGenerating random network with {} nodes...", size);
        let graph = generate_random_network(size, EDGES_PER_NODE, SEED)?;
        println!("Network has {} nodes and {} edges", graph.vertex_count(), graph.edge_count());

        let array_time = benchmark_strategy(&graph, QueueStrategy::Array)?;
        let heap_time = benchmark_strategy(&graph, QueueStrategy::Heap)?;

        let speedup = array_time.as_secs_f64() / heap_time.as_secs_f64().max(f64::EPSILON);
        println!("Speedup - heap vs array: {:.2}x", speedup);

        results.push((size, array_time, heap_time, speedup));
    }

    println!("\n=====================================================");
    println!("Summary of Results");
    println!("=====================================================");
    println!("{:<10} | {:<12} | {:<12} | {:<10}", "Nodes", "Array (ms)", "Heap (ms)", "Speedup");
    println!("-----------------------------------------------------");

    for (size, array_time, heap_time, speedup) in &results {
        println!(
            "{:<10} | {:<12.3} | {:<12.3} | {:<10.2}",
            size,
            array_time.as_secs_f64() * 1000.0,
            heap_time.as_secs_f64() * 1000.0,
            speedup
        );
    }

    Ok(())
}
