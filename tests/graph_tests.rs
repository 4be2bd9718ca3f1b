use netroute::graph::generators::{generate_grid_network, generate_random_network};
use netroute::graph::{Edge, Graph, Network, NetworkBuilder, Node, Point};
use netroute::Error;
use ordered_float::OrderedFloat;

#[test]
fn test_builder_preserves_adjacency_order() {
    let mut builder = NetworkBuilder::new();
    for name in ["a", "b", "c"] {
        builder.add_node(name);
    }
    builder.add_edge(0, 2, OrderedFloat(3.0)).unwrap();
    builder.add_edge(0, 1, OrderedFloat(1.0)).unwrap();
    let graph = builder.build();

    assert_eq!(graph.vertex_count(), 3);
    assert_eq!(graph.edge_count(), 2);
    let targets: Vec<usize> = graph.outgoing_edges(0).map(|edge| edge.dest).collect();
    assert_eq!(targets, vec![2, 1]);
    assert_eq!(graph.location(1), Some(&"b"));
    assert_eq!(graph.edge_length(0, 2), Some(OrderedFloat(3.0)));
    assert!(graph.has_edge(0, 1));
    assert!(!graph.has_edge(1, 0));
}

#[test]
fn test_builder_rejects_bad_edges() {
    let mut builder: NetworkBuilder<Point, OrderedFloat<f64>> = NetworkBuilder::new();
    builder.add_node(Point::new(0.0, 0.0));
    builder.add_node(Point::new(1.0, 0.0));

    for (from, to, length) in [(0, 2, 1.0), (4, 0, 1.0), (0, 1, -1.0), (1, 0, f64::NAN)] {
        let err = builder.add_edge(from, to, OrderedFloat(length)).unwrap_err();
        assert!(matches!(err, Error::InvalidGraph(_)), "{} -> {}: {:?}", from, to, err);
    }
    assert_eq!(builder.build().edge_count(), 0);
}

#[test]
fn test_from_nodes_requires_dense_ids() {
    let nodes = vec![
        Node::new(0, Point::new(0.0, 0.0)),
        Node::new(2, Point::new(1.0, 1.0)),
    ];
    let err = Network::<Point, OrderedFloat<f64>>::from_nodes(nodes).unwrap_err();
    assert!(matches!(err, Error::InvalidGraph(_)));
}

#[test]
fn test_from_nodes_checks_edges() {
    let mut source = Node::new(0, ());
    source.neighbors.push(Edge::new(0, 1, OrderedFloat(2.0)));
    let mut misfiled = Node::new(1, ());
    misfiled.neighbors.push(Edge::new(0, 1, OrderedFloat(2.0)));

    let ok = Network::from_nodes(vec![source.clone(), Node::new(1, ())]).unwrap();
    assert_eq!(ok.edge_count(), 1);

    let err = Network::from_nodes(vec![source, misfiled]).unwrap_err();
    assert!(matches!(err, Error::InvalidGraph(_)));
}

#[test]
fn test_random_network_is_reproducible() {
    let a = generate_random_network(50, 3, 1234).unwrap();
    let b = generate_random_network(50, 3, 1234).unwrap();

    assert_eq!(a.vertex_count(), 50);
    assert_eq!(a.edge_count(), 150);
    for v in 0..a.vertex_count() {
        assert_eq!(a.location(v), b.location(v));
        let ea: Vec<_> = a.outgoing_edges(v).collect();
        let eb: Vec<_> = b.outgoing_edges(v).collect();
        assert_eq!(ea, eb);

        // Distinct targets, no self-loops, Euclidean lengths
        let mut targets: Vec<usize> = ea.iter().map(|edge| edge.dest).collect();
        targets.sort_unstable();
        targets.dedup();
        assert_eq!(targets.len(), 3);
        assert!(!targets.contains(&v));
        for edge in &ea {
            let expected = a.location(v).unwrap().distance_to(a.location(edge.dest).unwrap());
            assert_eq!(edge.length, OrderedFloat(expected));
        }
    }
}

#[test]
fn test_random_network_caps_degree_on_tiny_graphs() {
    let graph = generate_random_network(2, 3, 0).unwrap();
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(generate_random_network(1, 3, 0).unwrap().edge_count(), 0);
}

#[test]
fn test_grid_network_shape() {
    let graph = generate_grid_network(4, 3).unwrap();
    assert_eq!(graph.vertex_count(), 12);
    // 2 * (3 horizontal per row * 3 rows + 4 vertical per column gap * 2 gaps)
    assert_eq!(graph.edge_count(), 2 * (3 * 3 + 4 * 2));
    assert!(graph.validate().is_ok());
}
