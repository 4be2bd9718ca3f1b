use netroute::data_structures::{IndexedMinHeap, LinearQueue, PriorityQueue};
use netroute::Error;
use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn of(value: f64) -> OrderedFloat<f64> {
    OrderedFloat(value)
}

fn drain<Q: PriorityQueue<OrderedFloat<f64>>>(queue: &mut Q) -> Vec<(usize, OrderedFloat<f64>)> {
    let mut out = Vec::new();
    while let Some(item) = queue.extract_min() {
        out.push(item);
    }
    out
}

#[test]
fn test_linear_queue_extracts_in_key_order() {
    let mut queue = LinearQueue::new();
    queue.insert(0, of(5.0)).unwrap();
    queue.insert(1, of(2.0)).unwrap();
    queue.insert(2, of(9.0)).unwrap();
    assert_eq!(queue.len(), 3);

    let order = drain(&mut queue);
    assert_eq!(order, vec![(1, of(2.0)), (0, of(5.0)), (2, of(9.0))]);
    assert!(queue.is_empty());
}

#[test]
fn test_linear_queue_lazy_decrease_key_appends() {
    let mut queue = LinearQueue::with_capacity(3);
    queue.insert(0, of(10.0)).unwrap();
    queue.insert(1, of(4.0)).unwrap();
    queue.decrease_key(0, of(1.0)).unwrap();

    // Stale (0, 10.0) stays in the array but only one extraction happens per id
    assert_eq!(queue.entry_count(), 3);
    assert_eq!(queue.len(), 2);
    assert_eq!(drain(&mut queue), vec![(0, of(1.0)), (1, of(4.0))]);
}

#[test]
fn test_linear_queue_zero_key_is_not_a_finalized_marker() {
    let mut queue = LinearQueue::new();
    queue.insert(0, of(3.0)).unwrap();
    queue.insert(1, of(0.0)).unwrap();
    queue.insert(2, of(0.0)).unwrap();

    // Both zero-cost entries must come out before the positive one
    let order = drain(&mut queue);
    assert_eq!(order, vec![(1, of(0.0)), (2, of(0.0)), (0, of(3.0))]);
}

#[test]
fn test_linear_queue_ties_prefer_earliest_entry() {
    let mut queue = LinearQueue::new();
    queue.insert(4, of(7.0)).unwrap();
    queue.insert(2, of(7.0)).unwrap();
    assert_eq!(queue.extract_min(), Some((4, of(7.0))));
    assert_eq!(queue.extract_min(), Some((2, of(7.0))));
    assert_eq!(queue.extract_min(), None);
}

#[test]
fn test_linear_queue_misuse_is_a_logic_error() {
    let mut queue = LinearQueue::new();
    queue.insert(0, of(1.0)).unwrap();
    queue.insert(1, of(2.0)).unwrap();

    assert!(matches!(queue.insert(0, of(0.5)), Err(Error::LogicError(_))));
    assert!(matches!(queue.decrease_key(7, of(0.5)), Err(Error::LogicError(_))));
    assert!(matches!(queue.decrease_key(1, of(3.0)), Err(Error::LogicError(_))));

    assert_eq!(queue.extract_min(), Some((0, of(1.0))));
    assert!(matches!(queue.decrease_key(0, of(0.0)), Err(Error::LogicError(_))));
}

#[test]
fn test_heap_build_places_source_at_root() {
    let heap: IndexedMinHeap<OrderedFloat<f64>> = IndexedMinHeap::build(5, 3).unwrap();
    assert_eq!(heap.len(), 5);
    assert!(heap.is_heap_ordered());

    let root = heap.peek().unwrap();
    assert_eq!(root.id, 3);
    assert_eq!(root.key, of(0.0));
    for id in [0, 1, 2, 4] {
        assert_eq!(heap.key_of(id), Some(of(f64::INFINITY)));
    }
}

#[test]
fn test_heap_build_rejects_missing_source() {
    let result: Result<IndexedMinHeap<OrderedFloat<f64>>, _> = IndexedMinHeap::build(3, 3);
    assert_eq!(result.unwrap_err(), Error::InvalidVertex(3));
}

#[test]
fn test_heap_decrease_key_bubbles_up() {
    let mut heap: IndexedMinHeap<OrderedFloat<f64>> = IndexedMinHeap::build(6, 0).unwrap();
    assert_eq!(heap.extract_min(), Some((0, of(0.0))));

    heap.decrease_key(5, of(8.0)).unwrap();
    heap.decrease_key(2, of(3.0)).unwrap();
    heap.decrease_key(4, of(3.5)).unwrap();
    assert!(heap.is_heap_ordered());
    heap.decrease_key(5, of(1.0)).unwrap();
    assert!(heap.is_heap_ordered());

    assert_eq!(heap.extract_min(), Some((5, of(1.0))));
    assert_eq!(heap.extract_min(), Some((2, of(3.0))));
    assert_eq!(heap.extract_min(), Some((4, of(3.5))));
    assert_eq!(heap.len(), 2);
    assert!(heap.contains(1));
    assert!(!heap.contains(5));
}

#[test]
fn test_heap_misuse_is_a_logic_error() {
    let mut heap: IndexedMinHeap<OrderedFloat<f64>> = IndexedMinHeap::build(3, 0).unwrap();
    heap.decrease_key(1, of(2.0)).unwrap();

    assert!(matches!(heap.decrease_key(1, of(5.0)), Err(Error::LogicError(_))));
    assert!(matches!(heap.decrease_key(9, of(1.0)), Err(Error::LogicError(_))));
    assert!(matches!(heap.insert(2, of(1.0)), Err(Error::LogicError(_))));

    assert_eq!(heap.extract_min(), Some((0, of(0.0))));
    assert!(matches!(heap.decrease_key(0, of(0.0)), Err(Error::LogicError(_))));
    assert!(heap.is_heap_ordered());
}

#[test]
fn test_heap_invariant_holds_after_every_operation() {
    let n = 200;
    let mut rng = StdRng::seed_from_u64(7);
    let mut heap = IndexedMinHeap::new();
    let mut keys = Vec::with_capacity(n);

    for id in 0..n {
        let key = of(rng.gen_range(0.0..1000.0));
        keys.push(key);
        heap.insert(id, key).unwrap();
        assert!(heap.is_heap_ordered());
    }

    for _ in 0..500 {
        let id = rng.gen_range(0..n);
        if !heap.contains(id) {
            continue;
        }
        let lowered = of(keys[id].into_inner() * rng.gen_range(0.0..1.0));
        keys[id] = lowered;
        heap.decrease_key(id, lowered).unwrap();
        assert!(heap.is_heap_ordered());

        if rng.gen_bool(0.2) {
            heap.extract_min().unwrap();
            assert!(heap.is_heap_ordered());
        }
    }

    let mut previous = of(f64::NEG_INFINITY);
    while let Some((id, key)) = heap.extract_min() {
        assert!(heap.is_heap_ordered());
        assert!(key >= previous, "keys must come out non-decreasing");
        assert_eq!(key, keys[id]);
        previous = key;
    }
}

#[test]
fn test_both_queues_agree_on_extraction_keys() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut linear = LinearQueue::new();
    let mut heap = IndexedMinHeap::new();

    for id in 0..50 {
        let key = of(rng.gen_range(0..20) as f64);
        linear.insert(id, key).unwrap();
        heap.insert(id, key).unwrap();
    }

    let linear_keys: Vec<_> = drain(&mut linear).into_iter().map(|(_, key)| key).collect();
    let heap_keys: Vec<_> = drain(&mut heap).into_iter().map(|(_, key)| key).collect();
    assert_eq!(linear_keys, heap_keys);
}
