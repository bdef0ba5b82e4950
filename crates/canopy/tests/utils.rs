//! Tests for the bounded heap and candidate ordering.

use canopy::{BoundedHeap, Candidate};

fn candidate(item: usize, distance: f32) -> Candidate<f32> {
    Candidate { item, distance }
}

#[test]
fn fill_then_replace_top() {
    let mut buffer = [Candidate::<f32>::default(); 3];
    let mut heap = BoundedHeap::new(&mut buffer);

    assert!(heap.is_empty());
    assert_eq!(heap.capacity(), 3);

    heap.push(candidate(0, 5.0));
    heap.push(candidate(1, 1.0));
    heap.push(candidate(2, 3.0));
    assert!(heap.is_full());
    assert_eq!(heap.peek().map(|c| c.distance), Some(5.0));

    // Nearer than the top: replaces it.
    heap.push(candidate(3, 4.0));
    assert_eq!(heap.len(), 3);
    assert_eq!(heap.peek().map(|c| c.distance), Some(4.0));

    // Farther than the top: ignored.
    heap.push(candidate(4, 6.0));
    assert_eq!(heap.peek().map(|c| c.distance), Some(4.0));

    let sorted = heap.into_sorted();
    let distances = sorted.iter().map(|c| c.distance).collect::<Vec<_>>();
    assert_eq!(distances, vec![1.0, 3.0, 4.0]);
}

#[test]
fn top_is_farthest_while_filling() {
    let mut buffer = [Candidate::<f32>::default(); 8];
    let mut heap = BoundedHeap::new(&mut buffer);

    let mut farthest = f32::NEG_INFINITY;
    for (item, distance) in [(0, 2.0), (1, 7.0), (2, 0.5), (3, 4.0)] {
        heap.push(candidate(item, distance));
        farthest = farthest.max(distance);
        assert_eq!(heap.peek().map(|c| c.distance), Some(farthest));
    }
}

#[test]
fn zero_capacity_is_inert() {
    let mut buffer: [Candidate<f32>; 0] = [];
    let mut heap = BoundedHeap::new(&mut buffer);

    assert!(heap.is_full());
    heap.push(candidate(0, 1.0));
    assert!(heap.is_empty());
    assert!(heap.into_sorted().is_empty());
}

#[test]
fn ordering_ignores_items() {
    assert_eq!(candidate(1, 2.0), candidate(9, 2.0));
    assert!(candidate(1, 1.0) < candidate(1, 2.0));
    assert!(candidate(0, 3.0) > candidate(7, 2.0));
}

#[test]
fn ties_keep_the_incumbent() {
    let mut buffer = [Candidate::<f32>::default(); 1];
    let mut heap = BoundedHeap::new(&mut buffer);

    heap.push(candidate(0, 2.0));
    // Equal distance does not displace the retained candidate.
    heap.push(candidate(1, 2.0));
    assert_eq!(heap.peek().map(|c| c.item), Some(0));
}
