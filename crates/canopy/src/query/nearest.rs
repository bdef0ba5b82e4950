//! Nearest traversal kernel: best-first descent with a shrinking pruning radius.

use crate::{BoundedHeap, Bvh, Candidate, DistanceValue, TreeNode};

use super::MAX_DEPTH;

/// Best-first descent for one k-nearest query.
///
/// `scratch` is this query's sub-range of the batch scratch allocation; its length is the
/// query's `k`. Calls `emit` with `(item, distance)` for each of the `min(k, N)` results, in
/// nondecreasing distance order.
///
/// The kernel maintains a pruning radius: once the candidate heap holds `k` entries, the radius
/// is the current kth-smallest distance, and any subtree whose lower-bound distance reaches it
/// is discarded. Inserting the left child may tighten the radius before the right child is
/// tested, so the radius is re-read between the two sibling tests; batching the update would
/// miss prunings. Discarding whole subtrees is sound because the metric is monotone over
/// bounding-volume containment.
///
/// Deferred siblings are stacked together with the lower-bound distance they were deferred at,
/// so a deferral that the radius has since overtaken is dropped without revisiting its bounding
/// volume.
///
/// The hierarchy must have at least two leaves, so the root is internal, and `scratch` must be
/// non-empty; both are guaranteed by the dispatcher.
pub(crate) fn search_nearest<B, G, T, M, E>(
    tree: &B,
    geometry: &G,
    metric: &M,
    scratch: &mut [Candidate<T>],
    mut emit: E,
) where
    B: Bvh,
    T: DistanceValue,
    M: Fn(&G, &B::Bv) -> T,
    E: FnMut(usize, T),
{
    debug_assert!(!scratch.is_empty(), "nearest scratch holds at least one candidate");

    let mut hits = BoundedHeap::new(scratch);

    let mut stack = [(0_usize, T::zero()); MAX_DEPTH];
    let mut depth = 0;

    let mut node = tree.root();
    let mut node_distance = T::zero();
    let mut radius = T::infinity();

    loop {
        // A node whose lower-bound distance no longer beats the radius cannot improve the
        // results; it is exhausted without a visit.
        if node_distance < radius {
            let (left, right) = <B::Node as TreeNode>::children(tree, node);

            let d_left = metric(geometry, tree.bounding_volume(left));
            let d_right = metric(geometry, tree.bounding_volume(right));

            for (child, d) in [(left, d_left), (right, d_right)] {
                let child_node = tree.node(child);
                if d < radius && child_node.is_leaf() {
                    hits.push(Candidate {
                        item: child_node.item(),
                        distance: d,
                    });
                    if hits.is_full() {
                        radius = hits
                            .peek()
                            .map_or_else(|| unreachable!("the heap is full"), |farthest| farthest.distance);
                    }
                }
            }

            let descend_left = d_left < radius && !tree.node(left).is_leaf();
            let descend_right = d_right < radius && !tree.node(right).is_leaf();

            match (descend_left, descend_right) {
                (true, true) => {
                    debug_assert!(depth < MAX_DEPTH, "hierarchy deeper than {MAX_DEPTH}");
                    // Descend the nearer child first, breaking ties toward the left.
                    let (near, near_d, far, far_d) = if d_left <= d_right {
                        (left, d_left, right, d_right)
                    } else {
                        (right, d_right, left, d_left)
                    };
                    stack[depth] = (far, far_d);
                    depth += 1;
                    node = near;
                    node_distance = near_d;
                    continue;
                }
                (true, false) => {
                    node = left;
                    node_distance = d_left;
                    continue;
                }
                (false, true) => {
                    node = right;
                    node_distance = d_right;
                    continue;
                }
                (false, false) => {}
            }
        }

        if depth == 0 {
            break;
        }
        depth -= 1;
        (node, node_distance) = stack[depth];
    }

    for &Candidate { item, distance } in hits.into_sorted().iter() {
        emit(item, distance);
    }
}
