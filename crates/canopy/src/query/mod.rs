//! Batched queries over a bounding-volume hierarchy.
//!
//! A batch holds one [`Query`] per index. The dispatcher selects the traversal kernel from each
//! query's tag, provisions the nearest-query scratch up front, and runs one traversal per query:
//! sequentially in [`traverse`], or one rayon task per query index in [`par_traverse`]. Hits are
//! reported to a caller-supplied [`Sink`].

pub(crate) mod nearest;
pub(crate) mod scratch;
pub(crate) mod spatial;

use mt_logger::{mt_log, Level};
use rayon::prelude::*;

use crate::{Bvh, Candidate, DistanceValue, TreeNode};

/// The capacity of the per-query traversal stacks.
///
/// A descent defers at most one sibling per tree level, so this covers any balanced or
/// near-balanced hierarchy with up to `2^64` leaves. Hierarchies deeper than this are out of
/// contract.
pub const MAX_DEPTH: usize = 64;

/// A k-nearest query: the `k` leaves nearest to `geometry` under the batch's metric.
#[derive(Clone, Copy, Debug)]
pub struct Nearest<G> {
    /// The geometry distances are measured from.
    pub geometry: G,
    /// The number of neighbors to report.
    pub k: usize,
}

/// One query against a hierarchy.
///
/// The variant is the query's tag: it selects the traversal kernel at dispatch. A batch may mix
/// tags freely; spatial queries simply provision no nearest scratch.
#[derive(Clone, Copy, Debug)]
pub enum Query<P, G> {
    /// Report every leaf whose bounding volume satisfies the predicate.
    Spatial(P),
    /// Report the `k` leaves nearest to a geometry, in nondecreasing distance order.
    Nearest(Nearest<G>),
}

impl<P, G> Query<P, G> {
    /// Creates a nearest query for the `k` leaves closest to `geometry`.
    pub const fn nearest(geometry: G, k: usize) -> Self {
        Self::Nearest(Nearest { geometry, k })
    }

    /// The scratch length this query needs: `k` for nearest queries, zero for spatial ones.
    const fn scratch_len(&self) -> usize {
        match self {
            Self::Spatial(_) => 0,
            Self::Nearest(Nearest { k, .. }) => *k,
        }
    }
}

impl<P, G> core::fmt::Display for Query<P, G> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spatial(_) => write!(f, "Spatial"),
            Self::Nearest(Nearest { k, .. }) => write!(f, "Nearest(k={k})"),
        }
    }
}

/// A sink for query results.
///
/// One traversal runs per query; each hit is reported together with the index of the query that
/// produced it. The parallel entry point invokes the sink concurrently from many tasks, so
/// implementations must tolerate interleaved calls for distinct query indices. Per-query
/// aggregation is the caller's concern.
pub trait Sink<T> {
    /// Reports one spatial hit: the bounding volume of leaf `item` satisfied the predicate of
    /// query `query`.
    ///
    /// Hits within one spatial query arrive in no particular order.
    fn spatial_hit(&self, query: usize, item: usize);

    /// Reports one nearest hit: leaf `item` is among the `k` nearest to the geometry of query
    /// `query`, at the given distance.
    ///
    /// Hits within one nearest query arrive in nondecreasing distance order.
    fn nearest_hit(&self, query: usize, item: usize, distance: T);
}

/// Runs every query in the batch against the hierarchy, reporting hits to `sink`.
///
/// Queries run sequentially on the calling thread, in batch order; see [`par_traverse`] for the
/// parallel version with identical per-query semantics.
///
/// An empty hierarchy, an empty batch, and a nearest query with `k == 0` all produce no hits. A
/// hierarchy with a single leaf is answered directly against the root's bounding volume.
///
/// The metric must be non-negative and monotone over bounding-volume containment, i.e.
/// `metric(g, bv(parent)) <= metric(g, bv(child))`; this is what makes nearest-query pruning
/// sound.
pub fn traverse<B, P, G, T, M, S>(tree: &B, queries: &[Query<P, G>], metric: &M, sink: &S)
where
    B: Bvh,
    P: Fn(&B::Bv) -> bool,
    T: DistanceValue,
    M: Fn(&G, &B::Bv) -> T,
    S: Sink<T>,
{
    mt_log!(
        Level::Debug,
        "Traversing {} queries over a hierarchy of {} leaves",
        queries.len(),
        tree.cardinality()
    );

    if tree.is_empty() {
        return;
    }

    let mut buffer = scratch::provision::<_, _, T>(queries);
    scratch::chunks(queries, &mut buffer)
        .into_iter()
        .zip(queries)
        .enumerate()
        .for_each(|(index, (chunk, query))| search_one(tree, index, query, metric, chunk, sink));
}

/// Parallel version of [`traverse`]: one rayon task per query index.
///
/// Tasks are mutually independent and may be scheduled in any order, so the sink sees hits from
/// distinct queries interleaved arbitrarily. Within one nearest query, hits still arrive in
/// nondecreasing distance order.
pub fn par_traverse<B, P, G, T, M, S>(tree: &B, queries: &[Query<P, G>], metric: &M, sink: &S)
where
    B: Bvh + Sync,
    P: Fn(&B::Bv) -> bool + Sync,
    G: Sync,
    T: DistanceValue + Send,
    M: Fn(&G, &B::Bv) -> T + Sync,
    S: Sink<T> + Sync,
{
    mt_log!(
        Level::Debug,
        "Traversing {} queries in parallel over a hierarchy of {} leaves",
        queries.len(),
        tree.cardinality()
    );

    if tree.is_empty() {
        return;
    }

    let mut buffer = scratch::provision::<_, _, T>(queries);
    scratch::chunks(queries, &mut buffer)
        .into_par_iter()
        .zip(queries.par_iter())
        .enumerate()
        .for_each(|(index, (chunk, query))| search_one(tree, index, query, metric, chunk, sink));
}

/// Runs one query, selecting the kernel from the query's tag.
///
/// `scratch` is this query's sub-range of the batch scratch allocation; its length is the
/// query's `k` for nearest queries and zero for spatial ones.
fn search_one<B, P, G, T, M, S>(
    tree: &B,
    index: usize,
    query: &Query<P, G>,
    metric: &M,
    scratch: &mut [Candidate<T>],
    sink: &S,
) where
    B: Bvh,
    P: Fn(&B::Bv) -> bool,
    T: DistanceValue,
    M: Fn(&G, &B::Bv) -> T,
    S: Sink<T>,
{
    match query {
        Query::Spatial(predicate) => {
            if tree.cardinality() == 1 {
                let root = tree.root();
                if predicate(tree.bounding_volume(root)) {
                    sink.spatial_hit(index, tree.node(root).item());
                }
            } else {
                <B::Node as TreeNode>::search_spatial(tree, predicate, |item| {
                    sink.spatial_hit(index, item);
                });
            }
        }
        Query::Nearest(Nearest { geometry, k }) => {
            if *k == 0 {
                // A nearest query for zero neighbors has nothing to report.
            } else if tree.cardinality() == 1 {
                let root = tree.root();
                let distance = metric(geometry, tree.bounding_volume(root));
                sink.nearest_hit(index, tree.node(root).item(), distance);
            } else {
                nearest::search_nearest(tree, geometry, metric, scratch, |item, distance| {
                    sink.nearest_hit(index, item, distance);
                });
            }
        }
    }
}
