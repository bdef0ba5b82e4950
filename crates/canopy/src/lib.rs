//! Massively parallel spatial and k-nearest queries over bounding-volume hierarchies.
//!
//! A bounding-volume hierarchy (BVH) is a binary tree whose internal nodes bound the geometry of
//! their subtrees. Given a built, immutable hierarchy and a batch of queries, this crate runs one
//! traversal per query and reports every hit to a caller-supplied [`Sink`]:
//!
//! - [`Query::Spatial`]: every leaf whose bounding volume satisfies a predicate. The number of
//!   hits per query is unbounded and their order is unspecified.
//! - [`Query::Nearest`]: the `k` leaves nearest to a query geometry under a caller-supplied
//!   metric, reported in nondecreasing distance order.
//!
//! Queries are mutually independent, so the batch parallelizes trivially: [`par_traverse`] runs
//! one rayon task per query index, while [`traverse`] runs the same kernels sequentially. Each
//! traversal uses only a fixed-size stack plus, for nearest queries, a pre-provisioned slice of
//! one shared scratch allocation; the kernels themselves never touch the heap allocator.
//!
//! Two node encodings are supported, chosen per hierarchy at build time: the classic two-child
//! layout ([`BinaryNode`]) and a stackless-friendly left-child-plus-rope layout ([`RopedNode`]).
//! The kernels are monomorphized per encoding through the sealed [`TreeNode`] trait, so the
//! encoding costs no dispatch on the per-node path.
//!
//! Building hierarchies is not this crate's concern: callers bring their own nodes and bounding
//! volumes (see [`FlatBvh`] for an array-backed store) along with predicates and a metric.

pub mod query;
mod tree;
mod utils;

pub use query::{par_traverse, traverse, Nearest, Query, Sink, MAX_DEPTH};
pub use tree::{BinaryNode, Bvh, FlatBvh, RopedNode, TreeNode};
pub use utils::{BoundedHeap, Candidate, DistanceValue};
