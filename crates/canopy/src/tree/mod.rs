//! The bounding-volume hierarchy contract and an array-backed store.

mod node;

pub use node::{BinaryNode, RopedNode, TreeNode};

use serde::{Deserialize, Serialize};

/// A built, immutable bounding-volume hierarchy.
///
/// A hierarchy over `N` leaves has, when `N >= 2`, exactly `N - 1` internal nodes and an internal
/// root. Node identifiers are `usize` and stable for the duration of a traversal.
///
/// Bounding volumes must be monotone under containment: the volume of a parent bounds the volumes
/// of both its children. Pruning in the traversal kernels relies on that containment and does not
/// check it; a hierarchy that violates it produces unspecified query results.
pub trait Bvh {
    /// The bounding-volume type stored at each node.
    type Bv;
    /// The node encoding of this hierarchy.
    type Node: TreeNode;

    /// The number of leaves in the hierarchy.
    fn cardinality(&self) -> usize;

    /// Whether the hierarchy has no leaves.
    fn is_empty(&self) -> bool {
        self.cardinality() == 0
    }

    /// The identifier of the root node.
    fn root(&self) -> usize;

    /// The node with the given identifier.
    fn node(&self, id: usize) -> &Self::Node;

    /// The bounding volume of the node with the given identifier.
    fn bounding_volume(&self, id: usize) -> &Self::Bv;
}

/// An array-backed [`Bvh`].
///
/// Stores caller-built nodes and their bounding volumes in parallel arrays indexed by node
/// identifier. Building the arrays (splitting, fitting bounding volumes, threading ropes) is the
/// caller's concern; this store only checks that the arrays agree in shape.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FlatBvh<Bv, N> {
    /// The nodes, indexed by identifier.
    nodes: Vec<N>,
    /// The bounding volume of each node, in node order.
    bvs: Vec<Bv>,
    /// The identifier of the root node.
    root: usize,
    /// The number of leaves.
    cardinality: usize,
}

impl<Bv, N: TreeNode> FlatBvh<Bv, N> {
    /// Creates a new `FlatBvh` over caller-built nodes.
    ///
    /// # Errors
    ///
    /// - If `nodes` and `bvs` differ in length.
    /// - If the hierarchy is nonempty and `root` is out of bounds.
    pub fn new(nodes: Vec<N>, bvs: Vec<Bv>, root: usize) -> Result<Self, &'static str> {
        if nodes.len() != bvs.len() {
            return Err("Each node needs exactly one bounding volume.");
        }
        if !nodes.is_empty() && root >= nodes.len() {
            return Err("The root identifier is out of bounds.");
        }
        let cardinality = nodes.iter().filter(|node| node.is_leaf()).count();
        Ok(Self {
            nodes,
            bvs,
            root,
            cardinality,
        })
    }

    /// The total number of nodes, leaves and internal nodes together.
    #[must_use]
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }
}

impl<Bv, N: TreeNode> Bvh for FlatBvh<Bv, N> {
    type Bv = Bv;
    type Node = N;

    fn cardinality(&self) -> usize {
        self.cardinality
    }

    fn root(&self) -> usize {
        self.root
    }

    fn node(&self, id: usize) -> &N {
        &self.nodes[id]
    }

    fn bounding_volume(&self, id: usize) -> &Bv {
        &self.bvs[id]
    }
}
