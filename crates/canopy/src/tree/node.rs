//! The two node encodings of a hierarchy, and the uniform view the kernels use over them.

use serde::{Deserialize, Serialize};

use super::Bvh;

/// Sealing for [`TreeNode`]: the set of supported node encodings is closed.
mod sealed {
    /// Implemented only by the node encodings defined in the parent module.
    pub trait Sealed {}

    impl Sealed for super::BinaryNode {}
    impl Sealed for super::RopedNode {}
}

/// A node in a two-child encoded hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryNode {
    /// An internal node with exactly two children.
    Internal {
        /// The identifier of the left child.
        left: usize,
        /// The identifier of the right child.
        right: usize,
    },
    /// A leaf node.
    Leaf {
        /// The caller-space index of the primitive stored at this leaf.
        item: usize,
    },
}

/// A node in a rope-encoded hierarchy.
///
/// Instead of a right-child pointer, every node carries a *rope*: the next node to visit in
/// depth-first order when the subtree under this node is skipped. A node's rope is its right
/// sibling, or the right sibling of the nearest ancestor that has one, or `None` at the end of
/// the depth-first walk. The right child of an internal node is recovered as the rope of its
/// left child.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RopedNode {
    /// An internal node. Its right child is the rope of its left child.
    Internal {
        /// The identifier of the left child.
        left: usize,
        /// The next node in depth-first order when this subtree is skipped.
        rope: Option<usize>,
    },
    /// A leaf node.
    Leaf {
        /// The caller-space index of the primitive stored at this leaf.
        item: usize,
        /// The next node in depth-first order.
        rope: Option<usize>,
    },
}

impl RopedNode {
    /// The next node in depth-first order when this node's subtree is skipped.
    #[must_use]
    pub const fn rope(&self) -> Option<usize> {
        match self {
            Self::Internal { rope, .. } | Self::Leaf { rope, .. } => *rope,
        }
    }
}

/// Uniform view over the two node encodings.
///
/// The traversal kernels are monomorphized per encoding through this trait, so the choice of
/// encoding costs no dispatch on the per-node path. The trait is sealed: exactly the two
/// encodings in this module exist, and anything else is rejected at compile time.
pub trait TreeNode: sealed::Sealed + Copy {
    /// Whether this node is a leaf.
    fn is_leaf(&self) -> bool;

    /// The caller-space index of the primitive stored at this leaf.
    ///
    /// Calling this on an internal node is an internal invariant violation, not an input error;
    /// the kernels only reach it through leaves.
    fn item(&self) -> usize;

    /// Both children of the internal node `id` in `tree`.
    ///
    /// For rope-encoded hierarchies, the right child is the rope of the left child.
    fn children<B: Bvh<Node = Self>>(tree: &B, id: usize) -> (usize, usize);

    /// Runs one spatial query over `tree`, calling `emit` with the item of every leaf whose
    /// bounding volume satisfies `predicate`.
    ///
    /// The hierarchy must have at least two leaves; the degenerate cases are handled before
    /// kernel selection.
    fn search_spatial<B, P, E>(tree: &B, predicate: &P, emit: E)
    where
        B: Bvh<Node = Self>,
        P: Fn(&B::Bv) -> bool,
        E: FnMut(usize);
}

impl TreeNode for BinaryNode {
    fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    fn item(&self) -> usize {
        match self {
            Self::Leaf { item } => *item,
            Self::Internal { .. } => unreachable!("`item` is only called on leaves"),
        }
    }

    fn children<B: Bvh<Node = Self>>(tree: &B, id: usize) -> (usize, usize) {
        match tree.node(id) {
            Self::Internal { left, right } => (*left, *right),
            Self::Leaf { .. } => unreachable!("`children` is only called on internal nodes"),
        }
    }

    fn search_spatial<B, P, E>(tree: &B, predicate: &P, emit: E)
    where
        B: Bvh<Node = Self>,
        P: Fn(&B::Bv) -> bool,
        E: FnMut(usize),
    {
        crate::query::spatial::search_binary(tree, predicate, emit);
    }
}

impl TreeNode for RopedNode {
    fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    fn item(&self) -> usize {
        match self {
            Self::Leaf { item, .. } => *item,
            Self::Internal { .. } => unreachable!("`item` is only called on leaves"),
        }
    }

    fn children<B: Bvh<Node = Self>>(tree: &B, id: usize) -> (usize, usize) {
        match tree.node(id) {
            Self::Internal { left, .. } => tree.node(*left).rope().map_or_else(
                || unreachable!("the left child of an internal node has a right sibling"),
                |right| (*left, right),
            ),
            Self::Leaf { .. } => unreachable!("`children` is only called on internal nodes"),
        }
    }

    fn search_spatial<B, P, E>(tree: &B, predicate: &P, emit: E)
    where
        B: Bvh<Node = Self>,
        P: Fn(&B::Bv) -> bool,
        E: FnMut(usize),
    {
        crate::query::spatial::search_roped(tree, predicate, emit);
    }
}
