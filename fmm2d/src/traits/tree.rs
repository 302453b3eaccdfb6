//! Tree Traits
use std::hash::Hash;

use num::Float;
use num_complex::Complex;

use crate::tree::types::Point;

/// Trees on a single node
pub trait SingleTree {
    /// Scalar type
    type Scalar: Float;

    /// The computational domain defining the tree.
    type Domain: Domain<Scalar = Self::Scalar>;

    /// A tree node.
    type Node: FmmTreeNode + Clone + Copy;

    /// Data owned by each node of the tree.
    type Cell;

    /// Root node
    fn root(&self) -> Self::Node;

    /// Get depth of tree, the level of its leaves.
    fn depth(&self) -> u64;

    /// Number of keys at a given tree level
    fn n_keys(&self, level: u64) -> Option<usize>;

    /// Total number of keys
    fn n_keys_tot(&self) -> usize;

    /// Get a reference to the cells at a given level, in Morton order.
    fn cells(&self, level: u64) -> Option<&[Self::Cell]>;

    /// Get a reference to the cell associated with a node.
    ///
    /// # Arguments
    /// - `node` - node being queried.
    fn cell(&self, node: &Self::Node) -> Option<&Self::Cell>;

    /// Get a reference to all leaves, in Morton order.
    fn all_leaves(&self) -> &[Self::Cell];

    /// Gets a reference to the source points contained with a leaf node.
    ///
    /// # Arguments
    /// - `leaf` - node being queried.
    fn sources(&self, leaf: &Self::Node) -> Option<&[Point<Self::Scalar>]>;

    /// Gets a reference to the target points contained with a leaf node.
    ///
    /// # Arguments
    /// - `leaf` - node being queried.
    fn targets(&self, leaf: &Self::Node) -> Option<&[Point<Self::Scalar>]>;

    /// Total number of source points in the tree
    fn n_sources_tot(&self) -> usize;

    /// Total number of target points in the tree
    fn n_targets_tot(&self) -> usize;

    /// Maximum number of sources or targets held by any single leaf.
    fn cluster_threshold(&self) -> usize;

    /// Get domain defined by the points.
    fn domain(&self) -> &Self::Domain;
}

/// Defines a tree node.
pub trait TreeNode
where
    Self: Hash + Eq + PartialOrd,
{
    /// Copy of nodes
    type Nodes: IntoIterator<Item = Self>;

    /// Raw representation of a node
    fn raw(&self) -> u64;

    /// The parent of this node
    fn parent(&self) -> Self;

    /// The level of this node
    fn level(&self) -> u64;

    /// Neighbours of this node defined by nodes sharing a vertex or an edge
    fn neighbors(&self) -> Self::Nodes;

    /// Children of this node
    fn children(&self) -> Self::Nodes;

    /// Checks adjacency, defined by sharing a vertex or an edge, between this node and another
    ///
    /// # Arguments
    /// - `other` - Node being queried.
    fn is_adjacent(&self, other: &Self) -> bool;
}

/// Defines a tree node that provides functionality required by the FMM
pub trait FmmTreeNode
where
    Self: TreeNode,
{
    /// Neighbours of the parent of this node.
    fn parent_neighbors(&self) -> Self::Nodes;

    /// The interaction list of this node: children of its parent's neighbours that are not
    /// themselves adjacent to this node. Empty on levels 0 and 1.
    fn interaction_list(&self) -> Self::Nodes;

    /// Centre of the box described by this node, as a point in the complex plane.
    ///
    /// # Arguments
    /// * `domain` - The physical domain with which nodes are being constructed with respect to.
    fn centre<D: Domain>(&self, domain: &D) -> Complex<D::Scalar>;
}

/// Defines a computational domain
pub trait Domain {
    /// Scalar type
    type Scalar: Float;

    /// Origin of computational domain, its lower left corner.
    fn origin(&self) -> &[Self::Scalar; 2];

    /// Side length of the square domain.
    fn side_length(&self) -> Self::Scalar;
}
