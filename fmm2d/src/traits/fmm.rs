//! FMM traits
use num::Float;
use num_complex::Complex;

use super::{
    kernel::SeriesExpansion,
    tree::SingleTree,
    types::{FmmError, FmmState},
};

/// Interface for a two dimensional Fast Multipole Method.
///
/// Gives access to the expansions held by the tree, the computed potentials, and the
/// user facing solvers.
pub trait Fmm {
    /// Real scalar type of coordinates, charges and potentials.
    type Scalar: Float;

    /// Type of tree, holding both source and target points.
    type Tree: SingleTree<Scalar = Self::Scalar>;

    /// Kernel associated with this FMM
    type Kernel: SeriesExpansion<T = Self::Scalar>;

    /// Get the multipole expansion data associated with a node as a slice, scaled by the width of the
    /// node as described by [SeriesExpansion].
    /// # Arguments
    /// * `key` - The source node.
    fn multipole(
        &self,
        key: &<Self::Tree as SingleTree>::Node,
    ) -> Option<&[Complex<Self::Scalar>]>;

    /// Get the local expansion data associated with a node as a slice, scaled by the width of the node.
    /// # Arguments
    /// * `key` - The target node.
    fn local(&self, key: &<Self::Tree as SingleTree>::Node) -> Option<&[Complex<Self::Scalar>]>;

    /// Get the potentials computed by the last evaluation, one per target in input order.
    fn potentials(&self) -> &[Self::Scalar];

    /// Get the expansion order associated with this FMM
    fn expansion_order(&self) -> usize;

    /// Get the tree associated with this FMM
    fn tree(&self) -> &Self::Tree;

    /// Get the kernel associated with this FMM
    fn kernel(&self) -> &Self::Kernel;

    /// Get the dimension of the data in this FMM
    fn dim(&self) -> usize;

    /// Current stage of the evaluation.
    fn state(&self) -> FmmState;

    /// Maximum number of sources or targets held by any leaf.
    fn cluster_threshold(&self) -> usize;

    /// Clear the data buffers and add new charge data for re-evaluation.
    ///
    /// # Arguments
    /// * `charges` - new charge data, one per source in input order.
    fn clear(&mut self, charges: &[Self::Scalar]) -> Result<(), FmmError>;

    /// Approximate the potential at every target, returned in target input order.
    ///
    /// # Arguments
    /// * `charges` - One charge per source in input order.
    fn solve(&mut self, charges: &[Self::Scalar]) -> Result<Vec<Self::Scalar>, FmmError>;

    /// Compute the potential at every target by direct summation over all sources, returned in
    /// target input order. Used to validate `solve`.
    ///
    /// # Arguments
    /// * `charges` - One charge per source in input order.
    fn solve_direct(&self, charges: &[Self::Scalar]) -> Result<Vec<Self::Scalar>, FmmError>;
}

/// Staged evaluation of an FMM. Each stage requires the previous one to have completed.
pub trait Evaluate
where
    Self: Fmm,
{
    /// Particle to multipole at the leaves, then multipole to multipole up to level 2.
    fn evaluate_upward_pass(&mut self) -> Result<(), FmmError>;

    /// Multipole to local over interaction lists, at every level from 2 to the leaves.
    fn evaluate_m2l_pass(&mut self) -> Result<(), FmmError>;

    /// Local to local from level 2 down to the leaves.
    fn evaluate_l2l_pass(&mut self) -> Result<(), FmmError>;

    /// Local to particle and particle to particle at the leaves.
    fn evaluate_leaf_targets(&mut self) -> Result<(), FmmError>;

    /// Run all stages in order.
    fn evaluate(&mut self) -> Result<(), FmmError> {
        self.evaluate_upward_pass()?;
        self.evaluate_m2l_pass()?;
        self.evaluate_l2l_pass()?;
        self.evaluate_leaf_targets()?;
        Ok(())
    }
}
