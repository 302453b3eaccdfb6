//! Data structures for the FMM and its builder.
use num::Float;

use crate::{
    kernel::types::TranslationMatrix,
    traits::{
        kernel::SeriesExpansion,
        types::{FmmOperatorTime, FmmState},
    },
    tree::types::{Domain, QuadTree},
};

/// Represents a single node fast multipole method for the two dimensional logarithmic potential.
///
/// Expansions live on the cells of the tree. Translation operators only depend on the relative
/// position of two cells at a given level, so they are computed once when the FMM is built.
///
/// # Example
/// ```
/// use fmm2d::{tree::helpers::points_fixture, Evaluate, Fmm, Laplace2dKernel, SingleNodeBuilder};
///
/// let sources = points_fixture::<f64>(500, None, None, Some(0));
/// let targets = points_fixture::<f64>(300, None, None, Some(1));
/// let charges = vec![1.0; 500];
///
/// let mut fmm = SingleNodeBuilder::new()
///     .tree(&sources, &targets, Some(20), None)
///     .unwrap()
///     .parameters(&charges, 10, Laplace2dKernel::default())
///     .unwrap()
///     .build()
///     .unwrap();
///
/// fmm.evaluate().unwrap();
/// assert_eq!(fmm.potentials().len(), 300);
/// ```
pub struct SingleNodeFmm<Scalar, Kernel>
where
    Scalar: Float,
    Kernel: SeriesExpansion<T = Scalar>,
{
    /// Quadtree holding sources, targets and the expansions of every cell
    pub tree: QuadTree<Scalar>,

    /// The associated kernel function
    pub kernel: Kernel,

    /// The expansion order of the FMM
    pub expansion_order: usize,

    /// Dimension of the FMM
    pub dim: usize,

    /// Charges, one per source in input order
    pub charges: Vec<Scalar>,

    /// Potentials, one per target in input order
    pub potentials: Vec<Scalar>,

    /// The multipole to multipole operators, indexed by child level and then by child position in Morton order.
    pub source_data: Vec<Vec<TranslationMatrix<Scalar>>>,

    /// The local to local operators, indexed by child level and then by child position in Morton order.
    pub target_data: Vec<Vec<TranslationMatrix<Scalar>>>,

    /// The multipole to local operators, indexed by level and then by transfer vector. Transfer vectors
    /// between adjacent cells have no operator.
    pub source_to_target_data: Vec<Vec<Option<TranslationMatrix<Scalar>>>>,

    /// Stage reached by the current evaluation
    pub state: FmmState,

    /// Whether to record operator timings
    pub timed: bool,

    /// Operator runtimes of the current evaluation
    pub operator_times: Vec<FmmOperatorTime>,
}

/// Builder for single node FMMs.
///
/// A domain may optionally be set first, then a tree must be built and the parameters given before
/// calling `build`.
pub struct SingleNodeBuilder<Scalar, Kernel>
where
    Scalar: Float,
    Kernel: SeriesExpansion<T = Scalar>,
{
    /// Tree
    pub tree: Option<QuadTree<Scalar>>,

    /// Domain
    pub domain: Option<Domain<Scalar>>,

    /// Kernel
    pub kernel: Option<Kernel>,

    /// Charges
    pub charges: Option<Vec<Scalar>>,

    /// Expansion order
    pub expansion_order: Option<usize>,

    /// Whether to record operator timings
    pub timed: Option<bool>,
}
