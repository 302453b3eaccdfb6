//! Builder objects to construct FMMs
use log::{info, warn};
use num::Float;

use crate::{
    fmm::{
        constants::{DEFAULT_MIN_DEPTH, M2L_MIN_LEVEL, MAX_PROBE_DEPTH},
        types::{SingleNodeBuilder, SingleNodeFmm},
    },
    traits::{
        field::{SourceAndTargetTranslationMetadata, SourceToTargetTranslationMetadata},
        kernel::SeriesExpansion,
        tree::SingleTree,
        types::{FmmError, FmmState},
    },
    tree::types::{Domain, QuadTree},
};

impl<Scalar, Kernel> SingleNodeBuilder<Scalar, Kernel>
where
    Scalar: Float,
    Kernel: SeriesExpansion<T = Scalar>,
{
    /// Initialise an empty FMM builder
    pub fn new() -> Self {
        Self {
            tree: None,
            domain: None,
            kernel: None,
            charges: None,
            expansion_order: None,
            timed: None,
        }
    }

    /// Set the domain the tree subdivides, defaults to the unit square. Must be called before the tree is built.
    ///
    /// # Arguments
    /// * `domain` - A square containing all source and target points.
    pub fn domain(mut self, domain: Domain<Scalar>) -> Result<Self, FmmError> {
        if self.tree.is_some() {
            Err(FmmError::InvalidInput(
                "Must specify domain before building tree".to_string(),
            ))
        } else if !(domain.side_length > Scalar::zero()) || !domain.side_length.is_finite() {
            Err(FmmError::InvalidInput(
                "Domain must have a positive, finite, side length".to_string(),
            ))
        } else {
            self.domain = Some(domain);
            Ok(self)
        }
    }

    /// Associate FMM builder with a quadtree
    ///
    /// # Arguments
    /// * `sources` - Source coordinates, interleaved as `[x_1, y_1, ..., x_N, y_N]`.
    /// * `targets` - Target coordinates, interleaved as `[x_1, y_1, ..., x_M, y_M]`.
    /// * `n_crit` - Maximum number of sources or targets per leaf, used to choose the depth.
    /// * `depth` - Depth of the tree, the level of its leaves.
    pub fn tree(
        mut self,
        sources: &[Scalar],
        targets: &[Scalar],
        n_crit: Option<usize>,
        depth: Option<u64>,
    ) -> Result<Self, FmmError> {
        let dim = 2;

        if sources.len() % dim != 0 || targets.len() % dim != 0 {
            return Err(FmmError::InvalidInput(
                "Only 2D FMM supported, coordinates must come in (x, y) pairs".to_string(),
            ));
        }

        if sources.is_empty() || targets.is_empty() {
            return Err(FmmError::InvalidInput(
                "Must have a positive number of source or target particles".to_string(),
            ));
        }

        let domain = self.domain.unwrap_or_else(Domain::unit);

        let tree = match (n_crit, depth) {
            (None, Some(depth)) => QuadTree::new(sources, targets, depth, domain)?,
            (Some(n_crit), None) => Self::probe_depth(sources, targets, n_crit, domain)?,
            _ => {
                return Err(FmmError::InvalidInput(
                    "Either of `n_crit` or `depth` must be supplied, not both or neither."
                        .to_string(),
                ))
            }
        };

        if tree.depth() < M2L_MIN_LEVEL {
            warn!(
                "Tree of depth {} has no interaction lists, evaluation reduces to direct summation",
                tree.depth()
            );
        }

        self.domain = Some(domain);
        self.tree = Some(tree);
        Ok(self)
    }

    /// Refine until no leaf holds more than `n_crit` sources or targets.
    fn probe_depth(
        sources: &[Scalar],
        targets: &[Scalar],
        n_crit: usize,
        domain: Domain<Scalar>,
    ) -> Result<QuadTree<Scalar>, FmmError> {
        let mut depth = DEFAULT_MIN_DEPTH;
        loop {
            let tree = QuadTree::new(sources, targets, depth, domain)?;
            let cluster_threshold = tree.cluster_threshold();

            if cluster_threshold <= n_crit {
                info!(
                    "Chose depth {} with cluster threshold {} for n_crit {}",
                    depth, cluster_threshold, n_crit
                );
                return Ok(tree);
            }

            if depth >= MAX_PROBE_DEPTH {
                warn!(
                    "No depth up to {} satisfies n_crit {}, using cluster threshold {}",
                    MAX_PROBE_DEPTH, n_crit, cluster_threshold
                );
                return Ok(tree);
            }

            depth += 1;
        }
    }

    /// For an FMM builder with an associated tree, specify simulation specific parameters
    ///
    /// # Arguments
    /// * `charges` - One charge per source, in input order.
    /// * `expansion_order` - The number of terms kept in each expansion, at least one.
    /// * `kernel` - The kernel associated with this FMM.
    pub fn parameters(
        mut self,
        charges: &[Scalar],
        expansion_order: usize,
        kernel: Kernel,
    ) -> Result<Self, FmmError> {
        let Some(tree) = self.tree.as_ref() else {
            return Err(FmmError::InvalidInput(
                "Must build tree before specifying FMM parameters".to_string(),
            ));
        };

        if charges.len() != tree.n_sources_tot() {
            return Err(FmmError::InvalidInput(format!(
                "Expected {} charges, found {}",
                tree.n_sources_tot(),
                charges.len()
            )));
        }

        if expansion_order == 0 {
            return Err(FmmError::InvalidInput(
                "Expansion order must be at least 1".to_string(),
            ));
        }

        self.charges = Some(charges.to_vec());
        self.expansion_order = Some(expansion_order);
        self.kernel = Some(kernel);
        Ok(self)
    }

    /// Record the runtime of each operator during evaluation.
    pub fn timed(mut self, timed: bool) -> Self {
        self.timed = Some(timed);
        self
    }

    /// Finalize and build the single node FMM
    pub fn build(self) -> Result<SingleNodeFmm<Scalar, Kernel>, FmmError> {
        let (Some(mut tree), Some(mut kernel), Some(charges), Some(expansion_order)) =
            (self.tree, self.kernel, self.charges, self.expansion_order)
        else {
            return Err(FmmError::InvalidInput(
                "Must build tree and specify parameters before building FMM".to_string(),
            ));
        };

        kernel.set_expansion_order(expansion_order);
        tree.allocate_expansions(expansion_order);
        let n_targets = tree.n_targets_tot();

        let mut result = SingleNodeFmm {
            tree,
            kernel,
            expansion_order,
            dim: 2,
            charges,
            potentials: vec![Scalar::zero(); n_targets],
            source_data: Vec::new(),
            target_data: Vec::new(),
            source_to_target_data: Vec::new(),
            state: FmmState::LeafPopulated,
            timed: self.timed.unwrap_or(false),
            operator_times: Vec::new(),
        };

        result.source();
        result.target();
        result.source_to_target();

        info!(
            "Built FMM of depth {} and expansion order {}",
            result.tree.depth(),
            expansion_order
        );

        Ok(result)
    }
}

impl<Scalar, Kernel> Default for SingleNodeBuilder<Scalar, Kernel>
where
    Scalar: Float,
    Kernel: SeriesExpansion<T = Scalar>,
{
    fn default() -> Self {
        Self::new()
    }
}
