//! Precomputation of the translation operators applied at each level of the tree.
use itertools::Itertools;
use num::Float;
use num_complex::Complex;

use crate::{
    fmm::{constants::M2L_MIN_LEVEL, types::SingleNodeFmm},
    kernel::types::TranslationMatrix,
    traits::{
        field::{SourceAndTargetTranslationMetadata, SourceToTargetTranslationMetadata},
        kernel::SeriesExpansion,
        tree::FmmTreeNode,
    },
    tree::{constants::TRANSFER_VECTOR_WIDTH, types::MortonKey},
};

/// Shallowest child level of a translation between a parent and its children, parents on levels 0 and 1
/// carry no expansions.
const PARENT_CHILD_MIN_LEVEL: u64 = M2L_MIN_LEVEL + 1;

impl<Scalar, Kernel> SingleNodeFmm<Scalar, Kernel>
where
    Scalar: Float,
    Kernel: SeriesExpansion<T = Scalar>,
{
    /// Centres of the four children of a reference parent at `level - 1`, with the parent's centre.
    fn child_centres(&self, level: u64) -> (Complex<Scalar>, Vec<Complex<Scalar>>) {
        let domain = &self.tree.domain;
        let parent = MortonKey::from_morton(0, level - 1);
        let children = parent
            .children()
            .iter()
            .map(|child| child.centre(domain))
            .collect_vec();
        (parent.centre(domain), children)
    }
}

impl<Scalar, Kernel> SourceAndTargetTranslationMetadata for SingleNodeFmm<Scalar, Kernel>
where
    Scalar: Float,
    Kernel: SeriesExpansion<T = Scalar>,
{
    fn source(&mut self) {
        let depth = self.tree.depth;
        self.source_data = (0..=depth)
            .map(|level| {
                if level < PARENT_CHILD_MIN_LEVEL {
                    return Vec::new();
                }
                let (parent, children) = self.child_centres(level);
                let parent_width = self.tree.domain.cell_width(level - 1);
                let child_width = self.tree.domain.cell_width(level);
                children
                    .iter()
                    .map(|child| {
                        self.kernel
                            .scaled_m2m_operator(child, &parent, child_width, parent_width)
                    })
                    .collect_vec()
            })
            .collect();
    }

    fn target(&mut self) {
        let depth = self.tree.depth;
        self.target_data = (0..=depth)
            .map(|level| {
                if level < PARENT_CHILD_MIN_LEVEL {
                    return Vec::new();
                }
                let (parent, children) = self.child_centres(level);
                let parent_width = self.tree.domain.cell_width(level - 1);
                let child_width = self.tree.domain.cell_width(level);
                children
                    .iter()
                    .map(|child| {
                        self.kernel
                            .scaled_l2l_operator(&parent, child, parent_width, child_width)
                    })
                    .collect_vec()
            })
            .collect();
    }
}

impl<Scalar, Kernel> SourceToTargetTranslationMetadata for SingleNodeFmm<Scalar, Kernel>
where
    Scalar: Float,
    Kernel: SeriesExpansion<T = Scalar>,
{
    fn source_to_target(&mut self) {
        let depth = self.tree.depth;
        let offset = TRANSFER_VECTOR_WIDTH / 2;
        let zero = Complex::new(Scalar::zero(), Scalar::zero());

        self.source_to_target_data = (0..=depth)
            .map(|level| {
                if level < M2L_MIN_LEVEL {
                    return Vec::new();
                }

                let width = self.tree.domain.cell_width(level);

                // Transfer vectors in the order of their index, from source centre to target centre
                (-offset..=offset)
                    .cartesian_product(-offset..=offset)
                    .map(|(dx, dy)| -> Option<TranslationMatrix<Scalar>> {
                        if dx.abs() <= 1 && dy.abs() <= 1 {
                            return None;
                        }
                        let scale = |d: i64| Scalar::from(d).unwrap_or_else(Scalar::zero) * width;
                        let t = Complex::new(scale(dx), scale(dy));
                        Some(self.kernel.scaled_m2l_operator(&zero, &t, width, width))
                    })
                    .collect_vec()
            })
            .collect();
    }
}
