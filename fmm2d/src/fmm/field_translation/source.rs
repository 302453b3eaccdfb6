//! Multipole expansions of sources, and their translation up the tree.
use num::Float;
use num_complex::Complex;

use crate::{
    fmm::types::SingleNodeFmm,
    traits::{field::SourceTranslation, kernel::SeriesExpansion, types::FmmError},
};

impl<Scalar, Kernel> SourceTranslation for SingleNodeFmm<Scalar, Kernel>
where
    Scalar: Float,
    Kernel: SeriesExpansion<T = Scalar>,
{
    fn p2m(&mut self) -> Result<(), FmmError> {
        let depth = self.tree.depth;
        let domain = self.tree.domain;
        let width = domain.cell_width(depth);
        let zero = Complex::new(Scalar::zero(), Scalar::zero());

        let leaves = self
            .tree
            .cells_mut(depth)
            .ok_or_else(|| FmmError::Failed("Tree has no leaf level".to_string()))?;

        for leaf in leaves.iter_mut().filter(|leaf| leaf.n_sources() > 0) {
            let centre = leaf.centre(&domain);
            let mut multipole = vec![zero; self.expansion_order];

            for source in leaf.sources.iter() {
                let charge = *self
                    .charges
                    .get(source.global_index)
                    .ok_or(FmmError::MissingCharge(source.global_index))?;

                let coefficients = self.kernel.scaled_multipole_coefficients(
                    &source.coordinate,
                    &centre,
                    width,
                );

                multipole
                    .iter_mut()
                    .zip(coefficients.iter())
                    .for_each(|(m, c)| *m = *m + *c * charge);
            }

            leaf.accumulate_multipole(&multipole);
        }

        Ok(())
    }

    fn m2m(&mut self, level: u64) -> Result<(), FmmError> {
        let operators = self
            .source_data
            .get(level as usize)
            .filter(|operators| !operators.is_empty())
            .ok_or_else(|| FmmError::Failed(format!("No M2M operators at level {}", level)))?;

        let (parents, children) = self.tree.levels.split_at_mut(level as usize);
        let parents = &mut parents[level as usize - 1];
        let children = &children[0];

        for child in children.iter() {
            let parent = &mut parents[(child.key.morton() >> 2) as usize];
            parent.accumulate_multipole(&operators[child.key.child_index()].apply(&child.multipole));
        }

        Ok(())
    }
}
