//! Local expansions translated down the tree, and their evaluation at targets together with near field
//! interactions.
use num::Float;

use crate::{
    fmm::types::SingleNodeFmm,
    traits::{
        field::TargetTranslation, kernel::SeriesExpansion, types::FmmError,
    },
};

impl<Scalar, Kernel> TargetTranslation for SingleNodeFmm<Scalar, Kernel>
where
    Scalar: Float,
    Kernel: SeriesExpansion<T = Scalar>,
{
    fn l2l(&mut self, level: u64) -> Result<(), FmmError> {
        let child_level = level + 1;
        let operators = self
            .target_data
            .get(child_level as usize)
            .filter(|operators| !operators.is_empty())
            .ok_or_else(|| FmmError::Failed(format!("No L2L operators below level {}", level)))?;

        let (parents, children) = self.tree.levels.split_at_mut(child_level as usize);
        let parents = &parents[level as usize];
        let children = &mut children[0];

        for child in children.iter_mut() {
            let parent = &parents[(child.key.morton() >> 2) as usize];
            child.accumulate_local(&operators[child.key.child_index()].apply(&parent.local));
            child.merge_translated_local();
        }

        Ok(())
    }

    fn l2p(&mut self) -> Result<(), FmmError> {
        let domain = self.tree.domain;
        let width = domain.cell_width(self.tree.depth);
        let leaves = self
            .tree
            .levels
            .get(self.tree.depth as usize)
            .ok_or_else(|| FmmError::Failed("Tree has no leaf level".to_string()))?;

        for leaf in leaves.iter().filter(|leaf| leaf.n_targets() > 0) {
            let centre = leaf.centre(&domain);
            for target in leaf.targets.iter() {
                let potential = self
                    .potentials
                    .get_mut(target.global_index)
                    .ok_or_else(|| {
                        FmmError::Failed(format!("No potential for target {}", target.global_index))
                    })?;
                *potential = *potential
                    + self.kernel.evaluate_scaled_local(
                        &target.coordinate,
                        &centre,
                        width,
                        &leaf.local,
                    );
            }
        }

        Ok(())
    }

    fn p2p(&mut self) -> Result<(), FmmError> {
        let leaves = self
            .tree
            .levels
            .get(self.tree.depth as usize)
            .ok_or_else(|| FmmError::Failed("Tree has no leaf level".to_string()))?;

        for leaf in leaves.iter().filter(|leaf| leaf.n_targets() > 0) {
            let near_field = leaf
                .neighbors()
                .into_iter()
                .map(|key| &leaves[key.morton() as usize])
                .chain(std::iter::once(leaf))
                .collect::<Vec<_>>();

            for target in leaf.targets.iter() {
                let mut potential = Scalar::zero();
                for source in near_field.iter().flat_map(|cell| cell.sources.iter()) {
                    let charge = *self
                        .charges
                        .get(source.global_index)
                        .ok_or(FmmError::MissingCharge(source.global_index))?;
                    potential = potential
                        + charge
                            * self
                                .kernel
                                .greens_fct(&target.coordinate, &source.coordinate)
                                .re;
                }

                let result = self
                    .potentials
                    .get_mut(target.global_index)
                    .ok_or_else(|| {
                        FmmError::Failed(format!("No potential for target {}", target.global_index))
                    })?;
                *result = *result + potential;
            }
        }

        Ok(())
    }
}
