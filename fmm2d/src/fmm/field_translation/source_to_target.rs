//! Multipole to local translations over interaction lists.
use itertools::Itertools;
use num::Float;
use num_complex::Complex;

use crate::{
    fmm::{constants::M2L_MIN_LEVEL, types::SingleNodeFmm},
    traits::{
        field::SourceToTargetTranslation, kernel::SeriesExpansion, tree::SingleTree,
        types::FmmError,
    },
};

impl<Scalar, Kernel> SourceToTargetTranslation for SingleNodeFmm<Scalar, Kernel>
where
    Scalar: Float,
    Kernel: SeriesExpansion<T = Scalar>,
{
    fn m2l(&mut self, level: u64) -> Result<(), FmmError> {
        if level < M2L_MIN_LEVEL {
            return Err(FmmError::Failed(format!(
                "No interaction lists at level {}",
                level
            )));
        }

        let operators = self
            .source_to_target_data
            .get(level as usize)
            .ok_or_else(|| FmmError::Failed(format!("No M2L operators at level {}", level)))?;

        let cells = self
            .tree
            .cells(level)
            .ok_or_else(|| FmmError::Failed(format!("No cells at level {}", level)))?;

        let zero = Complex::new(Scalar::zero(), Scalar::zero());

        // Gather contributions first, multipoles and locals of the same level live in the same cells
        let translated = cells
            .iter()
            .map(|target| -> Result<Vec<Complex<Scalar>>, FmmError> {
                let mut local = vec![zero; self.expansion_order];
                for source in target.interaction_list() {
                    let index = target.key.find_transfer_vector(&source)?;
                    let operator = operators[index].as_ref().ok_or_else(|| {
                        FmmError::Failed(format!("No M2L operator for transfer vector {}", index))
                    })?;
                    operator.apply_add(&cells[source.morton() as usize].multipole, &mut local);
                }
                Ok(local)
            })
            .collect::<Result<Vec<_>, FmmError>>()?;

        let cells = self
            .tree
            .cells_mut(level)
            .ok_or_else(|| FmmError::Failed(format!("No cells at level {}", level)))?;

        cells
            .iter_mut()
            .zip_eq(translated.iter())
            .for_each(|(cell, local)| cell.accumulate_translated_local(local));

        Ok(())
    }
}
