//! Staged evaluation of single node FMMs
use std::time::Duration;

use log::debug;
use num::Float;

use crate::{
    fmm::{constants::M2L_MIN_LEVEL, helpers::optionally_time, types::SingleNodeFmm},
    traits::{
        field::{SourceToTargetTranslation, SourceTranslation, TargetTranslation},
        fmm::Evaluate,
        kernel::SeriesExpansion,
        types::{FmmError, FmmOperatorTime, FmmOperatorType, FmmState},
    },
};

impl<Scalar, Kernel> SingleNodeFmm<Scalar, Kernel>
where
    Scalar: Float,
    Kernel: SeriesExpansion<T = Scalar>,
{
    /// Fail unless the evaluation has reached `expected`.
    fn check_state(&self, expected: FmmState) -> Result<(), FmmError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(FmmError::InvalidState {
                expected,
                found: self.state,
            })
        }
    }

    fn record(&mut self, operator: FmmOperatorType, duration: Option<Duration>) {
        if let Some(d) = duration {
            debug!("{:?} took {} ms", operator, d.as_millis());
            self.operator_times
                .push(FmmOperatorTime::from_duration(operator, d));
        }
    }
}

impl<Scalar, Kernel> Evaluate for SingleNodeFmm<Scalar, Kernel>
where
    Scalar: Float,
    Kernel: SeriesExpansion<T = Scalar>,
{
    fn evaluate_upward_pass(&mut self) -> Result<(), FmmError> {
        self.check_state(FmmState::LeafPopulated)?;

        let (result, duration) = optionally_time(self.timed, || self.p2m());
        result?;
        self.record(FmmOperatorType::P2M, duration);

        // Parents on levels 0 and 1 are never used
        for level in ((M2L_MIN_LEVEL + 1)..=self.tree.depth).rev() {
            let (result, duration) = optionally_time(self.timed, || self.m2m(level));
            result?;
            self.record(FmmOperatorType::M2M(level), duration);
        }

        self.state = FmmState::UpwardComplete;
        Ok(())
    }

    fn evaluate_m2l_pass(&mut self) -> Result<(), FmmError> {
        self.check_state(FmmState::UpwardComplete)?;

        for level in M2L_MIN_LEVEL..=self.tree.depth {
            let (result, duration) = optionally_time(self.timed, || self.m2l(level));
            result?;
            self.record(FmmOperatorType::M2L(level), duration);
        }

        self.state = FmmState::Downward1Complete;
        Ok(())
    }

    fn evaluate_l2l_pass(&mut self) -> Result<(), FmmError> {
        self.check_state(FmmState::Downward1Complete)?;

        let depth = self.tree.depth;
        if depth >= M2L_MIN_LEVEL {
            // Interaction lists on the shallowest level already cover everything outside the near field
            if let Some(cells) = self.tree.cells_mut(M2L_MIN_LEVEL) {
                cells
                    .iter_mut()
                    .for_each(|cell| cell.merge_translated_local());
            }

            for level in M2L_MIN_LEVEL..depth {
                let (result, duration) = optionally_time(self.timed, || self.l2l(level));
                result?;
                self.record(FmmOperatorType::L2L(level), duration);
            }
        }

        self.state = FmmState::Downward2Complete;
        Ok(())
    }

    fn evaluate_leaf_targets(&mut self) -> Result<(), FmmError> {
        self.check_state(FmmState::Downward2Complete)?;

        let (result, duration) = optionally_time(self.timed, || self.l2p());
        result?;
        self.record(FmmOperatorType::L2P, duration);

        let (result, duration) = optionally_time(self.timed, || self.p2p());
        result?;
        self.record(FmmOperatorType::P2P, duration);

        self.state = FmmState::Evaluated;
        Ok(())
    }
}
