//! Data access and solvers for single node FMMs
use num::Float;
use num_complex::Complex;

use crate::{
    fmm::types::SingleNodeFmm,
    traits::{
        fmm::{Evaluate, Fmm},
        kernel::SeriesExpansion,
        tree::SingleTree,
        types::{FmmError, FmmState},
    },
    tree::types::{Cell, MortonKey, Point, QuadTree},
};

impl<Scalar, Kernel> SingleNodeFmm<Scalar, Kernel>
where
    Scalar: Float,
    Kernel: SeriesExpansion<T = Scalar>,
{
    fn check_charges(&self, charges: &[Scalar]) -> Result<(), FmmError> {
        if charges.len() == self.tree.n_sources_tot() {
            Ok(())
        } else {
            Err(FmmError::InvalidInput(format!(
                "Expected {} charges, found {}",
                self.tree.n_sources_tot(),
                charges.len()
            )))
        }
    }

    /// Coordinates of the points held by the leaves, restored to input order and interleaved.
    fn gather_coordinates<'a, F>(&'a self, n_points: usize, points: F) -> Vec<Scalar>
    where
        F: Fn(&'a Cell<Scalar>) -> &'a [Point<Scalar>],
    {
        let mut coordinates = vec![Scalar::zero(); 2 * n_points];
        for point in self.tree.all_leaves().iter().flat_map(points) {
            coordinates[2 * point.global_index] = point.coordinate.re;
            coordinates[2 * point.global_index + 1] = point.coordinate.im;
        }
        coordinates
    }
}

impl<Scalar, Kernel> Fmm for SingleNodeFmm<Scalar, Kernel>
where
    Scalar: Float,
    Kernel: SeriesExpansion<T = Scalar>,
{
    type Scalar = Scalar;
    type Tree = QuadTree<Scalar>;
    type Kernel = Kernel;

    fn multipole(&self, key: &MortonKey) -> Option<&[Complex<Self::Scalar>]> {
        self.tree.cell(key).map(|cell| cell.multipole.as_slice())
    }

    fn local(&self, key: &MortonKey) -> Option<&[Complex<Self::Scalar>]> {
        self.tree.cell(key).map(|cell| cell.local.as_slice())
    }

    fn potentials(&self) -> &[Self::Scalar] {
        &self.potentials
    }

    fn expansion_order(&self) -> usize {
        self.expansion_order
    }

    fn tree(&self) -> &Self::Tree {
        &self.tree
    }

    fn kernel(&self) -> &Self::Kernel {
        &self.kernel
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn state(&self) -> FmmState {
        self.state
    }

    fn cluster_threshold(&self) -> usize {
        self.tree.cluster_threshold()
    }

    fn clear(&mut self, charges: &[Self::Scalar]) -> Result<(), FmmError> {
        self.check_charges(charges)?;

        self.tree.clear_expansions();
        self.potentials
            .iter_mut()
            .for_each(|p| *p = Scalar::zero());
        self.charges = charges.to_vec();
        self.operator_times.clear();
        self.state = FmmState::LeafPopulated;

        Ok(())
    }

    fn solve(&mut self, charges: &[Self::Scalar]) -> Result<Vec<Self::Scalar>, FmmError> {
        self.clear(charges)?;
        self.evaluate()?;
        Ok(self.potentials.clone())
    }

    fn solve_direct(&self, charges: &[Self::Scalar]) -> Result<Vec<Self::Scalar>, FmmError> {
        self.check_charges(charges)?;

        let n_sources = self.tree.n_sources_tot();
        let n_targets = self.tree.n_targets_tot();
        let sources = self.gather_coordinates(n_sources, |leaf| leaf.sources.as_slice());
        let targets = self.gather_coordinates(n_targets, |leaf| leaf.targets.as_slice());

        let mut result = vec![Scalar::zero(); n_targets];
        self.kernel
            .evaluate_st(&sources, &targets, charges, &mut result);

        Ok(result)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        fmm::{
            helpers::{max_abs_error, relative_l2_error},
            types::SingleNodeBuilder,
        },
        kernel::types::Laplace2dKernel,
        traits::kernel::Kernel,
        tree::helpers::{points_fixture, points_fixture_circle, uniform_grid_fixture},
    };
    use approx::assert_relative_eq;

    fn uniform_grid_error(depth: u64, expansion_order: usize) -> f64 {
        uniform_grid_error_at(3, depth, expansion_order)
    }

    fn uniform_grid_error_at(grid_depth: u64, depth: u64, expansion_order: usize) -> f64 {
        let (sources, targets, charges) = uniform_grid_fixture::<f64>(grid_depth);
        let mut fmm = SingleNodeBuilder::new()
            .tree(&sources, &targets, None, Some(depth))
            .unwrap()
            .parameters(&charges, expansion_order, Laplace2dKernel::default())
            .unwrap()
            .build()
            .unwrap();

        let found = fmm.solve(&charges).unwrap();
        let expected = fmm.solve_direct(&charges).unwrap();
        assert!(found.iter().all(|p| p.is_finite()));
        max_abs_error(&found, &expected)
    }

    #[test]
    fn test_uniform_grid_accuracy() {
        let errors = [5, 12, 20]
            .iter()
            .map(|&p| uniform_grid_error(3, p))
            .collect::<Vec<_>>();

        assert!(errors[0] < 1e-2);
        assert!(errors[1] < 1e-5);
        assert!(errors[2] < 1e-9);

        // Error shrinks as terms are added
        assert!(errors[1] < errors[0]);
        assert!(errors[2] < errors[1]);
    }

    #[test]
    fn test_deeper_tree_accuracy() {
        assert!(uniform_grid_error(2, 12) < 1e-5);
        assert!(uniform_grid_error(4, 12) < 1e-5);
        assert!(uniform_grid_error_at(2, 2, 12) < 1e-5);
    }

    #[test]
    fn test_single_precision_deep_tree() {
        let depth = 6;
        let (sources, targets, charges) = uniform_grid_fixture::<f32>(depth);
        let mut fmm = SingleNodeBuilder::new()
            .tree(&sources, &targets, None, Some(depth))
            .unwrap()
            .parameters(&charges, 12, Laplace2dKernel::default())
            .unwrap()
            .build()
            .unwrap();

        let found = fmm.solve(&charges).unwrap();
        assert!(found.iter().all(|p| p.is_finite()));

        // Reference potentials for a sample of targets, summed in double precision
        let kernel = Laplace2dKernel::<f64>::new(1);
        let sources = sources.iter().map(|&x| x as f64).collect::<Vec<_>>();
        let charges = charges.iter().map(|&q| q as f64).collect::<Vec<_>>();
        for index in (0..found.len()).step_by(1021) {
            let target = [targets[2 * index] as f64, targets[2 * index + 1] as f64];
            let mut expected = [0.0];
            kernel.evaluate_st(&sources, &target, &charges, &mut expected);
            assert_relative_eq!(found[index] as f64, expected[0], max_relative = 1e-4);
        }

        // Higher orders stay finite as well
        let (sources, targets, charges) = uniform_grid_fixture::<f32>(5);
        let mut fmm = SingleNodeBuilder::new()
            .tree(&sources, &targets, None, Some(5))
            .unwrap()
            .parameters(&charges, 20, Laplace2dKernel::default())
            .unwrap()
            .build()
            .unwrap();
        let found = fmm.solve(&charges).unwrap();
        let expected = fmm.solve_direct(&charges).unwrap();
        assert!(!max_abs_error(&found, &expected).is_nan());
        assert!(relative_l2_error(&found, &expected) < 1e-3);
    }

    #[test]
    fn test_random_points() {
        let sources = points_fixture::<f64>(300, None, None, Some(0));
        let targets = points_fixture::<f64>(200, None, None, Some(1));
        let charges = points_fixture::<f64>(150, None, None, Some(2));

        let mut fmm = SingleNodeBuilder::new()
            .tree(&sources, &targets, None, Some(3))
            .unwrap()
            .parameters(&charges, 24, Laplace2dKernel::default())
            .unwrap()
            .build()
            .unwrap();

        let found = fmm.solve(&charges).unwrap();
        let expected = fmm.solve_direct(&charges).unwrap();
        assert!(relative_l2_error(&found, &expected) < 1e-6);
    }

    #[test]
    fn test_clustered_points() {
        let sources = points_fixture_circle::<f64>(400);
        let charges = vec![1.0; 400];

        let mut fmm = SingleNodeBuilder::new()
            .tree(&sources, &sources, Some(20), None)
            .unwrap()
            .parameters(&charges, 24, Laplace2dKernel::default())
            .unwrap()
            .build()
            .unwrap();

        let found = fmm.solve(&charges).unwrap();
        let expected = fmm.solve_direct(&charges).unwrap();
        assert!(relative_l2_error(&found, &expected) < 1e-6);
    }

    #[test]
    fn test_coincident_pair() {
        let sources = vec![0.3, 0.3];
        let targets = vec![0.3, 0.3, 0.7, 0.7];
        let charges = vec![1.0];

        let mut fmm = SingleNodeBuilder::new()
            .tree(&sources, &targets, None, Some(2))
            .unwrap()
            .parameters(&charges, 8, Laplace2dKernel::default())
            .unwrap()
            .build()
            .unwrap();

        let found = fmm.solve(&charges).unwrap();
        let expected = fmm.solve_direct(&charges).unwrap();

        assert_eq!(found[0], 0.0);
        assert_eq!(expected[0], 0.0);
        assert!(found.iter().chain(expected.iter()).all(|p| p.is_finite()));
        assert_relative_eq!(found[1], (0.4f64 * 2f64.sqrt()).ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_solve_direct_idempotent() {
        let (sources, targets, charges) = uniform_grid_fixture::<f64>(2);
        let fmm = SingleNodeBuilder::new()
            .tree(&sources, &targets, None, Some(2))
            .unwrap()
            .parameters(&charges, 6, Laplace2dKernel::default())
            .unwrap()
            .build()
            .unwrap();

        let first = fmm.solve_direct(&charges).unwrap();
        let second = fmm.solve_direct(&charges).unwrap();
        assert_eq!(first, second);
        assert!(fmm.solve_direct(&charges[1..]).is_err());
    }

    #[test]
    fn test_resolve() {
        let (sources, targets, charges) = uniform_grid_fixture::<f64>(3);
        let mut fmm = SingleNodeBuilder::new()
            .tree(&sources, &targets, None, Some(3))
            .unwrap()
            .parameters(&charges, 10, Laplace2dKernel::default())
            .unwrap()
            .build()
            .unwrap();

        let first = fmm.solve(&charges).unwrap();
        let again = fmm.solve(&charges).unwrap();
        assert_eq!(first, again);

        // Potentials are linear in the charges
        let doubled = charges.iter().map(|c| 2.0 * c).collect::<Vec<_>>();
        let second = fmm.solve(&doubled).unwrap();
        for (a, b) in first.iter().zip(second.iter()) {
            assert_relative_eq!(2.0 * a, *b, epsilon = 1e-10);
        }

        assert!(fmm.solve(&charges[..10]).is_err());
        assert_eq!(fmm.state(), FmmState::Evaluated);
    }

    #[test]
    fn test_distinct_sources_and_targets() {
        let sources = points_fixture::<f64>(100, None, None, Some(7));
        let targets = points_fixture::<f64>(37, Some(0.2), Some(0.6), Some(8));
        let charges = points_fixture::<f64>(50, Some(-1.0), Some(1.0), Some(9));

        let mut fmm = SingleNodeBuilder::new()
            .tree(&sources, &targets, None, Some(3))
            .unwrap()
            .parameters(&charges, 24, Laplace2dKernel::default())
            .unwrap()
            .build()
            .unwrap();

        let found = fmm.solve(&charges).unwrap();
        let expected = fmm.solve_direct(&charges).unwrap();
        assert_eq!(found.len(), 37);
        assert!(max_abs_error(&found, &expected) < 1e-6);

        // Local expansions are only populated below level 2
        assert!(fmm
            .local(&MortonKey::root())
            .unwrap()
            .iter()
            .all(|c| *c == Complex::new(0.0, 0.0)));
        assert_eq!(fmm.expansion_order(), 24);
    }
}
