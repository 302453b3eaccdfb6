//! Implementation of constructors for complete quadtrees.
use std::fmt;

use itertools::Itertools;
use log::info;
use num::Float;

use crate::{
    traits::{tree::SingleTree, types::FmmError},
    tree::{
        constants::MAX_DEPTH,
        point::points_from_coordinates,
        types::{Cell, Domain, MortonKey, Point, QuadTree},
    },
};

impl<T> QuadTree<T>
where
    T: Float,
{
    /// Constructor for complete quadtrees, sorting source and target points into the cells of the leaf level.
    ///
    /// Expansion coefficients are left empty until [QuadTree::allocate_expansions] is called.
    ///
    /// # Arguments
    /// * `sources` - Source coordinates, interleaved as `[x_1, y_1, ..., x_N, y_N]`.
    /// * `targets` - Target coordinates, interleaved as `[x_1, y_1, ..., x_M, y_M]`.
    /// * `depth` - The level of the leaves.
    /// * `domain` - The square subdivided by the tree, all points must lie inside it.
    pub fn new(
        sources: &[T],
        targets: &[T],
        depth: u64,
        domain: Domain<T>,
    ) -> Result<QuadTree<T>, FmmError> {
        if depth > MAX_DEPTH {
            return Err(FmmError::InvalidDepth {
                depth,
                max: MAX_DEPTH,
            });
        }

        let source_points = points_from_coordinates(sources, &domain, depth)?;
        let target_points = points_from_coordinates(targets, &domain, depth)?;

        let mut levels = (0..=depth)
            .map(|level| {
                (0..(1u64 << (2 * level)))
                    .map(|morton| Cell::new(MortonKey::from_morton(morton, level), 0))
                    .collect_vec()
            })
            .collect_vec();

        let n_sources = source_points.len();
        let n_targets = target_points.len();

        // Cells at each level are indexed by their Morton index
        let leaves = &mut levels[depth as usize];
        for point in source_points.into_iter() {
            leaves[point.encoded_key.morton() as usize].add_source(point);
        }
        for point in target_points.into_iter() {
            leaves[point.encoded_key.morton() as usize].add_target(point);
        }

        let tree = QuadTree {
            depth,
            domain,
            levels,
            n_sources,
            n_targets,
        };

        info!(
            "Built quadtree of depth {} with {} sources and {} targets, cluster threshold {}",
            depth,
            n_sources,
            n_targets,
            tree.cluster_threshold()
        );

        Ok(tree)
    }

    /// Size every expansion of every cell for a given expansion order, zeroing the coefficients.
    ///
    /// # Arguments
    /// * `expansion_order` - Number of coefficients in each expansion.
    pub fn allocate_expansions(&mut self, expansion_order: usize) {
        for cell in self.levels.iter_mut().flatten() {
            let key = cell.key;
            let sources = std::mem::take(&mut cell.sources);
            let targets = std::mem::take(&mut cell.targets);
            *cell = Cell::new(key, expansion_order);
            cell.sources = sources;
            cell.targets = targets;
        }
    }

    /// Zero every expansion of every cell, keeping the points.
    pub fn clear_expansions(&mut self) {
        self.levels
            .iter_mut()
            .flatten()
            .for_each(|cell| cell.clear_expansions());
    }

    /// Get a reference to a cell by its level and Morton index.
    pub fn cell_at(&self, level: u64, morton: u64) -> Option<&Cell<T>> {
        self.levels.get(level as usize)?.get(morton as usize)
    }

    /// Get a mutable reference to a cell by its level and Morton index.
    pub fn cell_at_mut(&mut self, level: u64, morton: u64) -> Option<&mut Cell<T>> {
        self.levels.get_mut(level as usize)?.get_mut(morton as usize)
    }

    /// Get a mutable reference to the cells at a given level.
    pub fn cells_mut(&mut self, level: u64) -> Option<&mut [Cell<T>]> {
        self.levels.get_mut(level as usize).map(|c| c.as_mut_slice())
    }

    /// Number of sources and targets held by each leaf, in Morton order.
    pub fn occupancy(&self) -> Vec<[usize; 2]> {
        self.all_leaves()
            .iter()
            .map(|leaf| [leaf.n_sources(), leaf.n_targets()])
            .collect()
    }
}

impl<T> SingleTree for QuadTree<T>
where
    T: Float,
{
    type Scalar = T;
    type Domain = Domain<T>;
    type Node = MortonKey;
    type Cell = Cell<T>;

    fn root(&self) -> Self::Node {
        MortonKey::root()
    }

    fn depth(&self) -> u64 {
        self.depth
    }

    fn n_keys(&self, level: u64) -> Option<usize> {
        self.levels.get(level as usize).map(|cells| cells.len())
    }

    fn n_keys_tot(&self) -> usize {
        self.levels.iter().map(|cells| cells.len()).sum()
    }

    fn cells(&self, level: u64) -> Option<&[Self::Cell]> {
        self.levels.get(level as usize).map(|c| c.as_slice())
    }

    fn cell(&self, node: &Self::Node) -> Option<&Self::Cell> {
        self.cell_at(node.level(), node.morton())
    }

    fn all_leaves(&self) -> &[Self::Cell] {
        // A tree always holds its leaf level
        self.levels
            .get(self.depth as usize)
            .map(|c| c.as_slice())
            .unwrap_or(&[])
    }

    fn sources(&self, leaf: &Self::Node) -> Option<&[Point<Self::Scalar>]> {
        if leaf.level() != self.depth {
            return None;
        }
        self.cell(leaf).map(|c| c.sources.as_slice())
    }

    fn targets(&self, leaf: &Self::Node) -> Option<&[Point<Self::Scalar>]> {
        if leaf.level() != self.depth {
            return None;
        }
        self.cell(leaf).map(|c| c.targets.as_slice())
    }

    fn n_sources_tot(&self) -> usize {
        self.n_sources
    }

    fn n_targets_tot(&self) -> usize {
        self.n_targets
    }

    fn cluster_threshold(&self) -> usize {
        self.all_leaves()
            .iter()
            .map(|leaf| leaf.n_sources().max(leaf.n_targets()))
            .max()
            .unwrap_or(0)
    }

    fn domain(&self) -> &Self::Domain {
        &self.domain
    }
}

impl<T> fmt::Display for QuadTree<T>
where
    T: Float + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "QuadTree of depth {} over origin ({}, {}) side length {}",
            self.depth, self.domain.origin[0], self.domain.origin[1], self.domain.side_length
        )?;
        for (level, cells) in self.levels.iter().enumerate() {
            writeln!(f, "Level {}: {} cells", level, cells.len())?;
        }
        for leaf in self
            .all_leaves()
            .iter()
            .filter(|leaf| leaf.n_sources() + leaf.n_targets() > 0)
        {
            write!(f, "{}", leaf)?;
        }
        Ok(())
    }
}
