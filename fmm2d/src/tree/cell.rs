//! Cells of a quadtree, owning their points and expansion coefficients.
use std::fmt;

use num::Float;
use num_complex::Complex;

use crate::{
    traits::tree::FmmTreeNode,
    tree::types::{Cell, Domain, MortonKey, Point},
};

/// Element-wise accumulation of `increment` into `buffer`.
fn accumulate<T: Float>(buffer: &mut [Complex<T>], increment: &[Complex<T>]) {
    debug_assert_eq!(buffer.len(), increment.len());
    buffer
        .iter_mut()
        .zip(increment.iter())
        .for_each(|(b, i)| *b = *b + *i);
}

impl<T> Cell<T>
where
    T: Float,
{
    /// Construct an empty cell with zeroed expansions.
    ///
    /// # Arguments
    /// * `key` - The key of the cell.
    /// * `expansion_order` - Number of coefficients in each expansion.
    pub fn new(key: MortonKey, expansion_order: usize) -> Self {
        Cell {
            key,
            sources: Vec::new(),
            targets: Vec::new(),
            multipole: vec![Complex::new(T::zero(), T::zero()); expansion_order],
            translated_local: vec![Complex::new(T::zero(), T::zero()); expansion_order],
            local: vec![Complex::new(T::zero(), T::zero()); expansion_order],
        }
    }

    /// Centre of the cell.
    pub fn centre(&self, domain: &Domain<T>) -> Complex<T> {
        self.key.centre(domain)
    }

    /// Add a source point to this cell.
    pub fn add_source(&mut self, point: Point<T>) {
        self.sources.push(point);
    }

    /// Add a target point to this cell.
    pub fn add_target(&mut self, point: Point<T>) {
        self.targets.push(point);
    }

    /// Add to the multipole expansion.
    pub fn accumulate_multipole(&mut self, increment: &[Complex<T>]) {
        accumulate(&mut self.multipole, increment);
    }

    /// Add to the local expansion.
    pub fn accumulate_local(&mut self, increment: &[Complex<T>]) {
        accumulate(&mut self.local, increment);
    }

    /// Add to the local expansion due to the interaction list.
    pub fn accumulate_translated_local(&mut self, increment: &[Complex<T>]) {
        accumulate(&mut self.translated_local, increment);
    }

    /// Add the local expansion due to the interaction list into the local expansion.
    pub fn merge_translated_local(&mut self) {
        accumulate(&mut self.local, &self.translated_local);
    }

    /// Zero all expansion coefficients, keeping the points.
    pub fn clear_expansions(&mut self) {
        let zero = Complex::new(T::zero(), T::zero());
        self.multipole.iter_mut().for_each(|c| *c = zero);
        self.translated_local.iter_mut().for_each(|c| *c = zero);
        self.local.iter_mut().for_each(|c| *c = zero);
    }

    /// Same level cells sharing an edge or a vertex with this cell.
    pub fn neighbors(&self) -> Vec<MortonKey> {
        self.key.neighbors()
    }

    /// Neighbours of the parent of this cell.
    pub fn parent_neighbors(&self) -> Vec<MortonKey> {
        self.key.parent_neighbors()
    }

    /// Cells whose multipole expansions are translated into this cell's local expansion.
    pub fn interaction_list(&self) -> Vec<MortonKey> {
        self.key.interaction_list()
    }

    /// Number of source points in this cell.
    pub fn n_sources(&self) -> usize {
        self.sources.len()
    }

    /// Number of target points in this cell.
    pub fn n_targets(&self) -> usize {
        self.targets.len()
    }
}

impl<T> fmt::Display for Cell<T>
where
    T: Float + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Cell (level {}, index {}) anchor {:?}: {} sources, {} targets",
            self.key.level(),
            self.key.morton(),
            self.key.anchor(),
            self.n_sources(),
            self.n_targets()
        )?;
        for (name, points) in [("sources", &self.sources), ("targets", &self.targets)] {
            for point in points.iter() {
                writeln!(
                    f,
                    "  {} [{}] ({}, {})",
                    name, point.global_index, point.coordinate.re, point.coordinate.im
                )?;
            }
        }
        Ok(())
    }
}
