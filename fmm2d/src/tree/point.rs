//! Implementation of traits for handling, and sorting, containers of point data.
use std::cmp::Ordering;

use num::Float;
use num_complex::Complex;

use crate::{
    fmm::helpers::is_coincident,
    traits::types::FmmError,
    tree::types::{Domain, MortonKey, Point, Points},
};

impl<T> Point<T>
where
    T: Float,
{
    /// Construct a point, encoding it at the given level of a tree over `domain`.
    ///
    /// # Arguments
    /// * `coordinate` - Position of the point.
    /// * `global_index` - Position of the point in the user's input.
    /// * `domain` - Domain of the tree.
    /// * `level` - Level at which the point is encoded, the leaf level of the tree.
    pub fn new(
        coordinate: Complex<T>,
        global_index: usize,
        domain: &Domain<T>,
        level: u64,
    ) -> Result<Self, FmmError> {
        let encoded_key = MortonKey::from_point(&coordinate, domain, level)?;
        Ok(Point {
            coordinate,
            global_index,
            encoded_key,
        })
    }

    /// Check whether two points coincide, to within machine precision scaled by their magnitude.
    pub fn approx_eq(&self, other: &Self) -> bool {
        is_coincident(&self.coordinate, &other.coordinate)
    }
}

/// Read interleaved coordinates `[x_1, y_1, ..., x_N, y_N]` into points encoded at a given level.
///
/// # Arguments
/// * `coordinates` - Interleaved coordinates.
/// * `domain` - Domain of the tree.
/// * `level` - Level at which the points are encoded.
pub fn points_from_coordinates<T: Float>(
    coordinates: &[T],
    domain: &Domain<T>,
    level: u64,
) -> Result<Points<T>, FmmError> {
    if coordinates.len() % 2 != 0 {
        return Err(FmmError::InvalidInput(
            "Only 2D FMM supported, coordinates must come in (x, y) pairs".to_string(),
        ));
    }

    coordinates
        .chunks_exact(2)
        .enumerate()
        .map(|(global_index, xy)| {
            Point::new(Complex::new(xy[0], xy[1]), global_index, domain, level)
        })
        .collect()
}

impl<T> PartialEq for Point<T>
where
    T: Float,
{
    fn eq(&self, other: &Self) -> bool {
        self.encoded_key == other.encoded_key && self.global_index == other.global_index
    }
}

impl<T> Eq for Point<T> where T: Float {}

impl<T> Ord for Point<T>
where
    T: Float,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.encoded_key
            .cmp(&other.encoded_key)
            .then(self.global_index.cmp(&other.global_index))
    }
}

impl<T> PartialOrd for Point<T>
where
    T: Float,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
