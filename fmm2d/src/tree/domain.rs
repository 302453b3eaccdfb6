//! Constructors for square computational domains.
use num::Float;
use num_complex::Complex;

use crate::{traits::tree::Domain as DomainTrait, tree::types::Domain};

impl<T> Domain<T>
where
    T: Float,
{
    /// Construct a domain a user specified origin and side length.
    ///
    /// # Arguments
    /// * `origin` - The lower left corner of the domain.
    /// * `side_length` - The side length of the square domain.
    pub fn new(origin: &[T; 2], side_length: T) -> Self {
        Domain {
            origin: *origin,
            side_length,
        }
    }

    /// The unit square `[0, 1) x [0, 1)`.
    pub fn unit() -> Self {
        Domain::new(&[T::zero(), T::zero()], T::one())
    }

    /// Check whether a point lies in the half open domain `[origin, origin + side_length)` along each axis.
    ///
    /// # Arguments
    /// * `point` - Point being queried, x as the real part and y as the imaginary part.
    pub fn contains(&self, point: &Complex<T>) -> bool {
        let inside = |p: T, o: T| o <= p && p < o + self.side_length;
        inside(point.re, self.origin[0]) && inside(point.im, self.origin[1])
    }

    /// Side length of the boxes at a given level of a quadtree subdividing this domain.
    ///
    /// # Arguments
    /// * `level` - Refinement level, the domain itself is level 0.
    pub fn cell_width(&self, level: u64) -> T {
        self.side_length / T::from(1u64 << level).unwrap_or_else(T::one)
    }
}

impl<T> Default for Domain<T>
where
    T: Float,
{
    fn default() -> Self {
        Domain::unit()
    }
}

impl<T> DomainTrait for Domain<T>
where
    T: Float,
{
    type Scalar = T;

    fn origin(&self) -> &[Self::Scalar; 2] {
        &self.origin
    }

    fn side_length(&self) -> Self::Scalar {
        self.side_length
    }
}
