//! Data structures for kernels and translation operators.
use std::marker::PhantomData;

use num::Float;
use num_complex::Complex;

/// The two dimensional Laplace kernel, `g(x, y) = ln |x - y|`, together with its truncated
/// multipole and local expansions.
///
/// Positions are complex numbers, and the kernel is the real part of the complex logarithm
/// `ln(x - y)`, which is what the expansions approximate.
#[derive(Clone, Copy, Debug)]
pub struct Laplace2dKernel<T>
where
    T: Float,
{
    /// Number of terms kept in each expansion.
    pub expansion_order: usize,

    _phantom_t: PhantomData<T>,
}

/// A dense square operator acting on coefficient vectors of an expansion.
///
/// # Fields
/// - `order` - Number of rows and columns, the expansion order.
///
/// - `data` - Entries in row major order, such that entry `(i, j)` is at `i * order + j`.
#[derive(Clone, Debug)]
pub struct TranslationMatrix<T>
where
    T: Float,
{
    /// Number of rows and columns
    pub order: usize,

    /// Row major entries
    pub data: Vec<Complex<T>>,
}

impl<T> Laplace2dKernel<T>
where
    T: Float,
{
    /// Constructor, with a given expansion order.
    pub fn new(expansion_order: usize) -> Self {
        Self {
            expansion_order,
            _phantom_t: PhantomData,
        }
    }
}

impl<T> Default for Laplace2dKernel<T>
where
    T: Float,
{
    fn default() -> Self {
        Self::new(crate::fmm::constants::DEFAULT_EXPANSION_ORDER)
    }
}
