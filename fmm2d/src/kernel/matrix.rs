//! Dense operators for translating expansions.
use std::iter;

use itertools::Itertools;
use num::Float;
use num_complex::Complex;

use crate::kernel::types::TranslationMatrix;

impl<T> TranslationMatrix<T>
where
    T: Float,
{
    /// A square matrix of zeros.
    ///
    /// # Arguments
    /// * `order` - Number of rows and columns.
    pub fn zeros(order: usize) -> Self {
        Self {
            order,
            data: vec![Complex::new(T::zero(), T::zero()); order * order],
        }
    }

    /// Entry `(i, j)`.
    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> Complex<T> {
        debug_assert!(i < self.order && j < self.order);
        self.data[i * self.order + j]
    }

    /// Set entry `(i, j)`.
    #[inline(always)]
    pub fn set(&mut self, i: usize, j: usize, value: Complex<T>) {
        debug_assert!(i < self.order && j < self.order);
        self.data[i * self.order + j] = value;
    }

    /// Matrix-vector product with a coefficient vector of length `order`.
    pub fn apply(&self, coefficients: &[Complex<T>]) -> Vec<Complex<T>> {
        let mut result = vec![Complex::new(T::zero(), T::zero()); self.order];
        self.apply_add(coefficients, &mut result);
        result
    }

    /// Matrix-vector product accumulated into `result`.
    pub fn apply_add(&self, coefficients: &[Complex<T>], result: &mut [Complex<T>]) {
        debug_assert_eq!(coefficients.len(), self.order);
        debug_assert_eq!(result.len(), self.order);

        for (row, r) in self.data.chunks_exact(self.order).zip(result.iter_mut()) {
            *r = row
                .iter()
                .zip(coefficients.iter())
                .fold(*r, |acc, (m, c)| acc + *m * *c);
        }
    }

    /// Multiply row `i` by `ratio^i`.
    pub fn scale_rows(&mut self, ratio: T) {
        if self.order == 0 {
            return;
        }
        for (row, factor) in self.data.chunks_exact_mut(self.order).zip(powers(ratio)) {
            row.iter_mut().for_each(|m| *m = m.scale(factor));
        }
    }

    /// Multiply column `j` by `ratio^j`.
    pub fn scale_columns(&mut self, ratio: T) {
        if self.order == 0 {
            return;
        }
        let factors = powers(ratio).take(self.order).collect_vec();
        for row in self.data.chunks_exact_mut(self.order) {
            row.iter_mut()
                .zip(factors.iter())
                .for_each(|(m, &factor)| *m = m.scale(factor));
        }
    }
}

/// `1, ratio, ratio^2, ...`
fn powers<T: Float>(ratio: T) -> impl Iterator<Item = T> {
    iter::successors(Some(T::one()), move |&power| Some(power * ratio))
}
