//! Implementation of the two dimensional Laplace kernel and its series expansions.
//!
//! For a source at `x` and an expansion centre `c`, the kernel `ln(y - x)` has the multipole (far-field)
//! expansion
//!
//! $$ \ln(y - x) = \ln(z) - \sum_{m \geq 1} \frac{(x - c)^m}{m z^m}, \quad z = y - c, |z| > |x - c|$$
//!
//! and the local (near-field) expansion
//!
//! $$ \ln(y - x) = \ln(c - x) - \sum_{m \geq 1} \frac{(y - c)^m}{m (x - c)^m}, \quad |y - c| < |x - c|$$
//!
//! both truncated to `expansion_order` terms. The potential is the real part.
//!
//! Scaled expansions with a normalising length `w` store `a_m / w^m` for multipole and `b_m w^m` for
//! local coefficients, which amounts to expanding in `z / w`. The constant term of a local expansion
//! and the `ln(z)` term of a multipole expansion are left as they are.
use num::Float;
use num_complex::Complex;

use crate::{
    fmm::helpers::is_coincident,
    kernel::{
        helpers::check_dimensions_evaluate,
        types::{Laplace2dKernel, TranslationMatrix},
    },
    traits::kernel::{Kernel, SeriesExpansion},
};

#[inline(always)]
fn real<T: Float>(n: usize) -> T {
    T::from(n).unwrap_or_else(T::nan)
}

impl<T> Kernel for Laplace2dKernel<T>
where
    T: Float,
{
    type T = T;

    fn greens_fct(&self, target: &Complex<T>, source: &Complex<T>) -> Complex<T> {
        if is_coincident(target, source) {
            Complex::new(T::zero(), T::zero())
        } else {
            (target - source).ln()
        }
    }

    fn evaluate_st(&self, sources: &[T], targets: &[T], charges: &[T], result: &mut [T]) {
        check_dimensions_evaluate(self, sources, targets, charges, result);

        result
            .iter_mut()
            .zip(targets.chunks_exact(2))
            .for_each(|(potential, target)| {
                let target = Complex::new(target[0], target[1]);
                *potential = *potential
                    + evaluate_laplace_one_target(self, &target, sources, charges);
            });
    }

    fn space_dimension(&self) -> usize {
        2
    }
}

/// Potential at a single target due to charged sources given as interleaved coordinates.
pub fn evaluate_laplace_one_target<T: Float>(
    kernel: &Laplace2dKernel<T>,
    target: &Complex<T>,
    sources: &[T],
    charges: &[T],
) -> T {
    sources
        .chunks_exact(2)
        .zip(charges.iter())
        .fold(T::zero(), |acc, (source, &charge)| {
            let source = Complex::new(source[0], source[1]);
            acc + charge * kernel.greens_fct(target, &source).re
        })
}

impl<T> SeriesExpansion for Laplace2dKernel<T>
where
    T: Float,
{
    fn expansion_order(&self) -> usize {
        self.expansion_order
    }

    fn set_expansion_order(&mut self, expansion_order: usize) {
        self.expansion_order = expansion_order;
    }

    fn multipole_coefficients(&self, source: &Complex<T>, centre: &Complex<T>) -> Vec<Complex<T>> {
        let p = self.expansion_order;
        let mut result = vec![Complex::new(T::zero(), T::zero()); p];
        if p == 0 {
            return result;
        }

        let diff = source - centre;
        let mut power = Complex::new(T::one(), T::zero());
        result[0] = power;
        for (m, coefficient) in result.iter_mut().enumerate().skip(1) {
            power = power * diff;
            *coefficient = -power / real::<T>(m);
        }
        result
    }

    fn local_coefficients(&self, source: &Complex<T>, centre: &Complex<T>) -> Vec<Complex<T>> {
        let p = self.expansion_order;
        let mut result = vec![Complex::new(T::zero(), T::zero()); p];
        if p == 0 {
            return result;
        }

        result[0] = (centre - source).ln();
        let inv_diff = (source - centre).inv();
        let mut power = Complex::new(T::one(), T::zero());
        for (m, coefficient) in result.iter_mut().enumerate().skip(1) {
            power = power * inv_diff;
            *coefficient = -power / real::<T>(m);
        }
        result
    }

    fn m2m_operator(&self, from: &Complex<T>, to: &Complex<T>) -> TranslationMatrix<T> {
        let p = self.expansion_order;
        let t = to - from;
        let mut matrix = TranslationMatrix::zeros(p);
        if p == 0 {
            return matrix;
        }

        // Lower triangular, re-expanding ln(z) and z^-j about the new centre
        matrix.set(0, 0, Complex::new(T::one(), T::zero()));
        for i in 1..p {
            matrix.set(i, i, Complex::new(T::one(), T::zero()));

            let first = if i == 1 {
                t
            } else {
                -matrix.get(i - 1, 0) * t * real::<T>(i - 1) / real::<T>(i)
            };
            matrix.set(i, 0, first);

            for j in (1..i).rev() {
                let value = -matrix.get(i, j + 1) * t * real::<T>(j) / real::<T>(i - j);
                matrix.set(i, j, value);
            }
        }
        matrix
    }

    fn m2l_operator(&self, from: &Complex<T>, to: &Complex<T>) -> TranslationMatrix<T> {
        let p = self.expansion_order;
        let t = to - from;
        let mut matrix = TranslationMatrix::zeros(p);
        if p == 0 {
            return matrix;
        }

        let inv_t = t.inv();
        matrix.set(0, 0, t.ln());
        let mut power = Complex::new(T::one(), T::zero());
        for j in 1..p {
            power = power * inv_t;
            matrix.set(0, j, power);
        }
        if p > 1 {
            matrix.set(1, 0, inv_t);
        }
        for i in 2..p {
            let value = -matrix.get(i - 1, 0) * inv_t * real::<T>(i - 1) / real::<T>(i);
            matrix.set(i, 0, value);
        }
        for i in 1..p {
            for j in 1..p {
                let value = -matrix.get(i - 1, j) * inv_t * real::<T>(i + j - 1) / real::<T>(i);
                matrix.set(i, j, value);
            }
        }
        matrix
    }

    fn l2l_operator(&self, from: &Complex<T>, to: &Complex<T>) -> TranslationMatrix<T> {
        let p = self.expansion_order;
        let t = to - from;
        let mut matrix = TranslationMatrix::zeros(p);

        // Upper triangular with binomial entries, M[i][j] = C(j, i) t^(j - i)
        for i in 0..p {
            matrix.set(i, i, Complex::new(T::one(), T::zero()));
            for j in (i + 1)..p {
                let value = matrix.get(i, j - 1) * t * real::<T>(j) / real::<T>(j - i);
                matrix.set(i, j, value);
            }
        }
        matrix
    }

    fn evaluate_local(
        &self,
        target: &Complex<T>,
        centre: &Complex<T>,
        coefficients: &[Complex<T>],
    ) -> T {
        let z = target - centre;
        coefficients
            .iter()
            .rev()
            .fold(Complex::new(T::zero(), T::zero()), |acc, c| acc * z + c)
            .re
    }

    fn evaluate_multipole(
        &self,
        target: &Complex<T>,
        centre: &Complex<T>,
        coefficients: &[Complex<T>],
    ) -> T {
        let Some((first, rest)) = coefficients.split_first() else {
            return T::zero();
        };

        let z = target - centre;
        let inv_z = z.inv();
        let tail = rest
            .iter()
            .rev()
            .fold(Complex::new(T::zero(), T::zero()), |acc, c| (acc + c) * inv_z);

        (first * z.ln() + tail).re
    }

    fn scaled_multipole_coefficients(
        &self,
        source: &Complex<T>,
        centre: &Complex<T>,
        scale: T,
    ) -> Vec<Complex<T>> {
        let zero = Complex::new(T::zero(), T::zero());
        self.multipole_coefficients(&(source - centre).unscale(scale), &zero)
    }

    fn scaled_local_coefficients(
        &self,
        source: &Complex<T>,
        centre: &Complex<T>,
        scale: T,
    ) -> Vec<Complex<T>> {
        let zero = Complex::new(T::zero(), T::zero());
        let mut result = self.local_coefficients(&(source - centre).unscale(scale), &zero);
        if let Some(first) = result.first_mut() {
            *first = (centre - source).ln();
        }
        result
    }

    fn scaled_m2m_operator(
        &self,
        from: &Complex<T>,
        to: &Complex<T>,
        from_scale: T,
        to_scale: T,
    ) -> TranslationMatrix<T> {
        // Entry (i, j) is homogeneous of degree i - j in the displacement
        let zero = Complex::new(T::zero(), T::zero());
        let mut matrix = self.m2m_operator(&zero, &(to - from).unscale(to_scale));
        matrix.scale_columns(from_scale / to_scale);
        matrix
    }

    fn scaled_m2l_operator(
        &self,
        from: &Complex<T>,
        to: &Complex<T>,
        from_scale: T,
        to_scale: T,
    ) -> TranslationMatrix<T> {
        // Entry (i, j) is homogeneous of degree -(i + j), apart from the logarithm at (0, 0)
        let zero = Complex::new(T::zero(), T::zero());
        let t = to - from;
        let mut matrix = self.m2l_operator(&zero, &t.unscale(to_scale));
        matrix.scale_columns(from_scale / to_scale);
        if matrix.order > 0 {
            matrix.set(0, 0, t.ln());
        }
        matrix
    }

    fn scaled_l2l_operator(
        &self,
        from: &Complex<T>,
        to: &Complex<T>,
        from_scale: T,
        to_scale: T,
    ) -> TranslationMatrix<T> {
        // Entry (i, j) is homogeneous of degree j - i in the displacement
        let zero = Complex::new(T::zero(), T::zero());
        let mut matrix = self.l2l_operator(&zero, &(to - from).unscale(from_scale));
        matrix.scale_rows(to_scale / from_scale);
        matrix
    }

    fn evaluate_scaled_local(
        &self,
        target: &Complex<T>,
        centre: &Complex<T>,
        scale: T,
        coefficients: &[Complex<T>],
    ) -> T {
        let zero = Complex::new(T::zero(), T::zero());
        self.evaluate_local(&(target - centre).unscale(scale), &zero, coefficients)
    }

    fn evaluate_scaled_multipole(
        &self,
        target: &Complex<T>,
        centre: &Complex<T>,
        scale: T,
        coefficients: &[Complex<T>],
    ) -> T {
        let Some(first) = coefficients.first() else {
            return T::zero();
        };

        let zero = Complex::new(T::zero(), T::zero());
        self.evaluate_multipole(&(target - centre).unscale(scale), &zero, coefficients)
            + first.re * scale.ln()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_coefficients_eq(a: &[Complex<f64>], b: &[Complex<f64>], epsilon: f64) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_relative_eq!(x.re, y.re, epsilon = epsilon);
            assert_relative_eq!(x.im, y.im, epsilon = epsilon);
        }
    }

    /// Coefficient-wise comparison relative to the magnitude of each expected coefficient.
    fn assert_coefficients_close(a: &[Complex<f64>], b: &[Complex<f64>], max_relative: f64) {
        assert_eq!(a.len(), b.len());
        for (m, (x, y)) in a.iter().zip(b.iter()).enumerate() {
            let error = (x - y).norm();
            assert!(
                error <= max_relative * y.norm() + 1e-14,
                "coefficient {m}: {x} != {y}"
            );
        }
    }

    #[test]
    fn test_greens_fct() {
        let kernel = Laplace2dKernel::<f64>::new(4);
        let source = Complex::new(0.25, 0.25);
        let target = Complex::new(0.75, 0.25);

        let value = kernel.greens_fct(&target, &source);
        assert_relative_eq!(value.re, 0.5f64.ln(), epsilon = 1e-12);

        // Coincident points contribute nothing
        let value = kernel.greens_fct(&source, &source);
        assert_eq!(value, Complex::new(0.0, 0.0));
        let value = kernel.greens_fct(&Complex::new(0.25 + 1e-18, 0.25), &source);
        assert_eq!(value, Complex::new(0.0, 0.0));
    }

    #[test]
    fn test_evaluate_st() {
        let kernel = Laplace2dKernel::<f64>::new(4);
        let sources = vec![0.25, 0.25, 0.75, 0.25];
        let targets = vec![0.25, 0.25, 0.25, 0.75];
        let charges = vec![2.0, 1.0];
        let mut result = vec![1.0, 0.0];

        kernel.evaluate_st(&sources, &targets, &charges, &mut result);

        // The first target sits on the first source, which is skipped
        assert_relative_eq!(result[0], 1.0 + 0.5f64.ln(), epsilon = 1e-12);
        let expected = 2.0 * 0.5f64.ln() + 0.5f64.hypot(0.5).ln();
        assert_relative_eq!(result[1], expected, epsilon = 1e-12);
        assert!(result.iter().all(|r| r.is_finite()));
    }

    #[test]
    fn test_multipole_expansion() {
        let kernel = Laplace2dKernel::<f64>::new(12);
        let source = Complex::new(0.3, 0.27);
        let centre = Complex::new(0.25, 0.25);
        let target = Complex::new(0.9, 0.6);

        let coefficients = kernel.multipole_coefficients(&source, &centre);
        assert_eq!(coefficients.len(), 12);
        assert_eq!(coefficients[0], Complex::new(1.0, 0.0));
        let diff = source - centre;
        assert_relative_eq!(coefficients[2].re, (-diff * diff / 2.0).re, epsilon = 1e-16);

        let expected = kernel.greens_fct(&target, &source).re;
        let found = kernel.evaluate_multipole(&target, &centre, &coefficients);
        assert_relative_eq!(found, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_local_expansion() {
        let kernel = Laplace2dKernel::<f64>::new(12);
        let source = Complex::new(0.3, 0.27);
        let centre = Complex::new(0.875, 0.625);
        let target = Complex::new(0.9, 0.6);

        let coefficients = kernel.local_coefficients(&source, &centre);
        let expected = kernel.greens_fct(&target, &source).re;
        let found = kernel.evaluate_local(&target, &centre, &coefficients);
        assert_relative_eq!(found, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_m2m() {
        let kernel = Laplace2dKernel::<f64>::new(24);
        let source = Complex::new(0.1, 0.15);
        let child = Complex::new(0.125, 0.125);
        let parent = Complex::new(0.25, 0.25);

        // Re-centring agrees with expanding about the parent directly
        let translated = kernel.m2m(&child, &parent, &kernel.multipole_coefficients(&source, &child));
        let expected = kernel.multipole_coefficients(&source, &parent);
        assert_coefficients_eq(&translated, &expected, 1e-12);

        // and is undone by the opposite translation
        let before = kernel.multipole_coefficients(&source, &child);
        let round_trip = kernel.m2m(&parent, &child, &translated);
        assert_coefficients_eq(&round_trip, &before, 1e-12);

        let target = Complex::new(0.9, 0.7);
        let found = kernel.evaluate_multipole(&target, &parent, &translated);
        let expected = kernel.greens_fct(&target, &source).re;
        assert_relative_eq!(found, expected, epsilon = 1e-10);
    }

    #[test]
    fn test_m2m_operator_structure() {
        let kernel = Laplace2dKernel::<f64>::new(5);
        let from = Complex::new(0.0, 0.0);
        let to = Complex::new(0.5, 0.0);
        let matrix = kernel.m2m_operator(&from, &to);

        // M[i][0] = (-1)^(i + 1) t^i / i
        assert_relative_eq!(matrix.get(1, 0).re, 0.5);
        assert_relative_eq!(matrix.get(2, 0).re, -0.125);
        assert_relative_eq!(matrix.get(3, 0).re, 0.125 / 3.0);
        // Diagonal is the identity, upper triangle is empty
        for i in 0..5 {
            assert_eq!(matrix.get(i, i), Complex::new(1.0, 0.0));
            for j in (i + 1)..5 {
                assert_eq!(matrix.get(i, j), Complex::new(0.0, 0.0));
            }
        }
    }

    #[test]
    fn test_m2l() {
        let kernel = Laplace2dKernel::<f64>::new(12);
        let source = Complex::new(0.3, 0.27);
        let from = Complex::new(0.25, 0.25);
        let to = Complex::new(0.875, 0.625);

        let multipole = kernel.multipole_coefficients(&source, &from);
        let local = kernel.m2l(&from, &to, &multipole);
        let expected = kernel.local_coefficients(&source, &to);
        assert_coefficients_eq(&local, &expected, 1e-6);

        let target = Complex::new(0.9, 0.6);
        let found = kernel.evaluate_local(&target, &to, &local);
        let expected = kernel.greens_fct(&target, &source).re;
        assert_relative_eq!(found, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_m2l_high_order() {
        let kernel = Laplace2dKernel::<f64>::new(30);
        let source = Complex::new(0.3, 0.27);
        let from = Complex::new(0.25, 0.25);
        let to = Complex::new(0.875, 0.625);

        // Every local coefficient, including the high order ones, agrees with a direct expansion
        let multipole = kernel.multipole_coefficients(&source, &from);
        let local = kernel.m2l(&from, &to, &multipole);
        let expected = kernel.local_coefficients(&source, &to);
        assert_coefficients_close(&local, &expected, 1e-9);
    }

    #[test]
    fn test_m2l_operator_first_row() {
        let kernel = Laplace2dKernel::<f64>::new(8);
        let from = Complex::new(0.1, -0.2);
        let to = Complex::new(0.6, 0.3);
        let t = to - from;
        let matrix = kernel.m2l_operator(&from, &to);

        // A unit multipole term 1 / z^j contributes t^-j to the constant of the local expansion
        assert_relative_eq!(matrix.get(0, 0).re, t.ln().re, epsilon = 1e-14);
        for j in 1..8 {
            let expected = t.powi(-(j as i32));
            assert_relative_eq!(matrix.get(0, j).re, expected.re, max_relative = 1e-12);
            assert_relative_eq!(matrix.get(0, j).im, expected.im, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_scaled_expansions() {
        let kernel = Laplace2dKernel::<f64>::new(16);
        let width = 1.0 / 64.0;
        let source = Complex::new(0.3, 0.3) + Complex::new(0.2, -0.1) * width;
        let centre = Complex::new(0.3, 0.3);
        let target = Complex::new(0.3, 0.3) + Complex::new(3.0, 2.0) * width;
        let expected = kernel.greens_fct(&target, &source).re;

        // Scaling only changes the storage of the coefficients, not the expansions themselves
        let multipole = kernel.scaled_multipole_coefficients(&source, &centre, width);
        let unscaled = kernel.multipole_coefficients(&source, &centre);
        for (m, (scaled, plain)) in multipole.iter().zip(unscaled.iter()).enumerate() {
            let plain = plain / width.powi(m as i32);
            assert_relative_eq!(scaled.re, plain.re, max_relative = 1e-12);
            assert_relative_eq!(scaled.im, plain.im, max_relative = 1e-12);
        }
        let found = kernel.evaluate_scaled_multipole(&target, &centre, width, &multipole);
        assert_relative_eq!(found, expected, epsilon = 1e-10);

        let local = kernel.scaled_local_coefficients(&source, &target, width);
        let near = target + Complex::new(0.1, 0.2) * width;
        let found = kernel.evaluate_scaled_local(&near, &target, width, &local);
        assert_relative_eq!(found, kernel.greens_fct(&near, &source).re, epsilon = 1e-10);
    }

    #[test]
    fn test_scaled_operators() {
        let kernel = Laplace2dKernel::<f64>::new(16);
        let width = 1.0 / 64.0;
        let source = Complex::new(0.3, 0.3);

        // M2M from a child of width w to its parent of width 2w
        let child = Complex::new(0.5, 0.5) + Complex::new(-0.5, 0.5) * width;
        let parent = Complex::new(0.5, 0.5);
        let near_source = parent + Complex::new(-0.7, 0.6) * width;
        let operator = kernel.scaled_m2m_operator(&child, &parent, width, 2.0 * width);
        let translated =
            operator.apply(&kernel.scaled_multipole_coefficients(&near_source, &child, width));
        let expected = kernel.scaled_multipole_coefficients(&near_source, &parent, 2.0 * width);
        assert_coefficients_close(&translated, &expected, 1e-12);

        // M2L between two cells of width w, three boxes apart
        let from = source;
        let to = source + Complex::new(3.0, -2.0) * width;
        let inside = from + Complex::new(0.3, 0.1) * width;
        let operator = kernel.scaled_m2l_operator(&from, &to, width, width);
        let local = operator.apply(&kernel.scaled_multipole_coefficients(&inside, &from, width));
        let expected = kernel.scaled_local_coefficients(&inside, &to, width);
        assert_coefficients_close(&local[..8], &expected[..8], 1e-6);
        let target = to + Complex::new(0.2, -0.3) * width;
        let found = kernel.evaluate_scaled_local(&target, &to, width, &local);
        assert_relative_eq!(found, kernel.greens_fct(&target, &inside).re, epsilon = 1e-8);

        // L2L from a parent of width 2w to a child of width w leaves the expansion unchanged
        let operator = kernel.scaled_l2l_operator(&parent, &child, 2.0 * width, width);
        let far = Complex::new(0.9, 0.1);
        let local = kernel.scaled_local_coefficients(&far, &parent, 2.0 * width);
        let translated = operator.apply(&local);
        let point = child + Complex::new(0.1, -0.2) * width;
        let expected = kernel.evaluate_scaled_local(&point, &parent, 2.0 * width, &local);
        let found = kernel.evaluate_scaled_local(&point, &child, width, &translated);
        assert_relative_eq!(found, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_scaled_operators_single_precision() {
        let kernel = Laplace2dKernel::<f32>::new(30);
        let width = 1.0f32 / 128.0;
        let zero = Complex::new(0.0f32, 0.0);
        let t = Complex::new(3.0f32, 2.0) * width;

        // Unscaled entries reach |t|^-(i + j), far beyond the range of f32
        let unscaled = kernel.m2l_operator(&zero, &t);
        assert!(unscaled.data.iter().any(|m| !m.is_finite()));

        // Children sit a quarter of the parent's width from its centre along each axis
        let child = Complex::new(width / 2.0, width / 2.0);
        let operators = [
            kernel.scaled_m2l_operator(&zero, &t, width, width),
            kernel.scaled_m2m_operator(&zero, &child, width, 2.0 * width),
            kernel.scaled_l2l_operator(&child, &zero, 2.0 * width, width),
        ];
        for operator in operators.iter() {
            assert!(operator.data.iter().all(|m| m.is_finite() && m.norm() < 10.0));
        }
    }

    #[test]
    fn test_l2l() {
        let kernel = Laplace2dKernel::<f64>::new(12);
        let source = Complex::new(0.9, 0.8);
        let parent = Complex::new(0.25, 0.25);
        let child = Complex::new(0.125, 0.375);
        let target = Complex::new(0.1, 0.4);

        // Re-centring a polynomial does not change its value
        let local = kernel.local_coefficients(&source, &parent);
        let translated = kernel.l2l(&parent, &child, &local);
        let expected = kernel.evaluate_local(&target, &parent, &local);
        let found = kernel.evaluate_local(&target, &child, &translated);
        assert_relative_eq!(found, expected, epsilon = 1e-12);

        let round_trip = kernel.l2l(&child, &parent, &translated);
        assert_coefficients_eq(&round_trip, &local, 1e-12);

        // A zero displacement is the identity
        let identity = kernel.l2l(&parent, &parent, &local);
        assert_coefficients_eq(&identity, &local, 0.0);
    }

    #[test]
    fn test_empty_expansion() {
        let kernel = Laplace2dKernel::<f64>::new(0);
        let a = Complex::new(0.1, 0.2);
        let b = Complex::new(0.7, 0.4);
        assert!(kernel.multipole_coefficients(&a, &b).is_empty());
        assert!(kernel.local_coefficients(&a, &b).is_empty());
        assert_eq!(kernel.m2l_operator(&a, &b).data.len(), 0);
        assert_eq!(kernel.evaluate_multipole(&a, &b, &[]), 0.0);
    }
}
