//! Kernel Traits
use num::Float;
use num_complex::Complex;

use crate::kernel::types::TranslationMatrix;

/// Interface for the direct evaluation of a Green's function.
pub trait Kernel {
    /// Real scalar type of coordinates, charges and potentials.
    type T: Float;

    /// Evaluate the complex Green's function for a single target and source.
    ///
    /// Pairs that coincide to within machine precision contribute exactly zero.
    ///
    /// # Arguments
    /// * `target` - Target position.
    /// * `source` - Source position.
    fn greens_fct(&self, target: &Complex<Self::T>, source: &Complex<Self::T>)
        -> Complex<Self::T>;

    /// Single threaded evaluation of the potential at a set of targets due to a set of charged sources,
    /// the result is accumulated into `result`.
    ///
    /// # Arguments
    /// * `sources` - Source coordinates, interleaved as `[x_1, y_1, ..., x_N, y_N]`.
    /// * `targets` - Target coordinates, interleaved as `[x_1, y_1, ..., x_M, y_M]`.
    /// * `charges` - One charge per source.
    /// * `result` - One potential per target.
    fn evaluate_st(
        &self,
        sources: &[Self::T],
        targets: &[Self::T],
        charges: &[Self::T],
        result: &mut [Self::T],
    );

    /// Dimension of the space the kernel acts in.
    fn space_dimension(&self) -> usize;
}

/// Interface for truncated series expansions of a kernel, and the operators that translate them
/// between expansion centres.
///
/// Every coefficient vector produced or consumed has exactly `expansion_order` entries.
///
/// The `scaled_*` methods work with coefficients normalised by a length `scale`, typically the width of
/// the cell an expansion belongs to. Multipole coefficient `k` is stored divided by `scale^k` and local
/// coefficient `k` multiplied by `scale^k`, which keeps coefficients and operator entries of order one
/// at every level of a tree.
pub trait SeriesExpansion
where
    Self: Kernel,
{
    /// Number of terms kept in each expansion.
    fn expansion_order(&self) -> usize;

    /// Set the number of terms kept in each expansion.
    fn set_expansion_order(&mut self, expansion_order: usize);

    /// Multipole (far-field) expansion coefficients of a unit source about `centre`.
    ///
    /// # Arguments
    /// * `source` - Source position.
    /// * `centre` - Expansion centre.
    fn multipole_coefficients(
        &self,
        source: &Complex<Self::T>,
        centre: &Complex<Self::T>,
    ) -> Vec<Complex<Self::T>>;

    /// Local (near-field) expansion coefficients of a unit source about `centre`.
    ///
    /// # Arguments
    /// * `source` - Source position.
    /// * `centre` - Expansion centre.
    fn local_coefficients(
        &self,
        source: &Complex<Self::T>,
        centre: &Complex<Self::T>,
    ) -> Vec<Complex<Self::T>>;

    /// Operator re-centring a multipole expansion from `from` to `to`.
    fn m2m_operator(&self, from: &Complex<Self::T>, to: &Complex<Self::T>)
        -> TranslationMatrix<Self::T>;

    /// Operator converting a multipole expansion about `from` into a local expansion about `to`.
    fn m2l_operator(&self, from: &Complex<Self::T>, to: &Complex<Self::T>)
        -> TranslationMatrix<Self::T>;

    /// Operator re-centring a local expansion from `from` to `to`.
    fn l2l_operator(&self, from: &Complex<Self::T>, to: &Complex<Self::T>)
        -> TranslationMatrix<Self::T>;

    /// Re-centre a multipole expansion from `from` to `to`.
    fn m2m(
        &self,
        from: &Complex<Self::T>,
        to: &Complex<Self::T>,
        coefficients: &[Complex<Self::T>],
    ) -> Vec<Complex<Self::T>> {
        self.m2m_operator(from, to).apply(coefficients)
    }

    /// Convert a multipole expansion about `from` into a local expansion about `to`.
    fn m2l(
        &self,
        from: &Complex<Self::T>,
        to: &Complex<Self::T>,
        coefficients: &[Complex<Self::T>],
    ) -> Vec<Complex<Self::T>> {
        self.m2l_operator(from, to).apply(coefficients)
    }

    /// Re-centre a local expansion from `from` to `to`.
    fn l2l(
        &self,
        from: &Complex<Self::T>,
        to: &Complex<Self::T>,
        coefficients: &[Complex<Self::T>],
    ) -> Vec<Complex<Self::T>> {
        self.l2l_operator(from, to).apply(coefficients)
    }

    /// Evaluate the real part of a local expansion about `centre` at `target`.
    fn evaluate_local(
        &self,
        target: &Complex<Self::T>,
        centre: &Complex<Self::T>,
        coefficients: &[Complex<Self::T>],
    ) -> Self::T;

    /// Evaluate the real part of a multipole expansion about `centre` at `target`.
    fn evaluate_multipole(
        &self,
        target: &Complex<Self::T>,
        centre: &Complex<Self::T>,
        coefficients: &[Complex<Self::T>],
    ) -> Self::T;

    /// Scaled multipole expansion coefficients of a unit source about `centre`.
    ///
    /// # Arguments
    /// * `source` - Source position.
    /// * `centre` - Expansion centre.
    /// * `scale` - Normalising length of the expansion.
    fn scaled_multipole_coefficients(
        &self,
        source: &Complex<Self::T>,
        centre: &Complex<Self::T>,
        scale: Self::T,
    ) -> Vec<Complex<Self::T>>;

    /// Scaled local expansion coefficients of a unit source about `centre`.
    ///
    /// # Arguments
    /// * `source` - Source position.
    /// * `centre` - Expansion centre.
    /// * `scale` - Normalising length of the expansion.
    fn scaled_local_coefficients(
        &self,
        source: &Complex<Self::T>,
        centre: &Complex<Self::T>,
        scale: Self::T,
    ) -> Vec<Complex<Self::T>>;

    /// Operator re-centring a multipole expansion with scale `from_scale` about `from` into one with
    /// scale `to_scale` about `to`.
    fn scaled_m2m_operator(
        &self,
        from: &Complex<Self::T>,
        to: &Complex<Self::T>,
        from_scale: Self::T,
        to_scale: Self::T,
    ) -> TranslationMatrix<Self::T>;

    /// Operator converting a multipole expansion with scale `from_scale` about `from` into a local
    /// expansion with scale `to_scale` about `to`.
    fn scaled_m2l_operator(
        &self,
        from: &Complex<Self::T>,
        to: &Complex<Self::T>,
        from_scale: Self::T,
        to_scale: Self::T,
    ) -> TranslationMatrix<Self::T>;

    /// Operator re-centring a local expansion with scale `from_scale` about `from` into one with
    /// scale `to_scale` about `to`.
    fn scaled_l2l_operator(
        &self,
        from: &Complex<Self::T>,
        to: &Complex<Self::T>,
        from_scale: Self::T,
        to_scale: Self::T,
    ) -> TranslationMatrix<Self::T>;

    /// Evaluate the real part of a scaled local expansion about `centre` at `target`.
    fn evaluate_scaled_local(
        &self,
        target: &Complex<Self::T>,
        centre: &Complex<Self::T>,
        scale: Self::T,
        coefficients: &[Complex<Self::T>],
    ) -> Self::T;

    /// Evaluate the real part of a scaled multipole expansion about `centre` at `target`.
    fn evaluate_scaled_multipole(
        &self,
        target: &Complex<Self::T>,
        centre: &Complex<Self::T>,
        scale: Self::T,
        coefficients: &[Complex<Self::T>],
    ) -> Self::T;
}
