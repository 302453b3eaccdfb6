//! Kernels for the two dimensional logarithmic potential, and the series expansions used to compress them.
pub mod helpers;
pub mod laplace_2d;
pub mod matrix;
pub mod types;
