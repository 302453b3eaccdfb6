//! # Two dimensional Fast Multipole Method (FMM2D)
//!
//! A fast multipole method for the two dimensional logarithmic potential, based on \[1\].
//!
//! For charged sources $x_i$ with charges $u_i$ and targets $y_j$, all inside a square domain, it approximates
//!
//! $$ \phi(y_j) = \sum_i u_i \ln | y_j - x_i | $$
//!
//! in better than quadratic time. Points are treated as complex numbers, so that multipole (far-field) and
//! local (near-field) expansions are finite power series in the complex displacement from a box centre.
//!
//! Notable features of this library are:
//! * A complete quadtree addressed by Morton indices, with no pointer links between nodes.
//! * Per level precomputed multipole to multipole, multipole to local and local to local translation operators.
//! * Trait based interfaces for trees, kernels and field translations.
//!
//! ## Example
//! ```
//! use fmm2d::{tree::helpers::uniform_grid_fixture, Fmm, Laplace2dKernel, SingleNodeBuilder};
//!
//! let (sources, targets, charges) = uniform_grid_fixture::<f64>(3);
//!
//! let mut fmm = SingleNodeBuilder::new()
//!     .tree(&sources, &targets, None, Some(3))
//!     .unwrap()
//!     .parameters(&charges, 12, Laplace2dKernel::default())
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let fast = fmm.solve(&charges).unwrap();
//! let direct = fmm.solve_direct(&charges).unwrap();
//! assert_eq!(fast.len(), direct.len());
//! ```
//!
//! ## References
//! \[1\] Greengard, L., & Rokhlin, V. (1987). A fast algorithm for particle simulations. Journal of Computational Physics, 73(2), 325-348.
#![cfg_attr(feature = "strict", deny(warnings))]
#![warn(missing_docs)]

pub mod fmm;
pub mod kernel;
pub mod traits;
pub mod tree;

// Public API
#[doc(inline)]
pub use fmm::types::SingleNodeBuilder;
#[doc(inline)]
pub use fmm::types::SingleNodeFmm;
#[doc(inline)]
pub use kernel::types::Laplace2dKernel;
#[doc(inline)]
pub use traits::fmm::{Evaluate, Fmm};
#[doc(inline)]
pub use traits::types::FmmError;
#[doc(inline)]
pub use tree::types::QuadTree;
