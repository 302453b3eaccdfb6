//! Complete quadtrees addressed by Morton indices.
//!
//! A tree of depth `d` stores `4^l` cells at every level `l = 0..=d`, in Morton order, so that a cell is
//! found directly from its (level, index) pair. Points are sorted into the cells of the leaf level only.
pub mod cell;
pub mod constants;
pub mod domain;
pub mod helpers;
pub mod morton;
pub mod point;
pub mod quadtree;
pub mod types;

pub use types::{Cell, Domain, MortonKey, MortonKeys, Point, QuadTree};
