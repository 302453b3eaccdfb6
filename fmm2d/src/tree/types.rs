//! Data structures for quadtrees.
use num::Float;
use num_complex::Complex;

/// Represents a two-dimensional square characterized by its origin and side-length.
#[derive(Debug, Clone, Copy)]
pub struct Domain<T>
where
    T: Float,
{
    /// The lower left corner of the domain, minimum of x, y values.
    pub origin: [T; 2],

    /// The extent of the domain along both axes.
    pub side_length: T,
}

/// Represents a Morton key associated with a node within a quadtree.
///
/// The Morton index interleaves the bits of the node's integer offsets from the lower left corner of
/// the domain, measured in boxes of the node's own level: bit `k` of the x offset lands on bit `2k + 1`
/// and bit `k` of the y offset on bit `2k`. Indices are therefore level relative, the children of
/// index `m` are `4m..4m + 4` and its parent is `m / 4`.
#[derive(Clone, Copy, Debug, Default)]
pub struct MortonKey {
    /// The integer offset of the key along each axis, in boxes of its own level.
    pub anchor: [u64; 2],

    /// The Morton encoded anchor.
    pub morton: u64,

    /// The level of this key.
    pub level: u64,
}

/// A collection that stores and allows iteration over a sequence of `MortonKey` values.
#[derive(Clone, Debug, Default)]
pub struct MortonKeys {
    /// A vector of Morton keys
    pub keys: Vec<MortonKey>,

    /// index for implementing the Iterator trait.
    pub index: usize,
}

/// A point in the plane, with the index it was given in the user's input.
#[derive(Clone, Copy, Debug)]
pub struct Point<T>
where
    T: Float,
{
    /// Physical coordinate, x as the real part and y as the imaginary part.
    pub coordinate: Complex<T>,

    /// Position of this point in the input buffer it was read from.
    pub global_index: usize,

    /// Key of the leaf containing this point.
    pub encoded_key: MortonKey,
}

/// A collection of `Point` instances.
pub type Points<T> = Vec<Point<T>>;

/// A single box of a quadtree and everything accumulated on it during an FMM evaluation.
///
/// Only leaf cells hold points. Every cell carries three coefficient vectors of the same length,
/// the expansion order of the FMM, which are only ever added to during an evaluation.
#[derive(Clone, Debug)]
pub struct Cell<T>
where
    T: Float,
{
    /// The key of this cell.
    pub key: MortonKey,

    /// Source points inside this cell.
    pub sources: Points<T>,

    /// Target points inside this cell.
    pub targets: Points<T>,

    /// Multipole expansion about this cell's centre, accumulated during the upward pass. Coefficient `k`
    /// is stored divided by `w^k`, with `w` the width of the cell.
    pub multipole: Vec<Complex<T>>,

    /// Local expansion due to this cell's interaction list alone.
    pub translated_local: Vec<Complex<T>>,

    /// Local expansion due to every source outside this cell's near field. Coefficient `k` is stored
    /// multiplied by `w^k`, with `w` the width of the cell.
    pub local: Vec<Complex<T>>,
}

/// A complete quadtree holding both source and target points.
///
/// # Fields
/// - `depth` - The level of the leaves; the tree has `depth + 1` levels.
///
/// - `domain` - The square the tree subdivides.
///
/// - `levels` - For every level `l`, all `4^l` cells in Morton order.
///
/// - `n_sources` - Total number of source points.
///
/// - `n_targets` - Total number of target points.
#[derive(Clone, Debug)]
pub struct QuadTree<T>
where
    T: Float,
{
    /// Depth of the tree
    pub depth: u64,

    /// Domain subdivided by the tree
    pub domain: Domain<T>,

    /// Cells of each level, indexed by Morton index
    pub levels: Vec<Vec<Cell<T>>>,

    /// Number of source points
    pub n_sources: usize,

    /// Number of target points
    pub n_targets: usize,
}
