//! Implementations of constructors and transformation methods for Morton keys, as well as traits for sorting, and handling containers of Morton keys.
use std::{
    cmp::Ordering,
    collections::HashSet,
    hash::{Hash, Hasher},
    ops::{Deref, DerefMut},
};

use num::{Float, NumCast, One, ToPrimitive, Zero};
use num_complex::Complex;

use crate::{
    traits::{
        tree::{Domain as DomainTrait, FmmTreeNode, TreeNode},
        types::FmmError,
    },
    tree::{
        constants::{
            BYTE_DISPLACEMENT, BYTE_MASK, DEEPEST_LEVEL, DIRECTIONS, N_CHILDREN,
            TRANSFER_VECTOR_WIDTH, X_LOOKUP_DECODE, X_LOOKUP_ENCODE, Y_LOOKUP_DECODE,
            Y_LOOKUP_ENCODE,
        },
        types::{Domain, MortonKey, MortonKeys},
    },
};

impl MortonKeys {
    /// Instantiate Morton Keys
    pub fn new() -> MortonKeys {
        MortonKeys {
            keys: Vec::new(),
            index: 0,
        }
    }

    /// Add a key
    pub fn add(&mut self, item: MortonKey) {
        self.keys.push(item);
    }

    /// Sort the keys, by level and then by Morton index.
    pub fn sort(&mut self) {
        self.keys.sort();
    }
}

impl Deref for MortonKeys {
    type Target = Vec<MortonKey>;

    fn deref(&self) -> &Self::Target {
        &self.keys
    }
}

impl DerefMut for MortonKeys {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.keys
    }
}

impl Iterator for MortonKeys {
    type Item = MortonKey;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.keys.len() {
            return None;
        }

        self.index += 1;
        self.keys.get(self.index - 1).copied()
    }
}

impl FromIterator<MortonKey> for MortonKeys {
    fn from_iter<I: IntoIterator<Item = MortonKey>>(iter: I) -> Self {
        let mut c = MortonKeys::new();

        for i in iter {
            c.add(i);
        }
        c
    }
}

impl From<Vec<MortonKey>> for MortonKeys {
    fn from(keys: Vec<MortonKey>) -> Self {
        MortonKeys { keys, index: 0 }
    }
}

impl From<HashSet<MortonKey>> for MortonKeys {
    fn from(keys: HashSet<MortonKey>) -> Self {
        MortonKeys {
            keys: keys.into_iter().collect(),
            index: 0,
        }
    }
}

impl PartialEq for MortonKey {
    fn eq(&self, other: &Self) -> bool {
        self.level == other.level && self.morton == other.morton
    }
}

impl Eq for MortonKey {}

impl Ord for MortonKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.level
            .cmp(&other.level)
            .then(self.morton.cmp(&other.morton))
    }
}

impl PartialOrd for MortonKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for MortonKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.level.hash(state);
        self.morton.hash(state);
    }
}

/// Interleave the bits of integer box offsets into a Morton index.
///
/// Bit `k` of `x` is written to bit `2k + 1` of the result and bit `k` of `y` to bit `2k`, so that the
/// most significant bit pair of the index holds the most significant bits of the offsets.
///
/// # Arguments
/// * `x` - Offset along the horizontal axis, in `[0, 2^level)`.
/// * `y` - Offset along the vertical axis, in `[0, 2^level)`.
/// * `level` - Level of the quadtree the offsets are measured at.
pub fn interleave(x: u64, y: u64, level: u64) -> u64 {
    debug_assert!(level <= DEEPEST_LEVEL);
    debug_assert!(x < (1 << level) && y < (1 << level));

    let key: u64 = X_LOOKUP_ENCODE[((x >> BYTE_DISPLACEMENT) & BYTE_MASK) as usize]
        | Y_LOOKUP_ENCODE[((y >> BYTE_DISPLACEMENT) & BYTE_MASK) as usize];

    (key << 16)
        | X_LOOKUP_ENCODE[(x & BYTE_MASK) as usize]
        | Y_LOOKUP_ENCODE[(y & BYTE_MASK) as usize]
}

/// Recover the integer box offsets `[x, y]` from a Morton index, the inverse of [interleave].
///
/// # Arguments
/// * `morton` - A Morton index at `level`.
/// * `level` - Level of the quadtree the index belongs to.
pub fn uninterleave(morton: u64, level: u64) -> [u64; 2] {
    debug_assert!(level <= DEEPEST_LEVEL);
    debug_assert!(morton < (1 << (2 * level)));

    const N_LOOPS: u64 = 4; // 4 bytes hold 16 levels
    let mut x: u64 = 0;
    let mut y: u64 = 0;

    for index in 0..N_LOOPS {
        let byte = ((morton >> (index * BYTE_DISPLACEMENT)) & BYTE_MASK) as usize;
        x |= X_LOOKUP_DECODE[byte] << (4 * index);
        y |= Y_LOOKUP_DECODE[byte] << (4 * index);
    }

    [x, y]
}

/// Map a point to the anchor of the enclosing box.
///
/// Returns the 2 integer coordinates of the enclosing box, `floor((p - origin) / box_width)` along each axis.
///
/// # Arguments
/// * `point` - The point to map, x as the real part and y as the imaginary part.
/// * `level` - The level of the tree at which the point will be mapped.
/// * `domain` - The computational domain, points must lie in its half open interior.
fn point_to_anchor<T: Float + ToPrimitive>(
    point: &Complex<T>,
    level: u64,
    domain: &Domain<T>,
) -> Result<[u64; 2], FmmError> {
    if !domain.contains(point) {
        return Err(FmmError::InvalidInput(format!(
            "Point ({}, {}) not in Domain",
            point.re.to_f64().unwrap_or(f64::NAN),
            point.im.to_f64().unwrap_or(f64::NAN)
        )));
    }

    let n_boxes = 1u64 << level;
    let width = domain.side_length / T::from(n_boxes).unwrap_or_else(T::one);

    // Rounding can push points within an ulp of the upper edge onto the next box
    let to_anchor = |distance: T| {
        (distance / width)
            .floor()
            .to_u64()
            .unwrap_or(0)
            .min(n_boxes - 1)
    };

    Ok([
        to_anchor(point.re - domain.origin[0]),
        to_anchor(point.im - domain.origin[1]),
    ])
}

impl MortonKey {
    /// Constructor for Morton key
    pub fn new(anchor: &[u64; 2], morton: u64, level: u64) -> Self {
        Self {
            anchor: *anchor,
            morton,
            level,
        }
    }

    /// The Morton key corresponding to a quadtree root node
    pub fn root() -> Self {
        Self::new(&[0, 0], 0, 0)
    }

    /// Construct a `MortonKey` type from a Morton index at a given level
    pub fn from_morton(morton: u64, level: u64) -> Self {
        let anchor = uninterleave(morton, level);
        Self::new(&anchor, morton, level)
    }

    /// Construct a `MortonKey` type from the anchor at a given level
    pub fn from_anchor(anchor: &[u64; 2], level: u64) -> Self {
        let morton = interleave(anchor[0], anchor[1], level);
        Self::new(anchor, morton, level)
    }

    /// Construct a `MortonKey` associated with the box that encloses the point at a given level.
    ///
    /// # Arguments
    /// * `point` - Cartesian coordinate for a given point.
    /// * `domain` - Domain associated with a given tree encoding.
    /// * `level` - level of quadtree on which to find the encoding.
    pub fn from_point<T: Float>(
        point: &Complex<T>,
        domain: &Domain<T>,
        level: u64,
    ) -> Result<Self, FmmError> {
        let anchor = point_to_anchor(point, level, domain)?;
        Ok(MortonKey::from_anchor(&anchor, level))
    }

    /// The anchor corresponding to this key.
    pub fn anchor(&self) -> &[u64; 2] {
        &self.anchor
    }

    /// The Morton Key in index form.
    pub fn morton(&self) -> u64 {
        self.morton
    }

    /// The level of this key.
    pub fn level(&self) -> u64 {
        self.level
    }

    /// Return the parent of a Morton Key, the root is its own parent.
    pub fn parent(&self) -> Self {
        if self.level == 0 {
            return *self;
        }

        Self::new(
            &[self.anchor[0] >> 1, self.anchor[1] >> 1],
            self.morton >> 2,
            self.level - 1,
        )
    }

    /// Return all children of a Morton Key in sorted order.
    pub fn children(&self) -> Vec<MortonKey> {
        debug_assert!(self.level < DEEPEST_LEVEL);

        (0..N_CHILDREN as u64)
            .map(|index| MortonKey::from_morton((self.morton << 2) + index, self.level + 1))
            .collect()
    }

    /// Position of this key amongst its siblings, in `0..4`.
    pub fn child_index(&self) -> usize {
        (self.morton & 3) as usize
    }

    /// Check if the key is ancestor of `other`.
    pub fn is_ancestor(&self, other: &MortonKey) -> bool {
        other.level > self.level && (other.morton >> (2 * (other.level - self.level))) == self.morton
    }

    /// Check if key is descendant of another key.
    pub fn is_descendant(&self, other: &MortonKey) -> bool {
        other.is_ancestor(self)
    }

    /// Find a key on the same level, offset from this key by a number of boxes along each axis.
    /// Negative steps are possible. If the result is out of bounds,
    /// i.e. anchor\[j\] + direction\[j\] is negative or not smaller than the number of boxes
    /// across each axis, `None` is returned.
    ///
    /// # Arguments
    /// * `direction` - A vector describing how many boxes we move along each coordinate direction.
    pub fn find_key_in_direction(&self, direction: &[i64; 2]) -> Option<MortonKey> {
        let max_number_of_boxes: i64 = 1 << self.level;

        let x = self.anchor[0] as i64 + direction[0];
        let y = self.anchor[1] as i64 + direction[1];

        if (0..max_number_of_boxes).contains(&x) && (0..max_number_of_boxes).contains(&y) {
            Some(MortonKey::from_anchor(&[x as u64, y as u64], self.level))
        } else {
            None
        }
    }

    /// Find all neighbors for to a given key. Filter out 'invalid' neighbours that lie outside of the tree domain.
    pub fn neighbors(&self) -> Vec<MortonKey> {
        DIRECTIONS
            .iter()
            .filter_map(|d| self.find_key_in_direction(d))
            .collect()
    }

    /// Find all neighbours of the parent of this key, empty for the root.
    pub fn parent_neighbors(&self) -> Vec<MortonKey> {
        if self.level == 0 {
            return Vec::new();
        }
        self.parent().neighbors()
    }

    /// The interaction list of this key, the children of the parent's neighbours which are not
    /// themselves neighbours of this key. Empty on levels 0 and 1.
    pub fn interaction_list(&self) -> Vec<MortonKey> {
        if self.level < 2 {
            return Vec::new();
        }

        let neighbors: HashSet<MortonKey> = self.neighbors().into_iter().collect();

        self.parent_neighbors()
            .iter()
            .flat_map(|parent_neighbor| parent_neighbor.children())
            .filter(|key| !neighbors.contains(key))
            .collect()
    }

    /// Find the transfer vector from `other` to this key in component form, in units of boxes.
    ///
    /// # Arguments
    /// * `other` - A Morton key on the same level.
    pub fn find_transfer_vector_components(&self, other: &MortonKey) -> [i64; 2] {
        [
            self.anchor[0] as i64 - other.anchor[0] as i64,
            self.anchor[1] as i64 - other.anchor[1] as i64,
        ]
    }

    /// Map the components of a transfer vector reachable from an interaction list to a unique index.
    ///
    /// # Arguments
    /// * `components` - Transfer vector components, each in `[-3, 3]`.
    pub fn find_transfer_vector_from_components(components: &[i64; 2]) -> usize {
        let offset = TRANSFER_VECTOR_WIDTH / 2;
        ((components[0] + offset) * TRANSFER_VECTOR_WIDTH + (components[1] + offset)) as usize
    }

    /// Find the unique index of the transfer vector from `other` to this key.
    ///
    /// # Arguments
    /// * `other` - A Morton key on the same level, within three boxes of this key along each axis.
    pub fn find_transfer_vector(&self, other: &MortonKey) -> Result<usize, FmmError> {
        if self.level != other.level {
            return Err(FmmError::Failed(
                "Transfer vectors only defined between keys on the same level".to_string(),
            ));
        }

        let components = self.find_transfer_vector_components(other);
        let offset = TRANSFER_VECTOR_WIDTH / 2;
        if components.iter().any(|c| c.abs() > offset) {
            return Err(FmmError::Failed(format!(
                "Transfer vector {:?} too long for an interaction list",
                components
            )));
        }

        Ok(MortonKey::find_transfer_vector_from_components(&components))
    }

    /// Check if two keys are adjacent with respect to each other when they are known to on the same tree level.
    pub fn is_adjacent_same_level(&self, other: &MortonKey) -> bool {
        let [dx, dy] = self.find_transfer_vector_components(other);
        self != other && dx.abs() <= 1 && dy.abs() <= 1
    }

    /// Check if two keys are adjacent with respect to each other
    pub fn is_adjacent(&self, other: &MortonKey) -> bool {
        // If either key overlaps they cannot be adjacent.
        if self == other || self.is_ancestor(other) || other.is_ancestor(self) {
            return false;
        }

        // Compare boxes in units of the finer of the two levels, doubled so centres are integral
        let level = self.level.max(other.level);
        let da = 1i64 << (level - self.level);
        let db = 1i64 << (level - other.level);

        (0..2).all(|axis| {
            let ca = 2 * self.anchor[axis] as i64 * da + da;
            let cb = 2 * other.anchor[axis] as i64 * db + db;
            (ca - cb).abs() <= da + db
        })
    }
}

impl TreeNode for MortonKey {
    type Nodes = MortonKeys;

    fn raw(&self) -> u64 {
        self.morton
    }

    fn children(&self) -> Self::Nodes {
        MortonKeys {
            keys: self.children(),
            index: 0,
        }
    }

    fn parent(&self) -> Self {
        self.parent()
    }

    fn level(&self) -> u64 {
        self.level()
    }

    fn neighbors(&self) -> Self::Nodes {
        MortonKeys {
            keys: self.neighbors(),
            index: 0,
        }
    }

    fn is_adjacent(&self, other: &Self) -> bool {
        self.is_adjacent(other)
    }
}

impl FmmTreeNode for MortonKey {
    fn parent_neighbors(&self) -> Self::Nodes {
        MortonKeys {
            keys: self.parent_neighbors(),
            index: 0,
        }
    }

    fn interaction_list(&self) -> Self::Nodes {
        MortonKeys {
            keys: self.interaction_list(),
            index: 0,
        }
    }

    fn centre<D: DomainTrait>(&self, domain: &D) -> Complex<D::Scalar> {
        let one = <D::Scalar as One>::one();
        let half = one / (one + one);
        let n_boxes = <D::Scalar as NumCast>::from(1u64 << self.level).unwrap_or(one);
        let width = domain.side_length() / n_boxes;
        let origin = domain.origin();

        let x = <D::Scalar as NumCast>::from(self.anchor[0]).unwrap_or_else(<D::Scalar as Zero>::zero);
        let y = <D::Scalar as NumCast>::from(self.anchor[1]).unwrap_or_else(<D::Scalar as Zero>::zero);

        Complex::new(
            origin[0] + (x + half) * width,
            origin[1] + (y + half) * width,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_x_encode_table() {
        for (mut index, actual) in X_LOOKUP_ENCODE.iter().enumerate() {
            let mut sum: u64 = 0;

            for shift in 0..8 {
                sum |= ((index & 1) << (2 * shift + 1)) as u64;
                index >>= 1;
            }

            assert_eq!(sum, *actual);
        }
    }

    #[test]
    fn test_y_encode_table() {
        for (mut index, actual) in Y_LOOKUP_ENCODE.iter().enumerate() {
            let mut sum: u64 = 0;

            for shift in 0..8 {
                sum |= ((index & 1) << (2 * shift)) as u64;
                index >>= 1;
            }

            assert_eq!(sum, *actual);
        }
    }

    #[test]
    fn test_x_decode_table() {
        for (index, &actual) in X_LOOKUP_DECODE.iter().enumerate() {
            let mut expected: u64 = 0;
            for bit in 0..4 {
                expected |= (((index >> (2 * bit + 1)) & 1) << bit) as u64;
            }

            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_y_decode_table() {
        for (index, &actual) in Y_LOOKUP_DECODE.iter().enumerate() {
            let mut expected: u64 = 0;
            for bit in 0..4 {
                expected |= (((index >> (2 * bit)) & 1) << bit) as u64;
            }

            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_interleave_values() {
        assert_eq!(interleave(1, 0, 3), 2);
        assert_eq!(interleave(0, 1, 3), 1);
        assert_eq!(interleave(7, 2, 3), 46);
        assert_eq!(interleave(0, 0, 5), 0);
        assert_eq!(uninterleave(46, 3), [7, 2]);
        assert_eq!(uninterleave(0, 1), [0, 0]);
    }

    #[test]
    fn test_encoding_decoding() {
        for level in 1..=8 {
            let n = 1u64 << level;
            for x in 0..n {
                for y in 0..n {
                    let morton = interleave(x, y, level);
                    assert!(morton < n * n);
                    assert_eq!(uninterleave(morton, level), [x, y]);
                }
            }
        }

        let anchor = [65535, 65535];
        let morton = interleave(anchor[0], anchor[1], DEEPEST_LEVEL);
        assert_eq!(morton, (1u64 << 32) - 1);
        assert_eq!(uninterleave(morton, DEEPEST_LEVEL), anchor);

        let anchor = [43690, 12345];
        let morton = interleave(anchor[0], anchor[1], DEEPEST_LEVEL);
        assert_eq!(uninterleave(morton, DEEPEST_LEVEL), anchor);
    }

    #[test]
    fn test_morton_order_is_bijective_per_level() {
        let level = 4;
        let mut seen: Vec<u64> = (0..16)
            .flat_map(|x| (0..16).map(move |y| interleave(x, y, level)))
            .collect();
        seen.sort();
        let expected: Vec<u64> = (0..256).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_find_children() {
        let key = MortonKey::from_anchor(&[2, 5], 3);
        let children = key.children();

        assert_eq!(children.len(), 4);
        for (i, child) in children.iter().enumerate() {
            assert_eq!(child.morton(), (key.morton() << 2) + i as u64);
            assert_eq!(child.level(), 4);
            assert_eq!(child.parent(), key);
            assert_eq!(child.child_index(), i);
            assert!(key.is_ancestor(child));
            assert!(child.is_descendant(&key));
        }

        // Children tile the parent box
        let mut anchors: Vec<[u64; 2]> = children.iter().map(|c| *c.anchor()).collect();
        anchors.sort();
        assert_eq!(anchors, vec![[4, 10], [4, 11], [5, 10], [5, 11]]);
    }

    #[test]
    fn test_parent() {
        for level in 1..=5 {
            for morton in 0..(1u64 << (2 * level)) {
                let key = MortonKey::from_morton(morton, level);
                let parent = key.parent();
                assert_eq!(parent.morton(), morton >> 2);
                assert_eq!(parent.level(), level - 1);
                assert_eq!(parent, MortonKey::from_morton(morton >> 2, level - 1));
                assert!(parent.children().contains(&key));
            }
        }

        assert_eq!(MortonKey::root().parent(), MortonKey::root());
    }

    #[test]
    fn test_neighbors() {
        let level = 3;

        // Corner, edge and interior boxes
        assert_eq!(MortonKey::from_anchor(&[0, 0], level).neighbors().len(), 3);
        assert_eq!(MortonKey::from_anchor(&[7, 7], level).neighbors().len(), 3);
        assert_eq!(MortonKey::from_anchor(&[0, 4], level).neighbors().len(), 5);
        assert_eq!(MortonKey::from_anchor(&[3, 4], level).neighbors().len(), 8);
        assert!(MortonKey::root().neighbors().is_empty());

        // Test that the displacements are correct
        let key = MortonKey::from_anchor(&[3, 4], level);
        let mut result: Vec<[i64; 2]> = key
            .neighbors()
            .iter()
            .map(|n| n.find_transfer_vector_components(&key))
            .collect();
        result.sort();
        let mut expected = DIRECTIONS.to_vec();
        expected.sort();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_neighbor_symmetry() {
        let level = 3;
        for morton in 0..(1u64 << (2 * level)) {
            let a = MortonKey::from_morton(morton, level);
            for b in a.neighbors() {
                assert!(b.neighbors().contains(&a));
                assert!(a.is_adjacent_same_level(&b));
            }
        }
    }

    #[test]
    fn test_interaction_list() {
        // Nothing to interact with on the coarsest levels
        assert!(MortonKey::root().interaction_list().is_empty());
        for morton in 0..4 {
            assert!(MortonKey::from_morton(morton, 1).interaction_list().is_empty());
        }

        // On level 2 near field and interaction list cover the whole domain
        for morton in 0..16 {
            let key = MortonKey::from_morton(morton, 2);
            let neighbors: HashSet<MortonKey> = key.neighbors().into_iter().collect();
            let interaction_list: HashSet<MortonKey> =
                key.interaction_list().into_iter().collect();

            assert!(neighbors.is_disjoint(&interaction_list));
            assert!(!interaction_list.contains(&key));

            let mut all: HashSet<MortonKey> = neighbors.union(&interaction_list).cloned().collect();
            all.insert(key);
            assert_eq!(all.len(), 16);
        }

        // Deeper levels, disjoint from near field and well separated
        let level = 4;
        for morton in 0..(1u64 << (2 * level)) {
            let key = MortonKey::from_morton(morton, level);
            let neighbors = key.neighbors();
            let interaction_list = key.interaction_list();

            assert!(interaction_list.len() <= 27);
            for other in interaction_list.iter() {
                assert!(!neighbors.contains(other));
                assert!(!key.is_adjacent_same_level(other));
                assert!(key.find_transfer_vector(other).is_ok());
                assert!(key.parent().is_adjacent_same_level(&other.parent()));
            }
        }

        // An interior box has a full interaction list
        let key = MortonKey::from_anchor(&[6, 9], 4);
        assert_eq!(key.interaction_list().len(), 27);
    }

    #[test]
    fn test_transfer_vectors() {
        let key = MortonKey::from_anchor(&[5, 5], 4);

        let mut indices = HashSet::new();
        for dx in -3..=3i64 {
            for dy in -3..=3i64 {
                let other = key
                    .find_key_in_direction(&[dx, dy])
                    .unwrap();
                let index = key.find_transfer_vector(&other).unwrap();
                assert!(index < 49);
                indices.insert(index);
            }
        }
        assert_eq!(indices.len(), 49);

        let far = MortonKey::from_anchor(&[9, 5], 4);
        assert!(key.find_transfer_vector(&far).is_err());
        assert!(key.find_transfer_vector(&key.parent()).is_err());
    }

    #[test]
    fn test_point_to_key() {
        let domain = Domain::<f64>::unit();

        let key = MortonKey::from_point(&Complex::new(0.3, 0.7), &domain, 3).unwrap();
        assert_eq!(key.anchor(), &[2, 5]);
        assert_eq!(key.morton(), interleave(2, 5, 3));

        let key = MortonKey::from_point(&Complex::new(0.0, 0.0), &domain, 5).unwrap();
        assert_eq!(key, MortonKey::from_morton(0, 5));

        let key = MortonKey::from_point(&Complex::new(0.999999, 0.5), &domain, 2).unwrap();
        assert_eq!(key.anchor(), &[3, 2]);
    }

    #[test]
    fn test_point_to_key_fails() {
        let domain = Domain::<f64>::unit();
        assert!(MortonKey::from_point(&Complex::new(1.0, 0.5), &domain, 3).is_err());
        assert!(MortonKey::from_point(&Complex::new(-0.1, 0.5), &domain, 3).is_err());
        assert!(MortonKey::from_point(&Complex::new(0.5, 1.5), &domain, 3).is_err());
    }

    #[test]
    fn test_centre() {
        let domain = Domain::<f64>::unit();

        let centre = MortonKey::root().centre(&domain);
        assert_relative_eq!(centre.re, 0.5);
        assert_relative_eq!(centre.im, 0.5);

        let key = MortonKey::from_anchor(&[2, 5], 3);
        let centre = key.centre(&domain);
        assert_relative_eq!(centre.re, 2.5 / 8.0);
        assert_relative_eq!(centre.im, 5.5 / 8.0);

        let domain = Domain::new(&[-1.0, 2.0], 4.0);
        let centre = key.centre(&domain);
        assert_relative_eq!(centre.re, -1.0 + 2.5 * 0.5);
        assert_relative_eq!(centre.im, 2.0 + 5.5 * 0.5);
    }

    #[test]
    fn test_is_adjacent() {
        let key = MortonKey::from_anchor(&[2, 2], 3);

        // Same level
        assert!(key.is_adjacent(&MortonKey::from_anchor(&[3, 3], 3)));
        assert!(!key.is_adjacent(&MortonKey::from_anchor(&[4, 2], 3)));
        assert!(!key.is_adjacent(&key));

        // Coarser neighbour sharing an edge
        assert!(key.is_adjacent(&MortonKey::from_anchor(&[0, 1], 2)));
        assert!(!key.is_adjacent(&MortonKey::from_anchor(&[0, 0], 1)));

        // Finer box touching a corner
        assert!(key.is_adjacent(&MortonKey::from_anchor(&[3, 3], 4)));
        assert!(key.is_adjacent(&MortonKey::from_anchor(&[6, 6], 4)));
        assert!(!key.is_adjacent(&MortonKey::from_anchor(&[7, 7], 4)));

        // Ancestors overlap rather than touch
        assert!(!key.is_adjacent(&key.parent()));
    }

    #[test]
    fn test_sorting() {
        let mut keys: MortonKeys = vec![
            MortonKey::from_morton(3, 2),
            MortonKey::from_morton(1, 1),
            MortonKey::from_morton(0, 2),
            MortonKey::root(),
        ]
        .into();
        keys.sort();

        let levels: Vec<u64> = keys.iter().map(|k| k.level()).collect();
        assert_eq!(levels, vec![0, 1, 2, 2]);
        assert_eq!(keys[2].morton(), 0);

        let collected: Vec<MortonKey> = keys.clone().collect();
        assert_eq!(collected.len(), 4);
    }
}
