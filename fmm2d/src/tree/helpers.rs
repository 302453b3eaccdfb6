//! Helper functions used in testing tree and FMM implementations, specifically test point generators.

use num::Float;
use rand::distributions::uniform::SampleUniform;
use rand::prelude::*;

/// Points fixture for testing, uniformly samples in each axis from min to max.
///
/// Returns coordinates interleaved as `[x_1, y_1, ..., x_N, y_N]`.
///
/// # Arguments
/// * `n_points` - The number of points to sample.
/// * `min` - The minimum coordinate value along each axis, defaults to 0.
/// * `max` - The maximum coordinate value along each axis, defaults to 1.
/// * `seed` - Random seed, defaults to 0.
pub fn points_fixture<T: Float + SampleUniform>(
    n_points: usize,
    min: Option<T>,
    max: Option<T>,
    seed: Option<u64>,
) -> Vec<T> {
    let seed = seed.unwrap_or(0);
    let mut range = StdRng::seed_from_u64(seed);

    let between = if let (Some(min), Some(max)) = (min, max) {
        rand::distributions::Uniform::from(min..max)
    } else {
        rand::distributions::Uniform::from(T::zero()..T::one())
    };

    (0..2 * n_points)
        .map(|_| between.sample(&mut range))
        .collect()
}

/// Points fixture for testing, uniformly samples on a circle of diameter 1 centred in the unit square.
///
/// # Arguments
/// * `n_points` - The number of points to sample.
pub fn points_fixture_circle<T: Float + SampleUniform>(n_points: usize) -> Vec<T> {
    let mut range = StdRng::seed_from_u64(0);
    let two_pi = T::from(std::f64::consts::TAU).unwrap_or_else(T::zero);
    let half = T::from(0.5).unwrap_or_else(T::zero);
    // Keep the circle strictly inside the half open unit square
    let radius = T::from(0.49).unwrap_or(half);

    let between = rand::distributions::Uniform::from(T::zero()..T::one());

    let mut points = Vec::with_capacity(2 * n_points);
    for _ in 0..n_points {
        let phi = between.sample(&mut range) * two_pi;
        points.push(radius * phi.cos() + half);
        points.push(radius * phi.sin() + half);
    }
    points
}

/// Uniform grid of unit charges, with sources and targets coinciding.
///
/// Divides the unit square into `2^depth` cells per side and places four points in each cell, at a quarter and
/// three quarters of the cell width along each axis. Cells are visited row by row, starting from the bottom left.
///
/// Returns `(sources, targets, charges)`, with coordinates interleaved as `[x_1, y_1, ..., x_N, y_N]`.
///
/// # Arguments
/// * `depth` - Number of subdivisions of the unit square along each axis, as a power of two.
pub fn uniform_grid_fixture<T: Float>(depth: u64) -> (Vec<T>, Vec<T>, Vec<T>) {
    let n = 1usize << depth;
    let width = T::one() / T::from(n).unwrap_or_else(T::one);
    let quarter = T::from(0.25).unwrap_or_else(T::zero);
    let three_quarters = T::from(0.75).unwrap_or_else(T::zero);
    let offsets = [
        [quarter, quarter],
        [three_quarters, quarter],
        [quarter, three_quarters],
        [three_quarters, three_quarters],
    ];

    let mut sources = Vec::with_capacity(8 * n * n);
    for j in 0..n {
        let y = T::from(j).unwrap_or_else(T::zero) * width;
        for i in 0..n {
            let x = T::from(i).unwrap_or_else(T::zero) * width;
            for [dx, dy] in offsets.iter() {
                sources.push(x + *dx * width);
                sources.push(y + *dy * width);
            }
        }
    }

    let targets = sources.clone();
    let charges = vec![T::one(); 4 * n * n];

    (sources, targets, charges)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_points_fixture() {
        let points = points_fixture::<f64>(50, Some(-2.0), Some(3.0), Some(7));
        assert_eq!(points.len(), 100);
        assert!(points.iter().all(|&p| (-2.0..3.0).contains(&p)));

        // Seeded fixtures are reproducible
        assert_eq!(points, points_fixture::<f64>(50, Some(-2.0), Some(3.0), Some(7)));
    }

    #[test]
    fn test_points_fixture_circle() {
        let points = points_fixture_circle::<f64>(64);
        for xy in points.chunks_exact(2) {
            let r = ((xy[0] - 0.5).powi(2) + (xy[1] - 0.5).powi(2)).sqrt();
            assert!((r - 0.49).abs() < 1e-12);
        }
    }

    #[test]
    fn test_uniform_grid_fixture() {
        let (sources, targets, charges) = uniform_grid_fixture::<f64>(1);
        assert_eq!(charges.len(), 16);
        assert_eq!(sources.len(), 32);
        assert_eq!(sources, targets);

        // First cell, then the second cell along x
        assert_eq!(&sources[0..8], &[0.125, 0.125, 0.375, 0.125, 0.125, 0.375, 0.375, 0.375]);
        assert_eq!(&sources[8..10], &[0.625, 0.125]);
        // First cell of the second row
        assert_eq!(&sources[16..18], &[0.125, 0.625]);
    }
}
