//! Helper functions for evaluating and validating FMMs
use std::time::{Duration, Instant};

use num::Float;
use num_complex::Complex;

/// Check whether two points coincide, to within machine precision scaled by the larger of their magnitudes
/// (or one, for points near the origin).
///
/// # Arguments
/// * `a` - First point.
/// * `b` - Second point.
#[inline(always)]
pub fn is_coincident<T: Float>(a: &Complex<T>, b: &Complex<T>) -> bool {
    let scale = T::one().max(a.norm()).max(b.norm());
    (a - b).norm() <= T::epsilon() * scale
}

/// Run a closure, timing it if requested.
///
/// # Arguments
/// * `timed` - Whether to time the closure.
/// * `f` - Closure to run.
pub fn optionally_time<T, F>(timed: bool, f: F) -> (T, Option<Duration>)
where
    F: FnOnce() -> T,
{
    if timed {
        let start = Instant::now();
        let result = f();
        (result, Some(start.elapsed()))
    } else {
        (f(), None)
    }
}

/// Maximum absolute difference between two sets of potentials.
///
/// Returns NaN if any difference is NaN.
pub fn max_abs_error<T: Float>(found: &[T], expected: &[T]) -> T {
    found
        .iter()
        .zip(expected.iter())
        .fold(T::zero(), |acc, (f, e)| {
            let diff = (*f - *e).abs();
            if acc.is_nan() || diff.is_nan() {
                T::nan()
            } else {
                acc.max(diff)
            }
        })
}

/// Relative error, in the l2 norm, between a set of potentials and a reference.
///
/// Falls back to the absolute error when the reference vanishes.
pub fn relative_l2_error<T: Float>(found: &[T], expected: &[T]) -> T {
    let (diff, norm) = found.iter().zip(expected.iter()).fold(
        (T::zero(), T::zero()),
        |(diff, norm), (f, e)| (diff + (*f - *e).powi(2), norm + e.powi(2)),
    );

    if norm > T::zero() {
        (diff / norm).sqrt()
    } else {
        diff.sqrt()
    }
}
