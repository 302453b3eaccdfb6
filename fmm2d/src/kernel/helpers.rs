//! Dimension checks shared by kernel evaluations.
use crate::traits::kernel::Kernel;

pub(crate) fn check_dimensions_evaluate<K: Kernel>(
    kernel: &K,
    sources: &[K::T],
    targets: &[K::T],
    charges: &[K::T],
    result: &[K::T],
) {
    assert!(
        sources.len() % kernel.space_dimension() == 0,
        "Length of sources {} is not a multiple of space dimension {}.",
        sources.len(),
        kernel.space_dimension()
    );

    assert!(
        targets.len() % kernel.space_dimension() == 0,
        "Length of targets {} is not a multiple of space dimension {}.",
        targets.len(),
        kernel.space_dimension()
    );

    let nsources = sources.len() / kernel.space_dimension();
    let ntargets = targets.len() / kernel.space_dimension();

    assert_eq!(
        charges.len(),
        nsources,
        "Wrong dimension for `charges`. {} != {} ",
        charges.len(),
        nsources,
    );

    assert_eq!(
        result.len(),
        ntargets,
        "Wrong dimension for `result`. {} != {} ",
        result.len(),
        ntargets,
    );
}
