use fmm2d::{
    fmm::helpers::{max_abs_error, relative_l2_error},
    traits::tree::SingleTree,
    tree::helpers::uniform_grid_fixture,
    Fmm, Laplace2dKernel, SingleNodeBuilder,
};

fn main() {
    // Four sources per leaf of a level 5 grid, with targets in the same positions
    let grid_depth = 5;
    let (sources, targets, charges) = uniform_grid_fixture::<f64>(grid_depth);

    // FMM parameters
    let n_crit = Some(4);
    let depth = None;
    let expansion_order = 12;

    let mut fmm = SingleNodeBuilder::new()
        .tree(&sources, &targets, n_crit, depth)
        .unwrap()
        .parameters(&charges, expansion_order, Laplace2dKernel::default())
        .unwrap()
        .timed(true)
        .build()
        .unwrap();

    println!(
        "n_sources={} n_targets={} depth={} expansion_order={}",
        fmm.tree().n_sources_tot(),
        fmm.tree().n_targets_tot(),
        fmm.tree().depth(),
        fmm.expansion_order()
    );

    let s = std::time::Instant::now();
    let found = fmm.solve(&charges).unwrap();
    let fmm_time = s.elapsed();

    for time in fmm.operator_times.iter() {
        println!("{:?}: {} ms", time.operator, time.time);
    }

    let s = std::time::Instant::now();
    let expected = fmm.solve_direct(&charges).unwrap();
    let direct_time = s.elapsed();

    println!(
        "fmm {:?}, direct {:?}, max abs error {:e}, relative l2 error {:e}",
        fmm_time,
        direct_time,
        max_abs_error(&found, &expected),
        relative_l2_error(&found, &expected)
    );
}
