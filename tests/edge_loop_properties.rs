mod util;

use mesh_edgeloop::algs::edge_loop::{EdgeLoopOpts, Termination, trace_loop, trace_loop_with};
use mesh_edgeloop::topology::AdjacencyOracle;
use proptest::prelude::*;
use util::{at, open_grid, torus};

fn grid_and_seed() -> impl Strategy<Value = (usize, usize, usize, usize)> {
    (2usize..9, 2usize..9).prop_flat_map(|(nx, ny)| (Just(nx), Just(ny), 0..nx, 0..=ny))
}

proptest! {
    #[test]
    fn open_grid_rows_run_to_the_boundary((nx, ny, i, j) in grid_and_seed()) {
        let g = open_grid(nx, ny);
        let interior_row = j > 0 && j < ny;

        let forward = trace_loop(&g.mesh, at(&g, i, j), at(&g, i + 1, j), 1_000);
        let backward = trace_loop(&g.mesh, at(&g, i + 1, j), at(&g, i, j), 1_000);
        if interior_row {
            prop_assert_eq!(forward.len(), nx - i + 1);
            prop_assert_eq!(backward.len(), i + 2);
        } else {
            prop_assert_eq!(forward.len(), 2);
            prop_assert_eq!(backward.len(), 2);
        }
        for out in [&forward, &backward] {
            let end_is_boundary = matches!(out.termination, Termination::BoundaryReached { .. });
            prop_assert!(end_is_boundary);
            prop_assert!(!out.closed);
            prop_assert_eq!(out.iterations + 1, out.len());
        }
    }

    #[test]
    fn paths_are_simple_chains_of_neighbors(
        (nx, ny, i, j) in grid_and_seed(),
        max_iterations in 0usize..12,
    ) {
        let g = open_grid(nx, ny);
        let opts = EdgeLoopOpts { max_iterations, ..EdgeLoopOpts::default() };
        let out = trace_loop_with(&g.mesh, at(&g, i, j), at(&g, i + 1, j), &opts);
        if out.is_failed() {
            prop_assert!(out.is_empty());
            prop_assert!(out.iterations > max_iterations);
        } else {
            prop_assert_eq!(&out.path[..2], &[at(&g, i, j), at(&g, i + 1, j)][..]);
            for (p, q) in out.edges() {
                prop_assert!(g.mesh.is_neighbor(p, q));
            }
            let mut distinct = out.path.clone();
            distinct.sort_unstable();
            distinct.dedup();
            prop_assert_eq!(distinct.len(), out.len());
            prop_assert!(out.iterations <= max_iterations + 1);
        }
    }

    #[test]
    fn torus_rings_have_one_point_per_column(nx in 4usize..10, ny in 4usize..10, j in 0usize..10) {
        let g = torus(nx, ny);
        let j = j % ny;
        let out = trace_loop(&g.mesh, at(&g, 0, j), at(&g, 1, j), 1_000);
        prop_assert!(out.closed);
        prop_assert_eq!(out.len(), nx);
        prop_assert_eq!(out.iterations, nx - 1);
        prop_assert_eq!(out.edges().len(), nx);
        prop_assert!(g.mesh.is_neighbor(out.path[nx - 1], out.path[0]));
    }

    #[test]
    fn non_adjacent_seeds_never_walk((nx, ny, i, j) in grid_and_seed(), skip in 2usize..6) {
        let g = open_grid(nx, ny);
        let a = at(&g, i, j);
        let far = (i + skip).min(nx);
        prop_assume!(far > i + 1);
        let out = trace_loop(&g.mesh, a, at(&g, far, j), 1_000);
        prop_assert!(out.is_empty());
        prop_assert!(out.is_failed());
    }
}
