#![allow(dead_code)]
use mesh_edgeloop::mesh_generation::{MeshGenerationOptions, Periodicity, QuadGrid, quad_grid};
use mesh_edgeloop::topology::point::PointId;

pub fn pid(u: u32) -> PointId {
    PointId::new(u)
}

/// Open `nx`×`ny` grid.
pub fn open_grid(nx: usize, ny: usize) -> QuadGrid {
    quad_grid(nx, ny, MeshGenerationOptions::default()).unwrap()
}

/// Grid wrapped in both directions.
pub fn torus(nx: usize, ny: usize) -> QuadGrid {
    let options = MeshGenerationOptions {
        periodic: Periodicity::torus(),
    };
    quad_grid(nx, ny, options).unwrap()
}

/// Grid wrapped in x only.
pub fn cylinder(nx: usize, ny: usize) -> QuadGrid {
    let options = MeshGenerationOptions {
        periodic: Periodicity::cylinder_x(),
    };
    quad_grid(nx, ny, options).unwrap()
}

/// Lattice point, panicking outside the grid.
pub fn at(grid: &QuadGrid, i: usize, j: usize) -> PointId {
    grid.point_at(i, j)
        .unwrap_or_else(|| panic!("({i}, {j}) outside {}x{} grid", grid.columns, grid.rows))
}

/// Row `j` of the lattice from column `from` to `to` inclusive.
pub fn row(grid: &QuadGrid, j: usize, from: usize, to: usize) -> Vec<PointId> {
    (from..=to).map(|i| at(grid, i, j)).collect()
}
