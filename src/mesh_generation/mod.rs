//! Structured quad grid generator with boundary attributes and periodic wrap.
//!
//! Grids are the reference meshes for edge-loop work: every interior point
//! has exactly four incident quads, boundary points fewer, and wrapping a
//! direction turns rows or columns into closed rings.

use crate::mesh_error::MeshError;
use crate::topology::mesh::PolyMesh;
use crate::topology::point::PointId;

/// Boundary attribute name for the minimum-x side.
pub const BOUNDARY_X_MIN: &str = "boundary_x_min";
/// Boundary attribute name for the maximum-x side.
pub const BOUNDARY_X_MAX: &str = "boundary_x_max";
/// Boundary attribute name for the minimum-y side.
pub const BOUNDARY_Y_MIN: &str = "boundary_y_min";
/// Boundary attribute name for the maximum-y side.
pub const BOUNDARY_Y_MAX: &str = "boundary_y_max";

/// Smallest cell count along a wrapped direction. With fewer cells a ring
/// visits the same neighbor from both sides.
pub const MIN_PERIODIC_CELLS: usize = 3;

/// Optional periodic identification for structured grids.
#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Periodicity {
    pub x: bool,
    pub y: bool,
}

impl Periodicity {
    /// No periodic directions.
    pub fn none() -> Self {
        Self::default()
    }

    /// Wrap in x only: a cylinder whose rows are closed rings.
    pub fn cylinder_x() -> Self {
        Self { x: true, y: false }
    }

    /// Wrap in both directions: a torus with no boundary at all.
    pub fn torus() -> Self {
        Self { x: true, y: true }
    }
}

/// Optional configuration for grid generation.
#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct MeshGenerationOptions {
    pub periodic: Periodicity,
}

/// A generated grid together with its lattice addressing.
#[derive(Clone, Debug)]
pub struct QuadGrid {
    pub mesh: PolyMesh,
    /// Cells along x.
    pub nx: usize,
    /// Cells along y.
    pub ny: usize,
    /// Distinct point columns (`nx + 1`, or `nx` when x wraps).
    pub columns: usize,
    /// Distinct point rows (`ny + 1`, or `ny` when y wraps).
    pub rows: usize,
    pub periodic: Periodicity,
}

impl QuadGrid {
    /// Point at lattice coordinates `(i, j)`, wrapping periodic directions.
    ///
    /// Returns `None` for coordinates outside a non-periodic direction.
    pub fn point_at(&self, i: usize, j: usize) -> Option<PointId> {
        let i = wrap(i, self.columns, self.periodic.x)?;
        let j = wrap(j, self.rows, self.periodic.y)?;
        PointId::try_from(j * self.columns + i).ok()
    }

    /// Lattice coordinates of `point`.
    pub fn coords_of(&self, point: PointId) -> Option<(usize, usize)> {
        let idx = point.index();
        (idx < self.columns * self.rows).then(|| (idx % self.columns, idx / self.columns))
    }
}

fn wrap(k: usize, count: usize, periodic: bool) -> Option<usize> {
    if periodic {
        Some(k % count)
    } else {
        (k < count).then_some(k)
    }
}

fn invalid_geometry(message: impl Into<String>) -> MeshError {
    MeshError::InvalidGeometry(message.into())
}

/// Generate a structured quadrilateral grid with `nx`×`ny` cells.
///
/// Points are numbered row-major from the minimum corner, faces likewise,
/// and every face is wound counter-clockwise. Non-periodic sides carry the
/// `boundary_*` attributes with value `1.0`.
///
/// # Example
/// ```rust
/// use mesh_edgeloop::mesh_generation::{quad_grid, MeshGenerationOptions};
/// let grid = quad_grid(4, 4, MeshGenerationOptions::default()).unwrap();
/// assert_eq!(grid.mesh.point_count(), 25);
/// assert_eq!(grid.mesh.face_count(), 16);
/// ```
pub fn quad_grid(
    nx: usize,
    ny: usize,
    options: MeshGenerationOptions,
) -> Result<QuadGrid, MeshError> {
    if nx == 0 || ny == 0 {
        return Err(invalid_geometry("nx and ny must be positive"));
    }
    let periodic = options.periodic;
    if periodic.x && nx < MIN_PERIODIC_CELLS {
        return Err(invalid_geometry(format!(
            "periodic x needs at least {MIN_PERIODIC_CELLS} cells, got {nx}"
        )));
    }
    if periodic.y && ny < MIN_PERIODIC_CELLS {
        return Err(invalid_geometry(format!(
            "periodic y needs at least {MIN_PERIODIC_CELLS} cells, got {ny}"
        )));
    }

    let lattice_len = |cells: usize, wrapped: bool| {
        if wrapped {
            Some(cells)
        } else {
            cells.checked_add(1)
        }
    };
    let columns = lattice_len(nx, periodic.x).ok_or_else(|| invalid_geometry("grid too large"))?;
    let rows = lattice_len(ny, periodic.y).ok_or_else(|| invalid_geometry("grid too large"))?;
    let point_count = columns
        .checked_mul(rows)
        .ok_or_else(|| invalid_geometry("grid too large"))?;

    let mut grid = QuadGrid {
        mesh: PolyMesh::new(point_count)?,
        nx,
        ny,
        columns,
        rows,
        periodic,
    };

    let corner = |grid: &QuadGrid, i: usize, j: usize| {
        grid.point_at(i, j)
            .ok_or_else(|| invalid_geometry(format!("lattice point ({i}, {j}) out of range")))
    };
    for j in 0..ny {
        for i in 0..nx {
            let v0 = corner(&grid, i, j)?;
            let v1 = corner(&grid, i + 1, j)?;
            let v2 = corner(&grid, i + 1, j + 1)?;
            let v3 = corner(&grid, i, j + 1)?;
            grid.mesh.add_face(&[v0, v1, v2, v3])?;
        }
    }

    let attributes = grid.mesh.attributes_mut();
    if !periodic.x {
        attributes.flag(BOUNDARY_X_MIN, (0..rows).map(|j| lattice(columns, 0, j)));
        attributes.flag(BOUNDARY_X_MAX, (0..rows).map(|j| lattice(columns, nx, j)));
    }
    if !periodic.y {
        attributes.flag(BOUNDARY_Y_MIN, (0..columns).map(|i| lattice(columns, i, 0)));
        attributes.flag(BOUNDARY_Y_MAX, (0..columns).map(|i| lattice(columns, i, ny)));
    }

    crate::debug_invariants!(
        crate::debug_invariants::DebugInvariants::validate_invariants(&grid.mesh),
        "quad_grid"
    );
    log::debug!(
        "generated {nx}x{ny} quad grid ({} points, {} faces, periodic {:?})",
        grid.mesh.point_count(),
        grid.mesh.face_count(),
        periodic
    );
    Ok(grid)
}

/// Row-major index; in range by construction of the callers.
fn lattice(columns: usize, i: usize, j: usize) -> PointId {
    PointId::new((j * columns + i) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::adjacency::AdjacencyOracle;

    #[test]
    fn open_grid_counts_and_valence() {
        let grid = quad_grid(4, 3, MeshGenerationOptions::default()).unwrap();
        assert_eq!(grid.mesh.point_count(), 5 * 4);
        assert_eq!(grid.mesh.face_count(), 12);
        let center = grid.point_at(2, 1).unwrap();
        let corner = grid.point_at(0, 0).unwrap();
        let side = grid.point_at(2, 0).unwrap();
        assert_eq!(grid.mesh.incident_face_count(center), 4);
        assert_eq!(grid.mesh.incident_face_count(corner), 1);
        assert_eq!(grid.mesh.incident_face_count(side), 2);
        assert_eq!(grid.point_at(5, 0), None);
        assert_eq!(grid.coords_of(center), Some((2, 1)));
    }

    #[test]
    fn boundary_attributes_on_open_sides() {
        let grid = quad_grid(2, 2, MeshGenerationOptions::default()).unwrap();
        let attrs = grid.mesh.attributes();
        assert_eq!(attrs.points_with(BOUNDARY_X_MIN).len(), 3);
        assert_eq!(attrs.points_with(BOUNDARY_Y_MAX).len(), 3);
        let center = grid.point_at(1, 1).unwrap();
        for name in [BOUNDARY_X_MIN, BOUNDARY_X_MAX, BOUNDARY_Y_MIN, BOUNDARY_Y_MAX] {
            assert!(!grid.mesh.has_attribute(center, name));
        }
        assert!(grid.mesh.has_attribute(grid.point_at(2, 2).unwrap(), BOUNDARY_X_MAX));
    }

    #[test]
    fn torus_is_four_valent_everywhere() {
        let options = MeshGenerationOptions {
            periodic: Periodicity::torus(),
        };
        let grid = quad_grid(5, 3, options).unwrap();
        assert_eq!(grid.mesh.point_count(), 15);
        for p in grid.mesh.points() {
            assert_eq!(grid.mesh.incident_face_count(p), 4);
            assert_eq!(grid.mesh.neighbors(p).len(), 4);
        }
        assert!(grid.mesh.attributes().is_empty());
        assert_eq!(grid.point_at(5, 3), grid.point_at(0, 0));
    }

    #[test]
    fn cylinder_keeps_y_boundary() {
        let options = MeshGenerationOptions {
            periodic: Periodicity::cylinder_x(),
        };
        let grid = quad_grid(4, 2, options).unwrap();
        assert_eq!(grid.columns, 4);
        assert_eq!(grid.rows, 3);
        assert_eq!(grid.mesh.incident_face_count(grid.point_at(0, 1).unwrap()), 4);
        assert_eq!(grid.mesh.incident_face_count(grid.point_at(0, 0).unwrap()), 2);
        assert!(grid.mesh.attributes().points_with(BOUNDARY_X_MIN).is_empty());
        assert_eq!(grid.mesh.attributes().points_with(BOUNDARY_Y_MIN).len(), 4);
    }

    #[test]
    fn rejects_bad_dimensions() {
        assert!(matches!(
            quad_grid(0, 3, MeshGenerationOptions::default()),
            Err(MeshError::InvalidGeometry(_))
        ));
        let options = MeshGenerationOptions {
            periodic: Periodicity::cylinder_x(),
        };
        assert!(matches!(
            quad_grid(2, 3, options),
            Err(MeshError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn huge_dimensions_are_rejected_not_overflowed() {
        for (nx, ny) in [(usize::MAX, 1), (1, usize::MAX), (usize::MAX / 2, 4)] {
            assert!(matches!(
                quad_grid(nx, ny, MeshGenerationOptions::default()),
                Err(MeshError::InvalidGeometry(_))
            ));
        }
    }
}
