//! Frozen CSR (Compressed Sparse Row) snapshot of an [`AdjacencyOracle`].
//!
//! Immutable, cache-friendly copy of the face incidence and neighbor lists
//! of a point range, plus the point attributes. Lists keep the source
//! oracle's order, so walks over the snapshot take the same decisions as
//! walks over the source. All storage sits behind `Arc`, which makes the
//! snapshot cheap to clone and safe to share across threads.

use std::sync::Arc;

use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshError;
use crate::topology::adjacency::AdjacencyOracle;
use crate::topology::attributes::PointAttributes;
use crate::topology::point::{FaceId, PointId};

/// Read-only adjacency snapshot over points `0..point_count`.
#[derive(Clone, Debug)]
pub struct FrozenAdjacency {
    point_count: u32,
    /// CSR arrays for point → incident faces.
    face_offsets: Arc<[u32]>,
    faces: Arc<[FaceId]>,
    /// CSR arrays for point → neighbors.
    neighbor_offsets: Arc<[u32]>,
    neighbors: Arc<[PointId]>,
    attributes: Arc<PointAttributes>,
}

impl Default for FrozenAdjacency {
    fn default() -> Self {
        Self {
            point_count: 0,
            face_offsets: Arc::from([0]),
            faces: Arc::from([]),
            neighbor_offsets: Arc::from([0]),
            neighbors: Arc::from([]),
            attributes: Arc::default(),
        }
    }
}

impl FrozenAdjacency {
    /// Snapshot `oracle` for points `0..point_count`, attaching `attributes`.
    ///
    /// Neighbor lists are copied as the oracle returns them, so they may name
    /// points past the range. Those points answer with empty rows.
    pub fn from_oracle<O>(oracle: &O, point_count: u32, attributes: PointAttributes) -> Self
    where
        O: AdjacencyOracle + ?Sized,
    {
        let n = point_count as usize;
        let mut face_offsets = Vec::with_capacity(n + 1);
        let mut neighbor_offsets = Vec::with_capacity(n + 1);
        let mut faces = Vec::with_capacity(n * 4);
        let mut neighbors = Vec::with_capacity(n * 4);
        face_offsets.push(0u32);
        neighbor_offsets.push(0u32);

        for raw in 0..point_count {
            let p = PointId::new(raw);
            faces.extend(oracle.incident_faces(p));
            neighbors.extend(oracle.neighbors(p));
            face_offsets.push(faces.len() as u32);
            neighbor_offsets.push(neighbors.len() as u32);
        }
        log::debug!(
            "froze adjacency of {n} points ({} incidences, {} neighbor entries)",
            faces.len(),
            neighbors.len()
        );

        let frozen = Self {
            point_count,
            face_offsets: Arc::from(face_offsets),
            faces: Arc::from(faces),
            neighbor_offsets: Arc::from(neighbor_offsets),
            neighbors: Arc::from(neighbors),
            attributes: Arc::new(attributes),
        };
        frozen.debug_assert_invariants();
        frozen
    }

    pub fn point_count(&self) -> usize {
        self.point_count as usize
    }

    pub fn attributes(&self) -> &PointAttributes {
        &self.attributes
    }

    /// Incident faces of `point` as a slice (empty outside the range).
    #[inline]
    pub fn faces_of(&self, point: PointId) -> &[FaceId] {
        csr_row(&self.face_offsets, &self.faces, point)
    }

    /// Neighbors of `point` as a slice (empty outside the range).
    #[inline]
    pub fn neighbors_of(&self, point: PointId) -> &[PointId] {
        csr_row(&self.neighbor_offsets, &self.neighbors, point)
    }
}

#[inline]
fn csr_row<'a, T>(offsets: &[u32], values: &'a [T], point: PointId) -> &'a [T] {
    let i = point.index();
    match (offsets.get(i), offsets.get(i + 1)) {
        (Some(&lo), Some(&hi)) => &values[lo as usize..hi as usize],
        _ => &[],
    }
}

impl AdjacencyOracle for FrozenAdjacency {
    fn incident_faces(&self, point: PointId) -> Vec<FaceId> {
        self.faces_of(point).to_vec()
    }

    fn neighbors(&self, point: PointId) -> Vec<PointId> {
        self.neighbors_of(point).to_vec()
    }

    fn has_attribute(&self, point: PointId, name: &str) -> bool {
        self.attributes.is_set(point, name)
    }

    fn incident_face_count(&self, point: PointId) -> usize {
        self.faces_of(point).len()
    }

    fn is_neighbor(&self, a: PointId, b: PointId) -> bool {
        self.neighbors_of(a).contains(&b)
    }

    fn shares_face(&self, p: PointId, q: PointId) -> bool {
        let faces_q = self.faces_of(q);
        self.faces_of(p).iter().any(|f| faces_q.contains(f))
    }
}

impl DebugInvariants for FrozenAdjacency {
    fn validate_invariants(&self) -> Result<(), MeshError> {
        for (name, offsets, len) in [
            ("face", &self.face_offsets, self.faces.len()),
            ("neighbor", &self.neighbor_offsets, self.neighbors.len()),
        ] {
            if offsets.len() != self.point_count as usize + 1 {
                return Err(MeshError::InvalidGeometry(format!(
                    "{name} offsets have {} entries for {} points",
                    offsets.len(),
                    self.point_count
                )));
            }
            if offsets.windows(2).any(|w| w[0] > w[1]) {
                return Err(MeshError::InvalidGeometry(format!(
                    "{name} offsets are not monotone"
                )));
            }
            if offsets.last().map(|&o| o as usize) != Some(len) {
                return Err(MeshError::InvalidGeometry(format!(
                    "{name} offsets do not cover {len} entries"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::mesh::PolyMesh;

    fn ids(raw: &[u32]) -> Vec<PointId> {
        raw.iter().copied().map(PointId::new).collect()
    }

    fn strip() -> PolyMesh {
        // 4---5---6---7
        // |   |   |   |
        // 0---1---2---3
        let mut mesh = PolyMesh::from_faces(
            8,
            [ids(&[0, 1, 5, 4]), ids(&[1, 2, 6, 5]), ids(&[2, 3, 7, 6])],
        )
        .unwrap();
        mesh.attributes_mut().flag("pin", ids(&[6]));
        mesh
    }

    #[test]
    fn snapshot_matches_source() {
        let mesh = strip();
        let frozen = mesh.freeze();
        assert_eq!(frozen.point_count(), 8);
        for p in mesh.points() {
            assert_eq!(frozen.incident_faces(p), mesh.incident_faces(p));
            assert_eq!(frozen.neighbors(p), mesh.neighbors(p));
            assert_eq!(frozen.has_attribute(p, "pin"), mesh.has_attribute(p, "pin"));
            for q in mesh.points() {
                assert_eq!(frozen.shares_face(p, q), mesh.shares_face(p, q));
            }
        }
        assert!(frozen.validate_invariants().is_ok());
    }

    #[test]
    fn out_of_range_points_are_empty() {
        let frozen = strip().freeze();
        let far = PointId::new(100);
        assert!(frozen.faces_of(far).is_empty());
        assert!(frozen.neighbors_of(far).is_empty());
        assert!(!frozen.shares_face(far, PointId::new(1)));
    }

    #[test]
    fn sub_range_snapshot_keeps_outside_neighbors() {
        let mesh = strip();
        let bottom = FrozenAdjacency::from_oracle(&mesh, 4, PointAttributes::new());
        assert_eq!(bottom.point_count(), 4);
        assert!(bottom.validate_invariants().is_ok());
        assert_eq!(bottom.neighbors_of(PointId::new(0)), &mesh.neighbors(PointId::new(0))[..]);
        assert!(bottom.is_neighbor(PointId::new(1), PointId::new(5)));
        assert!(bottom.neighbors_of(PointId::new(5)).is_empty());
        assert_eq!(bottom.incident_face_count(PointId::new(1)), 2);
        assert_eq!(bottom.incident_face_count(PointId::new(5)), 0);
    }

    #[test]
    fn default_is_empty_and_valid() {
        let frozen = FrozenAdjacency::default();
        assert_eq!(frozen.point_count(), 0);
        assert!(frozen.validate_invariants().is_ok());
    }

    #[test]
    fn is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FrozenAdjacency>();
        assert_send_sync::<PolyMesh>();
    }
}
