//! `PolyMesh`: an indexed polygon mesh backed by a sieve.
//!
//! Faces and points live in one [`InMemorySieve`] over [`MeshEntity`]. Each
//! face has one arrow per corner, `Face(f) → Point(p)`, whose payload is the
//! corner's slot in the face's winding. Because the sieve replays arrows in
//! insertion order, the cone of a face is its corner ring and the support of
//! a point is its face star in face-creation order.

use itertools::Itertools;

use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshError;
use crate::topology::adjacency::AdjacencyOracle;
use crate::topology::attributes::PointAttributes;
use crate::topology::frozen::FrozenAdjacency;
use crate::topology::point::{FaceId, PointId};
use crate::topology::sieve::{InMemorySieve, Sieve};

/// Node of the mesh incidence sieve.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MeshEntity {
    Face(FaceId),
    Point(PointId),
}

/// Polygon mesh with a fixed point count, faces added in order, and point
/// attributes.
///
/// # Neighbor order
/// [`AdjacencyOracle::neighbors`] walks the point's incident faces in the
/// order they were added. For each face it yields the next corner, then the
/// previous corner, in that face's winding, keeping the first occurrence of
/// every point.
#[derive(Clone, Debug, Default)]
pub struct PolyMesh {
    point_count: u32,
    face_count: u32,
    incidence: InMemorySieve<MeshEntity, u32>,
    attributes: PointAttributes,
}

impl PolyMesh {
    /// Creates a mesh with `point_count` points and no faces.
    pub fn new(point_count: usize) -> Result<Self, MeshError> {
        Ok(Self {
            point_count: u32::try_from(point_count)
                .map_err(|_| MeshError::IdOverflow("point ids"))?,
            ..Self::default()
        })
    }

    /// Creates a mesh and adds every face in `faces` in order.
    ///
    /// # Example
    /// ```rust
    /// use mesh_edgeloop::topology::mesh::PolyMesh;
    /// use mesh_edgeloop::topology::point::PointId;
    /// let quad: Vec<PointId> = (0..4).map(PointId::new).collect();
    /// let mesh = PolyMesh::from_faces(4, [quad]).unwrap();
    /// assert_eq!(mesh.face_count(), 1);
    /// ```
    pub fn from_faces<I, F>(point_count: usize, faces: I) -> Result<Self, MeshError>
    where
        I: IntoIterator<Item = F>,
        F: AsRef<[PointId]>,
    {
        let mut mesh = Self::new(point_count)?;
        for corners in faces {
            mesh.add_face(corners.as_ref())?;
        }
        mesh.debug_assert_invariants();
        Ok(mesh)
    }

    /// Appends a face with the given corner ring and returns its id.
    ///
    /// Rejects faces with fewer than three corners, repeated corners, or
    /// corners outside `0..point_count`. A rejected face leaves the mesh
    /// unchanged.
    pub fn add_face(&mut self, corners: &[PointId]) -> Result<FaceId, MeshError> {
        let face = FaceId::new(self.face_count);
        if self.face_count == u32::MAX {
            return Err(MeshError::IdOverflow("face ids"));
        }
        if corners.len() < 3 {
            return Err(MeshError::DegenerateFace {
                face,
                corners: corners.len(),
            });
        }
        if let Some(&point) = corners.iter().find(|p| p.get() >= self.point_count) {
            return Err(MeshError::UnknownPoint {
                point,
                point_count: self.point_count,
            });
        }
        if let Some(point) = corners.iter().duplicates().next() {
            return Err(MeshError::RepeatedCorner {
                face,
                point: *point,
            });
        }

        for (slot, &point) in (0u32..).zip(corners) {
            self.incidence
                .add_arrow(MeshEntity::Face(face), MeshEntity::Point(point), slot);
        }
        self.face_count += 1;
        log::trace!("added face {face} with {} corners", corners.len());
        Ok(face)
    }

    pub fn point_count(&self) -> usize {
        self.point_count as usize
    }

    pub fn face_count(&self) -> usize {
        self.face_count as usize
    }

    /// All point ids, ascending.
    pub fn points(&self) -> impl Iterator<Item = PointId> + use<> {
        (0..self.point_count).map(PointId::new)
    }

    /// All face ids, ascending.
    pub fn faces(&self) -> impl Iterator<Item = FaceId> + use<> {
        (0..self.face_count).map(FaceId::new)
    }

    /// Corner ring of `face` in winding order (empty for unknown faces).
    pub fn face_corners(&self, face: FaceId) -> Vec<PointId> {
        self.incidence
            .cone_points(MeshEntity::Face(face))
            .filter_map(as_point)
            .collect()
    }

    /// Undirected edges of the mesh as `(low, high)` pairs, sorted.
    pub fn edges(&self) -> Vec<(PointId, PointId)> {
        self.faces()
            .flat_map(|f| {
                let corners = self.face_corners(f);
                corners
                    .into_iter()
                    .circular_tuple_windows()
                    .map(|(a, b)| if a < b { (a, b) } else { (b, a) })
                    .collect::<Vec<_>>()
            })
            .sorted_unstable()
            .dedup()
            .collect()
    }

    pub fn attributes(&self) -> &PointAttributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut PointAttributes {
        &mut self.attributes
    }

    /// Read-only view of the incidence sieve.
    pub fn incidence(&self) -> &InMemorySieve<MeshEntity, u32> {
        &self.incidence
    }

    /// Snapshots the adjacency of every point into a [`FrozenAdjacency`].
    pub fn freeze(&self) -> FrozenAdjacency {
        FrozenAdjacency::from_oracle(self, self.point_count, self.attributes.clone())
    }
}

fn as_point(e: MeshEntity) -> Option<PointId> {
    match e {
        MeshEntity::Point(p) => Some(p),
        MeshEntity::Face(_) => None,
    }
}

impl AdjacencyOracle for PolyMesh {
    fn incident_faces(&self, point: PointId) -> Vec<FaceId> {
        self.incidence
            .support_points(MeshEntity::Point(point))
            .filter_map(|e| match e {
                MeshEntity::Face(f) => Some(f),
                MeshEntity::Point(_) => None,
            })
            .collect()
    }

    fn neighbors(&self, point: PointId) -> Vec<PointId> {
        self.incidence
            .support(MeshEntity::Point(point))
            .flat_map(|(face, &slot)| {
                let ring: Vec<PointId> = self
                    .incidence
                    .cone_points(face)
                    .filter_map(as_point)
                    .collect();
                let n = ring.len();
                let slot = slot as usize;
                [ring[(slot + 1) % n], ring[(slot + n - 1) % n]]
            })
            .unique()
            .collect()
    }

    fn has_attribute(&self, point: PointId, name: &str) -> bool {
        self.attributes.is_set(point, name)
    }

    fn incident_face_count(&self, point: PointId) -> usize {
        self.incidence.in_degree(MeshEntity::Point(point))
    }
}

impl DebugInvariants for PolyMesh {
    fn validate_invariants(&self) -> Result<(), MeshError> {
        self.incidence.validate_mirrors(|src, dst| match (src, dst) {
            (MeshEntity::Face(face), MeshEntity::Point(point)) => {
                MeshError::IncidenceMismatch { face, point }
            }
            _ => MeshError::InvalidGeometry(format!("unexpected arrow {src:?} -> {dst:?}")),
        })?;
        for face in self.faces() {
            let arrows: Vec<_> = self.incidence.cone(MeshEntity::Face(face)).collect();
            if arrows.len() < 3 {
                return Err(MeshError::DegenerateFace {
                    face,
                    corners: arrows.len(),
                });
            }
            for (expected, (entity, &slot)) in (0u32..).zip(arrows.iter().copied()) {
                let MeshEntity::Point(point) = entity else {
                    return Err(MeshError::InvalidGeometry(format!(
                        "face {face} has non-point corner {entity:?}"
                    )));
                };
                if point.get() >= self.point_count {
                    return Err(MeshError::UnknownPoint {
                        point,
                        point_count: self.point_count,
                    });
                }
                if slot != expected {
                    return Err(MeshError::InvalidGeometry(format!(
                        "face {face} corner {point} stored at slot {slot}, expected {expected}"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(i: u32) -> PointId {
        PointId::new(i)
    }

    fn ids(raw: &[u32]) -> Vec<PointId> {
        raw.iter().copied().map(PointId::new).collect()
    }

    /// Two quads sharing the edge 1-4:
    ///
    /// ```text
    /// 3---4---5
    /// | 0 | 1 |
    /// 0---1---2
    /// ```
    fn two_quads() -> PolyMesh {
        PolyMesh::from_faces(6, [ids(&[0, 1, 4, 3]), ids(&[1, 2, 5, 4])]).unwrap()
    }

    #[test]
    fn incident_faces_in_creation_order() {
        let mesh = two_quads();
        assert_eq!(mesh.incident_faces(p(1)), vec![FaceId::new(0), FaceId::new(1)]);
        assert_eq!(mesh.incident_faces(p(2)), vec![FaceId::new(1)]);
        assert_eq!(mesh.incident_face_count(p(4)), 2);
        assert_eq!(mesh.incident_face_count(p(77)), 0);
    }

    #[test]
    fn neighbors_follow_documented_order() {
        let mesh = two_quads();
        // face 0: next of 1 is 4, prev is 0; face 1: next is 2, prev is 4 (dup)
        assert_eq!(mesh.neighbors(p(1)), ids(&[4, 0, 2]));
        assert_eq!(mesh.neighbors(p(3)), ids(&[0, 4]));
        assert!(mesh.neighbors(p(42)).is_empty());
        assert!(mesh.is_neighbor(p(1), p(2)));
        assert!(!mesh.is_neighbor(p(0), p(4)));
    }

    #[test]
    fn shares_face_through_mesh() {
        let mesh = two_quads();
        assert!(mesh.shares_face(p(0), p(4)));
        assert!(!mesh.shares_face(p(0), p(5)));
    }

    #[test]
    fn face_corners_and_edges() {
        let mesh = two_quads();
        assert_eq!(mesh.face_corners(FaceId::new(1)), ids(&[1, 2, 5, 4]));
        assert!(mesh.face_corners(FaceId::new(9)).is_empty());
        assert_eq!(mesh.edges().len(), 7);
        assert!(mesh.edges().contains(&(p(1), p(4))));
    }

    #[test]
    fn rejects_bad_faces_without_mutation() {
        let mut mesh = two_quads();
        assert_eq!(
            mesh.add_face(&ids(&[0, 1])),
            Err(MeshError::DegenerateFace {
                face: FaceId::new(2),
                corners: 2
            })
        );
        assert_eq!(
            mesh.add_face(&ids(&[0, 1, 6])),
            Err(MeshError::UnknownPoint {
                point: p(6),
                point_count: 6
            })
        );
        assert_eq!(
            mesh.add_face(&ids(&[0, 1, 0, 3])),
            Err(MeshError::RepeatedCorner {
                face: FaceId::new(2),
                point: p(0)
            })
        );
        assert_eq!(mesh.face_count(), 2);
        assert!(mesh.validate_invariants().is_ok());
    }

    #[test]
    fn attributes_are_visible_through_oracle() {
        let mut mesh = two_quads();
        mesh.attributes_mut().set(p(2), "pin", 1.0);
        mesh.attributes_mut().set(p(3), "pin", 0.0);
        assert!(mesh.has_attribute(p(2), "pin"));
        assert!(!mesh.has_attribute(p(3), "pin"));
        assert_eq!(mesh.attributes().points_with("pin"), vec![p(2)]);
    }

    #[test]
    fn invariants_catch_broken_mirrors() {
        let mut mesh = two_quads();
        mesh.incidence.adjacency_in.remove(&MeshEntity::Point(p(0)));
        assert!(matches!(
            mesh.validate_invariants(),
            Err(MeshError::IncidenceMismatch { .. })
        ));
    }
}
