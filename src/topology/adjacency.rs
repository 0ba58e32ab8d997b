//! The adjacency queries edge-loop tracing needs from a mesh.
//!
//! [`AdjacencyOracle`] is the seam between the tracer and whatever stores
//! the mesh. The tracer only reads through it, so any host representation
//! (half-edge, indexed face set, a CSR snapshot) can be walked once it
//! answers these three questions.

use crate::topology::point::{FaceId, PointId};

/// Read-only point adjacency, incidence and attribute queries.
///
/// # Ordering
/// `neighbors` must return the same order every time it is called for the
/// same point on unchanged mesh state. Tracing picks the *first* neighbor
/// passing its filters, so on irregular topology the order decides the walk.
/// Implementations document the order they guarantee.
pub trait AdjacencyOracle {
    /// Faces having `point` as a corner. Unknown points have none.
    fn incident_faces(&self, point: PointId) -> Vec<FaceId>;

    /// Points joined to `point` by a mesh edge, without duplicates.
    fn neighbors(&self, point: PointId) -> Vec<PointId>;

    /// True iff attribute `name` is present on `point` with a positive value.
    fn has_attribute(&self, point: PointId, name: &str) -> bool;

    /// Number of faces incident to `point`.
    fn incident_face_count(&self, point: PointId) -> usize {
        self.incident_faces(point).len()
    }

    /// True iff `b` is one of `a`'s neighbors.
    fn is_neighbor(&self, a: PointId, b: PointId) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// True iff `p` and `q` have at least one incident face in common.
    ///
    /// Runs in `O(deg(p) * deg(q))`; implementations with indexed storage
    /// may override it.
    fn shares_face(&self, p: PointId, q: PointId) -> bool {
        let faces_p = self.incident_faces(p);
        if faces_p.is_empty() {
            return false;
        }
        let faces_q = self.incident_faces(q);
        faces_p.iter().any(|f| faces_q.contains(f))
    }
}

impl<O: AdjacencyOracle + ?Sized> AdjacencyOracle for &O {
    fn incident_faces(&self, point: PointId) -> Vec<FaceId> {
        (**self).incident_faces(point)
    }
    fn neighbors(&self, point: PointId) -> Vec<PointId> {
        (**self).neighbors(point)
    }
    fn has_attribute(&self, point: PointId, name: &str) -> bool {
        (**self).has_attribute(point, name)
    }
    fn incident_face_count(&self, point: PointId) -> usize {
        (**self).incident_face_count(point)
    }
    fn is_neighbor(&self, a: PointId, b: PointId) -> bool {
        (**self).is_neighbor(a, b)
    }
    fn shares_face(&self, p: PointId, q: PointId) -> bool {
        (**self).shares_face(p, q)
    }
}

/// Free-function form of [`AdjacencyOracle::shares_face`].
#[inline]
pub fn shares_face<O: AdjacencyOracle + ?Sized>(oracle: &O, p: PointId, q: PointId) -> bool {
    oracle.shares_face(p, q)
}
