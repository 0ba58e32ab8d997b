//! MeshError: unified error type for mesh construction.
//!
//! Edge-loop tracing never fails with an error (see
//! [`Termination`](crate::algs::edge_loop::Termination)); only building the
//! in-memory oracles can.

use thiserror::Error;

use crate::topology::point::{FaceId, PointId};

/// Unified error type for mesh-edgeloop construction APIs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// A face referenced a point outside `0..point_count`.
    #[error("face references unknown point {point} (mesh has {point_count} points)")]
    UnknownPoint { point: PointId, point_count: u32 },
    /// A face needs at least three corners.
    #[error("face {face} has {corners} corners; at least 3 are required")]
    DegenerateFace { face: FaceId, corners: usize },
    /// A corner appears twice in the same face.
    #[error("face {face} lists point {point} more than once")]
    RepeatedCorner { face: FaceId, point: PointId },
    /// Ids are `u32`; the mesh ran out of them.
    #[error("id space exhausted: {0}")]
    IdOverflow(&'static str),
    /// Sieve mirrors disagree (cone vs. support).
    #[error("incidence mirror mismatch between face {face} and point {point}")]
    IncidenceMismatch { face: FaceId, point: PointId },
    /// Invalid generator input.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}
