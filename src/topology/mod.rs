//! Top-level module for mesh topology abstractions.
//!
//! This module provides:
//! - Point and face id newtypes
//! - The `Sieve` incidence trait and its in-memory implementation
//! - The `AdjacencyOracle` seam consumed by edge-loop tracing
//! - `PolyMesh` and its frozen CSR snapshot, the two oracles shipped here
//! - Named point attributes

pub mod adjacency;
pub mod attributes;
pub mod frozen;
pub mod mesh;
pub mod point;
pub mod sieve;

pub use adjacency::{AdjacencyOracle, shares_face};
pub use attributes::PointAttributes;
pub use frozen::FrozenAdjacency;
pub use mesh::{MeshEntity, PolyMesh};
pub use point::{FaceId, PointId};
