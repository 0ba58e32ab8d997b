//! # mesh-edgeloop
//!
//! Edge-loop tracing for polygon meshes. Given a directed seed edge on a
//! region of quadrilaterals, the tracer walks straight through each quad,
//! leaving every point by the edge opposite the one it arrived on, and
//! reports the chain of points it visited together with why it stopped:
//! the loop closed, the mesh stopped being four-valent, a caller-flagged
//! point was reached, no continuation existed, or the step budget ran out.
//!
//! ## Layout
//! - [`topology::AdjacencyOracle`]: the read-only queries the tracer needs
//!   (incident faces, neighbors, attribute test). Implement it for your own
//!   mesh type to trace over it directly.
//! - [`topology::PolyMesh`]: an indexed polygon mesh stored in a
//!   [`topology::sieve::InMemorySieve`], with named point attributes.
//! - [`topology::FrozenAdjacency`]: an immutable CSR snapshot of any oracle,
//!   cheap to clone and share between threads.
//! - [`mesh_generation::quad_grid`]: structured quad grids, optionally
//!   wrapped into a cylinder or torus.
//! - [`algs::edge_loop`]: [`trace_loop`](algs::trace_loop),
//!   [`trace_loop_with`](algs::trace_loop_with) and the
//!   [`EdgeLoopTracer`](algs::EdgeLoopTracer) builder.
//!
//! ## Determinism
//!
//! Tracing picks the first qualifying neighbor in oracle order. `PolyMesh`
//! and `FrozenAdjacency` both return neighbors in a fixed, documented order,
//! so repeated walks over unchanged meshes return identical results.
//!
//! ## Logging
//! The crate logs through the `log` facade (`debug` for walk outcomes and
//! ambiguous continuations, `trace` for single steps). Install any logger to
//! see it.

pub mod algs;
pub mod debug_invariants;
pub mod mesh_error;
pub mod mesh_generation;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::edge_loop::{
        EdgeLoop, EdgeLoopOpts, EdgeLoopTracer, FailureReason, Termination, trace_loop,
        trace_loop_with,
    };
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::mesh_error::MeshError;
    pub use crate::mesh_generation::{MeshGenerationOptions, Periodicity, QuadGrid, quad_grid};
    pub use crate::topology::adjacency::AdjacencyOracle;
    pub use crate::topology::attributes::PointAttributes;
    pub use crate::topology::frozen::FrozenAdjacency;
    pub use crate::topology::mesh::PolyMesh;
    pub use crate::topology::point::{FaceId, PointId};
}
