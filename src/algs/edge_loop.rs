//! Edge-loop tracing across quad regions.
//!
//! Starting from a directed seed edge `a → b`, the tracer repeatedly leaves
//! the current point through the edge *opposite* the one it arrived on: at a
//! point with exactly four incident faces, it continues to the neighbor that
//! shares no face with the point it just came from. The walk ends when it
//!
//! - closes back on `a` ([`Termination::Closed`]),
//! - reaches a point whose face count is not four
//!   ([`Termination::BoundaryReached`]),
//! - reaches a point flagged by one of the break attributes
//!   ([`Termination::AttributeHit`]),
//! - finds no continuation ([`Termination::Stalled`]), or
//! - runs out of iteration budget ([`Termination::Failed`]).
//!
//! Failures return an empty path; every other outcome returns the path
//! walked so far, starting with `a`. When several neighbors qualify (only on
//! non-manifold or degenerate topology) the first one in oracle order wins.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::topology::adjacency::AdjacencyOracle;
use crate::topology::point::PointId;

/// Incident-face count of a point inside a regular quad region.
pub const QUAD_VALENCE: usize = 4;

/// Budget used by [`EdgeLoopOpts::default`].
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Options for [`trace_loop_with`].
///
/// Deserializes from partial input; missing fields take their defaults.
///
/// ```rust
/// use mesh_edgeloop::algs::edge_loop::EdgeLoopOpts;
/// let opts: EdgeLoopOpts =
///     serde_json::from_str(r#"{ "max_iterations": 64, "break_attributes": ["seam"] }"#).unwrap();
/// assert!(opts.return_closed_only);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeLoopOpts {
    /// Advance steps allowed before the walk counts as failed.
    pub max_iterations: usize,
    /// Attribute names that stop the walk in front of a flagged point.
    pub break_attributes: Vec<String>,
    /// Keep loops that close on the start point; when false they are
    /// discarded and only open or attribute-bounded paths are returned.
    pub return_closed_only: bool,
}

impl Default for EdgeLoopOpts {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            break_attributes: Vec::new(),
            return_closed_only: true,
        }
    }
}

impl EdgeLoopOpts {
    /// Closed-loop form: the given budget, no break attributes.
    pub fn with_max_iterations(max_iterations: usize) -> Self {
        Self {
            max_iterations,
            ..Self::default()
        }
    }
}

/// Why a walk produced no path.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureReason {
    /// The seed points are not joined by a mesh edge.
    NotAdjacent,
    /// More than `max_iterations` advance steps were needed.
    IterationBudgetExceeded,
    /// The walk closed on its start while closed loops were not wanted.
    ClosedLoopDiscarded,
}

/// How a walk ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Termination {
    /// Returned to the start point; the path is the full ring.
    Closed,
    /// The last path point does not have exactly four incident faces.
    BoundaryReached { point: PointId, face_count: usize },
    /// The next point carries `attribute`; it was not appended.
    AttributeHit { point: PointId, attribute: String },
    /// No neighbor of `point` continues the loop.
    Stalled { point: PointId },
    /// The current point was the start point before any step was taken
    /// (a seed with `a == b`).
    ReturnedToStart,
    /// No usable path.
    Failed(FailureReason),
}

/// Result of one edge-loop walk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeLoop {
    /// Visited points, starting with the seed start. Closed rings do not
    /// repeat the start at the end. Empty on failure.
    pub path: Vec<PointId>,
    /// The walk came back to the start point (also set when such a loop was
    /// then discarded).
    pub closed: bool,
    /// The walk stopped in front of a point flagged by a break attribute.
    pub hit_attribute: bool,
    pub termination: Termination,
    /// Advance steps taken.
    pub iterations: usize,
}

impl EdgeLoop {
    fn failed(reason: FailureReason, iterations: usize) -> Self {
        Self {
            path: Vec::new(),
            closed: reason == FailureReason::ClosedLoopDiscarded,
            hit_attribute: false,
            termination: Termination::Failed(reason),
            iterations,
        }
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// True for every [`Termination::Failed`] outcome.
    pub fn is_failed(&self) -> bool {
        matches!(self.termination, Termination::Failed(_))
    }

    /// First point of the path.
    pub fn start(&self) -> Option<PointId> {
        self.path.first().copied()
    }

    /// Consecutive point pairs of the path. Closed loops include the edge
    /// from the last point back to the start.
    pub fn edges(&self) -> Vec<(PointId, PointId)> {
        if self.closed && !self.is_failed() {
            self.path.iter().copied().circular_tuple_windows().collect()
        } else {
            self.path.iter().copied().tuple_windows().collect()
        }
    }
}

/// Traces the closed-loop form: closed loops are kept and nothing is fenced
/// by attributes.
///
/// # Example
/// ```rust
/// use mesh_edgeloop::algs::edge_loop::trace_loop;
/// use mesh_edgeloop::mesh_generation::{quad_grid, MeshGenerationOptions, Periodicity};
/// let options = MeshGenerationOptions { periodic: Periodicity::torus() };
/// let grid = quad_grid(6, 4, options).unwrap();
/// let a = grid.point_at(0, 1).unwrap();
/// let b = grid.point_at(1, 1).unwrap();
/// let ring = trace_loop(&grid.mesh, a, b, 100);
/// assert!(ring.closed);
/// assert_eq!(ring.len(), 6);
/// ```
pub fn trace_loop<O>(oracle: &O, a: PointId, b: PointId, max_iterations: usize) -> EdgeLoop
where
    O: AdjacencyOracle + ?Sized,
{
    trace_loop_with(oracle, a, b, &EdgeLoopOpts::with_max_iterations(max_iterations))
}

/// Traces the edge loop seeded by `a → b` under `opts`.
pub fn trace_loop_with<O>(oracle: &O, a: PointId, b: PointId, opts: &EdgeLoopOpts) -> EdgeLoop
where
    O: AdjacencyOracle + ?Sized,
{
    let result = walk(oracle, a, b, opts);
    log::debug!(
        "edge loop {a}->{b}: {:?} after {} steps, {} points",
        result.termination,
        result.iterations,
        result.path.len()
    );
    result
}

fn walk<O>(oracle: &O, a: PointId, b: PointId, opts: &EdgeLoopOpts) -> EdgeLoop
where
    O: AdjacencyOracle + ?Sized,
{
    if !oracle.is_neighbor(a, b) {
        return EdgeLoop::failed(FailureReason::NotAdjacent, 0);
    }

    let mut path = vec![a, b];
    let mut last = a;
    let mut cur = b;
    let mut iterations = 0usize;

    let open = |path: Vec<PointId>, termination: Termination, iterations: usize| EdgeLoop {
        hit_attribute: matches!(termination, Termination::AttributeHit { .. }),
        closed: termination == Termination::Closed,
        path,
        termination,
        iterations,
    };

    loop {
        if iterations > opts.max_iterations {
            return EdgeLoop::failed(FailureReason::IterationBudgetExceeded, iterations);
        }
        iterations += 1;

        if cur == a {
            return open(path, Termination::ReturnedToStart, iterations);
        }

        let face_count = oracle.incident_face_count(cur);
        if face_count != QUAD_VALENCE {
            return open(
                path,
                Termination::BoundaryReached {
                    point: cur,
                    face_count,
                },
                iterations,
            );
        }

        let Some(next) = opposite_neighbor(oracle, last, cur) else {
            return open(path, Termination::Stalled { point: cur }, iterations);
        };
        log::trace!("edge loop step {iterations}: {cur} -> {next}");
        last = cur;
        cur = next;

        if cur == a {
            if opts.return_closed_only {
                return open(path, Termination::Closed, iterations);
            }
            return EdgeLoop::failed(FailureReason::ClosedLoopDiscarded, iterations);
        }

        if let Some(attribute) = opts
            .break_attributes
            .iter()
            .find(|name| oracle.has_attribute(cur, name))
        {
            let termination = Termination::AttributeHit {
                point: cur,
                attribute: attribute.clone(),
            };
            return open(path, termination, iterations);
        }

        path.push(cur);
    }
}

/// The neighbor of `cur` across the quad from `last`: the first neighbor,
/// in oracle order, that is neither `last` nor shares a face with it.
pub fn opposite_neighbor<O>(oracle: &O, last: PointId, cur: PointId) -> Option<PointId>
where
    O: AdjacencyOracle + ?Sized,
{
    let mut candidates = oracle
        .neighbors(cur)
        .into_iter()
        .filter(|&ne| ne != last && !oracle.shares_face(last, ne));
    let chosen = candidates.next()?;
    if log::log_enabled!(log::Level::Debug) {
        let others: Vec<PointId> = candidates.collect();
        if !others.is_empty() {
            log::debug!(
                "ambiguous continuation at {cur} (from {last}): took {chosen}, skipped {others:?}"
            );
        }
    }
    Some(chosen)
}

/// Consuming builder over [`trace_loop_with`].
///
/// ```rust
/// use mesh_edgeloop::algs::edge_loop::{EdgeLoopTracer, Termination};
/// use mesh_edgeloop::mesh_generation::{quad_grid, MeshGenerationOptions};
/// let grid = quad_grid(4, 4, MeshGenerationOptions::default()).unwrap();
/// let a = grid.point_at(0, 2).unwrap();
/// let b = grid.point_at(1, 2).unwrap();
/// let walked = EdgeLoopTracer::new(&grid.mesh)
///     .max_iterations(100)
///     .return_closed_only(false)
///     .trace(a, b);
/// assert_eq!(walked.len(), 5);
/// assert!(matches!(walked.termination, Termination::BoundaryReached { .. }));
/// ```
pub struct EdgeLoopTracer<'a, O: AdjacencyOracle + ?Sized> {
    oracle: &'a O,
    opts: EdgeLoopOpts,
}

impl<'a, O: AdjacencyOracle + ?Sized> EdgeLoopTracer<'a, O> {
    pub fn new(oracle: &'a O) -> Self {
        Self {
            oracle,
            opts: EdgeLoopOpts::default(),
        }
    }
    pub fn with_opts(mut self, opts: EdgeLoopOpts) -> Self {
        self.opts = opts;
        self
    }
    pub fn max_iterations(mut self, n: usize) -> Self {
        self.opts.max_iterations = n;
        self
    }
    pub fn break_on(mut self, attribute: impl Into<String>) -> Self {
        self.opts.break_attributes.push(attribute.into());
        self
    }
    pub fn return_closed_only(mut self, yes: bool) -> Self {
        self.opts.return_closed_only = yes;
        self
    }
    pub fn opts(&self) -> &EdgeLoopOpts {
        &self.opts
    }

    /// Runs one walk; the tracer can be reused for further seeds.
    pub fn trace(&self, a: PointId, b: PointId) -> EdgeLoop {
        trace_loop_with(self.oracle, a, b, &self.opts)
    }
}
