//! Core trait for incidence storage.
//!
//! A [`Sieve`] is a directed incidence relation with cheap access in both
//! directions: `cone(p)` lists the arrows leaving `p`, `support(q)` the arrows
//! arriving at `q`. The mesh stores `face → corner` arrows, so the cone of a
//! face is its corner ring and the support of a point is its face star.

/// Bidirectional incidence API.
///
/// # Associated Types
/// - `Point`: node type (must be `Copy`, `Eq`, `Hash` and `Ord`).
/// - `Payload`: data carried by each arrow.
/// - `ConeIter` / `SupportIter`: borrowing iterators over `(node, &payload)`.
///
/// Iteration order of `cone` and `support` is part of the contract for
/// implementations in this crate: arrows come back in insertion order.
pub trait Sieve {
    type Point: Copy + Eq + std::hash::Hash + Ord + std::fmt::Debug;
    type Payload;

    type ConeIter<'a>: Iterator<Item = (Self::Point, &'a Self::Payload)>
    where
        Self: 'a;
    type SupportIter<'a>: Iterator<Item = (Self::Point, &'a Self::Payload)>
    where
        Self: 'a;

    /// Outgoing arrows from `p`.
    fn cone<'a>(&'a self, p: Self::Point) -> Self::ConeIter<'a>;
    /// Incoming arrows to `p`.
    fn support<'a>(&'a self, p: Self::Point) -> Self::SupportIter<'a>;

    /// Insert arrow `src → dst`, replacing the payload if the arrow exists.
    fn add_arrow(&mut self, src: Self::Point, dst: Self::Point, payload: Self::Payload);

    /// All points with at least one outgoing arrow.
    fn base_points<'a>(&'a self) -> Box<dyn Iterator<Item = Self::Point> + 'a>;
    /// All points with at least one incoming arrow.
    fn cap_points<'a>(&'a self) -> Box<dyn Iterator<Item = Self::Point> + 'a>;

    /// Destinations of the cone of `p`, payloads dropped.
    fn cone_points<'a>(&'a self, p: Self::Point) -> impl Iterator<Item = Self::Point> + 'a {
        self.cone(p).map(|(q, _)| q)
    }

    /// Sources of the support of `p`, payloads dropped.
    fn support_points<'a>(&'a self, p: Self::Point) -> impl Iterator<Item = Self::Point> + 'a {
        self.support(p).map(|(q, _)| q)
    }

    /// Number of outgoing arrows of `p`.
    fn out_degree(&self, p: Self::Point) -> usize {
        self.cone(p).count()
    }

    /// Number of incoming arrows of `p`.
    fn in_degree(&self, p: Self::Point) -> usize {
        self.support(p).count()
    }
}
