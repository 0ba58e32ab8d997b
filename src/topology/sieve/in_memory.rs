//! In-memory implementation of the [`Sieve`] trait.
//!
//! [`InMemorySieve`] keeps both directions of every arrow in hash maps of
//! vectors, so `cone` and `support` replay arrows in insertion order.

use super::sieve_trait::Sieve;
use crate::mesh_error::MeshError;
use std::collections::HashMap;

/// An in-memory sieve using hash maps for adjacency storage.
///
/// # Type Parameters
/// - `P`: node type.
/// - `T`: arrow payload. Defaults to `()`.
#[derive(Clone, Debug)]
pub struct InMemorySieve<P, T = ()>
where
    P: Ord + std::fmt::Debug,
{
    /// Outgoing adjacency: each point to its `(destination, payload)` pairs.
    pub adjacency_out: HashMap<P, Vec<(P, T)>>,
    /// Incoming adjacency: each point to its `(source, payload)` pairs.
    pub adjacency_in: HashMap<P, Vec<(P, T)>>,
}

impl<P: Copy + Eq + std::hash::Hash + Ord + std::fmt::Debug, T> Default for InMemorySieve<P, T> {
    fn default() -> Self {
        Self {
            adjacency_out: HashMap::new(),
            adjacency_in: HashMap::new(),
        }
    }
}

impl<P: Copy + Eq + std::hash::Hash + Ord + std::fmt::Debug, T: Clone> InMemorySieve<P, T> {
    /// Creates a new, empty `InMemorySieve`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs an `InMemorySieve` from an iterator of arrows.
    ///
    /// # Example
    /// ```rust
    /// use mesh_edgeloop::topology::sieve::{InMemorySieve, Sieve};
    /// let sieve = InMemorySieve::from_arrows(vec![(1u32, 2u32, 'a'), (1, 3, 'b')]);
    /// assert_eq!(sieve.cone(1).count(), 2);
    /// ```
    pub fn from_arrows<I: IntoIterator<Item = (P, P, T)>>(arrows: I) -> Self {
        let mut sieve = Self::default();
        for (src, dst, payload) in arrows {
            sieve.add_arrow(src, dst, payload);
        }
        sieve
    }

    #[inline]
    pub fn has_arrow(&self, src: P, dst: P) -> bool {
        self.adjacency_out
            .get(&src)
            .is_some_and(|v| v.iter().any(|(d, _)| *d == dst))
    }

    /// Checks that every outgoing arrow has its incoming mirror and back.
    ///
    /// Returns the first offending `(src, dst)` pair.
    pub fn check_mirrors(&self) -> Result<(), (P, P)> {
        for (src, outs) in &self.adjacency_out {
            for (dst, _) in outs {
                let ok = self
                    .adjacency_in
                    .get(dst)
                    .is_some_and(|ins| ins.iter().any(|(s, _)| s == src));
                if !ok {
                    return Err((*src, *dst));
                }
            }
        }
        for (dst, ins) in &self.adjacency_in {
            for (src, _) in ins {
                if !self.has_arrow(*src, *dst) {
                    return Err((*src, *dst));
                }
            }
        }
        Ok(())
    }

    /// Like [`check_mirrors`](Self::check_mirrors), mapping a mismatch into a
    /// [`MeshError`] through `f`.
    pub fn validate_mirrors(&self, f: impl FnOnce(P, P) -> MeshError) -> Result<(), MeshError> {
        self.check_mirrors().map_err(|(src, dst)| f(src, dst))
    }
}

type RefMapIter<'a, P, T> =
    std::iter::Map<std::slice::Iter<'a, (P, T)>, fn(&'a (P, T)) -> (P, &'a T)>;

fn by_ref<P: Copy, T>((p, pay): &(P, T)) -> (P, &T) {
    (*p, pay)
}

impl<P: Copy + Eq + std::hash::Hash + Ord + std::fmt::Debug, T: Clone> Sieve
    for InMemorySieve<P, T>
{
    type Point = P;
    type Payload = T;
    type ConeIter<'a>
        = RefMapIter<'a, P, T>
    where
        Self: 'a;
    type SupportIter<'a>
        = RefMapIter<'a, P, T>
    where
        Self: 'a;

    /// Returns the arrows leaving `p`, in insertion order.
    ///
    /// # Example
    /// ```rust
    /// use mesh_edgeloop::topology::sieve::{InMemorySieve, Sieve};
    /// let mut s = InMemorySieve::<u32, ()>::new();
    /// s.add_arrow(1, 3, ());
    /// s.add_arrow(1, 2, ());
    /// let cone: Vec<_> = s.cone_points(1).collect();
    /// assert_eq!(cone, vec![3, 2]);
    /// ```
    fn cone<'a>(&'a self, p: P) -> Self::ConeIter<'a> {
        let f: fn(&'a (P, T)) -> (P, &'a T) = by_ref::<P, T>;
        self.adjacency_out
            .get(&p)
            .map(|v| v.iter().map(f))
            .unwrap_or_else(|| [].iter().map(f))
    }

    /// Returns the arrows arriving at `p`, in insertion order.
    fn support<'a>(&'a self, p: P) -> Self::SupportIter<'a> {
        let f: fn(&'a (P, T)) -> (P, &'a T) = by_ref::<P, T>;
        self.adjacency_in
            .get(&p)
            .map(|v| v.iter().map(f))
            .unwrap_or_else(|| [].iter().map(f))
    }

    /// Adds the arrow `src → dst`, upserting the payload on both mirrors.
    ///
    /// # Example
    /// ```rust
    /// use mesh_edgeloop::topology::sieve::{InMemorySieve, Sieve};
    /// let mut s = InMemorySieve::<u32, char>::new();
    /// s.add_arrow(1, 2, 'a');
    /// s.add_arrow(1, 2, 'b');
    /// assert_eq!(s.cone(1).collect::<Vec<_>>(), vec![(2, &'b')]);
    /// ```
    fn add_arrow(&mut self, src: P, dst: P, payload: T) {
        let outs = self.adjacency_out.entry(src).or_default();
        if let Some(slot) = outs.iter_mut().find(|(d, _)| *d == dst) {
            slot.1 = payload.clone();
        } else {
            outs.push((dst, payload.clone()));
        }

        let ins = self.adjacency_in.entry(dst).or_default();
        if let Some(slot) = ins.iter_mut().find(|(s, _)| *s == src) {
            slot.1 = payload;
        } else {
            ins.push((src, payload));
        }

        debug_assert!(
            self.adjacency_in
                .get(&dst)
                .is_some_and(|ins| ins.iter().filter(|(s, _)| *s == src).count() == 1),
            "mirror broken after inserting ({src:?} -> {dst:?})"
        );
    }

    fn base_points<'a>(&'a self) -> Box<dyn Iterator<Item = P> + 'a> {
        Box::new(
            self.adjacency_out
                .iter()
                .filter(|(_, v)| !v.is_empty())
                .map(|(p, _)| *p),
        )
    }

    fn cap_points<'a>(&'a self) -> Box<dyn Iterator<Item = P> + 'a> {
        Box::new(
            self.adjacency_in
                .iter()
                .filter(|(_, v)| !v.is_empty())
                .map(|(p, _)| *p),
        )
    }
}
