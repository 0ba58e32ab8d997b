//! Named numeric point attributes.
//!
//! Attributes map `PointId → f64`, grouped by attribute name. They carry the
//! per-point flags a host uses to fence edge loops (seams, pinned points,
//! selection masks). A point "has" an attribute when a value is stored for
//! it and that value is strictly positive.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::topology::point::PointId;

/// Named point attributes.
#[derive(Clone, Debug, Default)]
pub struct PointAttributes {
    attributes: HashMap<String, HashMap<PointId, f64>>,
}

impl PointAttributes {
    /// Creates an empty attribute store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` for `point` under `name`.
    ///
    /// Returns the previous value, if any.
    pub fn set(&mut self, point: PointId, name: &str, value: f64) -> Option<f64> {
        self.attributes
            .entry(name.to_string())
            .or_default()
            .insert(point, value)
    }

    /// Sets `name = 1.0` on every point yielded by `points`.
    pub fn flag<I>(&mut self, name: &str, points: I)
    where
        I: IntoIterator<Item = PointId>,
    {
        let map = self.attributes.entry(name.to_string()).or_default();
        for point in points {
            map.insert(point, 1.0);
        }
    }

    /// Returns the stored value of `name` on `point`.
    pub fn get(&self, point: PointId, name: &str) -> Option<f64> {
        self.attributes
            .get(name)
            .and_then(|map| map.get(&point).copied())
    }

    /// True iff `name` is stored on `point` with a value `> 0`.
    ///
    /// Missing attributes, missing points, zero, negative and NaN values are
    /// all false.
    pub fn is_set(&self, point: PointId, name: &str) -> bool {
        self.get(point, name).is_some_and(|value| value > 0.0)
    }

    /// Points for which `name` is set, in ascending order.
    pub fn points_with(&self, name: &str) -> Vec<PointId> {
        let mut points: Vec<_> = self
            .attributes
            .get(name)
            .into_iter()
            .flat_map(|map| {
                map.iter()
                    .filter_map(|(&point, &value)| (value > 0.0).then_some(point))
            })
            .collect();
        points.sort_unstable();
        points
    }

    /// Attribute names, sorted.
    pub fn names(&self) -> BTreeSet<&str> {
        self.attributes.keys().map(String::as_str).collect()
    }

    /// Removes attribute `name` entirely. Returns how many values it held.
    pub fn remove(&mut self, name: &str) -> usize {
        self.attributes.remove(name).map_or(0, |map| map.len())
    }

    /// Remove every value stored on the provided points.
    pub fn clear_points<I>(&mut self, points: I)
    where
        I: IntoIterator<Item = PointId>,
    {
        let targets: HashSet<PointId> = points.into_iter().collect();
        if targets.is_empty() {
            return;
        }
        self.attributes.retain(|_, map| {
            map.retain(|point, _| !targets.contains(point));
            !map.is_empty()
        });
    }

    /// Returns true when no values are stored.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Iterate over all values as `(name, point, value)`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, PointId, f64)> + '_ {
        self.attributes.iter().flat_map(|(name, map)| {
            map.iter()
                .map(move |(&point, &value)| (name.as_str(), point, value))
        })
    }
}
