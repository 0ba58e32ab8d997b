//! `PointId` and `FaceId`: strong, zero-cost handles for mesh entities
//!
//! Points and faces are addressed by dense, 0-based `u32` indices, the way a
//! host mesh numbers its point and primitive arrays. Wrapping them in
//! distinct newtypes keeps the two index spaces from being mixed up in the
//! adjacency queries.
//!
//! This module provides:
//! - `repr(transparent)` newtypes with the same layout as `u32`.
//! - Constructors, accessors and a checked conversion from `usize`.
//! - `Debug`/`Display`, ordering, hashing and serde so ids can be used in
//!   maps, sets, logs and JSON.

use std::fmt;

use crate::mesh_error::MeshError;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $what:literal) => {
        $(#[$meta])*
        #[derive(
            Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Wraps a raw index.
            #[inline]
            pub const fn new(raw: u32) -> Self {
                $name(raw)
            }

            /// Returns the raw `u32` index.
            #[inline]
            pub const fn get(self) -> u32 {
                self.0
            }

            /// Returns the index as `usize`, for slicing dense arrays.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = MeshError;

            fn try_from(raw: usize) -> Result<Self, Self::Error> {
                u32::try_from(raw)
                    .map($name)
                    .map_err(|_| MeshError::IdOverflow($what))
            }
        }

        impl From<u32> for $name {
            #[inline]
            fn from(raw: u32) -> Self {
                $name(raw)
            }
        }

        /// Displays as `Name(raw)`.
        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }

        /// Prints only the raw integer.
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Index of a point (vertex) in the mesh's point array.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use mesh_edgeloop::topology::point::PointId;
    /// let p = PointId::new(3);
    /// assert_eq!(p.get(), 3);
    /// assert_eq!(p.index(), 3usize);
    /// ```
    PointId,
    "point ids"
);

define_id!(
    /// Index of a face (polygon primitive) in the mesh's face array.
    FaceId,
    "face ids"
);

// -----------------------------------------------------------------------------
// Testing and assertions
// -----------------------------------------------------------------------------


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_and_get() {
        let p = PointId::new(42);
        assert_eq!(p.get(), 42);
        assert_eq!(p.index(), 42);
    }

    #[test]
    fn zero_is_a_valid_index() {
        assert_eq!(PointId::new(0).get(), 0);
        assert_eq!(FaceId::from(0u32).index(), 0);
    }

    #[test]
    fn debug_and_display() {
        let p = PointId::new(7);
        assert_eq!(format!("{:?}", p), "PointId(7)");
        assert_eq!(format!("{}", p), "7");
        assert_eq!(format!("{:?}", FaceId::new(2)), "FaceId(2)");
    }

    #[test]
    fn try_from_usize_overflows() {
        assert_eq!(PointId::try_from(5usize), Ok(PointId::new(5)));
        #[cfg(target_pointer_width = "64")]
        assert_eq!(
            FaceId::try_from(u32::MAX as usize + 1),
            Err(MeshError::IdOverflow("face ids"))
        );
    }

    #[test]
    fn ordering_and_hash() {
        let a = PointId::new(1);
        let b = PointId::new(2);
        assert!(a < b);
        use std::collections::HashSet;
        let set: HashSet<_> = [a, b, a].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}

#[cfg(test)]
mod serde_tests {
    use super::*;

    #[test]
    fn json_is_a_bare_integer() {
        let p = PointId::new(123);
        let s = serde_json::to_string(&p).unwrap();
        assert_eq!(s, "123");
        let p2: PointId = serde_json::from_str(&s).unwrap();
        assert_eq!(p2, p);
    }
}
