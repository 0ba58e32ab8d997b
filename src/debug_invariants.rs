//! Structural self-checks for the in-memory oracles.

use crate::mesh_error::MeshError;

/// Types that can verify their own structural invariants.
pub trait DebugInvariants {
    /// Validate invariants and return the first violation found.
    fn validate_invariants(&self) -> Result<(), MeshError>;

    /// Panic on a violation in debug builds or with `check-invariants`;
    /// a no-op otherwise.
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "structure check failed");
    }
}

/// Run a fallible check and panic on error when invariant checking is
/// enabled (debug builds, or the `check-invariants` feature).
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
