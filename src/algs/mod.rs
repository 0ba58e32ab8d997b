//! Re-export public algorithms.

pub mod edge_loop;

pub use edge_loop::{
    EdgeLoop, EdgeLoopOpts, EdgeLoopTracer, FailureReason, Termination, trace_loop,
    trace_loop_with,
};
