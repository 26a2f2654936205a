//! Parallel and deadline-bound execution of independent invocations

pub mod batch;

pub use self::batch::{run_with_deadline, BatchExecutor};
