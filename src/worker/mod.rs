//! Worker pool backing the asynchronous commit variants.
//!
//! `commit_async` never spawns ad hoc threads; it submits the whole
//! synchronous commit as one job to a [`CommitPool`] owned by the bus or
//! coordinator, and hands back a join handle.

mod pool;

pub use pool::{CommitPool, TaskHandle};
