// src/dag/mod.rs

//! Task graph representation.
//!
//! - [`task`] holds the immutable task node and its structure hand-off flags.
//! - [`chain`] is the ordered task list built for one structure.
//! - [`workflow`] unions chains and indexes them as a petgraph DAG.
//! - [`document`] is the serialisable form handed to the execution side.
//! - [`sink`] defines the hand-off seam.
//! - [`fingerprint`] computes stable per-task digests.

pub mod chain;
pub mod document;
pub mod fingerprint;
pub mod sink;
pub mod task;
pub mod workflow;

pub use chain::TaskChain;
pub use document::{TaskDocument, WorkflowDocument};
pub use sink::{TomlSink, WorkflowSink};
pub use task::{StructureFlow, Task, TaskSpec};
pub use workflow::{TaskId, Workflow};
