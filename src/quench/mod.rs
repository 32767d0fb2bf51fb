// src/quench/mod.rs

//! Quench workflow construction.
//!
//! Control flow, outermost first:
//! - [`batch`] builds one chain per input structure and unions them
//! - [`chain`] builds the cool/hold/relax/static chain of one structure
//! - [`stage`] builds a single MD task
//! - [`schedule`] yields the temperature checkpoints the chain walks

pub mod batch;
pub mod chain;
pub mod schedule;
pub mod stage;

pub use batch::{WorkflowRequest, build_quench_workflow, workflow_name};
pub use chain::{ChainRequest, TaskNaming, build_quench_chain};
pub use schedule::{AnnealStep, TemperatureSchedule};
pub use stage::{MdTaskOptions, build_md_task};
