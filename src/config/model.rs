// src/config/model.rs

use std::sync::Arc;

use serde::Deserialize;

use crate::config::args::StageArgs;
use crate::quench::{TemperatureSchedule, WorkflowRequest};
use crate::structure::Structure;
use crate::types::QuenchType;

/// Quench request as read from a TOML file.
///
/// ```toml
/// [workflow]
/// quench_type = "simulated_anneal"
/// descriptor = "_glass"
/// priority = 10
///
/// [workflow.schedule]
/// start_temp = 3000.0
/// end_temp = 500.0
/// temp_step = 500.0
///
/// [cool_args.md_params]
/// nsteps = 100
///
/// [[structure]]
/// lattice = [[4.0, 0.0, 0.0], [0.0, 4.0, 0.0], [0.0, 0.0, 4.0]]
/// species = ["Mg", "O"]
/// coords = [[0.0, 0.0, 0.0], [0.5, 0.5, 0.5]]
/// ```
///
/// Every section except `[[structure]]` is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRequestFile {
    #[serde(default)]
    pub workflow: WorkflowSection,

    /// Overrides applied to every cool task.
    #[serde(default)]
    pub cool_args: StageArgs,

    /// Overrides applied to every hold task.
    #[serde(default)]
    pub hold_args: StageArgs,

    /// Overrides applied to relax and static tasks.
    #[serde(default)]
    pub quench_args: StageArgs,

    /// Input structures, in batch order.
    #[serde(default)]
    pub structure: Vec<RawStructure>,
}

/// `[workflow]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowSection {
    #[serde(default)]
    pub quench_type: QuenchType,

    /// Appended to task and workflow names.
    #[serde(default)]
    pub descriptor: String,

    #[serde(default)]
    pub priority: Option<i64>,

    /// Queue wall time hint (seconds) for MD tasks.
    #[serde(default)]
    pub job_time: Option<i64>,

    #[serde(default = "default_add_static")]
    pub add_static: bool,

    #[serde(default)]
    pub schedule: TemperatureSchedule,
}

fn default_add_static() -> bool {
    true
}

impl Default for WorkflowSection {
    fn default() -> Self {
        Self {
            quench_type: QuenchType::default(),
            descriptor: String::new(),
            priority: None,
            job_time: None,
            add_static: default_add_static(),
            schedule: TemperatureSchedule::default(),
        }
    }
}

/// `[[structure]]` entry before shape checks.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStructure {
    /// Three lattice vectors (rows), Angstrom.
    pub lattice: Vec<Vec<f64>>,
    /// One element symbol per site.
    pub species: Vec<String>,
    /// Fractional coordinates, one triple per site.
    pub coords: Vec<Vec<f64>>,
}

/// Validated request. Built from [`RawRequestFile`] via `TryFrom`.
#[derive(Debug, Clone)]
pub struct RequestFile {
    pub workflow: WorkflowSection,
    pub cool_args: StageArgs,
    pub hold_args: StageArgs,
    pub quench_args: StageArgs,
    pub structures: Vec<Arc<Structure>>,
}

impl RequestFile {
    /// Construct a `RequestFile` without validation.
    ///
    /// Prefer `RequestFile::try_from(raw)`.
    pub(crate) fn new_unchecked(
        workflow: WorkflowSection,
        cool_args: StageArgs,
        hold_args: StageArgs,
        quench_args: StageArgs,
        structures: Vec<Arc<Structure>>,
    ) -> Self {
        Self {
            workflow,
            cool_args,
            hold_args,
            quench_args,
            structures,
        }
    }

    pub fn workflow_request(&self) -> WorkflowRequest {
        WorkflowRequest {
            schedule: self.workflow.schedule,
            priority: self.workflow.priority,
            job_time: self.workflow.job_time,
            quench_type: self.workflow.quench_type.clone(),
            cool_args: self.cool_args.clone(),
            hold_args: self.hold_args.clone(),
            quench_args: self.quench_args.clone(),
            descriptor: self.workflow.descriptor.clone(),
            add_static: self.workflow.add_static,
        }
    }
}
