// src/quench/batch.rs

//! Workflow spanning several input structures.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::args::StageArgs;
use crate::dag::Workflow;
use crate::quench::chain::{ChainRequest, TaskNaming, build_quench_chain};
use crate::quench::schedule::TemperatureSchedule;
use crate::structure::Structure;
use crate::types::QuenchType;

/// Inputs of [`build_quench_workflow`] besides the structures.
#[derive(Debug, Clone)]
pub struct WorkflowRequest {
    pub schedule: TemperatureSchedule,
    pub priority: Option<i64>,
    pub job_time: Option<i64>,
    pub quench_type: QuenchType,
    pub cool_args: StageArgs,
    pub hold_args: StageArgs,
    pub quench_args: StageArgs,
    pub descriptor: String,
    /// Append a static evaluation after each relax. Defaults to `true`.
    pub add_static: bool,
}

impl Default for WorkflowRequest {
    fn default() -> Self {
        Self {
            schedule: TemperatureSchedule::default(),
            priority: None,
            job_time: None,
            quench_type: QuenchType::default(),
            cool_args: StageArgs::default(),
            hold_args: StageArgs::default(),
            quench_args: StageArgs::default(),
            descriptor: String::new(),
            add_static: true,
        }
    }
}

impl WorkflowRequest {
    /// Chain request for the structure at `index`.
    pub fn chain_request(&self, index: usize) -> ChainRequest {
        ChainRequest {
            schedule: self.schedule,
            cool_args: self.cool_args.clone(),
            hold_args: self.hold_args.clone(),
            quench_args: self.quench_args.clone(),
            parents: Vec::new(),
            add_static: self.add_static,
            quench_type: self.quench_type.clone(),
            priority: self.priority,
            job_time: self.job_time,
            descriptor: self.descriptor.clone(),
            naming: TaskNaming::Snapshot(index),
            insert_db: true,
        }
    }
}

/// Build one independent chain per structure and union them.
///
/// The workflow is named after the reduced formula of the last structure.
pub fn build_quench_workflow(structures: &[Arc<Structure>], request: &WorkflowRequest) -> Workflow {
    let chains: Vec<_> = structures
        .iter()
        .enumerate()
        .map(|(i, structure)| {
            debug!(structure = i, formula = %structure.reduced_formula(), "building chain");
            build_quench_chain(structure, &request.chain_request(i))
        })
        .collect();

    let name = workflow_name(structures.last().map(|s| s.as_ref()), &request.descriptor);
    let workflow = Workflow::new(name, chains);

    info!(
        workflow = %workflow.name(),
        structures = structures.len(),
        tasks = workflow.len(),
        "quench workflow built"
    );
    workflow
}

/// `<formula><descriptor>_quench`; the formula is empty without a structure.
pub fn workflow_name(last: Option<&Structure>, descriptor: &str) -> String {
    let formula = last.map(Structure::reduced_formula).unwrap_or_default();
    format!("{formula}{descriptor}_quench")
}
