// tests/common/mod.rs

#![allow(dead_code)]

use std::sync::Arc;

use quenchflow::config::StageArgs;
use quenchflow::dag::{StructureFlow, Task, TaskSpec};
use quenchflow::quench::{ChainRequest, TemperatureSchedule};
use quenchflow::structure::Structure;
use quenchflow::types::{QuenchType, StageKind};

/// Chain request with the given schedule and otherwise default settings.
pub fn anneal_request(start: f64, end: f64, step: f64) -> ChainRequest {
    ChainRequest {
        schedule: TemperatureSchedule::new(start, end, step),
        quench_type: QuenchType::SimulatedAnneal,
        ..ChainRequest::default()
    }
}

/// A task standing in for work that ran before the quench chain.
pub fn upstream_task(name: &str, structure: &Arc<Structure>) -> Arc<Task> {
    Task::new(TaskSpec {
        name: name.to_string(),
        kind: StageKind::Hold,
        structure: Arc::clone(structure),
        parents: Vec::new(),
        flow: StructureFlow::consume_and_pass(false),
        args: StageArgs::new(),
    })
}
