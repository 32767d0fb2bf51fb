// src/quench/chain.rs

//! Task chain for a single structure.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::args::StageArgs;
use crate::config::defaults::StageDefaults;
use crate::dag::{StructureFlow, Task, TaskChain, TaskSpec};
use crate::quench::schedule::{AnnealStep, TemperatureSchedule};
use crate::quench::stage::{MdTaskOptions, build_md_task};
use crate::structure::Structure;
use crate::types::{QuenchType, StageKind};

/// How task names are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskNaming {
    /// `cool_<T>`, `hold_<T>`, `<descriptor>_optimize`, `<descriptor>_static`.
    #[default]
    Single,
    /// `snap_<i>_cool_<T>`, `snap_<i>_hold_<T>`, `snap_<i><descriptor>_optimize`,
    /// `snap_<i><descriptor>_static`.
    Snapshot(usize),
}

impl TaskNaming {
    pub fn md(&self, kind: StageKind, temp: f64) -> String {
        match self {
            TaskNaming::Single => format!("{kind}_{temp}"),
            TaskNaming::Snapshot(i) => format!("snap_{i}_{kind}_{temp}"),
        }
    }

    pub fn relax(&self, descriptor: &str) -> String {
        self.terminal(descriptor, "optimize")
    }

    pub fn static_eval(&self, descriptor: &str) -> String {
        self.terminal(descriptor, "static")
    }

    fn terminal(&self, descriptor: &str, suffix: &str) -> String {
        match self {
            TaskNaming::Single if descriptor.is_empty() => suffix.to_string(),
            TaskNaming::Single => format!("{descriptor}_{suffix}"),
            TaskNaming::Snapshot(i) => format!("snap_{i}{descriptor}_{suffix}"),
        }
    }
}

/// Inputs of [`build_quench_chain`] besides the structure.
#[derive(Debug, Clone, Default)]
pub struct ChainRequest {
    pub schedule: TemperatureSchedule,
    /// Overrides for every cool task.
    pub cool_args: StageArgs,
    /// Overrides for every hold task.
    pub hold_args: StageArgs,
    /// Overrides for the relax and static tasks.
    pub quench_args: StageArgs,
    /// Tasks the first stage of this chain depends on.
    pub parents: Vec<Arc<Task>>,
    pub add_static: bool,
    pub quench_type: QuenchType,
    pub priority: Option<i64>,
    pub job_time: Option<i64>,
    pub descriptor: String,
    pub naming: TaskNaming,
    /// Passed through to the MD tasks.
    pub insert_db: bool,
}

/// Build the ordered task chain for one structure.
///
/// `simulated_anneal` produces a cool/hold pair per checkpoint followed by a
/// relax (and a static when `add_static`); `mp_quench` produces only the
/// relax / static tail. Any other quench type produces no tasks.
pub fn build_quench_chain(structure: &Arc<Structure>, request: &ChainRequest) -> TaskChain {
    if !request.quench_type.is_recognised() {
        warn!(
            quench_type = %request.quench_type,
            "unrecognised quench type; no stages built"
        );
        return TaskChain::default();
    }

    let defaults = StageDefaults::new(request.priority, request.job_time);

    let mut tasks = if request.quench_type.anneals() {
        let cool_overrides = defaults
            .stage_layer(StageKind::Cool)
            .merged_with(&request.cool_args);
        let hold_overrides = defaults
            .stage_layer(StageKind::Hold)
            .merged_with(&request.hold_args);

        request
            .schedule
            .steps()
            .fold(Vec::new(), |mut acc: Vec<Arc<Task>>, step| {
                let parents = next_parents(&acc, &request.parents);
                let (cool, hold) =
                    anneal_pair(structure, request, step, parents, &cool_overrides, &hold_overrides);
                acc.push(cool);
                acc.push(hold);
                acc
            })
    } else {
        Vec::new()
    };

    if request.quench_type.relaxes() {
        let relax_args = defaults.relax_base().merged_with(&request.quench_args);

        let relax_parents = next_parents(&tasks, &request.parents);
        // External parents only order the relax; geometry comes from this chain.
        let relax = Task::new(TaskSpec {
            name: request.naming.relax(&request.descriptor),
            kind: StageKind::Relax,
            structure: Arc::clone(structure),
            flow: StructureFlow::consume_and_pass(!tasks.is_empty()),
            parents: relax_parents,
            args: relax_args.clone(),
        });
        debug!(task = %relax.name(), parents = ?relax.parent_names(), "relax task built");
        tasks.push(Arc::clone(&relax));

        if request.add_static {
            let static_task = Task::new(TaskSpec {
                name: request.naming.static_eval(&request.descriptor),
                kind: StageKind::Static,
                structure: Arc::clone(structure),
                flow: StructureFlow::consume_and_pass(true),
                parents: vec![relax],
                args: relax_args,
            });
            debug!(task = %static_task.name(), "static task built");
            tasks.push(static_task);
        }
    }

    info!(
        quench_type = %request.quench_type,
        checkpoints = request.schedule.checkpoint_count(),
        tasks = tasks.len(),
        "quench chain built"
    );

    TaskChain::new(tasks)
}

/// Parents for the next stage: the last task built so far, or the external
/// parents when nothing has been built yet.
fn next_parents(built: &[Arc<Task>], external: &[Arc<Task>]) -> Vec<Arc<Task>> {
    match built.last() {
        Some(last) => vec![Arc::clone(last)],
        None => external.to_vec(),
    }
}

fn anneal_pair(
    structure: &Arc<Structure>,
    request: &ChainRequest,
    step: AnnealStep,
    parents: Vec<Arc<Task>>,
    cool_overrides: &StageArgs,
    hold_overrides: &StageArgs,
) -> (Arc<Task>, Arc<Task>) {
    let cool = build_md_task(
        structure,
        step.cool_from,
        step.cool_to,
        MdTaskOptions {
            name: request.naming.md(StageKind::Cool, step.cool_to),
            priority: request.priority,
            job_time: request.job_time,
            overrides: cool_overrides.clone(),
            parents,
            insert_db: request.insert_db,
        },
    );

    let hold = build_md_task(
        structure,
        step.hold_at,
        step.hold_at,
        MdTaskOptions {
            name: request.naming.md(StageKind::Hold, step.hold_at),
            priority: request.priority,
            job_time: request.job_time,
            overrides: hold_overrides.clone(),
            parents: vec![Arc::clone(&cool)],
            insert_db: request.insert_db,
        },
    );

    (cool, hold)
}
