// src/quench/stage.rs

//! Single MD stage construction.

use std::sync::Arc;

use tracing::debug;

use crate::config::args::StageArgs;
use crate::config::defaults::StageDefaults;
use crate::dag::{StructureFlow, Task, TaskSpec};
use crate::structure::Structure;
use crate::types::StageKind;

/// Caller-side options of [`build_md_task`].
#[derive(Debug, Clone, Default)]
pub struct MdTaskOptions {
    pub name: String,
    pub priority: Option<i64>,
    /// Queue wall time hint (seconds).
    pub job_time: Option<i64>,
    /// Deep-merged on top of the MD defaults.
    pub overrides: StageArgs,
    pub parents: Vec<Arc<Task>>,
    /// Whether the execution side should insert the run into its database.
    pub insert_db: bool,
}

/// Build one MD task integrating from `start_temp` to `end_temp`.
///
/// The task is a hold stage when both temperatures are equal and a cool
/// stage otherwise. It reads its starting geometry from its parent when
/// `parents` is non-empty, else from `structure`.
pub fn build_md_task(
    structure: &Arc<Structure>,
    start_temp: f64,
    end_temp: f64,
    options: MdTaskOptions,
) -> Arc<Task> {
    let kind = if start_temp == end_temp {
        StageKind::Hold
    } else {
        StageKind::Cool
    };

    let defaults = StageDefaults::new(options.priority, options.job_time);
    let args = defaults
        .md_base(start_temp, end_temp, options.insert_db)
        .merged_with(&options.overrides);

    let flow = StructureFlow::consume(!options.parents.is_empty());

    debug!(
        task = %options.name,
        %kind,
        start_temp,
        end_temp,
        parents = options.parents.len(),
        from_parent = flow.continues_from_parent(),
        "building MD task"
    );

    Task::new(TaskSpec {
        name: options.name,
        kind,
        structure: Arc::clone(structure),
        parents: options.parents,
        flow,
        args,
    })
}
