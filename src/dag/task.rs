// src/dag/task.rs

//! Task nodes.
//!
//! A [`Task`] is immutable once built. Its parents are `Arc`s to tasks that
//! already exist, so a task can only ever point backwards and the resulting
//! graph is acyclic by construction.

use std::fmt;
use std::sync::Arc;

use toml::Value;

use crate::config::args::{MD_PARAMS, OPTIONAL_FW_PARAMS, StageArgs};
use crate::dag::fingerprint;
use crate::structure::Structure;
use crate::types::{StageKind, StructureSource};

/// Structure hand-off between a task and its parent / children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StructureFlow {
    /// Where this task reads its starting geometry from.
    pub source: StructureSource,
    /// Whether this task publishes its output structure for its children.
    pub pass_forward: bool,
}

impl StructureFlow {
    /// Read from the parent when there is one, publish nothing.
    pub fn consume(has_parent: bool) -> Self {
        Self {
            source: source_for(has_parent),
            pass_forward: false,
        }
    }

    /// Read from the parent when there is one, and publish the result.
    pub fn consume_and_pass(has_parent: bool) -> Self {
        Self {
            source: source_for(has_parent),
            pass_forward: true,
        }
    }

    pub fn continues_from_parent(&self) -> bool {
        self.source == StructureSource::Parent
    }
}

fn source_for(has_parent: bool) -> StructureSource {
    if has_parent {
        StructureSource::Parent
    } else {
        StructureSource::Input
    }
}

/// Everything needed to construct a [`Task`].
#[derive(Debug, Clone)]
pub struct TaskSpec {
    pub name: String,
    pub kind: StageKind,
    pub structure: Arc<Structure>,
    pub parents: Vec<Arc<Task>>,
    pub flow: StructureFlow,
    pub args: StageArgs,
}

pub struct Task {
    name: String,
    kind: StageKind,
    structure: Arc<Structure>,
    parents: Vec<Arc<Task>>,
    flow: StructureFlow,
    args: StageArgs,
    fingerprint: String,
}

impl Task {
    pub fn new(spec: TaskSpec) -> Arc<Task> {
        let fingerprint = fingerprint::task_fingerprint(&spec.name, spec.kind, &spec.flow, &spec.args);
        Arc::new(Task {
            name: spec.name,
            kind: spec.kind,
            structure: spec.structure,
            parents: spec.parents,
            flow: spec.flow,
            args: spec.args,
            fingerprint,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> StageKind {
        self.kind
    }

    /// The structure originally supplied to the builder.
    pub fn structure(&self) -> &Arc<Structure> {
        &self.structure
    }

    pub fn parents(&self) -> &[Arc<Task>] {
        &self.parents
    }

    pub fn parent_names(&self) -> Vec<&str> {
        self.parents.iter().map(|p| p.name()).collect()
    }

    pub fn flow(&self) -> StructureFlow {
        self.flow
    }

    pub fn structure_source(&self) -> StructureSource {
        self.flow.source
    }

    pub fn passes_structure(&self) -> bool {
        self.flow.pass_forward
    }

    /// Fully merged configuration bundle.
    pub fn args(&self) -> &StageArgs {
        &self.args
    }

    /// blake3 digest of name, kind, structure flow and configuration.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn md_start_temp(&self) -> Option<f64> {
        self.md_float("start_temp")
    }

    pub fn md_end_temp(&self) -> Option<f64> {
        self.md_float("end_temp")
    }

    /// Number of MD integration steps (not temperature steps).
    pub fn nsteps(&self) -> Option<i64> {
        self.args
            .get_path(&[MD_PARAMS, "nsteps"])
            .and_then(Value::as_integer)
    }

    /// Force threshold for relax tasks; `None` means no cutoff.
    pub fn max_force_threshold(&self) -> Option<f64> {
        self.args
            .get_path(&[OPTIONAL_FW_PARAMS, "max_force_threshold"])
            .and_then(as_number)
    }

    /// Whether `self` and `other` are the same node (not merely equal).
    pub fn same_node(&self, other: &Task) -> bool {
        std::ptr::eq(self, other)
    }

    fn md_float(&self, key: &str) -> Option<f64> {
        self.args.get_path(&[MD_PARAMS, key]).and_then(as_number)
    }
}

fn as_number(value: &Value) -> Option<f64> {
    value
        .as_float()
        .or_else(|| value.as_integer().map(|i| i as f64))
}

// Parents are printed by name; the full ancestry would repeat every upstream task.
impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("parents", &self.parent_names())
            .field("flow", &self.flow)
            .field("fingerprint", &self.fingerprint)
            .finish()
    }
}
