// src/dag/document.rs

//! Serialisable form of a built workflow.
//!
//! ```toml
//! name = "SiO2_quench"
//!
//! [[task]]
//! id = 0
//! name = "snap_0_cool_2500"
//! kind = "cool"
//! chain = 0
//! parents = []
//! external_parents = []
//! structure_source = "input"
//! pass_structure = false
//! formula = "SiO2"
//! fingerprint = "…"
//!
//! [task.config.md_params]
//! start_temp = 3000.0
//! end_temp = 2500.0
//! nsteps = 200
//! ```

use serde::{Deserialize, Serialize};
use toml::Table;

use crate::types::{StageKind, StructureSource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDocument {
    pub name: String,
    #[serde(default)]
    pub task: Vec<TaskDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDocument {
    pub id: usize,
    pub name: String,
    pub kind: StageKind,
    /// Index of the chain (input structure) this task belongs to.
    pub chain: usize,
    /// Ids of parent tasks.
    #[serde(default)]
    pub parents: Vec<usize>,
    /// Names of parents that are not part of this workflow.
    #[serde(default)]
    pub external_parents: Vec<String>,
    pub structure_source: StructureSource,
    pub pass_structure: bool,
    pub formula: String,
    pub fingerprint: String,
    /// Fully merged stage configuration.
    #[serde(default)]
    pub config: Table,
}
