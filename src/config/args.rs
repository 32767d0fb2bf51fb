// src/config/args.rs

use serde::{Deserialize, Serialize};
use toml::{Table, Value};

use crate::config::merge::deep_merge;

/// Numeric / solver parameters (temperatures, step counts).
pub const MD_PARAMS: &str = "md_params";
/// Execution-backend parameters (commands, db file, wall time).
pub const RUN_SPECS: &str = "run_specs";
/// Optional annotations (priority, queue settings, INCAR overrides).
pub const OPTIONAL_FW_PARAMS: &str = "optional_fw_params";

/// Per-stage configuration bundle.
///
/// A plain TOML table whose top-level sections are usually [`MD_PARAMS`],
/// [`RUN_SPECS`] and [`OPTIONAL_FW_PARAMS`]. Nothing here is validated: a
/// malformed value is carried through to whoever executes the task.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageArgs(Table);

impl StageArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_table(table: Table) -> Self {
        Self(table)
    }

    pub fn as_table(&self) -> &Table {
        &self.0
    }

    pub fn into_table(self) -> Table {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// New bundle with `overrides` deep-merged on top of `self`.
    pub fn merged_with(&self, overrides: &StageArgs) -> StageArgs {
        StageArgs(deep_merge(&self.0, &overrides.0))
    }

    pub fn section(&self, name: &str) -> Option<&Table> {
        self.0.get(name).and_then(Value::as_table)
    }

    /// Look up a nested value, e.g. `["md_params", "nsteps"]`.
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        let (last, parents) = path.split_last()?;
        let mut table = &self.0;
        for key in parents {
            table = table.get(*key)?.as_table()?;
        }
        table.get(*last)
    }

    /// Insert a nested value, creating intermediate tables. A non-table value
    /// in the way is replaced by a table.
    pub fn set_path(&mut self, path: &[&str], value: impl Into<Value>) {
        let Some((last, parents)) = path.split_last() else {
            return;
        };
        let mut table = &mut self.0;
        for key in parents {
            let entry = table
                .entry(key.to_string())
                .or_insert(Value::Table(Table::new()));
            if !entry.is_table() {
                *entry = Value::Table(Table::new());
            }
            let Value::Table(inner) = entry else {
                return;
            };
            table = inner;
        }
        table.insert(last.to_string(), value.into());
    }

    /// Builder-style [`set_path`](Self::set_path).
    pub fn with(mut self, path: &[&str], value: impl Into<Value>) -> Self {
        self.set_path(path, value);
        self
    }
}

impl From<Table> for StageArgs {
    fn from(table: Table) -> Self {
        StageArgs(table)
    }
}
