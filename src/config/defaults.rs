// src/config/defaults.rs

//! Default stage configurations.
//!
//! Every builder asks [`StageDefaults`] for its starting configuration, so the
//! single-structure and batch paths always agree. Each call returns a fresh
//! [`StageArgs`]; callers merge their overrides on top of it.

use crate::config::args::{MD_PARAMS, OPTIONAL_FW_PARAMS, RUN_SPECS, StageArgs};
use crate::types::StageKind;

/// Placeholder resolved by the execution side to the VASP command.
pub const VASP_CMD_PLACEHOLDER: &str = ">>vasp_cmd<<";
/// Placeholder resolved by the execution side to the database file.
pub const DB_FILE_PLACEHOLDER: &str = ">>db_file<<";

pub const DEFAULT_MD_NSTEPS: i64 = 500;
pub const DEFAULT_COOL_NSTEPS: i64 = 200;
pub const DEFAULT_HOLD_NSTEPS: i64 = 500;
/// Backend wall time (seconds) for MD tasks.
pub const DEFAULT_MD_WALL_TIME: i64 = 40_000;

/// Per-call annotations that end up inside the default bundles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StageDefaults {
    pub priority: Option<i64>,
    /// Queue wall time hint (seconds) for MD tasks.
    pub job_time: Option<i64>,
}

impl StageDefaults {
    pub fn new(priority: Option<i64>, job_time: Option<i64>) -> Self {
        Self { priority, job_time }
    }

    /// Base bundle shared by every MD task (cool or hold).
    ///
    /// Fixed cell volume (`ISIF = 1`), no WAVECAR (`LWAVE = false`), no copy of
    /// previous run outputs.
    pub fn md_base(&self, start_temp: f64, end_temp: f64, insert_db: bool) -> StageArgs {
        let mut args = StageArgs::new()
            .with(&[MD_PARAMS, "start_temp"], start_temp)
            .with(&[MD_PARAMS, "end_temp"], end_temp)
            .with(&[MD_PARAMS, "nsteps"], DEFAULT_MD_NSTEPS)
            .with(&[RUN_SPECS, "vasp_cmd"], VASP_CMD_PLACEHOLDER)
            .with(&[RUN_SPECS, "db_file"], DB_FILE_PLACEHOLDER)
            .with(&[RUN_SPECS, "wall_time"], DEFAULT_MD_WALL_TIME)
            .with(
                &[
                    OPTIONAL_FW_PARAMS,
                    "override_default_vasp_params",
                    "user_incar_settings",
                    "ISIF",
                ],
                1,
            )
            .with(
                &[
                    OPTIONAL_FW_PARAMS,
                    "override_default_vasp_params",
                    "user_incar_settings",
                    "LWAVE",
                ],
                false,
            )
            .with(&[OPTIONAL_FW_PARAMS, "copy_vasp_outputs"], false)
            .with(&[OPTIONAL_FW_PARAMS, "insert_db"], insert_db);

        if let Some(job_time) = self.job_time {
            args.set_path(&[OPTIONAL_FW_PARAMS, "spec", "_queueadapter", "walltime"], job_time);
        }
        if let Some(priority) = self.priority {
            args.set_path(&[OPTIONAL_FW_PARAMS, "spec", "_priority"], priority);
        }
        args
    }

    /// Stage-kind layer applied between the base bundle and user overrides.
    pub fn stage_layer(&self, kind: StageKind) -> StageArgs {
        match kind {
            StageKind::Cool => StageArgs::new().with(&[MD_PARAMS, "nsteps"], DEFAULT_COOL_NSTEPS),
            StageKind::Hold => StageArgs::new().with(&[MD_PARAMS, "nsteps"], DEFAULT_HOLD_NSTEPS),
            StageKind::Relax | StageKind::Static => StageArgs::new(),
        }
    }

    /// Bundle for relax and static tasks. No force threshold is set, so the
    /// relaxation runs without a force cutoff unless overridden.
    pub fn relax_base(&self) -> StageArgs {
        let mut args = StageArgs::new()
            .with(&[RUN_SPECS, "vasp_cmd"], VASP_CMD_PLACEHOLDER)
            .with(&[RUN_SPECS, "db_file"], DB_FILE_PLACEHOLDER)
            .with(
                &[OPTIONAL_FW_PARAMS, "override_default_vasp_params"],
                toml::Value::Table(toml::Table::new()),
            );
        if let Some(priority) = self.priority {
            args.set_path(&[RUN_SPECS, "spec", "_priority"], priority);
        }
        args
    }
}
