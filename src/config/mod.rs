// src/config/mod.rs

//! Configuration for quenchflow.
//!
//! Responsibilities:
//! - Stage configuration bundles and their deep merge (`args.rs`, `merge.rs`).
//! - The single source of stage defaults (`defaults.rs`).
//! - The TOML request file model (`model.rs`), its loader (`loader.rs`) and
//!   validation (`validate.rs`).

pub mod args;
pub mod defaults;
pub mod loader;
pub mod merge;
pub mod model;
pub mod validate;

pub use args::{MD_PARAMS, OPTIONAL_FW_PARAMS, RUN_SPECS, StageArgs};
pub use defaults::StageDefaults;
pub use loader::{load_and_validate, load_from_path, parse_str};
pub use merge::{deep_merge, deep_merge_all};
pub use model::{RawRequestFile, RawStructure, RequestFile, WorkflowSection};
