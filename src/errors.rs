// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! The graph builders themselves never fail; these errors come from the
//! request loader, structure construction and the workflow sinks.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuenchflowError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid formula: {0}")]
    InvalidFormula(String),

    #[error("Unknown element symbol: {0}")]
    UnknownElement(String),

    #[error("Cycle detected in workflow: {0}")]
    DagCycle(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, QuenchflowError>;
