// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::{RawRequestFile, RequestFile};
use crate::errors::Result;

/// Load a request file from a given path and return the raw `RawRequestFile`.
///
/// This only performs TOML deserialization; it does **not** check structure
/// shapes or schedule sanity. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawRequestFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = contents.len(), "read request file");

    let request: RawRequestFile = toml::from_str(&contents)?;

    Ok(request)
}

/// Parse and validate a request held in memory.
pub fn parse_str(contents: &str) -> Result<RequestFile> {
    let raw: RawRequestFile = toml::from_str(contents)?;
    RequestFile::try_from(raw)
}

/// Load a request file from path and validate it.
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks for:
///   - at least one structure,
///   - finite temperatures and a positive `temp_step`,
///   - 3x3 lattices, coordinate triples and known element symbols.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<RequestFile> {
    let raw = load_from_path(&path)?;
    let request = RequestFile::try_from(raw)?;
    Ok(request)
}
