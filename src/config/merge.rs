// src/config/merge.rs

//! Recursive merge of TOML tables.

use toml::{Table, Value};

/// Merge `overrides` on top of `base`, returning a new table.
///
/// - table + table: merged key by key, recursively
/// - anything else: the override value replaces the base value
/// - keys only present on one side are kept
///
/// Neither input is modified.
pub fn deep_merge(base: &Table, overrides: &Table) -> Table {
    let mut merged = base.clone();

    for (key, value) in overrides.iter() {
        let next = match (merged.get(key), value) {
            (Some(Value::Table(base_inner)), Value::Table(override_inner)) => {
                Value::Table(deep_merge(base_inner, override_inner))
            }
            _ => value.clone(),
        };
        merged.insert(key.clone(), next);
    }

    merged
}

/// Apply several override layers in order, later layers winning.
pub fn deep_merge_all<'a, I>(base: &Table, layers: I) -> Table
where
    I: IntoIterator<Item = &'a Table>,
{
    layers
        .into_iter()
        .fold(base.clone(), |acc, layer| deep_merge(&acc, layer))
}
