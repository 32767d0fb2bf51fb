// src/dag/fingerprint.rs

//! Stable task fingerprints.
//!
//! The configuration is rendered to a canonical string (sorted keys, no
//! whitespace, floats always carrying a decimal point) before hashing, so the
//! digest does not depend on map iteration order.

use blake3::Hasher;
use toml::Value;

use crate::config::args::StageArgs;
use crate::dag::task::StructureFlow;
use crate::types::{StageKind, StructureSource};

pub fn task_fingerprint(name: &str, kind: StageKind, flow: &StructureFlow, args: &StageArgs) -> String {
    let mut hasher = Hasher::new();
    hasher.update(name.as_bytes());
    hasher.update(b"\0");
    hasher.update(kind.as_str().as_bytes());
    hasher.update(b"\0");
    let source = match flow.source {
        StructureSource::Input => "input",
        StructureSource::Parent => "parent",
    };
    hasher.update(source.as_bytes());
    hasher.update(if flow.pass_forward { b"+pass" } else { b"-pass" });
    hasher.update(b"\0");
    hasher.update(canonical_table(args.as_table()).as_bytes());
    hasher.finalize().to_hex().to_string()
}

pub fn canonical_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("{s:?}"),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => format!("{f:?}"),
        Value::Boolean(b) => b.to_string(),
        Value::Datetime(dt) => dt.to_string(),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(canonical_value).collect();
            format!("[{}]", items.join(","))
        }
        Value::Table(table) => canonical_table(table),
    }
}

fn canonical_table(table: &toml::Table) -> String {
    let mut entries: Vec<(&String, &Value)> = table.iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    let items: Vec<String> = entries
        .into_iter()
        .map(|(k, v)| format!("{k:?}:{}", canonical_value(v)))
        .collect();
    format!("{{{}}}", items.join(","))
}
