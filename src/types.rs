// src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which family of stages a quench request builds.
///
/// - `SimulatedAnneal`: cool/hold pairs over the temperature schedule, then
///   relax (and optionally static).
/// - `MpQuench`: relax (and optionally static) only.
/// - `Other`: any unrecognised selector. It is kept verbatim and yields no
///   stages at all.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuenchType {
    #[default]
    SimulatedAnneal,
    MpQuench,
    Other(String),
}

impl QuenchType {
    pub fn as_str(&self) -> &str {
        match self {
            QuenchType::SimulatedAnneal => "simulated_anneal",
            QuenchType::MpQuench => "mp_quench",
            QuenchType::Other(s) => s.as_str(),
        }
    }

    /// Whether cool/hold annealing stages are built.
    pub fn anneals(&self) -> bool {
        matches!(self, QuenchType::SimulatedAnneal)
    }

    /// Whether the trailing relax (and optional static) stages are built.
    pub fn relaxes(&self) -> bool {
        matches!(self, QuenchType::SimulatedAnneal | QuenchType::MpQuench)
    }

    pub fn is_recognised(&self) -> bool {
        !matches!(self, QuenchType::Other(_))
    }
}

impl FromStr for QuenchType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(QuenchType::from(s.to_string()))
    }
}

impl From<String> for QuenchType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "simulated_anneal" => QuenchType::SimulatedAnneal,
            "mp_quench" => QuenchType::MpQuench,
            _ => QuenchType::Other(s),
        }
    }
}

impl From<QuenchType> for String {
    fn from(q: QuenchType) -> Self {
        match q {
            QuenchType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for QuenchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of work a single task performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageKind {
    /// MD integration between two distinct temperatures.
    Cool,
    /// MD integration at a constant temperature.
    Hold,
    /// Geometry optimisation.
    Relax,
    /// Single-point evaluation on a fixed geometry.
    Static,
}

impl StageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StageKind::Cool => "cool",
            StageKind::Hold => "hold",
            StageKind::Relax => "relax",
            StageKind::Static => "static",
        }
    }

    pub fn is_md(self) -> bool {
        matches!(self, StageKind::Cool | StageKind::Hold)
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a task reads its starting geometry from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureSource {
    /// The structure originally supplied to the builder.
    #[default]
    Input,
    /// The output structure of the task's parent.
    Parent,
}
