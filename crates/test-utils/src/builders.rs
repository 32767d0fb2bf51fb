#![allow(dead_code)]

use std::sync::Arc;

use quenchflow::config::{
    RawRequestFile, RawStructure, RequestFile, StageArgs, WorkflowSection,
};
use quenchflow::quench::TemperatureSchedule;
use quenchflow::structure::{Lattice, Site, Structure};
use quenchflow::types::QuenchType;

fn cubic_lattice(a: f64) -> Lattice {
    [[a, 0.0, 0.0], [0.0, a, 0.0], [0.0, 0.0, a]]
}

/// Parse a TOML snippet into a `StageArgs` bundle.
pub fn stage_args(src: &str) -> StageArgs {
    toml::from_str(src).expect("valid stage args TOML")
}

/// Builder for `Structure` to simplify test setup.
pub struct StructureBuilder {
    lattice: Lattice,
    sites: Vec<Site>,
}

impl StructureBuilder {
    pub fn cubic(a: f64) -> Self {
        Self {
            lattice: cubic_lattice(a),
            sites: Vec::new(),
        }
    }

    pub fn site(mut self, species: &str, coords: [f64; 3]) -> Self {
        self.sites.push(Site {
            species: species.to_string(),
            coords,
        });
        self
    }

    /// Add one site per symbol, spread along the body diagonal.
    pub fn species(mut self, species: &[&str]) -> Self {
        let n = species.len().max(1) as f64;
        for (i, s) in species.iter().enumerate() {
            let x = i as f64 / n;
            self = self.site(s, [x, x, x]);
        }
        self
    }

    pub fn build(self) -> Arc<Structure> {
        Arc::new(Structure::new(self.lattice, self.sites).expect("valid test structure"))
    }
}

/// Cubic structure with the given species, e.g. `structure(&["Si", "O", "O"])`.
pub fn structure(species: &[&str]) -> Arc<Structure> {
    StructureBuilder::cubic(5.0).species(species).build()
}

/// `[[structure]]` entry for request files.
pub fn raw_structure(species: &[&str]) -> RawStructure {
    let n = species.len().max(1) as f64;
    RawStructure {
        lattice: cubic_lattice(5.0).iter().map(|r| r.to_vec()).collect(),
        species: species.iter().map(|s| s.to_string()).collect(),
        coords: (0..species.len())
            .map(|i| {
                let x = i as f64 / n;
                vec![x, x, x]
            })
            .collect(),
    }
}

/// Builder for `RequestFile`.
pub struct RequestFileBuilder {
    raw: RawRequestFile,
}

impl RequestFileBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawRequestFile {
                workflow: WorkflowSection::default(),
                cool_args: StageArgs::default(),
                hold_args: StageArgs::default(),
                quench_args: StageArgs::default(),
                structure: Vec::new(),
            },
        }
    }

    pub fn with_structure(mut self, species: &[&str]) -> Self {
        self.raw.structure.push(raw_structure(species));
        self
    }

    pub fn schedule(mut self, start_temp: f64, end_temp: f64, temp_step: f64) -> Self {
        self.raw.workflow.schedule = TemperatureSchedule::new(start_temp, end_temp, temp_step);
        self
    }

    pub fn quench_type(mut self, quench_type: &str) -> Self {
        self.raw.workflow.quench_type = QuenchType::from(quench_type.to_string());
        self
    }

    pub fn descriptor(mut self, descriptor: &str) -> Self {
        self.raw.workflow.descriptor = descriptor.to_string();
        self
    }

    pub fn priority(mut self, priority: i64) -> Self {
        self.raw.workflow.priority = Some(priority);
        self
    }

    pub fn add_static(mut self, val: bool) -> Self {
        self.raw.workflow.add_static = val;
        self
    }

    pub fn cool_args(mut self, args: StageArgs) -> Self {
        self.raw.cool_args = args;
        self
    }

    pub fn hold_args(mut self, args: StageArgs) -> Self {
        self.raw.hold_args = args;
        self
    }

    pub fn quench_args(mut self, args: StageArgs) -> Self {
        self.raw.quench_args = args;
        self
    }

    pub fn raw(self) -> RawRequestFile {
        self.raw
    }

    pub fn build(self) -> RequestFile {
        RequestFile::try_from(self.raw).expect("Failed to build valid request from builder")
    }
}

impl Default for RequestFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
