// src/config/validate.rs

use std::sync::Arc;

use tracing::warn;

use crate::config::model::{RawRequestFile, RawStructure, RequestFile, WorkflowSection};
use crate::errors::{QuenchflowError, Result};
use crate::structure::{Lattice, Site, Structure};

impl TryFrom<RawRequestFile> for RequestFile {
    type Error = QuenchflowError;

    fn try_from(raw: RawRequestFile) -> std::result::Result<Self, Self::Error> {
        ensure_has_structures(&raw)?;
        validate_workflow_section(&raw.workflow)?;

        let structures = raw
            .structure
            .iter()
            .enumerate()
            .map(|(i, s)| build_structure(i, s).map(Arc::new))
            .collect::<Result<Vec<_>>>()?;

        Ok(RequestFile::new_unchecked(
            raw.workflow,
            raw.cool_args,
            raw.hold_args,
            raw.quench_args,
            structures,
        ))
    }
}

fn ensure_has_structures(raw: &RawRequestFile) -> Result<()> {
    if raw.structure.is_empty() {
        return Err(QuenchflowError::ConfigError(
            "request must contain at least one [[structure]] entry".to_string(),
        ));
    }
    Ok(())
}

fn validate_workflow_section(section: &WorkflowSection) -> Result<()> {
    let sched = &section.schedule;

    for (field, value) in [
        ("start_temp", sched.start_temp),
        ("end_temp", sched.end_temp),
        ("temp_step", sched.temp_step),
    ] {
        if !value.is_finite() {
            return Err(QuenchflowError::ConfigError(format!(
                "[workflow.schedule].{field} must be finite (got {value})"
            )));
        }
    }

    if sched.temp_step <= 0.0 {
        return Err(QuenchflowError::ConfigError(format!(
            "[workflow.schedule].temp_step must be > 0 (got {})",
            sched.temp_step
        )));
    }

    // start <= end is a valid relax-only request; only worth a heads-up.
    if section.quench_type.anneals() && !sched.is_annealing() {
        warn!(
            start_temp = sched.start_temp,
            end_temp = sched.end_temp,
            "start_temp <= end_temp; no annealing stages will be built"
        );
    }

    Ok(())
}

fn build_structure(index: usize, raw: &RawStructure) -> Result<Structure> {
    let lattice = lattice_from_rows(index, &raw.lattice)?;

    if raw.species.len() != raw.coords.len() {
        return Err(QuenchflowError::ConfigError(format!(
            "structure {index}: {} species but {} coordinate triples",
            raw.species.len(),
            raw.coords.len()
        )));
    }

    let sites = raw
        .species
        .iter()
        .zip(raw.coords.iter())
        .enumerate()
        .map(|(site, (species, coords))| -> Result<Site> {
            let coords = triple(coords).ok_or_else(|| {
                QuenchflowError::ConfigError(format!(
                    "structure {index}, site {site}: coordinates must have 3 components (got {})",
                    coords.len()
                ))
            })?;
            Ok(Site {
                species: species.clone(),
                coords,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Structure::new(lattice, sites).map_err(|e| match e {
        QuenchflowError::UnknownElement(sym) => QuenchflowError::ConfigError(format!(
            "structure {index}: unknown element symbol '{sym}'"
        )),
        other => other,
    })
}

fn lattice_from_rows(index: usize, rows: &[Vec<f64>]) -> Result<Lattice> {
    let bad = || {
        QuenchflowError::ConfigError(format!("structure {index}: lattice must be a 3x3 matrix"))
    };

    if rows.len() != 3 {
        return Err(bad());
    }
    let a = triple(&rows[0]).ok_or_else(bad)?;
    let b = triple(&rows[1]).ok_or_else(bad)?;
    let c = triple(&rows[2]).ok_or_else(bad)?;
    Ok([a, b, c])
}

fn triple(values: &[f64]) -> Option<[f64; 3]> {
    <[f64; 3]>::try_from(values).ok()
}
