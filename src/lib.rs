// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod logging;
pub mod quench;
pub mod structure;
pub mod types;

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::dag::{TomlSink, Workflow, WorkflowSink};
use crate::quench::build_quench_workflow;

pub use crate::config::RequestFile;
pub use crate::dag::{Task, TaskChain};
pub use crate::quench::{TemperatureSchedule, WorkflowRequest};
pub use crate::structure::Structure;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - request loading + validation
/// - workflow construction
/// - hand-off to a [`WorkflowSink`] (TOML to `--out` or stdout), or a
///   human-readable summary with `--dry-run`
pub fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let request = load_and_validate(&config_path)
        .with_context(|| format!("loading request file {}", config_path.display()))?;

    let workflow = build_workflow(&request);
    info!(
        workflow = %workflow.name(),
        chains = workflow.chains().len(),
        tasks = workflow.len(),
        "built workflow"
    );

    // Refuse to hand off a cyclic graph.
    workflow.topological_order()?;

    if args.dry_run {
        print_dry_run(&request, &workflow);
        return Ok(());
    }

    match args.out {
        Some(ref out) => {
            let file = File::create(out).with_context(|| format!("creating {out}"))?;
            let mut sink = TomlSink::new(BufWriter::new(file));
            sink.submit(&workflow)?;
        }
        None => {
            let mut sink = TomlSink::new(io::stdout().lock());
            sink.submit(&workflow)?;
        }
    }

    Ok(())
}

/// Build the workflow described by a validated request file.
pub fn build_workflow(request: &RequestFile) -> Workflow {
    build_quench_workflow(&request.structures, &request.workflow_request())
}

/// Simple dry-run output: print settings, chains and tasks.
fn print_dry_run(request: &RequestFile, workflow: &Workflow) {
    let section = &request.workflow;
    println!("quenchflow dry-run");
    println!("  workflow.name = {}", workflow.name());
    println!("  workflow.quench_type = {}", section.quench_type);
    println!(
        "  workflow.schedule = {} -> {} step {} ({} checkpoints)",
        section.schedule.start_temp,
        section.schedule.end_temp,
        section.schedule.temp_step,
        section.schedule.checkpoint_count()
    );
    if let Some(priority) = section.priority {
        println!("  workflow.priority = {priority}");
    }
    println!("  workflow.add_static = {}", section.add_static);
    println!();

    for (i, chain) in workflow.chains().iter().enumerate() {
        let formula = request
            .structures
            .get(i)
            .map(|s| s.reduced_formula())
            .unwrap_or_default();
        println!("chain {i} ({formula}, {} tasks):", chain.len());
        for task in chain {
            println!("  - {} [{}]", task.name(), task.kind());
            if !task.parents().is_empty() {
                println!("      after: {:?}", task.parent_names());
            }
            if let (Some(start), Some(end)) = (task.md_start_temp(), task.md_end_temp()) {
                println!("      temp: {start} -> {end}");
            }
            if let Some(nsteps) = task.nsteps() {
                println!("      nsteps: {nsteps}");
            }
            if task.flow().continues_from_parent() {
                println!("      structure: from parent");
            }
            if task.passes_structure() {
                println!("      pass_structure: true");
            }
        }
    }

    debug!("dry-run complete (no workflow document written)");
}
