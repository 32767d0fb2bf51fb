// tests/request_loading.rs

use std::io::Write;

use quenchflow::config::{RawStructure, load_and_validate, parse_str};
use quenchflow::errors::QuenchflowError;
use quenchflow::types::QuenchType;
use quenchflow::{RequestFile, build_workflow};
use quenchflow_test_utils::builders::{RequestFileBuilder, raw_structure, stage_args};
use tempfile::NamedTempFile;

const MGO: &str = r#"
[[structure]]
lattice = [[4.2, 0.0, 0.0], [0.0, 4.2, 0.0], [0.0, 0.0, 4.2]]
species = ["Mg", "O"]
coords = [[0.0, 0.0, 0.0], [0.5, 0.5, 0.5]]
"#;

fn write_request(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

fn expect_config_error(result: Result<RequestFile, QuenchflowError>) -> String {
    match result {
        Err(QuenchflowError::ConfigError(msg)) => msg,
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_full_request_parses() {
    let file = write_request(&format!(
        r#"
[workflow]
quench_type = "simulated_anneal"
descriptor = "_glass"
priority = 10
job_time = 7200
add_static = false

[workflow.schedule]
start_temp = 2000.0
end_temp = 1000.0
temp_step = 250.0

[cool_args.md_params]
nsteps = 100

[quench_args.optional_fw_params]
max_force_threshold = 0.1
{MGO}
[[structure]]
lattice = [[5.0, 0.0, 0.0], [0.0, 5.0, 0.0], [0.0, 0.0, 5.0]]
species = ["Si", "O", "O"]
coords = [[0.0, 0.0, 0.0], [0.25, 0.25, 0.25], [0.75, 0.75, 0.75]]
"#
    ));

    let request = load_and_validate(file.path()).unwrap();

    assert_eq!(request.workflow.quench_type, QuenchType::SimulatedAnneal);
    assert_eq!(request.workflow.descriptor, "_glass");
    assert_eq!(request.workflow.priority, Some(10));
    assert_eq!(request.workflow.job_time, Some(7200));
    assert!(!request.workflow.add_static);
    assert_eq!(request.workflow.schedule.checkpoint_count(), 4);
    assert_eq!(request.structures.len(), 2);
    assert_eq!(request.structures[1].reduced_formula(), "SiO2");

    let wf = build_workflow(&request);
    assert_eq!(wf.name(), "SiO2_glass_quench");
    // 4 checkpoints * 2 + relax, per structure
    assert_eq!(wf.len(), 18);
    let cool = wf.find("snap_0_cool_1750").unwrap();
    assert_eq!(cool.nsteps(), Some(100));
    let relax = wf.find("snap_1_glass_optimize").unwrap();
    assert_eq!(relax.max_force_threshold(), Some(0.1));
}

#[test]
fn test_minimal_request_uses_defaults() {
    let request = parse_str(MGO).unwrap();

    assert_eq!(request.workflow.quench_type, QuenchType::SimulatedAnneal);
    assert!(request.workflow.add_static);
    assert_eq!(request.workflow.schedule.start_temp, 3000.0);
    assert_eq!(request.workflow.schedule.end_temp, 500.0);
    assert_eq!(request.workflow.schedule.temp_step, 500.0);
    assert!(request.cool_args.is_empty());

    let wf = build_workflow(&request);
    assert_eq!(wf.name(), "MgO_quench");
    assert_eq!(wf.len(), 12);
}

#[test]
fn test_unrecognised_quench_type_is_accepted() {
    let request = parse_str(&format!("[workflow]\nquench_type = \"unsupported_value\"\n{MGO}")).unwrap();

    assert_eq!(
        request.workflow.quench_type,
        QuenchType::Other("unsupported_value".to_string())
    );
    assert!(build_workflow(&request).is_empty());
}

#[test]
fn test_missing_structures_returns_config_error() {
    let file = write_request("[workflow]\ndescriptor = \"_glass\"\n");

    let msg = expect_config_error(load_and_validate(file.path()));
    assert!(msg.contains("at least one [[structure]]"));
}

#[test]
fn test_non_positive_temp_step_returns_config_error() {
    let file = write_request(&format!("[workflow.schedule]\ntemp_step = 0.0\n{MGO}"));

    let msg = expect_config_error(load_and_validate(file.path()));
    assert!(msg.contains("temp_step"));
}

#[test]
fn test_non_finite_temperature_returns_config_error() {
    let file = write_request(&format!("[workflow.schedule]\nstart_temp = inf\n{MGO}"));

    let msg = expect_config_error(load_and_validate(file.path()));
    assert!(msg.contains("start_temp"));
}

#[test]
fn test_relax_only_range_is_valid() {
    let request = parse_str(&format!(
        "[workflow.schedule]\nstart_temp = 300.0\nend_temp = 500.0\n{MGO}"
    ))
    .unwrap();

    let wf = build_workflow(&request);
    assert_eq!(wf.chains()[0].names(), vec!["snap_0_optimize", "snap_0_static"]);
}

#[test]
fn test_bad_lattice_returns_config_error() {
    let file = write_request(
        r#"
[[structure]]
lattice = [[4.0, 0.0], [0.0, 4.0, 0.0], [0.0, 0.0, 4.0]]
species = ["Mg"]
coords = [[0.0, 0.0, 0.0]]
"#,
    );

    let msg = expect_config_error(load_and_validate(file.path()));
    assert!(msg.contains("structure 0"));
    assert!(msg.contains("3x3"));
}

#[test]
fn test_species_coords_mismatch_returns_config_error() {
    let mut raw = RequestFileBuilder::new().raw();
    raw.structure.push(RawStructure {
        coords: vec![vec![0.0, 0.0, 0.0]],
        ..raw_structure(&["Mg", "O"])
    });

    let msg = expect_config_error(RequestFile::try_from(raw));
    assert!(msg.contains("2 species but 1 coordinate"));
}

#[test]
fn test_unknown_element_returns_config_error() {
    let raw = RequestFileBuilder::new()
        .with_structure(&["Mg", "O"])
        .with_structure(&["Xx", "O"])
        .raw();

    let msg = expect_config_error(RequestFile::try_from(raw));
    assert!(msg.contains("structure 1"));
    assert!(msg.contains("'Xx'"));
}

#[test]
fn test_malformed_toml_returns_toml_error() {
    let file = write_request("[workflow\nquench_type = ");

    match load_and_validate(file.path()) {
        Err(QuenchflowError::TomlError(_)) => {}
        Err(e) => panic!("Expected TomlError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_missing_file_returns_io_error() {
    let dir = tempfile::tempdir().unwrap();

    match load_and_validate(dir.path().join("Quench.toml")) {
        Err(QuenchflowError::IoError(_)) => {}
        Err(e) => panic!("Expected IoError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_builder_request_matches_file_request() {
    let built = RequestFileBuilder::new()
        .schedule(1000.0, 500.0, 250.0)
        .descriptor("_x")
        .priority(3)
        .cool_args(stage_args("[md_params]\nnsteps = 10\n"))
        .with_structure(&["Mg", "O"])
        .build();

    let wf = build_workflow(&built);
    assert_eq!(wf.name(), "MgO_x_quench");
    assert_eq!(wf.find("snap_0_cool_750").unwrap().nsteps(), Some(10));
}
