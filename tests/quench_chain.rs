// tests/quench_chain.rs

mod common;

use std::sync::Arc;

use quenchflow::config::{MD_PARAMS, OPTIONAL_FW_PARAMS, RUN_SPECS, StageArgs};
use quenchflow::quench::{ChainRequest, TaskNaming, build_quench_chain};
use quenchflow::types::{QuenchType, StageKind, StructureSource};
use quenchflow_test_utils::builders::{stage_args, structure};
use quenchflow_test_utils::init_tracing;

use common::{anneal_request, upstream_task};

#[test]
fn single_checkpoint_builds_cool_hold_relax() {
    init_tracing();
    let s = structure(&["Si", "O", "O"]);

    let chain = build_quench_chain(&s, &anneal_request(1000.0, 500.0, 500.0));

    assert_eq!(chain.names(), vec!["cool_500", "hold_500", "optimize"]);
    let kinds: Vec<StageKind> = chain.iter().map(|t| t.kind()).collect();
    assert_eq!(kinds, vec![StageKind::Cool, StageKind::Hold, StageKind::Relax]);

    let cool = &chain.tasks()[0];
    assert_eq!(cool.md_start_temp(), Some(1000.0));
    assert_eq!(cool.md_end_temp(), Some(500.0));
    assert_eq!(cool.nsteps(), Some(200));

    let hold = &chain.tasks()[1];
    assert_eq!(hold.md_start_temp(), Some(500.0));
    assert_eq!(hold.md_end_temp(), Some(500.0));
    assert_eq!(hold.nsteps(), Some(500));
}

#[test]
fn add_static_appends_static_after_relax() {
    let s = structure(&["Si", "O", "O"]);
    let request = ChainRequest {
        add_static: true,
        ..anneal_request(1000.0, 500.0, 500.0)
    };

    let chain = build_quench_chain(&s, &request);

    assert_eq!(chain.len(), 4);
    let static_task = chain.last().unwrap();
    assert_eq!(static_task.kind(), StageKind::Static);
    assert_eq!(static_task.name(), "static");
    assert_eq!(static_task.parent_names(), vec!["optimize"]);
    assert_eq!(static_task.structure_source(), StructureSource::Parent);
}

#[test]
fn each_stage_depends_on_the_previous_one() {
    let s = structure(&["Mg", "O"]);
    let request = ChainRequest {
        add_static: true,
        ..anneal_request(3000.0, 500.0, 500.0)
    };

    let chain = build_quench_chain(&s, &request);

    // 5 checkpoints -> 10 MD tasks + relax + static
    assert_eq!(chain.len(), 12);
    assert!(chain.first().unwrap().parents().is_empty());
    for pair in chain.tasks().windows(2) {
        let parents = pair[1].parents();
        assert_eq!(parents.len(), 1);
        assert!(Arc::ptr_eq(&parents[0], &pair[0]));
    }
}

#[test]
fn schedule_names_follow_checkpoints() {
    let s = structure(&["Mg", "O"]);
    let chain = build_quench_chain(&s, &anneal_request(3000.0, 500.0, 500.0));

    let md_names: Vec<&str> = chain
        .iter()
        .filter(|t| t.kind().is_md())
        .map(|t| t.name())
        .collect();
    assert_eq!(
        md_names,
        vec![
            "cool_2500", "hold_2500", "cool_2000", "hold_2000", "cool_1500", "hold_1500",
            "cool_1000", "hold_1000", "cool_500", "hold_500",
        ]
    );
}

#[test]
fn non_annealing_range_yields_only_relax_wired_to_external_parents() {
    let s = structure(&["Mg", "O"]);
    let upstream_a = upstream_task("melt_a", &s);
    let upstream_b = upstream_task("melt_b", &s);
    let request = ChainRequest {
        parents: vec![Arc::clone(&upstream_a), Arc::clone(&upstream_b)],
        ..anneal_request(500.0, 500.0, 100.0)
    };

    let chain = build_quench_chain(&s, &request);

    assert_eq!(chain.len(), 1);
    let relax = chain.first().unwrap();
    assert_eq!(relax.kind(), StageKind::Relax);
    assert_eq!(relax.parents().len(), 2);
    assert!(Arc::ptr_eq(&relax.parents()[0], &upstream_a));
    assert!(Arc::ptr_eq(&relax.parents()[1], &upstream_b));
    assert_eq!(relax.structure_source(), StructureSource::Input);
    assert!(relax.passes_structure());
}

#[test]
fn first_stage_inherits_external_parents() {
    let s = structure(&["Mg", "O"]);
    let upstream = upstream_task("melt", &s);
    let request = ChainRequest {
        parents: vec![Arc::clone(&upstream)],
        ..anneal_request(1000.0, 500.0, 500.0)
    };

    let chain = build_quench_chain(&s, &request);

    let first = chain.first().unwrap();
    assert!(Arc::ptr_eq(&first.parents()[0], &upstream));
    assert_eq!(first.structure_source(), StructureSource::Parent);
    assert!(!first.passes_structure());
}

#[test]
fn chain_without_parents_starts_from_input_structure() {
    let s = structure(&["Mg", "O"]);
    let chain = build_quench_chain(&s, &anneal_request(1000.0, 500.0, 500.0));

    let first = chain.first().unwrap();
    assert_eq!(first.structure_source(), StructureSource::Input);
    for task in chain.iter().skip(1) {
        assert_eq!(task.structure_source(), StructureSource::Parent, "{}", task.name());
    }
    assert!(chain.last().unwrap().passes_structure());
}

#[test]
fn relax_alone_without_parents_reads_input_structure() {
    let s = structure(&["Mg", "O"]);
    let chain = build_quench_chain(&s, &anneal_request(400.0, 500.0, 100.0));

    assert_eq!(chain.len(), 1);
    let relax = chain.first().unwrap();
    assert!(relax.parents().is_empty());
    assert_eq!(relax.structure_source(), StructureSource::Input);
}

#[test]
fn mp_quench_skips_md_stages() {
    let s = structure(&["Mg", "O"]);
    let request = ChainRequest {
        quench_type: QuenchType::MpQuench,
        add_static: true,
        ..anneal_request(3000.0, 500.0, 500.0)
    };

    let chain = build_quench_chain(&s, &request);

    assert_eq!(chain.names(), vec!["optimize", "static"]);
}

#[test]
fn unrecognised_quench_type_builds_nothing() {
    init_tracing();
    let s = structure(&["Mg", "O"]);
    let upstream = upstream_task("melt", &s);
    let request = ChainRequest {
        quench_type: "unsupported_value".parse().unwrap(),
        parents: vec![upstream],
        add_static: true,
        ..anneal_request(3000.0, 500.0, 500.0)
    };

    let chain = build_quench_chain(&s, &request);

    assert!(chain.is_empty());
}

#[test]
fn user_args_merge_over_stage_defaults() {
    let s = structure(&["Mg", "O"]);
    let request = ChainRequest {
        cool_args: stage_args(
            r#"
[md_params]
nsteps = 50

[run_specs]
wall_time = 1000
"#,
        ),
        hold_args: stage_args("[md_params]\nnsteps = 75\n"),
        quench_args: stage_args("[optional_fw_params]\nmax_force_threshold = 0.05\n"),
        ..anneal_request(1000.0, 500.0, 500.0)
    };

    let chain = build_quench_chain(&s, &request);
    let cool = &chain.tasks()[0];
    let hold = &chain.tasks()[1];
    let relax = &chain.tasks()[2];

    assert_eq!(cool.nsteps(), Some(50));
    assert_eq!(
        cool.args().get_path(&[RUN_SPECS, "wall_time"]).and_then(|v| v.as_integer()),
        Some(1000)
    );
    // untouched defaults survive the merge
    assert_eq!(cool.md_start_temp(), Some(1000.0));
    assert_eq!(
        cool.args().get_path(&[RUN_SPECS, "vasp_cmd"]).and_then(|v| v.as_str()),
        Some(">>vasp_cmd<<")
    );
    assert_eq!(hold.nsteps(), Some(75));
    assert_eq!(relax.max_force_threshold(), Some(0.05));
}

#[test]
fn md_defaults_fix_cell_and_skip_wavecar() {
    let s = structure(&["Mg", "O"]);
    let chain = build_quench_chain(&s, &anneal_request(1000.0, 500.0, 500.0));
    let cool = &chain.tasks()[0];

    let incar = cool
        .args()
        .get_path(&[OPTIONAL_FW_PARAMS, "override_default_vasp_params", "user_incar_settings"])
        .and_then(|v| v.as_table())
        .unwrap();
    assert_eq!(incar.get("ISIF").and_then(|v| v.as_integer()), Some(1));
    assert_eq!(incar.get("LWAVE").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(
        cool.args()
            .get_path(&[OPTIONAL_FW_PARAMS, "insert_db"])
            .and_then(|v| v.as_bool()),
        Some(false)
    );
}

#[test]
fn relax_has_no_force_threshold_by_default() {
    let s = structure(&["Mg", "O"]);
    let chain = build_quench_chain(&s, &anneal_request(1000.0, 500.0, 500.0));
    let relax = chain.last().unwrap();

    assert_eq!(relax.max_force_threshold(), None);
    assert!(relax.args().section(MD_PARAMS).is_none());
}

#[test]
fn priority_and_job_time_reach_task_specs() {
    let s = structure(&["Mg", "O"]);
    let request = ChainRequest {
        priority: Some(7),
        job_time: Some(3600),
        add_static: true,
        ..anneal_request(1000.0, 500.0, 500.0)
    };

    let chain = build_quench_chain(&s, &request);
    let cool = &chain.tasks()[0];
    let relax = &chain.tasks()[2];

    let spec = |args: &StageArgs, path: &[&str]| args.get_path(path).and_then(|v| v.as_integer());
    assert_eq!(spec(cool.args(), &[OPTIONAL_FW_PARAMS, "spec", "_priority"]), Some(7));
    assert_eq!(
        spec(cool.args(), &[OPTIONAL_FW_PARAMS, "spec", "_queueadapter", "walltime"]),
        Some(3600)
    );
    assert_eq!(spec(relax.args(), &[RUN_SPECS, "spec", "_priority"]), Some(7));
}

#[test]
fn descriptor_and_snapshot_naming() {
    let s = structure(&["Mg", "O"]);
    let request = ChainRequest {
        add_static: true,
        descriptor: "_glass".to_string(),
        naming: TaskNaming::Snapshot(2),
        ..anneal_request(1000.0, 500.0, 500.0)
    };

    let chain = build_quench_chain(&s, &request);

    assert_eq!(
        chain.names(),
        vec![
            "snap_2_cool_500",
            "snap_2_hold_500",
            "snap_2_glass_optimize",
            "snap_2_glass_static",
        ]
    );
}

#[test]
fn every_task_shares_the_input_structure() {
    let s = structure(&["Mg", "O"]);
    let chain = build_quench_chain(&s, &anneal_request(2000.0, 500.0, 500.0));

    for task in &chain {
        assert!(Arc::ptr_eq(task.structure(), &s));
    }
}

#[test]
fn mp_quench_with_upstream_relaxes_input_structure() {
    let s = structure(&["Mg", "O"]);
    let upstream = upstream_task("melt", &s);
    let request = ChainRequest {
        quench_type: QuenchType::MpQuench,
        parents: vec![Arc::clone(&upstream)],
        ..anneal_request(3000.0, 500.0, 500.0)
    };

    let chain = build_quench_chain(&s, &request);

    let relax = chain.first().unwrap();
    assert!(Arc::ptr_eq(&relax.parents()[0], &upstream));
    assert_eq!(relax.structure_source(), StructureSource::Input);
}

#[test]
fn relax_after_md_stages_continues_from_hold() {
    let s = structure(&["Mg", "O"]);
    let upstream = upstream_task("melt", &s);
    let request = ChainRequest {
        parents: vec![upstream],
        ..anneal_request(1000.0, 500.0, 500.0)
    };

    let chain = build_quench_chain(&s, &request);

    let relax = chain.last().unwrap();
    assert_eq!(relax.parent_names(), vec!["hold_500"]);
    assert_eq!(relax.structure_source(), StructureSource::Parent);
}
