mod common;

use common::*;
use std::fs;
use wk2mmd::prelude::*;

#[test]
fn test_load_fixture_workflow() {
    let dir = create_test_dir();
    let root = write_reusable_chain(dir.path());
    let data = fs::read(&root).unwrap();
    let locator = root.display().to_string();

    let workflow = WorkflowLoader::parse(&locator, &data).unwrap();

    assert_eq!(workflow.name.as_deref(), Some("Reusable Workflow 1"));
    assert_eq!(workflow.source.as_deref(), Some(locator.as_str()));
    let jobs: Vec<_> = workflow.jobs.keys().map(String::as_str).collect();
    assert_eq!(jobs, vec!["call_workflow_2", "job_a", "job_b"]);

    let call = &workflow.jobs["call_workflow_2"];
    assert_eq!(call.delegate(), Some("./.github/workflows/reusable-wf2.yml"));
    assert_eq!(call.needs.as_slice(), ["job_a", "job_b"]);
    assert_eq!(workflow.jobs["job_b"].needs.as_slice(), ["job_a"]);
    assert!(workflow.jobs["job_a"].needs.is_empty());
}

#[test]
fn test_needs_forms() {
    let workflow = WorkflowLoader::parse_str(
        "needs.yml",
        r#"
jobs:
  none: {}
  explicit_null:
    needs:
  single:
    needs: none
  many:
    needs: [none, single]
"#,
    )
    .unwrap();

    assert!(workflow.jobs["none"].needs.is_empty());
    assert!(workflow.jobs["explicit_null"].needs.is_empty());
    assert_eq!(workflow.jobs["single"].needs.as_slice(), ["none"]);
    assert_eq!(workflow.jobs["many"].needs.as_slice(), ["none", "single"]);
}

#[test]
fn test_needs_mapping_is_rejected() {
    let err = WorkflowLoader::parse_str(
        "bad.yml",
        "jobs:\n  deploy:\n    needs:\n      build: true\n",
    )
    .unwrap_err();

    match &err {
        LoadError::MalformedNeeds { locator, job, found } => {
            assert_eq!(locator, "bad.yml");
            assert_eq!(job, "deploy");
            assert_eq!(*found, "a mapping");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("invalid needs field"));
}

#[test]
fn test_needs_number_is_rejected() {
    let err = WorkflowLoader::parse_str("bad.yml", "jobs:\n  deploy:\n    needs: 3\n").unwrap_err();
    assert!(matches!(err, LoadError::MalformedNeeds { found: "a number", .. }));
}

#[test]
fn test_malformed_yaml() {
    let err = WorkflowLoader::parse_str("broken.yml", "jobs: [unclosed").unwrap_err();
    assert!(matches!(err, LoadError::MalformedDocument { .. }));
    assert!(err.to_string().contains("broken.yml"));
}

#[test]
fn test_empty_document_has_no_jobs() {
    let workflow = WorkflowLoader::parse_str("empty.yml", "").unwrap();
    assert!(!workflow.has_jobs());
    assert_eq!(workflow.source.as_deref(), Some("empty.yml"));
}

#[test]
fn test_step_uses_and_run() {
    let workflow = WorkflowLoader::parse_str(
        "ci.yml",
        r#"
name: CI
on: [push]
jobs:
  build:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
      - name: Build
        run: cargo build
      - uses: ""
"#,
    )
    .unwrap();

    let steps = &workflow.jobs["build"].steps;
    assert_eq!(steps.len(), 3);
    let actions: Vec<_> = steps.iter().filter_map(Step::action).collect();
    assert_eq!(actions, vec!["actions/checkout@v4"]);
    assert_eq!(steps[1].run.as_deref(), Some("cargo build"));
}

#[test]
fn test_composite_action_document() {
    let workflow = WorkflowLoader::parse_str(
        "action.yml",
        r#"
name: Setup
runs:
  using: composite
  steps:
    - uses: actions/setup-node@v4
    - run: npm ci
"#,
    )
    .unwrap();

    assert!(workflow.has_jobs());
    let job = &workflow.jobs["composite"];
    assert_eq!(job.steps.len(), 2);
    assert_eq!(job.steps[0].action(), Some("actions/setup-node@v4"));
}

#[test]
fn test_non_composite_action_has_no_jobs() {
    let workflow = WorkflowLoader::parse_str(
        "action.yml",
        "name: Node\nruns:\n  using: node20\n  main: dist/index.js\n",
    )
    .unwrap();
    assert!(!workflow.has_jobs());
}

#[test]
fn test_reference_classification() {
    let ctx = RepoContext::github("octo", "app", "main");

    let local = ActionReference::parse("./.github/workflows/build.yml", &ctx);
    assert_eq!(local.kind(), "local");
    assert_eq!(
        local.candidate_locations(),
        vec!["https://raw.githubusercontent.com/octo/app/main/.github/workflows/build.yml"]
    );

    let remote = ActionReference::parse("octo/shared/.github/actions/lint@v2", &ctx);
    assert_eq!(remote.kind(), "remote");
    assert_eq!(
        remote.candidate_locations(),
        vec![
            "https://raw.githubusercontent.com/octo/shared/v2/.github/actions/lint/action.yml",
            "https://raw.githubusercontent.com/octo/shared/v2/.github/actions/lint/action.yaml",
        ]
    );

    let marketplace = ActionReference::parse("actions/checkout@v4", &ctx);
    assert_eq!(marketplace.kind(), "marketplace");
    assert!(!marketplace.is_resolvable());

    let docker = ActionReference::parse("docker://alpine:3.19", &ctx);
    assert!(!docker.is_resolvable());
    assert_eq!(docker.raw(), "docker://alpine:3.19");
}
