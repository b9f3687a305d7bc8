#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const WORKFLOWS_DIR: &str = ".github/workflows";

pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Write `content` under `<dir>/.github/workflows/` and return its path.
pub fn write_workflow(dir: &Path, filename: &str, content: &str) -> PathBuf {
    let workflows = dir.join(WORKFLOWS_DIR);
    fs::create_dir_all(&workflows).expect("Failed to create workflows directory");
    let path = workflows.join(filename);
    fs::write(&path, content).expect("Failed to write workflow file");
    path
}

/// Write a file at a repository-relative path.
pub fn write_file(dir: &Path, relative: &str, content: &str) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(&path, content).expect("Failed to write file");
    path
}

pub fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("wk2mmd.yaml");
    fs::write(&path, content).expect("Failed to write config file");
    path
}

/// A reusable workflow with two plain jobs and, optionally, a job calling
/// the next workflow in the chain.
pub fn chained_workflow(name: &str, jobs: [&str; 2], next: Option<(&str, &str)>) -> String {
    let mut out = format!(
        r#"name: {name}
on:
  workflow_call:
jobs:
  {first}:
    runs-on: ubuntu-latest
    steps:
      - run: echo "{first}"
  {second}:
    runs-on: ubuntu-latest
    needs: {first}
    steps:
      - run: echo "{second}"
"#,
        first = jobs[0],
        second = jobs[1],
    );

    if let Some((job, file)) = next {
        out.push_str(&format!(
            "  {job}:\n    needs: [{first}, {second}]\n    uses: ./.github/workflows/{file}\n",
            first = jobs[0],
            second = jobs[1],
        ));
    }
    out
}

/// Five reusable workflows, each calling the next.
///
/// Returns the path of `reusable-wf1.yml`.
pub fn write_reusable_chain(dir: &Path) -> PathBuf {
    let root = write_workflow(
        dir,
        "reusable-wf1.yml",
        &chained_workflow(
            "Reusable Workflow 1",
            ["job_a", "job_b"],
            Some(("call_workflow_2", "reusable-wf2.yml")),
        ),
    );
    write_workflow(
        dir,
        "reusable-wf2.yml",
        &chained_workflow(
            "Reusable Workflow 2",
            ["prepare", "build"],
            Some(("call_workflow_3", "reusable-wf3.yml")),
        ),
    );
    write_workflow(
        dir,
        "reusable-wf3.yml",
        &chained_workflow(
            "Reusable Workflow 3",
            ["setup", "test"],
            Some(("call_workflow_4", "reusable-wf4.yml")),
        ),
    );
    write_workflow(
        dir,
        "reusable-wf4.yml",
        &chained_workflow(
            "Reusable Workflow 4",
            ["init", "verify"],
            Some(("call_workflow_5", "reusable-wf5.yml")),
        ),
    );
    write_workflow(
        dir,
        "reusable-wf5.yml",
        &chained_workflow("Reusable Workflow 5", ["start", "finalize"], None),
    );
    root
}

/// Label pairs for every edge of a rendered flowchart.
pub fn flowchart_label_edges(output: &str) -> Vec<(String, String)> {
    let mut labels = std::collections::HashMap::new();
    let mut edges = Vec::new();

    for line in output.lines().map(str::trim) {
        if let Some((id, rest)) = line.split_once("@{ shape: rect, label: \"") {
            let label = rest.trim_end_matches("\"}");
            labels.insert(id.to_string(), label.to_string());
        } else if let Some((from, to)) = line.split_once(" --> ") {
            edges.push((from.to_string(), to.to_string()));
        }
    }

    let mut pairs: Vec<_> = edges
        .into_iter()
        .map(|(from, to)| (labels[&from].clone(), labels[&to].clone()))
        .collect();
    pairs.sort();
    pairs
}

pub fn pairs(edges: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut out: Vec<_> = edges
        .iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect();
    out.sort();
    out
}
