//! Workflow, Job, and Step definitions
//!
//! Only the parts of a GitHub Actions workflow that matter for following
//! `uses` references are modelled here. Every other key in the YAML is
//! ignored during deserialization.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the synthetic job that carries the steps of a composite action.
pub const COMPOSITE_JOB: &str = "composite";

// ============================================================================
// Workflow
// ============================================================================

/// A parsed workflow (or action) document
///
/// Jobs are kept in a `BTreeMap` so that every traversal visits them in
/// lexicographic order and the rendered diagrams are reproducible.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workflow {
    /// Workflow name, if declared
    #[serde(default)]
    pub name: Option<String>,

    /// Jobs keyed by job id
    #[serde(default)]
    pub jobs: BTreeMap<String, Job>,

    /// `runs:` block of an `action.yml`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runs: Option<ActionRuns>,

    /// Locator the document was loaded from
    #[serde(skip)]
    pub source: Option<String>,
}

impl Workflow {
    /// Build a workflow from `(job id, job)` pairs.
    pub fn from_jobs<I, K>(jobs: I) -> Self
    where
        I: IntoIterator<Item = (K, Job)>,
        K: Into<String>,
    {
        Self {
            jobs: jobs.into_iter().map(|(k, j)| (k.into(), j)).collect(),
            ..Default::default()
        }
    }

    /// Attach the locator this document was loaded from.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// A document is only worth expanding if it has at least one job.
    pub fn has_jobs(&self) -> bool {
        !self.jobs.is_empty()
    }

    /// Expose the steps of a composite action as a single job.
    ///
    /// Documents that already declare jobs, or whose `runs.using` is not
    /// `composite`, are left untouched.
    pub fn promote_composite_steps(&mut self) {
        if self.has_jobs() {
            return;
        }
        let Some(runs) = &self.runs else {
            return;
        };
        if !runs.is_composite() {
            return;
        }
        self.jobs.insert(
            COMPOSITE_JOB.to_string(),
            Job {
                steps: runs.steps.clone(),
                ..Default::default()
            },
        );
    }
}

/// The `runs:` section of an action definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionRuns {
    /// `composite`, `node20`, `docker`, ...
    #[serde(default)]
    pub using: Option<String>,

    /// Steps of a composite action
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl ActionRuns {
    pub fn is_composite(&self) -> bool {
        self.using
            .as_deref()
            .is_some_and(|u| u.eq_ignore_ascii_case("composite"))
    }
}

// ============================================================================
// Job
// ============================================================================

/// A job either delegates to a reusable workflow (`uses`) or runs steps
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Job {
    /// Human-readable name
    #[serde(default)]
    pub name: Option<String>,

    /// Reusable workflow this job delegates to
    #[serde(default)]
    pub uses: Option<String>,

    /// Jobs this job depends on
    #[serde(default)]
    pub needs: Needs,

    /// Steps to execute
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Job {
    /// A job that delegates to a reusable workflow.
    pub fn delegating(uses: impl Into<String>) -> Self {
        Self {
            uses: Some(uses.into()),
            ..Default::default()
        }
    }

    /// A job made of the given steps.
    pub fn with_steps(steps: Vec<Step>) -> Self {
        Self {
            steps,
            ..Default::default()
        }
    }

    /// The delegate reference, if this job calls a reusable workflow.
    ///
    /// An empty `uses:` is treated as absent.
    pub fn delegate(&self) -> Option<&str> {
        self.uses.as_deref().filter(|u| !u.is_empty())
    }
}

/// The `needs:` field of a job
///
/// GitHub accepts either a single job id or a list of them; both forms
/// normalize to an ordered list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Needs(pub Vec<String>);

impl Needs {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for Needs {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum NeedsHelper {
            Empty,
            One(String),
            Many(Vec<String>),
        }

        match NeedsHelper::deserialize(deserializer) {
            Ok(NeedsHelper::Empty) => Ok(Needs::default()),
            Ok(NeedsHelper::One(job)) => Ok(Needs(vec![job])),
            Ok(NeedsHelper::Many(jobs)) => Ok(Needs(jobs)),
            Err(_) => Err(serde::de::Error::custom(
                "invalid needs field: expected a job id or a list of job ids",
            )),
        }
    }
}

// ============================================================================
// Step
// ============================================================================

/// A single step in a job
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Step {
    /// Step name (for logging)
    #[serde(default)]
    pub name: Option<String>,

    /// Step id
    #[serde(default)]
    pub id: Option<String>,

    /// Action this step invokes
    #[serde(default)]
    pub uses: Option<String>,

    /// Shell command this step runs
    #[serde(default)]
    pub run: Option<String>,
}

impl Step {
    /// A step invoking the given action.
    pub fn uses(uses: impl Into<String>) -> Self {
        Self {
            uses: Some(uses.into()),
            ..Default::default()
        }
    }

    /// The action reference, if this step invokes one.
    pub fn action(&self) -> Option<&str> {
        self.uses.as_deref().filter(|u| !u.is_empty())
    }
}
