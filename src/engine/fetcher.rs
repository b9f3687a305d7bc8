//! Reusable-reference fetcher
//!
//! Resolves a `uses:` string to the document it points at: classify it,
//! derive candidate locators, download and decode the first one that yields
//! a document with at least one job.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::source::WorkflowSource;
use crate::workflow::{ActionReference, RepoContext, Workflow, WorkflowLoader};

/// Resolves a `uses:` string to a workflow document
///
/// `None` means the reference is a leaf: it points at nothing fetchable
/// (marketplace, docker, shell text) or the document is unavailable. A
/// failed resolution is final for the current run.
#[async_trait]
pub trait WorkflowResolver: Send + Sync {
    async fn resolve(&self, uses: &str) -> Option<Workflow>;
}

/// In-memory resolver keyed by the raw `uses:` string
#[async_trait]
impl WorkflowResolver for HashMap<String, Workflow> {
    async fn resolve(&self, uses: &str) -> Option<Workflow> {
        self.get(uses).cloned()
    }
}

/// Resolver backed by a [`WorkflowSource`]
#[derive(Debug)]
pub struct ReferenceFetcher<S> {
    source: S,
    context: RepoContext,
}

impl<S: WorkflowSource> ReferenceFetcher<S> {
    pub fn new(source: S, context: RepoContext) -> Self {
        Self { source, context }
    }

    pub fn context(&self) -> &RepoContext {
        &self.context
    }

    /// Try each candidate location of `reference` in order.
    pub async fn fetch_reference(&self, reference: &ActionReference) -> Option<Workflow> {
        if !reference.is_resolvable() {
            debug!(uses = reference.raw(), kind = reference.kind(), "Not fetching reference");
            return None;
        }

        for locator in reference.candidate_locations() {
            let data = match self.source.download(&locator).await {
                Ok(data) => data,
                Err(e) => {
                    debug!(locator = %locator, error = %e, "Candidate not available");
                    continue;
                }
            };

            match WorkflowLoader::parse(&locator, &data) {
                Ok(workflow) if workflow.has_jobs() => {
                    debug!(
                        uses = reference.raw(),
                        locator = %locator,
                        jobs = workflow.jobs.len(),
                        "Fetched referenced workflow"
                    );
                    return Some(workflow);
                }
                Ok(_) => debug!(locator = %locator, "Candidate has no jobs"),
                Err(e) => debug!(locator = %locator, error = %e, "Candidate failed to parse"),
            }
        }

        warn!(uses = reference.raw(), "Failed to fetch referenced workflow");
        None
    }
}

#[async_trait]
impl<S: WorkflowSource> WorkflowResolver for ReferenceFetcher<S> {
    async fn resolve(&self, uses: &str) -> Option<Workflow> {
        let reference = ActionReference::parse(uses, &self.context);
        self.fetch_reference(&reference).await
    }
}
