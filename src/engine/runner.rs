//! End-to-end workflow analysis
//!
//! Download the root workflow, decode it, build the uses tree and render it.
//! Failures on the root workflow abort; failures further down only prune the
//! tree.

use std::sync::Arc;

use tracing::{debug, info};

use super::collector::collect_all_uses;
use super::error::AnalysisError;
use super::fetcher::ReferenceFetcher;
use super::tree::{TreeBuilder, UsesNode};
use crate::config::AnalyzerConfig;
use crate::diagram::DiagramType;
use crate::source::{to_raw_url, GitHubSource, SourceError, WorkflowSource};
use crate::workflow::{RepoContext, Workflow, WorkflowLoader};

/// Name of the root node of every tree
pub const ROOT_NAME: &str = "workflow";

/// Result of analyzing one workflow
#[derive(Debug, Clone)]
pub struct Analysis {
    pub workflow: Workflow,
    pub context: RepoContext,
    pub tree: UsesNode,
}

pub struct WorkflowRunner {
    source: Arc<dyn WorkflowSource>,
}

impl WorkflowRunner {
    /// A runner that downloads from GitHub and the local filesystem.
    pub fn new(config: &AnalyzerConfig) -> Result<Self, SourceError> {
        Ok(Self::with_source(GitHubSource::from_config(config)?))
    }

    pub fn with_source(source: impl WorkflowSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
        }
    }

    fn fetcher(&self, context: RepoContext) -> ReferenceFetcher<Arc<dyn WorkflowSource>> {
        ReferenceFetcher::new(Arc::clone(&self.source), context)
    }

    /// Download and decode the root workflow.
    pub async fn load(&self, locator: &str) -> Result<Workflow, AnalysisError> {
        let locator = to_raw_url(locator);
        let data = self
            .source
            .download(&locator)
            .await
            .map_err(|source| AnalysisError::SourceUnavailable {
                locator: locator.clone(),
                source,
            })?;

        debug!(
            content = %String::from_utf8_lossy(&data[..data.len().min(300)]),
            "Workflow content"
        );

        Ok(WorkflowLoader::parse(&locator, &data)?)
    }

    /// Build the uses tree of the workflow at `locator`.
    pub async fn analyze(&self, locator: &str, depth: usize) -> Result<Analysis, AnalysisError> {
        let workflow = self.load(locator).await?;
        let context = RepoContext::from_locator(locator);
        debug!(?context, "Extracted repository context");

        let fetcher = self.fetcher(context.clone());
        let tree = TreeBuilder::new(depth)
            .with_resolver(&fetcher)
            .build(ROOT_NAME, &workflow)
            .await
            .unwrap_or_else(|| UsesNode::root(ROOT_NAME));

        info!(nodes = tree.node_count(), depth, "Built uses tree");

        Ok(Analysis {
            workflow,
            context,
            tree,
        })
    }

    /// Every reference reachable from the workflow at `locator`.
    pub async fn list_uses(&self, locator: &str, depth: usize) -> Result<Vec<String>, AnalysisError> {
        let workflow = self.load(locator).await?;
        let fetcher = self.fetcher(RepoContext::from_locator(locator));
        let uses = collect_all_uses(&workflow, Some(&fetcher), depth).await;
        info!(uses = uses.len(), "All uses found recursively");
        Ok(uses)
    }

    /// Analyze the workflow at `locator` and render it as `diagram`.
    ///
    /// The diagram type is checked before anything is downloaded.
    pub async fn run(
        &self,
        locator: &str,
        depth: usize,
        diagram: &str,
    ) -> Result<String, AnalysisError> {
        let diagram: DiagramType = diagram.parse()?;
        let analysis = self.analyze(locator, depth).await?;
        Ok(diagram.render(&analysis.tree))
    }
}
