//! Flattened uses collector
//!
//! Lists every `uses:` string reachable from a workflow, in visitation
//! order, without building a tree.

use std::collections::HashSet;

use futures::future::BoxFuture;
use tracing::info;

use super::fetcher::WorkflowResolver;
use crate::workflow::{Step, Workflow};

/// Collect job-level and step-level references, following resolvable ones
/// while the depth budget allows.
///
/// Each distinct reference string is reported and expanded once.
pub async fn collect_all_uses(
    workflow: &Workflow,
    resolver: Option<&dyn WorkflowResolver>,
    depth: usize,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut uses = Vec::new();
    collect_into(workflow, resolver, depth, &mut seen, &mut uses).await;
    uses
}

fn collect_into<'a>(
    workflow: &'a Workflow,
    resolver: Option<&'a dyn WorkflowResolver>,
    depth: usize,
    seen: &'a mut HashSet<String>,
    out: &'a mut Vec<String>,
) -> BoxFuture<'a, ()> {
    Box::pin(async move {
        if depth == 0 {
            return;
        }

        info!(
            workflow = workflow.name.as_deref().unwrap_or_default(),
            source = workflow.source.as_deref().unwrap_or_default(),
            "Collecting uses"
        );

        let mut references: Vec<&str> = Vec::new();
        for job in workflow.jobs.values() {
            references.extend(job.delegate());
            references.extend(job.steps.iter().filter_map(Step::action));
        }

        for reference in references {
            if !seen.insert(reference.to_string()) {
                continue;
            }
            out.push(reference.to_string());

            let Some(resolver) = resolver else {
                continue;
            };
            if depth <= 1 {
                continue;
            }
            if let Some(child) = resolver.resolve(reference).await {
                collect_into(&child, Some(resolver), depth - 1, seen, out).await;
            }
        }
    })
}
