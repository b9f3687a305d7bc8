//! Dependency tree builder
//!
//! Walks a workflow and expands every reusable-workflow call and every step
//! action through a [`WorkflowResolver`], producing a tree of [`UsesNode`]s.
//!
//! - Jobs become children of the document node, in job-name order.
//! - A delegating job's children are the jobs of the resolved delegate.
//! - A step with `uses:` becomes a child of its job; if the action resolves,
//!   the action's jobs become the step node's children.
//!
//! The depth budget is spent one unit per resolution hop. A traversal-wide
//! set of ancestor-qualified ids and the chain of documents currently being
//! expanded stop cycles.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use futures::future::BoxFuture;
use tracing::debug;

use super::fetcher::WorkflowResolver;
use crate::workflow::{Step, Workflow};

/// Separator between the segments of a node's unique id
pub const PATH_SEPARATOR: char = '/';

/// One point in the dependency tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsesNode {
    /// Label shown in diagrams; may repeat across the tree
    pub name: String,
    /// Ancestor-qualified id, unique across the tree
    pub unique_id: String,
    pub children: Vec<UsesNode>,
}

impl UsesNode {
    pub fn new(name: impl Into<String>, unique_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unique_id: unique_id.into(),
            children: Vec::new(),
        }
    }

    /// A root node, whose id is its name.
    pub fn root(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(name.clone(), name)
    }

    /// A child of this node with the given local id segment and label.
    fn child(&self, segment: &str, name: &str) -> UsesNode {
        UsesNode::new(name, qualify(&self.unique_id, segment))
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// All nodes, depth-first, parents before children
    pub fn descendants(&self) -> Vec<&UsesNode> {
        let mut nodes = vec![self];
        for child in &self.children {
            nodes.extend(child.descendants());
        }
        nodes
    }

    /// Every `(parent, child)` pair, depth-first
    pub fn edges(&self) -> Vec<(&UsesNode, &UsesNode)> {
        let mut edges = Vec::new();
        for child in &self.children {
            edges.push((self, child));
            edges.extend(child.edges());
        }
        edges
    }

    /// Number of nodes in this subtree, itself included
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(UsesNode::node_count).sum::<usize>()
    }

    pub fn find(&self, unique_id: &str) -> Option<&UsesNode> {
        if self.unique_id == unique_id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(unique_id))
    }
}

fn qualify(parent_id: &str, segment: &str) -> String {
    if parent_id.is_empty() {
        segment.to_string()
    } else {
        format!("{parent_id}{PATH_SEPARATOR}{segment}")
    }
}

/// Identity of a document on the cycle chain.
///
/// Local spellings of one file compare equal: a `file://` prefix and `.`
/// path segments are dropped. Documents without a source fall back to the
/// reference that produced them.
fn document_identity(source: Option<&str>, fallback: &str) -> String {
    let Some(source) = source else {
        return fallback.to_string();
    };
    let local = source.strip_prefix("file://").unwrap_or(source);
    if local.contains("://") {
        return local.to_string();
    }
    Path::new(local)
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect::<PathBuf>()
        .display()
        .to_string()
}

/// State shared by every branch of one traversal
#[derive(Debug, Default)]
struct Traversal {
    /// Ancestor-qualified ids already expanded
    visited: HashSet<String>,
    /// Every id handed out so far
    ids: HashSet<String>,
    /// Identities of the documents on the current path from the root
    chain: Vec<String>,
}

impl Traversal {
    /// A child of `parent` whose id is not used anywhere else in the tree.
    ///
    /// On a collision the local segment gets a `#n` suffix, counting from 2.
    fn child(&mut self, parent: &UsesNode, segment: &str, name: &str) -> UsesNode {
        let mut local = segment.to_string();
        let mut n = 1;
        while self.ids.contains(&qualify(&parent.unique_id, &local)) {
            n += 1;
            local = format!("{segment}#{n}");
        }
        let node = parent.child(&local, name);
        self.ids.insert(node.unique_id.clone());
        node
    }
}

pub struct TreeBuilder<'r> {
    resolver: Option<&'r dyn WorkflowResolver>,
    depth: usize,
}

impl<'r> TreeBuilder<'r> {
    /// A builder without a resolver; references stay leaves.
    pub fn new(depth: usize) -> Self {
        Self {
            resolver: None,
            depth,
        }
    }

    pub fn with_resolver(mut self, resolver: &'r dyn WorkflowResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Build the tree for `root`, or `None` when the depth budget is zero.
    pub async fn build(&self, root_name: &str, root: &Workflow) -> Option<UsesNode> {
        let mut traversal = Traversal::default();
        traversal.ids.insert(root_name.to_string());
        let identity = document_identity(root.source.as_deref(), root_name);
        self.build_node(root_name, root_name, root, identity, self.depth, &mut traversal)
            .await
    }

    /// Build the node `id` for `workflow`, with one child per job.
    fn build_node<'a>(
        &'a self,
        name: &'a str,
        id: &'a str,
        workflow: &'a Workflow,
        identity: String,
        depth: usize,
        traversal: &'a mut Traversal,
    ) -> BoxFuture<'a, Option<UsesNode>> {
        Box::pin(async move {
            if depth == 0 {
                return None;
            }

            let mut node = UsesNode::new(name, id);
            if !traversal.visited.insert(node.unique_id.clone()) {
                debug!(id = %node.unique_id, "Already visited");
                return None;
            }
            traversal.chain.push(identity);

            for (job_name, job) in &workflow.jobs {
                let mut job_node = traversal.child(&node, job_name, job_name);

                if let Some(uses) = job.delegate() {
                    job_node.children = self
                        .expand(uses, &job_node.unique_id, depth, traversal)
                        .await;
                } else {
                    for uses in job.steps.iter().filter_map(Step::action) {
                        let mut step_node = traversal.child(&job_node, uses, uses);
                        step_node.children = self
                            .expand(uses, &step_node.unique_id, depth, traversal)
                            .await;
                        job_node.children.push(step_node);
                    }
                }

                node.children.push(job_node);
            }

            traversal.chain.pop();
            Some(node)
        })
    }

    /// Resolve `uses` and return the delegate's job nodes, ids rooted at
    /// `node_id`.
    async fn expand(
        &self,
        uses: &str,
        node_id: &str,
        depth: usize,
        traversal: &mut Traversal,
    ) -> Vec<UsesNode> {
        let Some(resolver) = self.resolver else {
            return Vec::new();
        };
        if depth <= 1 {
            return Vec::new();
        }

        let Some(delegate) = resolver.resolve(uses).await else {
            return Vec::new();
        };

        let identity = document_identity(delegate.source.as_deref(), uses);
        if traversal.chain.contains(&identity) {
            debug!(uses, identity = %identity, "Cycle detected, not expanding");
            return Vec::new();
        }

        self.build_node(uses, node_id, &delegate, identity, depth - 1, traversal)
            .await
            .map(|subtree| subtree.children)
            .unwrap_or_default()
    }
}

/// Build the tree for `root` with the given resolver and depth budget.
pub async fn build_uses_tree(
    root_name: &str,
    root: &Workflow,
    resolver: Option<&dyn WorkflowResolver>,
    depth: usize,
) -> Option<UsesNode> {
    let builder = TreeBuilder::new(depth);
    match resolver {
        Some(resolver) => builder.with_resolver(resolver).build(root_name, root).await,
        None => builder.build(root_name, root).await,
    }
}
