//! Reference resolution engine
//!
//! This module contains:
//! - `fetcher` - Resolves `uses:` strings to documents through a source
//! - `tree` - Builds the dependency tree of a workflow
//! - `collector` - Flat list of every reachable reference
//! - `runner` - Root download, tree building and rendering end to end
//! - `error` - Analysis error types

pub mod collector;
pub mod error;
pub mod fetcher;
pub mod runner;
pub mod tree;

pub use collector::collect_all_uses;
pub use error::AnalysisError;
pub use fetcher::{ReferenceFetcher, WorkflowResolver};
pub use runner::{Analysis, WorkflowRunner, ROOT_NAME};
pub use tree::{build_uses_tree, TreeBuilder, UsesNode, PATH_SEPARATOR};
