//! # wk2mmd
//!
//! Follow every reusable workflow and composite action a GitHub Actions
//! workflow uses, build the resulting dependency tree, and render it as a
//! Mermaid diagram.
//!
//! ## Features
//!
//! - **Reference parsing** - Local (`./path`), remote (`owner/repo/path@ref`)
//!   and marketplace (`owner/action@ref`) references
//! - **Bounded recursion** - A depth budget spent one unit per fetch
//! - **Cycle safe** - A workflow that calls itself ends in a leaf
//! - **Stable ids** - Nodes sharing a label keep distinct, path-qualified ids
//! - **Two diagram styles** - Mermaid flowchart or sequence diagram
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wk2mmd::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let runner = WorkflowRunner::new(&AnalyzerConfig::default())?;
//!     let diagram = runner
//!         .run(
//!             "https://github.com/octo/app/blob/main/.github/workflows/ci.yml",
//!             3,
//!             "flowchart",
//!         )
//!         .await?;
//!
//!     println!("{}", diagram);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod diagram;
pub mod engine;
pub mod source;
pub mod workflow;

// Re-export main types
pub use config::{AnalyzerConfig, ConfigError};
pub use diagram::{render_flowchart, render_sequence, DiagramType};
pub use engine::{
    build_uses_tree, collect_all_uses, Analysis, AnalysisError, ReferenceFetcher, TreeBuilder,
    UsesNode, WorkflowResolver, WorkflowRunner,
};
pub use source::{GitHubSource, MemorySource, SourceError, WorkflowSource};
pub use workflow::{
    ActionReference, Job, LoadError, Needs, RepoContext, Step, Workflow, WorkflowLoader,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::AnalyzerConfig;
    pub use crate::diagram::DiagramType;
    pub use crate::engine::{
        collect_all_uses, AnalysisError, ReferenceFetcher, TreeBuilder, UsesNode,
        WorkflowResolver, WorkflowRunner, ROOT_NAME,
    };
    pub use crate::source::{GitHubSource, MemorySource, SourceError, WorkflowSource};
    pub use crate::workflow::{
        ActionReference, Job, LoadError, Needs, RepoContext, Step, Workflow, WorkflowLoader,
    };
}
