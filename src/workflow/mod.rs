//! Workflow types and definitions
//!
//! This module contains the document side of the analysis:
//! - `job` - Workflow, Job, Step, and the `needs` field
//! - `action` - ActionReference for parsing "uses" fields
//! - `context` - RepoContext for resolving local references
//! - `loader` - Decode downloaded bytes into a Workflow

pub mod action;
pub mod context;
pub mod job;
pub mod loader;

// Re-export all public types for convenience
pub use action::{ActionReference, DEFAULT_REF};
pub use context::RepoContext;
pub use job::{ActionRuns, Job, Needs, Step, Workflow, COMPOSITE_JOB};
pub use loader::{LoadError, WorkflowLoader};
