//! Analysis error types

use crate::source::SourceError;
use crate::workflow::LoadError;

/// Errors that abort an analysis
///
/// Only failures on the root workflow (or a bad request) end up here.
/// Failures while resolving referenced documents degrade that branch of the
/// tree to a leaf instead.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("failed to download workflow {locator}: {source}")]
    SourceUnavailable {
        locator: String,
        #[source]
        source: SourceError,
    },

    #[error("failed to parse workflow YAML: {0}")]
    Load(#[from] LoadError),

    #[error("invalid diagram type: {0} (expected flowchart or sequence)")]
    UnsupportedDiagramType(String),
}
