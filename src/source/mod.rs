//! Workflow sources
//!
//! A source turns a locator (URL or filesystem path) into raw document
//! bytes. The engine only sees the [`WorkflowSource`] trait:
//! - `github`: HTTP(S) downloads via reqwest, plus local files
//! - `memory`: an in-memory map, for tests and embedding

use async_trait::async_trait;

pub mod github;
pub mod memory;

pub use github::{to_raw_url, GitHubSource};
pub use memory::MemorySource;

/// Errors raised while downloading a document
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("not found: {locator}")]
    NotFound { locator: String },

    #[error("transport error for {locator}: {message}")]
    Transport { locator: String, message: String },

    #[error("failed to read {locator}: {error}")]
    Io {
        locator: String,
        error: std::io::Error,
    },
}

impl SourceError {
    pub fn locator(&self) -> &str {
        match self {
            SourceError::NotFound { locator }
            | SourceError::Transport { locator, .. }
            | SourceError::Io { locator, .. } => locator,
        }
    }
}

/// Fetches raw bytes for a locator
#[async_trait]
pub trait WorkflowSource: Send + Sync {
    async fn download(&self, locator: &str) -> Result<Vec<u8>, SourceError>;
}

#[async_trait]
impl<S: WorkflowSource + ?Sized> WorkflowSource for &S {
    async fn download(&self, locator: &str) -> Result<Vec<u8>, SourceError> {
        (**self).download(locator).await
    }
}

#[async_trait]
impl<S: WorkflowSource + ?Sized> WorkflowSource for std::sync::Arc<S> {
    async fn download(&self, locator: &str) -> Result<Vec<u8>, SourceError> {
        (**self).download(locator).await
    }
}
