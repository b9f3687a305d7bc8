//! In-memory source
//!
//! Serves documents from a map keyed by locator. Unknown locators are
//! reported as [`SourceError::NotFound`]. Every request is recorded so
//! tests can assert which locators were tried.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{SourceError, WorkflowSource};

#[derive(Debug, Default)]
pub struct MemorySource {
    documents: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document under `locator`.
    pub fn with(mut self, locator: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(locator, content);
        self
    }

    pub fn insert(&mut self, locator: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.documents.insert(locator.into(), content.into());
    }

    /// Locators requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl WorkflowSource for MemorySource {
    async fn download(&self, locator: &str) -> Result<Vec<u8>, SourceError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(locator.to_string());
        }
        self.documents
            .get(locator)
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                locator: locator.to_string(),
            })
    }
}
