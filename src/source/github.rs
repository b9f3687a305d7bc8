//! GitHub source
//!
//! Downloads workflow files over HTTP(S) with reqwest and reads local files
//! for plain paths and `file://` locators. GitHub page URLs
//! (`github.com/<owner>/<repo>/blob/<ref>/<path>`) are rewritten to their
//! `raw.githubusercontent.com` form before downloading.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use super::{SourceError, WorkflowSource};
use crate::config::AnalyzerConfig;
use crate::workflow::context::RAW_GITHUB_BASE;

#[derive(Debug)]
pub struct GitHubSource {
    client: reqwest::Client,
    token: Option<String>,
}

impl GitHubSource {
    pub fn new(
        token: Option<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| SourceError::Transport {
                locator: String::new(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            token: token.filter(|t| !t.is_empty()),
        })
    }

    pub fn from_config(config: &AnalyzerConfig) -> Result<Self, SourceError> {
        Self::new(
            config.token.clone(),
            Duration::from_millis(config.timeout_ms),
            &config.user_agent,
        )
    }

    async fn download_url(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        let url = to_raw_url(url);
        debug!(url = %url, "Downloading workflow from URL");

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let transport = |e: reqwest::Error| SourceError::Transport {
            locator: url.clone(),
            message: e.to_string(),
        };

        let response = request.send().await.map_err(transport)?;
        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => {
                return Err(SourceError::NotFound {
                    locator: url.clone(),
                })
            }
            status => {
                return Err(SourceError::Transport {
                    locator: url.clone(),
                    message: format!("unexpected status code: {}", status.as_u16()),
                })
            }
        }

        let body = response.bytes().await.map_err(transport)?;
        Ok(body.to_vec())
    }

    async fn read_file(&self, locator: &str) -> Result<Vec<u8>, SourceError> {
        let path = locator.strip_prefix("file://").unwrap_or(locator);
        debug!(path, "Reading workflow from local file");

        tokio::fs::read(path).await.map_err(|error| {
            if error.kind() == std::io::ErrorKind::NotFound {
                SourceError::NotFound {
                    locator: locator.to_string(),
                }
            } else {
                SourceError::Io {
                    locator: locator.to_string(),
                    error,
                }
            }
        })
    }
}

#[async_trait]
impl WorkflowSource for GitHubSource {
    async fn download(&self, locator: &str) -> Result<Vec<u8>, SourceError> {
        if locator.starts_with("https://") || locator.starts_with("http://") {
            self.download_url(locator).await
        } else {
            self.read_file(locator).await
        }
    }
}

/// Rewrite `https://github.com/<o>/<r>/blob/<ref>/<path>` to the raw URL.
///
/// Any other locator is returned unchanged.
pub fn to_raw_url(locator: &str) -> String {
    match locator.strip_prefix("https://github.com/") {
        Some(rest) if rest.contains("/blob/") => {
            format!("{}/{}", RAW_GITHUB_BASE, rest.replacen("/blob/", "/", 1))
        }
        _ => locator.to_string(),
    }
}
