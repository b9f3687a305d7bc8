//! Analyzer configuration
//!
//! Settings for a run, optionally loaded from a YAML file:
//!
//! ```yaml
//! depth: 4
//! diagram: sequence
//! timeout_ms: 10000
//! user_agent: my-bot/1.0
//! ```
//!
//! Precedence, lowest first: built-in defaults, the config file,
//! command-line flags. `GITHUB_TOKEN` fills in the token when nothing else
//! set one.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Environment variable consulted for the access token
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {file}: {error}")]
    Io { file: String, error: std::io::Error },

    #[error("YAML parse error in {file}: {error}")]
    Yaml {
        file: String,
        error: serde_yaml::Error,
    },

    #[error("depth must be a positive integer")]
    ZeroDepth,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Maximum number of resolution hops
    #[serde(default = "default_depth")]
    pub depth: usize,

    /// Diagram style: `flowchart` or `sequence`
    #[serde(default = "default_diagram")]
    pub diagram: String,

    /// Access token forwarded to the source as a bearer token
    #[serde(default, skip_serializing)]
    pub token: Option<String>,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_depth() -> usize {
    2
}

fn default_diagram() -> String {
    "flowchart".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_user_agent() -> String {
    concat!("wk2mmd/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            depth: default_depth(),
            diagram: default_diagram(),
            token: None,
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl AnalyzerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
            file: file.clone(),
            error,
        })?;
        let config: AnalyzerConfig =
            serde_yaml::from_str(&content).map_err(|error| ConfigError::Yaml { file, error })?;
        config.validate()?;
        Ok(config)
    }

    /// Fill in the token from `GITHUB_TOKEN` when none is configured.
    pub fn with_env_token(self) -> Self {
        self.with_token_fallback(std::env::var(TOKEN_ENV).ok())
    }

    fn with_token_fallback(mut self, token: Option<String>) -> Self {
        if self.token.is_none() {
            self.token = token.filter(|t| !t.is_empty());
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        Ok(())
    }
}
