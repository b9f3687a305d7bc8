//! Action reference parsing
//!
//! Classifies the value of a `uses:` field into a local path, a remote
//! action or reusable workflow inside another repository, a marketplace
//! action, or something this tool does not follow.

use std::fmt;

use tracing::debug;

use super::context::RepoContext;

/// Ref used for remote references that omit `@ref`
pub const DEFAULT_REF: &str = "main";

/// Parsed form of a `uses:` value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionReference {
    /// `./path` or `.github/...` inside the current repository
    Local {
        path: String,
        context: RepoContext,
        raw: String,
    },

    /// `owner/repo/path@ref`
    Remote {
        owner: String,
        repo: String,
        path: String,
        git_ref: String,
        raw: String,
    },

    /// `owner/action@ref`, a published action that is never fetched
    Marketplace {
        owner: String,
        action: String,
        git_ref: Option<String>,
        raw: String,
    },

    /// `docker://...`, shell text, or anything else
    Unrecognized { raw: String },
}

impl ActionReference {
    /// Classify `raw` relative to the repository in `context`.
    ///
    /// Never fails: input matching none of the grammars becomes
    /// [`ActionReference::Unrecognized`].
    pub fn parse(raw: &str, context: &RepoContext) -> Self {
        let reference = Self::classify(raw, context);
        debug!(uses = raw, kind = reference.kind(), "Classified action reference");
        reference
    }

    fn classify(raw: &str, context: &RepoContext) -> Self {
        let uses = raw.trim();

        if let Some(path) = uses.strip_prefix("./") {
            return ActionReference::Local {
                path: path.to_string(),
                context: context.clone(),
                raw: raw.to_string(),
            };
        }
        if uses.starts_with(".github/") {
            return ActionReference::Local {
                path: uses.to_string(),
                context: context.clone(),
                raw: raw.to_string(),
            };
        }

        let unrecognized = || ActionReference::Unrecognized {
            raw: raw.to_string(),
        };

        if uses.contains("://") {
            return unrecognized();
        }

        let (spec, git_ref) = match uses.split_once('@') {
            Some((spec, git_ref)) => (spec, Some(git_ref).filter(|r| !r.is_empty())),
            None => (uses, None),
        };

        let mut segments = spec.splitn(3, '/');
        let (Some(owner), Some(repo)) = (segments.next(), segments.next()) else {
            return unrecognized();
        };
        if !is_name_segment(owner) || !is_name_segment(repo) {
            return unrecognized();
        }

        let path = segments.next().unwrap_or("").trim_end_matches('/');
        if path.is_empty() {
            return ActionReference::Marketplace {
                owner: owner.to_string(),
                action: repo.to_string(),
                git_ref: git_ref.map(str::to_string),
                raw: raw.to_string(),
            };
        }
        if path.chars().any(char::is_whitespace) {
            return unrecognized();
        }

        ActionReference::Remote {
            owner: owner.to_string(),
            repo: repo.to_string(),
            path: path.to_string(),
            git_ref: git_ref.unwrap_or(DEFAULT_REF).to_string(),
            raw: raw.to_string(),
        }
    }

    /// The original `uses:` string
    pub fn raw(&self) -> &str {
        match self {
            ActionReference::Local { raw, .. }
            | ActionReference::Remote { raw, .. }
            | ActionReference::Marketplace { raw, .. }
            | ActionReference::Unrecognized { raw } => raw,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ActionReference::Local { .. } => "local",
            ActionReference::Remote { .. } => "remote",
            ActionReference::Marketplace { .. } => "marketplace",
            ActionReference::Unrecognized { .. } => "unrecognized",
        }
    }

    /// Whether the referenced document can be fetched at all
    pub fn is_resolvable(&self) -> bool {
        matches!(
            self,
            ActionReference::Local { .. } | ActionReference::Remote { .. }
        )
    }

    /// Locators to try, in order, when fetching the referenced document.
    ///
    /// A reusable workflow resolves to its file directly. An action
    /// directory resolves to `action.yml`, then `action.yaml`.
    pub fn candidate_locations(&self) -> Vec<String> {
        match self {
            ActionReference::Local { path, context, .. } => candidate_paths(path)
                .iter()
                .map(|p| context.locate(p))
                .collect(),
            ActionReference::Remote {
                owner,
                repo,
                path,
                git_ref,
                ..
            } => {
                let repo_context = RepoContext::github(owner, repo, git_ref);
                candidate_paths(path)
                    .iter()
                    .map(|p| repo_context.locate(p))
                    .collect()
            }
            ActionReference::Marketplace { .. } | ActionReference::Unrecognized { .. } => {
                Vec::new()
            }
        }
    }
}

impl fmt::Display for ActionReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.raw(), self.kind())
    }
}

fn is_name_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

fn is_workflow_file(path: &str) -> bool {
    path.ends_with(".yml") || path.ends_with(".yaml")
}

fn candidate_paths(path: &str) -> Vec<String> {
    let path = path.trim_end_matches('/');
    if is_workflow_file(path) {
        return vec![path.to_string()];
    }
    if path.is_empty() {
        return vec!["action.yml".to_string(), "action.yaml".to_string()];
    }
    vec![format!("{path}/action.yml"), format!("{path}/action.yaml")]
}
