//! Repository context for resolving local references
//!
//! A `./path` reference inside a workflow is relative to the repository the
//! workflow lives in. The context records where that repository is, derived
//! from the locator of the root workflow.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

/// Base URL for raw file downloads from GitHub
pub const RAW_GITHUB_BASE: &str = "https://raw.githubusercontent.com";

// https://raw.githubusercontent.com/owner/repo/branch/path/to/file.yml
// https://github.com/owner/repo/blob/branch/path/to/file.yml
static REPO_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://(?:raw\.githubusercontent\.com|github\.com)/([^/]+)/([^/]+)/(?:blob/)?([^/]+)/")
        .unwrap()
});

/// Where the repository of the workflow being analyzed lives
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RepoContext {
    /// A repository on GitHub at a given ref
    GitHub {
        owner: String,
        repo: String,
        git_ref: String,
    },

    /// A checkout on the local filesystem
    LocalCheckout { root: PathBuf },

    /// Nothing could be derived from the locator
    #[default]
    Unknown,
}

impl RepoContext {
    pub fn github(
        owner: impl Into<String>,
        repo: impl Into<String>,
        git_ref: impl Into<String>,
    ) -> Self {
        RepoContext::GitHub {
            owner: owner.into(),
            repo: repo.into(),
            git_ref: git_ref.into(),
        }
    }

    /// Derive the context from the locator of a workflow file.
    pub fn from_locator(locator: &str) -> Self {
        if let Some(caps) = REPO_URL_REGEX.captures(locator) {
            return Self::github(&caps[1], &caps[2], &caps[3]);
        }

        if locator.starts_with("http://") || locator.starts_with("https://") {
            return RepoContext::Unknown;
        }

        let path = Path::new(locator.strip_prefix("file://").unwrap_or(locator));
        checkout_root(path)
            .map(|root| RepoContext::LocalCheckout { root })
            .unwrap_or_default()
    }

    pub fn owner(&self) -> Option<&str> {
        match self {
            RepoContext::GitHub { owner, .. } => Some(owner),
            _ => None,
        }
    }

    pub fn repo(&self) -> Option<&str> {
        match self {
            RepoContext::GitHub { repo, .. } => Some(repo),
            _ => None,
        }
    }

    pub fn git_ref(&self) -> Option<&str> {
        match self {
            RepoContext::GitHub { git_ref, .. } => Some(git_ref),
            _ => None,
        }
    }

    /// Turn a repository-relative path into a locator a source can fetch.
    pub fn locate(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        match self {
            RepoContext::GitHub {
                owner,
                repo,
                git_ref,
            } => format!("{RAW_GITHUB_BASE}/{owner}/{repo}/{git_ref}/{path}"),
            RepoContext::LocalCheckout { root } => root.join(path).display().to_string(),
            RepoContext::Unknown => path.to_string(),
        }
    }
}

/// The directory holding `.github/`, if the path runs through one.
fn checkout_root(path: &Path) -> Option<PathBuf> {
    let mut root = PathBuf::new();
    for component in path.components() {
        if component.as_os_str() == ".github" {
            if root.as_os_str().is_empty() {
                root.push(".");
            }
            return Some(root);
        }
        root.push(component);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_url() {
        let ctx = RepoContext::from_locator(
            "https://raw.githubusercontent.com/owner/repo/branch/path/to/file.yml",
        );
        assert_eq!(ctx, RepoContext::github("owner", "repo", "branch"));
        assert_eq!(ctx.owner(), Some("owner"));
        assert_eq!(ctx.repo(), Some("repo"));
        assert_eq!(ctx.git_ref(), Some("branch"));
    }

    #[test]
    fn test_from_blob_url() {
        let ctx = RepoContext::from_locator(
            "https://github.com/octo/tools/blob/main/.github/workflows/ci.yml",
        );
        assert_eq!(ctx, RepoContext::github("octo", "tools", "main"));
    }

    #[test]
    fn test_from_other_url() {
        let ctx = RepoContext::from_locator("https://example.com/ci.yml");
        assert_eq!(ctx, RepoContext::Unknown);
        assert_eq!(ctx.owner(), None);
    }

    #[test]
    fn test_from_local_checkout() {
        let ctx = RepoContext::from_locator("project/.github/workflows/ci.yml");
        assert_eq!(
            ctx,
            RepoContext::LocalCheckout {
                root: PathBuf::from("project")
            }
        );

        let ctx = RepoContext::from_locator(".github/workflows/ci.yml");
        assert_eq!(
            ctx,
            RepoContext::LocalCheckout {
                root: PathBuf::from(".")
            }
        );

        let ctx = RepoContext::from_locator("file:///srv/repo/.github/workflows/ci.yml");
        assert_eq!(
            ctx,
            RepoContext::LocalCheckout {
                root: PathBuf::from("/srv/repo")
            }
        );
    }

    #[test]
    fn test_from_plain_file() {
        assert_eq!(RepoContext::from_locator("ci.yml"), RepoContext::Unknown);
    }

    #[test]
    fn test_locate() {
        let ctx = RepoContext::github("octo", "tools", "v2");
        assert_eq!(
            ctx.locate(".github/workflows/build.yml"),
            "https://raw.githubusercontent.com/octo/tools/v2/.github/workflows/build.yml"
        );

        let ctx = RepoContext::LocalCheckout {
            root: PathBuf::from("project"),
        };
        assert_eq!(
            ctx.locate(".github/actions/setup/action.yml"),
            Path::new("project")
                .join(".github/actions/setup/action.yml")
                .display()
                .to_string()
        );

        assert_eq!(RepoContext::Unknown.locate("actions/x"), "actions/x");
    }
}
