//! Repository URL parsing
//!
//! Turns a user-supplied source-hosting URL into a [`RepositoryIdentity`].
//! The accepted pattern is fixed: `host/owner/name`, with an optional
//! scheme and an optional `.git` suffix. Anything else is a terminal parse
//! failure, deliberately distinct from an upstream failure: bad input is
//! the caller's problem, an unreachable API is ours.

use thiserror::Error;
use url::Url;

use crate::onboard::providers::models::RepositoryIdentity;

/// A repository URL that does not match the `host/owner/name` pattern
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid repository URL: {0}")]
pub struct RepositoryUrlError(pub String);

/// Parses a repository URL into its owner/name identity
///
/// Path segments beyond the first two are ignored, so deep links into a
/// repository (issues pages, blob views) still resolve to the repository
/// itself.
///
/// # Examples
///
/// ```
/// use onboardhub::onboard::analyzer::repository_url::parse_repository_url;
///
/// let id = parse_repository_url("https://github.com/rust-lang/rust").unwrap();
/// assert_eq!(id.owner, "rust-lang");
/// assert_eq!(id.name, "rust");
/// ```
pub fn parse_repository_url(input: &str) -> Result<RepositoryIdentity, RepositoryUrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(RepositoryUrlError(input.to_string()));
    }

    // Accept scheme-less input like "github.com/owner/name"
    let normalized = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&normalized).map_err(|_| RepositoryUrlError(input.to_string()))?;
    if url.host_str().is_none() {
        return Err(RepositoryUrlError(input.to_string()));
    }

    let mut segments = url
        .path_segments()
        .ok_or_else(|| RepositoryUrlError(input.to_string()))?
        .filter(|segment| !segment.is_empty());

    let owner = segments
        .next()
        .ok_or_else(|| RepositoryUrlError(input.to_string()))?;
    let name = segments
        .next()
        .map(|segment| segment.trim_end_matches(".git"))
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| RepositoryUrlError(input.to_string()))?;

    Ok(RepositoryIdentity {
        owner: owner.to_string(),
        name: name.to_string(),
    })
}
