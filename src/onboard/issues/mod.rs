//! Issue classification and cross-repository search
//!
//! [`IssueFinder`] answers two questions: "which open issues in this
//! repository fit my experience level" and "which open issues anywhere fit
//! my skills". Both absorb upstream failure into mock data from
//! [`crate::onboard::fallback`]; the only error a caller can see is asking
//! the global search for nothing at all.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use thiserror::Error;

use crate::onboard::fallback;
use crate::onboard::providers::models::{Comment, Issue, RepositoryIdentity};
use crate::onboard::providers::GithubClient;
use crate::onboard::scoring::compute_match_score;

/// Contributor experience level, mapped 1:1 to a fixed upstream label
///
/// The label mapping is a design choice, not a discoverable property of the
/// upstream API: "good first issue" and "help wanted" are widespread
/// conventions, "enhancement" for the pro tier is this product's own
/// reading.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Beginner,
    Intermediate,
    Pro,
}

impl DifficultyTier {
    /// The upstream issue label this tier queries for
    pub fn label(&self) -> &'static str {
        match self {
            DifficultyTier::Beginner => "good first issue",
            DifficultyTier::Intermediate => "help wanted",
            DifficultyTier::Pro => "enhancement",
        }
    }

    /// Resolves an optional user-supplied level string
    ///
    /// Absent and unrecognized values both resolve to the beginner tier;
    /// an experience level is a hint, not something worth failing over.
    pub fn from_level_param(level: Option<&str>) -> Self {
        level
            .and_then(|value| value.parse().ok())
            .unwrap_or(DifficultyTier::Beginner)
    }
}

/// A global search with neither skills nor a keyword
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Skills or keyword is required")]
pub struct EmptyQueryError;

/// Issue discovery over the upstream API with mock fallback
#[derive(Debug, Clone)]
pub struct IssueFinder {
    client: GithubClient,
}

impl IssueFinder {
    pub fn new(client: GithubClient) -> Self {
        IssueFinder { client }
    }

    /// Open issues in one repository matching a difficulty tier
    ///
    /// Fetches open issues carrying the tier's label, strips pull requests
    /// (the upstream issues endpoint conflates the two kinds), and
    /// preserves upstream ordering. Upstream failure yields tier-matching
    /// mock issues instead of an error.
    pub async fn issues_for_tier(
        &self,
        id: &RepositoryIdentity,
        tier: DifficultyTier,
    ) -> Vec<Issue> {
        tracing::info!("fetching issues for {} [{}]", id, tier);

        match self.client.list_issues(id, tier.label()).await {
            Ok(items) => items
                .into_iter()
                .filter(|item| !item.is_pull_request())
                .map(|item| item.into_issue())
                .collect(),
            Err(e) => {
                tracing::warn!("issue fetch for {} failed, serving mock issues: {}", id, e);
                fallback::mock_issues(tier)
            }
        }
    }

    /// The first page of comments on an issue
    ///
    /// Never cached; upstream failure yields mock comments.
    pub async fn issue_comments(&self, id: &RepositoryIdentity, issue_number: u64) -> Vec<Comment> {
        tracing::info!("fetching comments for {} #{}", id, issue_number);

        match self.client.list_issue_comments(id, issue_number).await {
            Ok(comments) => comments,
            Err(e) => {
                tracing::warn!(
                    "comment fetch for {} #{} failed, serving mock comments: {}",
                    id,
                    issue_number,
                    e
                );
                fallback::mock_comments(issue_number)
            }
        }
    }

    /// Cross-repository issue search driven by skills or a keyword
    ///
    /// Requires at least one of the two. Results carry the owning
    /// repository (derived from the upstream back-reference) and a
    /// skill-match score, and are ranked by that score; the sort is stable,
    /// so a keyword-only search (all scores zero) keeps the upstream
    /// most-recently-updated ordering. Upstream failure falls back to the
    /// mock corpus, which never comes back empty.
    pub async fn search_global(
        &self,
        skills: &[String],
        keyword: Option<&str>,
    ) -> Result<Vec<Issue>, EmptyQueryError> {
        let keyword = keyword.map(str::trim).filter(|k| !k.is_empty());
        if skills.is_empty() && keyword.is_none() {
            return Err(EmptyQueryError);
        }

        let query = build_global_query(skills, keyword);
        tracing::info!("searching issues globally: {}", query);

        let mut issues = match self.client.search_issues(&query).await {
            Ok(items) => items
                .into_iter()
                .map(|item| item.into_global_issue())
                .collect(),
            Err(e) => {
                tracing::warn!("global search failed, serving mock issues: {}", e);
                fallback::mock_global_issues(skills)
            }
        };

        for issue in &mut issues {
            issue.match_score = Some(compute_match_score(issue, skills));
        }
        issues.sort_by(|a, b| b.match_score.cmp(&a.match_score));

        Ok(issues)
    }
}

/// Builds the upstream search query
///
/// Always scoped to open issues. A keyword searches title and body; absent
/// a keyword, the skills become an OR-group of quoted terms.
fn build_global_query(skills: &[String], keyword: Option<&str>) -> String {
    let mut query = String::from("is:issue is:open");

    if let Some(keyword) = keyword {
        query.push_str(&format!(" {} in:title,body", keyword));
    } else if !skills.is_empty() {
        let quoted: Vec<String> = skills.iter().map(|skill| format!("\"{}\"", skill)).collect();
        query.push_str(&format!(" ({})", quoted.join(" OR ")));
    }

    query
}
