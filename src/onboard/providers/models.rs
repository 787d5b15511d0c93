//! Common domain models for source-hosting providers
//!
//! This module contains the vendor-agnostic data model shared by the
//! analyzer, the issue finder, and the fallback synthesizer. The shapes
//! mirror what the HTTP API serves to the frontend, so a synthesized value
//! is indistinguishable in structure from a genuinely fetched one.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{AsRefStr, Display, EnumString};

/// An `owner/name` pair identifying a repository on the provider
///
/// Derived once from a user-supplied repository URL (see
/// [`crate::onboard::analyzer::repository_url`]) and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryIdentity {
    /// Account or organization owning the repository
    pub owner: String,

    /// Repository name without the owner prefix
    pub name: String,
}

impl fmt::Display for RepositoryIdentity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A point-in-time read of repository metadata from the upstream API
///
/// Owned exclusively by one analysis request and never mutated after
/// creation. The scoring engine consumes this together with the
/// [`HealthChecklist`].
#[derive(Debug, Clone)]
pub struct RepositorySnapshot {
    /// Repository description, absent for repositories without one
    pub description: Option<String>,

    /// Number of stargazers (stars)
    pub stars: u64,

    /// Number of forks
    pub forks: u64,

    /// Number of open issues (upstream counts pull requests here too)
    pub open_issues_count: u64,

    /// When the repository was last pushed to
    pub pushed_at: Option<DateTime<Utc>>,

    /// Homepage URL configured for the repository
    pub homepage: Option<String>,

    /// Whether the discussions feature is enabled
    pub has_discussions: bool,
}

/// Language name to byte count, in upstream order
///
/// The upstream API returns languages ordered by descending byte count and
/// that ordering is load-bearing: the primary language is defined as the
/// first key, and the tech stack is the first five keys. A plain `HashMap`
/// would destroy the ordering, so this newtype keeps the entries in a `Vec`
/// and (de)serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageBreakdown(Vec<(String, u64)>);

impl LanguageBreakdown {
    pub fn new(entries: Vec<(String, u64)>) -> Self {
        LanguageBreakdown(entries)
    }

    /// The first language key, or `"Unknown"` for an empty breakdown
    pub fn primary_language(&self) -> &str {
        self.0.first().map(|(name, _)| name.as_str()).unwrap_or("Unknown")
    }

    /// Language names in upstream order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn contains(&self, language: &str) -> bool {
        self.0.iter().any(|(name, _)| name == language)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for LanguageBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, bytes) in &self.0 {
            map.serialize_entry(name, bytes)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LanguageBreakdown {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BreakdownVisitor;

        impl<'de> Visitor<'de> for BreakdownVisitor {
            type Value = LanguageBreakdown;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of language name to byte count")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, bytes)) = access.next_entry::<String, u64>()? {
                    entries.push((name, bytes));
                }
                Ok(LanguageBreakdown(entries))
            }
        }

        deserializer.deserialize_map(BreakdownVisitor)
    }
}

/// Presence of the community files that make a repository approachable
///
/// Sourced from the upstream community-profile endpoint. When that endpoint
/// fails the conservative default from [`HealthChecklist::degraded`] is
/// substituted instead: a readme is assumed, nothing else is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthChecklist {
    /// A readme file is present
    pub readme: bool,

    /// A contributing guide is present
    pub contributing: bool,

    /// A license file is present
    pub license: bool,

    /// An issue template is present
    pub issues: bool,

    /// A pull request template is present
    pub pull_requests: bool,

    /// A code of conduct is present. No fetch path populates this flag; it
    /// exists because the mentor-readiness formula reads it (the bonus is
    /// inert in practice) and it is excluded from the wire shape.
    #[serde(skip)]
    pub code_of_conduct: bool,
}

impl HealthChecklist {
    /// Conservative substitute used when the community profile cannot be
    /// fetched: assume a readme exists, assume nothing else does.
    pub fn degraded() -> Self {
        HealthChecklist {
            readme: true,
            contributing: false,
            license: false,
            issues: false,
            pull_requests: false,
            code_of_conduct: false,
        }
    }
}

/// Package manager inferred from the language breakdown
///
/// Inference is first-match-wins over a fixed priority list; see
/// [`crate::onboard::analyzer::stack::infer_package_manager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr)]
pub enum PackageManager {
    #[serde(rename = "npm")]
    #[strum(serialize = "npm")]
    Npm,
    #[serde(rename = "pip")]
    #[strum(serialize = "pip")]
    Pip,
    #[serde(rename = "go")]
    #[strum(serialize = "go")]
    Go,
    #[serde(rename = "cargo")]
    #[strum(serialize = "cargo")]
    Cargo,
    #[serde(rename = "maven/gradle")]
    #[strum(serialize = "maven/gradle")]
    MavenGradle,
    #[serde(rename = "Unknown")]
    #[strum(serialize = "Unknown")]
    Unknown,
}

/// Community platforms recognized by social-link detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SocialLinkKind {
    Discord,
    Slack,
}

/// A community link detected in the repository description or homepage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    #[serde(rename = "type")]
    pub kind: SocialLinkKind,
    pub url: String,
}

/// The aggregate answer to "analyze this repository"
///
/// Constructed once per analysis request and cached keyed by the original
/// input URL for the remaining process lifetime. The wire shape (camelCase)
/// is part of the inbound API contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// `owner/name` of the analyzed repository
    pub repo: String,

    /// Repository description; carries the degraded-mode marker when the
    /// result was synthesized
    pub description: Option<String>,

    pub stars: u64,

    pub forks: u64,

    pub open_issues: u64,

    /// First key of the language breakdown, `"Unknown"` when empty
    pub primary_language: String,

    /// First five language names, in upstream order
    pub tech_stack: Vec<String>,

    pub package_manager: PackageManager,

    /// Ordered shell commands for getting the repository running locally
    pub setup_commands: Vec<String>,

    pub languages: LanguageBreakdown,

    /// Weighted-checklist score in [0, 100]
    pub health_score: u8,

    pub health_checklist: HealthChecklist,

    /// Weighted activity/process score in [0, 100]
    pub mentor_readiness: u8,

    pub social_links: Vec<SocialLink>,
}

/// Issue author information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueAuthor {
    pub login: String,

    #[serde(default)]
    pub avatar_url: String,
}

/// Issue label information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueLabel {
    pub name: String,

    #[serde(default)]
    pub color: String,
}

/// A normalized issue, stripped of everything the frontend does not render
///
/// Repository-scoped listings leave the `repo_*` fields unset; global search
/// results carry the repository back-reference and the computed skill-match
/// score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,

    /// Issue number within the repository
    pub number: u64,

    pub title: String,

    /// Issue body, empty string when the issue has none
    #[serde(default)]
    pub body: String,

    /// Current state (open, closed)
    pub state: String,

    /// URL for viewing the issue in a browser
    pub url: String,

    /// Number of comments on the issue
    pub comments: u64,

    pub created_at: String,

    pub updated_at: String,

    /// Issue author (serialized as `user` for frontend compatibility)
    #[serde(rename = "user")]
    pub author: IssueAuthor,

    pub labels: Vec<IssueLabel>,

    /// API URL of the owning repository, only set for global search results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,

    /// `owner/name` derived from `repo_url`, only set for global search results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_name: Option<String>,

    /// Skill-match score in [0, 100], only set for global search results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_score: Option<u8>,
}

/// A single issue comment, fetched lazily per issue and never cached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,

    /// Comment author (serialized as `user` for frontend compatibility)
    #[serde(rename = "user")]
    pub author: IssueAuthor,

    pub body: String,

    pub created_at: String,

    /// URL for viewing the comment in a browser
    pub html_url: String,
}
