//! GitHub API client
//!
//! A thin reqwest-based client for the handful of GitHub REST endpoints the
//! analyzer needs: repository metadata, language breakdown, community
//! profile, issue listing, issue comments, and full-text issue search.
//!
//! Every request carries the versioned JSON `Accept` header and, when a
//! token was configured at startup, a `token` authorization header.
//! Responses are deserialized into module-private GitHub shapes and
//! converted to the common models in
//! [`crate::onboard::providers::models`]. The client performs no retries:
//! recovering from upstream failure is the callers' job.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::models::{
    Comment, HealthChecklist, Issue, IssueAuthor, IssueLabel, LanguageBreakdown,
    RepositoryIdentity, RepositorySnapshot,
};
use super::UpstreamError;

/// Base URL of the GitHub REST API
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Versioned JSON media type requested from every endpoint
const GITHUB_ACCEPT_HEADER: &str = "application/vnd.github.v3+json";

const USER_AGENT: &str = "onboardhub/0.1.0 (https://github.com/tacogips/onboardhub)";

/// Request timeout for every upstream call
///
/// The upstream API has no server-side bound we can rely on; without a
/// client-side timeout a slow network stalls the whole analysis.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Page size for tier-filtered issue listings
const TIERED_ISSUES_PER_PAGE: u8 = 10;

/// Page size for issue comments
const COMMENTS_PER_PAGE: u8 = 5;

/// Page size for cross-repository issue search
const GLOBAL_SEARCH_PER_PAGE: u8 = 15;

/// GitHub API client
///
/// Cheap to clone: the inner reqwest client is reference-counted and the
/// token is read once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: reqwest::Client,
    base_url: String,
    github_token: Option<String>,
}

impl GithubClient {
    /// Creates a client against the real GitHub API
    ///
    /// # Parameters
    ///
    /// * `github_token` - Optional GitHub token. Without one, requests are
    ///   unauthenticated and subject to the much lower anonymous rate limit.
    pub fn new(github_token: Option<String>) -> Result<Self, UpstreamError> {
        Self::with_base_url(GITHUB_API_BASE, github_token)
    }

    /// Creates a client against a custom base URL
    ///
    /// Integration tests point this at a local mock server; production code
    /// goes through [`GithubClient::new`].
    pub fn with_base_url(
        base_url: impl Into<String>,
        github_token: Option<String>,
    ) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(GithubClient {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            github_token,
        })
    }

    /// Fetches repository metadata (stars, forks, activity, features)
    pub async fn fetch_repository_metadata(
        &self,
        id: &RepositoryIdentity,
    ) -> Result<RepositorySnapshot, UpstreamError> {
        let url = format!("{}/repos/{}/{}", self.base_url, id.owner, id.name);
        let repo: GithubRepoResponse = self.get_json(url).await?;

        Ok(RepositorySnapshot {
            description: repo.description,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            open_issues_count: repo.open_issues_count,
            pushed_at: repo.pushed_at,
            homepage: repo.homepage,
            has_discussions: repo.has_discussions.unwrap_or(false),
        })
    }

    /// Fetches the language byte-count breakdown
    ///
    /// The upstream response object is ordered by descending byte count and
    /// the returned [`LanguageBreakdown`] preserves that order.
    pub async fn fetch_languages(
        &self,
        id: &RepositoryIdentity,
    ) -> Result<LanguageBreakdown, UpstreamError> {
        let url = format!("{}/repos/{}/{}/languages", self.base_url, id.owner, id.name);
        self.get_json(url).await
    }

    /// Fetches the community profile and reduces it to a [`HealthChecklist`]
    pub async fn fetch_community_profile(
        &self,
        id: &RepositoryIdentity,
    ) -> Result<HealthChecklist, UpstreamError> {
        let url = format!(
            "{}/repos/{}/{}/community/profile",
            self.base_url, id.owner, id.name
        );
        let profile: GithubCommunityProfile = self.get_json(url).await?;

        Ok(profile.files.into_checklist())
    }

    /// Lists open issues carrying the given label
    ///
    /// Returns raw provider items so the caller can strip pull requests (the
    /// upstream issues endpoint conflates the two) before normalizing.
    pub async fn list_issues(
        &self,
        id: &RepositoryIdentity,
        label: &str,
    ) -> Result<Vec<GithubIssueItem>, UpstreamError> {
        let url = Self::construct_issues_url(&self.base_url, id, label);
        self.get_json(url).await
    }

    /// Lists the first page of comments for an issue
    pub async fn list_issue_comments(
        &self,
        id: &RepositoryIdentity,
        issue_number: u64,
    ) -> Result<Vec<Comment>, UpstreamError> {
        let url = format!(
            "{}/repos/{}/{}/issues/{}/comments?per_page={}",
            self.base_url, id.owner, id.name, issue_number, COMMENTS_PER_PAGE
        );
        let comments: Vec<GithubCommentItem> = self.get_json(url).await?;

        Ok(comments.into_iter().map(GithubCommentItem::into_comment).collect())
    }

    /// Runs a full-text issue search across all repositories
    ///
    /// Results are sorted by update time, most recent first.
    pub async fn search_issues(&self, query: &str) -> Result<Vec<GithubIssueItem>, UpstreamError> {
        let url = Self::construct_issue_search_url(&self.base_url, query);
        let response: GithubIssueSearchResponse = self.get_json(url).await?;

        Ok(response.items)
    }

    /// Constructs the URL for a tier-filtered issue listing
    ///
    /// The page size is a deliberate API-courtesy cap, not a tunable.
    fn construct_issues_url(base_url: &str, id: &RepositoryIdentity, label: &str) -> String {
        format!(
            "{}/repos/{}/{}/issues?state=open&labels={}&per_page={}",
            base_url,
            id.owner,
            id.name,
            urlencoding::encode(label),
            TIERED_ISSUES_PER_PAGE
        )
    }

    /// Constructs the URL for a cross-repository issue search
    fn construct_issue_search_url(base_url: &str, query: &str) -> String {
        format!(
            "{}/search/issues?q={}&sort=updated&order=desc&per_page={}",
            base_url,
            urlencoding::encode(query),
            GLOBAL_SEARCH_PER_PAGE
        )
    }

    /// Executes a GET request and deserializes the JSON response
    ///
    /// Non-success statuses become [`UpstreamError::Status`] with the
    /// response body as the message.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
    ) -> Result<T, UpstreamError> {
        tracing::debug!("GET {}", url);

        let mut req_builder = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", GITHUB_ACCEPT_HEADER);

        // Add authentication token if available
        if let Some(token) = &self.github_token {
            req_builder = req_builder.header("Authorization", format!("token {}", token));
        }

        let response = req_builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}

/// GitHub-specific repository metadata response
#[derive(Debug, Deserialize)]
struct GithubRepoResponse {
    description: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    forks_count: u64,
    #[serde(default)]
    open_issues_count: u64,
    pushed_at: Option<DateTime<Utc>>,
    homepage: Option<String>,
    has_discussions: Option<bool>,
}

/// GitHub-specific community profile response
#[derive(Debug, Deserialize)]
struct GithubCommunityProfile {
    #[serde(default)]
    files: GithubCommunityFiles,
}

/// The `files` object of a community profile
///
/// Each entry is an object when the file exists and `null` otherwise, so
/// presence is "set and not null". The upstream also reports a
/// code_of_conduct entry; it is deliberately not read (see the checklist
/// documentation).
#[derive(Debug, Default, Deserialize)]
struct GithubCommunityFiles {
    #[serde(default)]
    readme: Option<serde_json::Value>,
    #[serde(default)]
    contributing: Option<serde_json::Value>,
    #[serde(default)]
    license: Option<serde_json::Value>,
    #[serde(default)]
    issue_template: Option<serde_json::Value>,
    #[serde(default)]
    pull_request_template: Option<serde_json::Value>,
}

impl GithubCommunityFiles {
    fn into_checklist(self) -> HealthChecklist {
        fn present(value: &Option<serde_json::Value>) -> bool {
            value.as_ref().is_some_and(|v| !v.is_null())
        }

        HealthChecklist {
            readme: present(&self.readme),
            contributing: present(&self.contributing),
            license: present(&self.license),
            issues: present(&self.issue_template),
            pull_requests: present(&self.pull_request_template),
            code_of_conduct: false,
        }
    }
}

/// GitHub-specific issue search response
#[derive(Debug, Deserialize)]
struct GithubIssueSearchResponse {
    items: Vec<GithubIssueItem>,
}

/// GitHub-specific issue (or pull request) item
///
/// The issues endpoint returns pull requests alongside issues; callers must
/// check [`GithubIssueItem::is_pull_request`] before normalizing.
#[derive(Debug, Deserialize)]
pub struct GithubIssueItem {
    id: u64,
    number: u64,
    title: String,
    body: Option<String>,
    state: String,
    html_url: String,
    #[serde(default)]
    comments: u64,
    created_at: String,
    updated_at: String,
    user: Option<GithubIssueUser>,
    #[serde(default)]
    labels: Vec<GithubLabelItem>,
    pull_request: Option<serde_json::Value>,
    repository_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GithubIssueUser {
    login: String,
    #[serde(default)]
    avatar_url: String,
}

#[derive(Debug, Deserialize)]
struct GithubLabelItem {
    name: String,
    #[serde(default)]
    color: String,
}

impl GithubIssueItem {
    /// Whether this record is a pull request wearing an issue shape
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    /// Normalizes to the common [`Issue`] model for a repository-scoped listing
    pub fn into_issue(self) -> Issue {
        let author = match self.user {
            Some(user) => IssueAuthor {
                login: user.login,
                avatar_url: user.avatar_url,
            },
            None => IssueAuthor {
                login: "unknown".to_string(),
                avatar_url: String::new(),
            },
        };

        Issue {
            id: self.id,
            number: self.number,
            title: self.title,
            body: self.body.unwrap_or_default(),
            state: self.state,
            url: self.html_url,
            comments: self.comments,
            created_at: self.created_at,
            updated_at: self.updated_at,
            author,
            labels: self
                .labels
                .into_iter()
                .map(|label| IssueLabel {
                    name: label.name,
                    color: label.color,
                })
                .collect(),
            repo_url: None,
            repo_name: None,
            match_score: None,
        }
    }

    /// Normalizes to the common [`Issue`] model for a global search result,
    /// deriving `owner/name` from the repository back-reference URL
    pub fn into_global_issue(self) -> Issue {
        let repo_url = self.repository_url.clone();
        let repo_name = repo_url.as_deref().map(derive_repo_name);

        let mut issue = self.into_issue();
        issue.repo_url = repo_url;
        issue.repo_name = repo_name;
        issue
    }
}

/// Derives `owner/name` from an API repository URL such as
/// `https://api.github.com/repos/facebook/react`
fn derive_repo_name(repository_url: &str) -> String {
    let segments: Vec<&str> = repository_url.split('/').collect();
    if segments.len() >= 2 {
        segments[segments.len() - 2..].join("/")
    } else {
        repository_url.to_string()
    }
}

/// GitHub-specific issue comment item
#[derive(Debug, Deserialize)]
struct GithubCommentItem {
    id: u64,
    user: Option<GithubIssueUser>,
    #[serde(default)]
    body: String,
    created_at: String,
    html_url: String,
}

impl GithubCommentItem {
    fn into_comment(self) -> Comment {
        let author = match self.user {
            Some(user) => IssueAuthor {
                login: user.login,
                avatar_url: user.avatar_url,
            },
            None => IssueAuthor {
                login: "unknown".to_string(),
                avatar_url: String::new(),
            },
        };

        Comment {
            id: self.id,
            author,
            body: self.body,
            created_at: self.created_at,
            html_url: self.html_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> RepositoryIdentity {
        RepositoryIdentity {
            owner: "acme".to_string(),
            name: "widget".to_string(),
        }
    }

    #[test]
    fn test_construct_issues_url_encodes_label() {
        let url =
            GithubClient::construct_issues_url(GITHUB_API_BASE, &identity(), "good first issue");

        assert_eq!(
            url,
            "https://api.github.com/repos/acme/widget/issues?state=open&labels=good%20first%20issue&per_page=10"
        );
    }

    #[test]
    fn test_construct_issue_search_url() {
        let url = GithubClient::construct_issue_search_url(
            GITHUB_API_BASE,
            "is:issue is:open (\"rust\" OR \"tokio\")",
        );

        assert!(url.starts_with("https://api.github.com/search/issues?q="));
        assert!(url.contains("is%3Aissue%20is%3Aopen"));
        assert!(url.contains("%22rust%22%20OR%20%22tokio%22"));
        assert!(url.ends_with("&sort=updated&order=desc&per_page=15"));
    }

    #[test]
    fn test_issue_item_pull_request_detection() {
        let json = r#"{
            "id": 1, "number": 2, "title": "Add feature", "body": null,
            "state": "open", "html_url": "https://github.com/acme/widget/pull/2",
            "comments": 0, "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z",
            "user": {"login": "octocat", "avatar_url": ""},
            "labels": [],
            "pull_request": {"url": "https://api.github.com/repos/acme/widget/pulls/2"}
        }"#;
        let item: GithubIssueItem = serde_json::from_str(json).unwrap();

        assert!(item.is_pull_request());
    }

    #[test]
    fn test_issue_item_missing_user_becomes_unknown() {
        let json = r#"{
            "id": 1, "number": 2, "title": "Fix bug",
            "state": "open", "html_url": "https://github.com/acme/widget/issues/2",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z",
            "user": null
        }"#;
        let item: GithubIssueItem = serde_json::from_str(json).unwrap();
        let issue = item.into_issue();

        assert_eq!(issue.author.login, "unknown");
        assert_eq!(issue.body, "");
        assert!(issue.labels.is_empty());
    }

    #[test]
    fn test_derive_repo_name_from_back_reference() {
        assert_eq!(
            derive_repo_name("https://api.github.com/repos/facebook/react"),
            "facebook/react"
        );
    }

    #[test]
    fn test_community_files_presence_requires_non_null() {
        let json = r#"{
            "files": {
                "readme": {"url": "https://api.github.com/repos/acme/widget/readme"},
                "contributing": null,
                "license": {"key": "mit"}
            }
        }"#;
        let profile: GithubCommunityProfile = serde_json::from_str(json).unwrap();
        let checklist = profile.files.into_checklist();

        assert!(checklist.readme);
        assert!(!checklist.contributing);
        assert!(checklist.license);
        assert!(!checklist.issues);
        assert!(!checklist.pull_requests);
        assert!(!checklist.code_of_conduct);
    }
}
