//! Repository analysis orchestration
//!
//! [`RepositoryAnalyzer`] coordinates the upstream client, the scoring
//! engine, and the fallback synthesizer to answer "analyze this
//! repository", and owns the process-lifetime result cache. The analyzer
//! never surfaces an upstream failure: a dead or rate-limited API produces
//! a synthesized result, and only a malformed input URL is an error.

pub mod instance;
pub mod repository_url;
pub mod stack;

use std::collections::HashMap;
use std::sync::RwLock;

use crate::onboard::fallback;
use crate::onboard::providers::models::{AnalysisResult, HealthChecklist};
use crate::onboard::providers::{GithubClient, UpstreamError};
use crate::onboard::scoring::{compute_health_score, compute_mentor_readiness};

pub use repository_url::{parse_repository_url, RepositoryUrlError};

/// Repository analyzer with a process-lifetime result cache
///
/// The cache is keyed by the caller's original input URL and never evicted:
/// results are cheap, analysis is not, and the process is expected to be
/// restarted long before memory matters. Concurrent misses for the same URL
/// may both fetch and both write; last writer wins, which is harmless since
/// both derive the same result from the same upstream state.
pub struct RepositoryAnalyzer {
    client: GithubClient,
    cache: RwLock<HashMap<String, AnalysisResult>>,
}

impl RepositoryAnalyzer {
    /// Creates an analyzer against the real upstream API
    ///
    /// # Parameters
    ///
    /// * `github_token` - Optional API token, read once at startup and never
    ///   re-read.
    pub fn new(github_token: Option<String>) -> Result<Self, UpstreamError> {
        Ok(Self::with_client(GithubClient::new(github_token)?))
    }

    /// Creates an analyzer around an existing client
    ///
    /// Integration tests use this with a client pointed at a mock server.
    pub fn with_client(client: GithubClient) -> Self {
        RepositoryAnalyzer {
            client,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The underlying upstream client, for wiring sibling components
    pub fn client(&self) -> &GithubClient {
        &self.client
    }

    /// Analyzes a repository
    ///
    /// Three terminal paths, checked in order:
    ///
    /// 1. demo flag set: a fixed canned result, no network, no cache
    /// 2. cache hit: the cached result, verbatim
    /// 3. live fetch: metadata, languages, and community profile fetched
    ///    concurrently. Failure of either mandatory call (metadata,
    ///    languages) turns the whole request into a synthesized result;
    ///    a failed community profile alone only substitutes the
    ///    conservative default checklist. Successful results are cached,
    ///    synthesized ones are not.
    ///
    /// The only error is a malformed repository URL; callers decide whether
    /// that is a hard failure or yet another reason to synthesize.
    pub async fn analyze(
        &self,
        repo_url: &str,
        is_demo: bool,
    ) -> Result<AnalysisResult, RepositoryUrlError> {
        if is_demo {
            tracing::info!("serving demo analysis");
            return Ok(fallback::demo_analysis());
        }

        if let Some(cached) = self.cache.read().expect("cache lock poisoned").get(repo_url) {
            tracing::debug!("cache hit for {}", repo_url);
            return Ok(cached.clone());
        }

        let identity = parse_repository_url(repo_url)?;
        tracing::info!("analyzing {}", identity);

        let (metadata, languages, community) = tokio::join!(
            self.client.fetch_repository_metadata(&identity),
            self.client.fetch_languages(&identity),
            self.client.fetch_community_profile(&identity),
        );

        let (snapshot, languages) = match (metadata, languages) {
            (Ok(snapshot), Ok(languages)) => (snapshot, languages),
            (Err(error), _) | (_, Err(error)) => {
                tracing::warn!("analysis of {} failed, switching to safe mode: {}", identity, error);
                return Ok(fallback::synthesize_analysis(&identity, repo_url));
            }
        };

        let checklist = community.unwrap_or_else(|e| {
            tracing::warn!("community profile fetch for {} failed, using defaults: {}", identity, e);
            HealthChecklist::degraded()
        });

        let package_manager = stack::infer_package_manager(&languages);
        let result = AnalysisResult {
            repo: identity.to_string(),
            description: snapshot.description.clone(),
            stars: snapshot.stars,
            forks: snapshot.forks,
            open_issues: snapshot.open_issues_count,
            primary_language: languages.primary_language().to_string(),
            tech_stack: stack::derive_tech_stack(&languages),
            package_manager,
            setup_commands: stack::setup_commands(repo_url, package_manager),
            health_score: compute_health_score(&snapshot, &checklist),
            mentor_readiness: compute_mentor_readiness(&snapshot, &checklist),
            social_links: stack::detect_social_links(
                snapshot.description.as_deref(),
                snapshot.homepage.as_deref(),
            ),
            languages,
            health_checklist: checklist,
        };

        self.cache
            .write()
            .expect("cache lock poisoned")
            .insert(repo_url.to_string(), result.clone());

        Ok(result)
    }
}
