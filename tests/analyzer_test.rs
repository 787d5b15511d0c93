//! Tests for the repository analyzer
//!
//! These tests drive the full analysis flow against a local mock of the
//! upstream API, covering the live-fetch path, partial degradation when
//! only the community profile fails, the safe-mode fallback when a
//! mandatory call fails, and the process-lifetime cache.

use chrono::{Duration, Utc};
use serde_json::json;

use onboardhub::onboard::providers::GithubClient;
use onboardhub::onboard::RepositoryAnalyzer;

/// Creates an analyzer pointed at the given mock server
fn test_analyzer(server: &mockito::ServerGuard) -> RepositoryAnalyzer {
    let client =
        GithubClient::with_base_url(server.url(), None).expect("failed to create GitHub client");
    RepositoryAnalyzer::with_client(client)
}

fn repo_metadata_body(pushed_days_ago: i64) -> String {
    json!({
        "description": "A fast widget toolkit. Chat: discord.gg/widgets",
        "stargazers_count": 500,
        "forks_count": 40,
        "open_issues_count": 3,
        "pushed_at": (Utc::now() - Duration::days(pushed_days_ago)).to_rfc3339(),
        "homepage": null,
        "has_discussions": true
    })
    .to_string()
}

#[tokio::test]
async fn test_analyze_live_fetch_success() {
    let mut server = mockito::Server::new_async().await;

    let _metadata = server
        .mock("GET", "/repos/acme/widget")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(repo_metadata_body(2))
        .create_async()
        .await;
    let _languages = server
        .mock("GET", "/repos/acme/widget/languages")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"Rust": 100000, "Shell": 2000}"#)
        .create_async()
        .await;
    let _community = server
        .mock("GET", "/repos/acme/widget/community/profile")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "files": {
                    "readme": {"url": "..."},
                    "contributing": {"url": "..."},
                    "license": {"key": "mit"},
                    "issue_template": null,
                    "pull_request_template": null
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let analyzer = test_analyzer(&server);
    let result = analyzer
        .analyze("https://github.com/acme/widget", false)
        .await
        .expect("analysis should succeed");

    assert_eq!(result.repo, "acme/widget");
    assert_eq!(result.stars, 500);
    assert_eq!(result.forks, 40);
    assert_eq!(result.open_issues, 3);
    assert_eq!(result.primary_language, "Rust");
    assert_eq!(result.tech_stack, vec!["Rust", "Shell"]);
    assert_eq!(
        result.setup_commands,
        vec![
            "git clone https://github.com/acme/widget",
            "cargo build",
            "cargo run"
        ]
    );

    // base 50 + readme 10 + contributing 15 + license 10 + stars 5 + open issues 5
    assert_eq!(result.health_score, 95);
    // push 2 days ago 40 + contributing 20 + discussions 15 + triage ratio 10
    assert_eq!(result.mentor_readiness, 85);

    assert_eq!(result.social_links.len(), 1);
    assert_eq!(result.social_links[0].url, "https://discord.gg/widgets");

    // Wire shape is camelCase
    let wire = serde_json::to_value(&result).unwrap();
    assert!(wire.get("healthScore").is_some());
    assert!(wire.get("primaryLanguage").is_some());
    assert_eq!(wire["languages"]["Rust"], 100000);
}

#[tokio::test]
async fn test_analyze_metadata_failure_returns_safe_mode() {
    // No mocks configured: every upstream call fails
    let server = mockito::Server::new_async().await;

    let analyzer = test_analyzer(&server);
    let result = analyzer
        .analyze("https://source.example/acme/widget", false)
        .await
        .expect("fallback must absorb upstream failure");

    assert_eq!(result.repo, "acme/widget");
    assert!(
        result
            .description
            .as_deref()
            .unwrap()
            .contains("(Safe Mode)"),
        "synthesized result must carry the degraded-mode marker"
    );
    assert!(result.health_score <= 100);
    assert!(result.mentor_readiness <= 100);
    assert!(!result.tech_stack.is_empty());
    assert!(!result.setup_commands.is_empty());
}

#[tokio::test]
async fn test_analyze_community_profile_failure_is_partial() {
    let mut server = mockito::Server::new_async().await;

    let _metadata = server
        .mock("GET", "/repos/acme/widget")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "description": "A widget toolkit",
                "stargazers_count": 50,
                "forks_count": 5,
                "open_issues_count": 10,
                "pushed_at": (Utc::now() - Duration::days(60)).to_rfc3339(),
                "homepage": null,
                "has_discussions": false
            })
            .to_string(),
        )
        .create_async()
        .await;
    let _languages = server
        .mock("GET", "/repos/acme/widget/languages")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"Python": 30000}"#)
        .create_async()
        .await;
    let _community = server
        .mock("GET", "/repos/acme/widget/community/profile")
        .with_status(404)
        .with_body(r#"{"message": "Not Found"}"#)
        .create_async()
        .await;

    let analyzer = test_analyzer(&server);
    let result = analyzer
        .analyze("https://github.com/acme/widget", false)
        .await
        .expect("community profile failure must not fail the analysis");

    // The rest of the result is genuine, only the checklist degraded
    assert_eq!(result.repo, "acme/widget");
    assert_eq!(result.primary_language, "Python");
    assert!(result.health_checklist.readme);
    assert!(!result.health_checklist.contributing);
    assert!(!result.health_checklist.license);

    // base 50 + readme 10 + open issues 5
    assert_eq!(result.health_score, 65);
    // push 60 days ago 10, ratio 10/50 too high for the triage bonus
    assert_eq!(result.mentor_readiness, 10);
}

#[tokio::test]
async fn test_analyze_cache_short_circuits_refetch() {
    let mut server = mockito::Server::new_async().await;

    let metadata = server
        .mock("GET", "/repos/acme/widget")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(repo_metadata_body(2))
        .expect(1)
        .create_async()
        .await;
    let languages = server
        .mock("GET", "/repos/acme/widget/languages")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"Rust": 100000}"#)
        .expect(1)
        .create_async()
        .await;
    let _community = server
        .mock("GET", "/repos/acme/widget/community/profile")
        .with_status(404)
        .create_async()
        .await;

    let analyzer = test_analyzer(&server);
    let url = "https://github.com/acme/widget";

    let first = analyzer.analyze(url, false).await.unwrap();
    let second = analyzer.analyze(url, false).await.unwrap();

    // Byte-identical responses prove the cache answered the second call
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    metadata.assert_async().await;
    languages.assert_async().await;
}

#[tokio::test]
async fn test_analyze_rejects_malformed_url() {
    let server = mockito::Server::new_async().await;
    let analyzer = test_analyzer(&server);

    assert!(analyzer.analyze("https://github.com/", false).await.is_err());
    assert!(analyzer.analyze("", false).await.is_err());
}

#[tokio::test]
async fn test_demo_flag_bypasses_network_and_cache() {
    // No mocks: any network access would produce a safe-mode result, but
    // the demo path must answer before reaching the network at all
    let server = mockito::Server::new_async().await;
    let analyzer = test_analyzer(&server);

    let result = analyzer
        .analyze("https://github.com/acme/widget", true)
        .await
        .unwrap();

    assert_eq!(result.repo, "demo/starter-kit");
    assert_eq!(result.health_score, 98);
    assert_eq!(result.mentor_readiness, 95);
}
