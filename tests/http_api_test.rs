//! Tests for the inbound HTTP contracts
//!
//! Exercises the router directly with `tower::ServiceExt::oneshot`, without
//! binding a socket. Only the caller-input contract (the 4xx cases) and the
//! network-free demo path are covered here; upstream success and fallback
//! behavior is tested against a mock server in the analyzer and issue
//! suites.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use onboardhub::transport::http_server::router;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_root_reports_liveness() {
    let response = router()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_analyze_requires_repo_url() {
    let response = router()
        .oneshot(json_post("/api/analyze", "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Repository URL is required");
}

#[tokio::test]
async fn test_analyze_demo_mode_needs_no_repo_url() {
    let response = router()
        .oneshot(json_post("/api/analyze", r#"{"isDemo": true}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["repo"], "demo/starter-kit");
    assert_eq!(json["healthScore"], 98);
    assert_eq!(json["healthChecklist"]["pullRequests"], true);
    assert_eq!(json["socialLinks"][0]["type"], "discord");
}

#[tokio::test]
async fn test_issues_require_owner_and_repo() {
    for uri in ["/api/issues", "/api/issues?owner=acme", "/api/issues?repo=widget"] {
        let response = router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri {}", uri);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Owner and Repo query params are required");
    }
}

#[tokio::test]
async fn test_global_search_requires_skills_or_keyword() {
    for body in ["{}", r#"{"skills": []}"#, r#"{"skills": [], "keyword": ""}"#] {
        let response = router()
            .oneshot(json_post("/api/issues/global", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {}", body);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Skills or keyword is required");
    }
}
