//! HTTP server exposing the analysis and issue endpoints
//!
//! The handlers here are deliberately thin: decode the request, check the
//! caller-input contract (the only errors that may surface as 4xx), call
//! into the [`crate::onboard`] components, encode the response. All
//! upstream-failure handling lives below this layer; a handler never
//! answers 5xx because the API broke.

use anyhow::Result;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::onboard::analyzer::instance;
use crate::onboard::fallback;
use crate::onboard::issues::DifficultyTier;
use crate::onboard::providers::models::RepositoryIdentity;

/// HTTP server wrapper around the shared router
pub struct HttpServerApp {
    bind_addr: SocketAddr,
}

impl HttpServerApp {
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self { bind_addr }
    }

    /// Serves until Ctrl+C
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(self.bind_addr).await?;
        tracing::info!("server is running on {}", self.bind_addr);

        axum::serve(listener, router())
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
            })
            .await?;

        Ok(())
    }
}

/// Builds the application router
///
/// Public so tests can drive the handlers without binding a socket.
pub fn router() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/analyze", post(analyze_repository))
        .route("/api/issues", get(repository_issues))
        .route(
            "/api/issues/:owner/:repo/issues/:number/comments",
            get(issue_comments),
        )
        .route("/api/issues/global", post(global_issue_search))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

async fn root() -> &'static str {
    "OnboardHub Backend is running 🚀"
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest {
    #[serde(default)]
    repo_url: Option<String>,

    #[serde(default)]
    is_demo: bool,
}

/// `POST /api/analyze`
///
/// 400 only for a missing repository URL. A URL that fails to parse is
/// absorbed into a synthesized result, mirroring the upstream-failure
/// policy: the caller asked about a repository, they get an answer shaped
/// like one.
async fn analyze_repository(Json(request): Json<AnalyzeRequest>) -> Response {
    if request.is_demo {
        tracing::info!("serving demo data");
        return Json(fallback::demo_analysis()).into_response();
    }

    let Some(repo_url) = request.repo_url.filter(|url| !url.trim().is_empty()) else {
        return bad_request("Repository URL is required");
    };

    match instance::get_analyzer().analyze(&repo_url, false).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => {
            tracing::warn!("unparseable repository URL, serving safe mode data: {}", e);
            let identity = RepositoryIdentity {
                owner: "unknown".to_string(),
                name: "project".to_string(),
            };
            Json(fallback::synthesize_analysis(&identity, &repo_url)).into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
struct IssuesQuery {
    owner: Option<String>,
    repo: Option<String>,
    level: Option<String>,
}

/// `GET /api/issues?owner&repo&level`
async fn repository_issues(Query(query): Query<IssuesQuery>) -> Response {
    let (Some(owner), Some(repo)) = (query.owner, query.repo) else {
        return bad_request("Owner and Repo query params are required");
    };

    let identity = RepositoryIdentity { owner, name: repo };
    let tier = DifficultyTier::from_level_param(query.level.as_deref());

    let issues = instance::get_issue_finder()
        .issues_for_tier(&identity, tier)
        .await;

    Json(issues).into_response()
}

/// `GET /api/issues/{owner}/{repo}/issues/{number}/comments`
async fn issue_comments(Path((owner, repo, number)): Path<(String, String, u64)>) -> Response {
    let identity = RepositoryIdentity { owner, name: repo };

    let comments = instance::get_issue_finder()
        .issue_comments(&identity, number)
        .await;

    Json(comments).into_response()
}

#[derive(Debug, Deserialize)]
struct GlobalSearchRequest {
    #[serde(default)]
    skills: Vec<String>,

    #[serde(default)]
    keyword: Option<String>,
}

/// `POST /api/issues/global`
async fn global_issue_search(Json(request): Json<GlobalSearchRequest>) -> Response {
    match instance::get_issue_finder()
        .search_global(&request.skills, request.keyword.as_deref())
        .await
    {
        Ok(issues) => Json(issues).into_response(),
        Err(e) => bad_request(&e.to_string()),
    }
}
