//! Repository analysis and issue-matching engine
//!
//! This module is the core of onboardhub:
//!
//! - Analyzing a repository's friendliness to new contributors (health
//!   score, mentor readiness, tech stack, setup commands, community links)
//! - Finding open issues matching a contributor's experience level
//! - Searching issues across all repositories by skills or keyword
//!
//! ## Authentication
//!
//! All upstream operations work both authenticated and unauthenticated.
//! A GitHub token raises the rate limit from 60 to 5,000 requests/hour:
//!
//! ```bash
//! # Optional, but recommended to avoid rate limiting
//! export GITHUB_TOKEN=your_github_token
//! ```
//!
//! ## Degraded mode
//!
//! Upstream failure is never surfaced to callers. Every operation that
//! talks to the upstream API falls back to structurally identical
//! synthesized data (see [`fallback`]), so a rate-limited demo still
//! renders; synthesized analyses are marked with a `(Safe Mode)`
//! description prefix.

pub mod analyzer;
pub mod fallback;
pub mod issues;
pub mod providers;
pub mod scoring;

pub use analyzer::{instance, RepositoryAnalyzer, RepositoryUrlError};
pub use issues::{DifficultyTier, EmptyQueryError, IssueFinder};
pub use providers::models::{AnalysisResult, Comment, Issue, RepositoryIdentity};
pub use providers::{GithubClient, UpstreamError};
