//! OnboardHub library for evaluating open-source repositories
//!
//! This library powers an onboarding dashboard for new open-source
//! contributors. It provides:
//!
//! - Repository analysis: health score, mentor readiness, tech stack,
//!   setup commands, and community links for any public repository
//! - Issue discovery: open issues filtered by contributor experience level
//! - Global search: skill- or keyword-driven issue search across all
//!   repositories, ranked by skill match
//!
//! ## Degraded mode
//!
//! The upstream source-hosting API is rate-limited and occasionally down.
//! Rather than surfacing that to users, every operation falls back to
//! structurally valid synthesized data; the caller-facing contract is
//! "never fail for upstream reasons". See [`onboard::fallback`].
//!
//! ## Authentication
//!
//! Requests are authenticated when a token is available, raising the
//! upstream rate limit from 60 to 5,000 requests/hour:
//!
//! ```bash
//! # Set GitHub token for authentication (optional)
//! export GITHUB_TOKEN=your_github_token
//! ```
//!
//! ## Usage
//!
//! This library can be used in several ways:
//! - As an HTTP API server (see `onboardhub-server`)
//! - As a terminal client (see `onboardhub-cli`)
//! - Directly as a Rust library
//!
//! ## Process-wide components
//!
//! The server initializes a global [`onboard::RepositoryAnalyzer`] and
//! [`onboard::IssueFinder`] at startup, so the credential is read exactly
//! once and the analysis cache spans the whole process lifetime:
//!
//! ```rust
//! // Initialize the global components (only happens once)
//! let analyzer = onboardhub::onboard::instance::init_components(
//!     Some("github_token".to_string()),
//! );
//!
//! // Later access to the same instance
//! let analyzer = onboardhub::onboard::instance::get_analyzer();
//! ```

pub mod onboard;
pub mod transport;
