//! Source-hosting providers
//!
//! Currently only GitHub is implemented. The client in [`github`] performs
//! plain HTTP calls and converts raw provider responses into the common
//! models in [`models`]; it contains no business logic and no retry or
//! backoff machinery.

pub mod github;
pub mod models;

use thiserror::Error;

pub use github::GithubClient;
pub use models::*;

/// Failure talking to the upstream source-hosting API
///
/// Every variant is recoverable by design: callers route these into the
/// fallback synthesizer instead of propagating them to the user.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The upstream API answered with a non-success status
    #[error("upstream API error {status}: {message}")]
    Status { status: u16, message: String },

    /// The request could not be sent or timed out
    #[error("upstream request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body did not match the expected shape
    #[error("failed to decode upstream response: {0}")]
    Decode(String),
}
