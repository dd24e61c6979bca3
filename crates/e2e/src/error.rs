//! Error types for the browser layer

use swagshop_harness::HarnessError;
use thiserror::Error;

/// Result type alias using [`E2eError`]
pub type E2eResult<T> = std::result::Result<T, E2eError>;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Playwright not found. Install with: npx playwright install")]
    PlaywrightNotFound,

    #[error("storefront unreachable at {url}: {reason}")]
    SiteUnavailable { url: String, reason: String },

    /// A browser interaction failed inside the node script. Carries the
    /// step name, the Playwright message, and the node-side stack so the
    /// timed-action wrapper can log the full detail block.
    #[error("step '{step}' failed: {message}\n{stack}")]
    StepFailed {
        step: String,
        message: String,
        stack: String,
    },

    #[error("driver protocol error in step '{step}': {reason}")]
    Protocol { step: String, reason: String },

    #[error("assertion failed: {0}")]
    AssertionFailed(String),

    #[error("log write failed: {0}")]
    Harness(#[from] HarnessError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
