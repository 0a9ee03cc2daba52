use thiserror::Error;

/// Result type for scraping and summarization operations.
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Errors surfaced by the scraping and summarization pipeline.
///
/// Everything here is fatal to the run except `EmptyInput`, which the
/// orchestrator downgrades to a warning, and page-level failures, which the
/// paginator absorbs into an early stop with partial results.
#[derive(Debug, Error)]
pub enum ScoutError {
    /// Transport or status failure talking to OpenWork or the LLM endpoint.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The login page carried no usable CSRF token.
    #[error("CSRF token not found in login page")]
    TokenMissing,

    /// Login submitted, but the landing page did not confirm a session.
    #[error("login failed - could not verify logged-in state")]
    AuthVerificationFailed,

    /// The company page had no name, so the id resolves to nothing.
    #[error("invalid company id: {0}")]
    InvalidIdentifier(String),

    /// Summarization was invoked with zero reviews.
    #[error("cannot summarize empty reviews")]
    EmptyInput,

    /// The completion endpoint answered, but not with a usable summary.
    #[error("failed to generate summary: {0}")]
    SummaryGeneration(String),
}
