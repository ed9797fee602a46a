use thiserror::Error;

/// Errors from the generative-text path. None of these reach API callers:
/// the generator catches them and switches to the deterministic fallback.
#[derive(Debug, Error)]
pub enum InsightError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("text generation failed: {0}")]
    Generation(String),

    #[error("generated response was not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
