use thiserror::Error;

/// Errors returned by the SerpAPI client.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// SerpAPI returned a top-level `"error"` message.
    #[error("SerpAPI error: {0}")]
    Api(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
