//! HTTP client for SerpAPI's Google Maps engines.
//!
//! Wraps `reqwest` with SerpAPI-specific error handling, API key management,
//! and the search → detail resolution dance. All endpoints check the
//! top-level `"error"` field in the JSON body and surface API-level failures
//! as [`PlacesError::Api`]. No retries: a timeout or transport error is
//! "no data" for the pipeline, which proceeds with whatever it has.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::PlacesError;
use crate::source::PlaceSource;

/// Reviews endpoint hard cap, matching the upstream page size we consume.
const MAX_REVIEWS: usize = 5;

/// Client for SerpAPI's Google Maps search, reviews, and photos engines.
///
/// Use [`SerpApiClient::new`] for production or
/// [`SerpApiClient::with_base_url`] to point at a mock server in tests.
pub struct SerpApiClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl SerpApiClient {
    /// Creates a new client pointed at the production SerpAPI endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, "https://serpapi.com/search")
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::Api`] if `base_url` is not a
    /// valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let base_url = Url::parse(base_url)
            .map_err(|e| PlacesError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Searches Google Maps for a business by name and returns the raw place
    /// record, if any.
    ///
    /// Prefers the `place_results` object when the search resolves to a
    /// single place; otherwise takes the first `local_results` entry and
    /// follows its `place_id` with a detail lookup.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Api`] if SerpAPI reports an error message.
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the body is not valid JSON.
    pub async fn search(&self, name: &str) -> Result<Option<Value>, PlacesError> {
        let url = self.build_url(&[
            ("engine", "google_maps"),
            ("q", name),
            ("type", "search"),
        ]);
        let body = self.request_json(&url).await?;
        Self::check_api_error(&body)?;

        if let Some(place) = body.get("place_results") {
            if place.is_object() {
                return Ok(Some(place.clone()));
            }
        }

        let place_id = body
            .get("local_results")
            .and_then(Value::as_array)
            .and_then(|results| results.first())
            .and_then(|first| first.get("place_id"))
            .and_then(Value::as_str);

        match place_id {
            Some(id) => self.details(id).await,
            None => Ok(None),
        }
    }

    /// Fetches the detailed place record for a `place_id`.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`SerpApiClient::search`].
    pub async fn details(&self, place_id: &str) -> Result<Option<Value>, PlacesError> {
        if place_id.is_empty() {
            return Ok(None);
        }

        let url = self.build_url(&[("engine", "google_maps"), ("place_id", place_id)]);
        let body = self.request_json(&url).await?;
        Self::check_api_error(&body)?;

        Ok(body.get("place_results").filter(|v| v.is_object()).cloned())
    }

    /// Fetches up to `limit` (capped at 5) reviews for a place's `data_id`.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`SerpApiClient::search`].
    pub async fn reviews(&self, data_id: &str, limit: usize) -> Result<Vec<Value>, PlacesError> {
        if data_id.is_empty() {
            return Ok(Vec::new());
        }

        let num = limit.min(MAX_REVIEWS).to_string();
        let url = self.build_url(&[
            ("engine", "google_maps_reviews"),
            ("data_id", data_id),
            ("num", &num),
        ]);
        let body = self.request_json(&url).await?;
        Self::check_api_error(&body)?;

        Ok(body
            .get("reviews")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default())
    }

    /// Fetches photo records for a place's `data_id`.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`SerpApiClient::search`].
    pub async fn photos(&self, data_id: &str) -> Result<Vec<Value>, PlacesError> {
        if data_id.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.build_url(&[("engine", "google_maps_photos"), ("data_id", data_id)]);
        let body = self.request_json(&url).await?;
        Self::check_api_error(&body)?;

        Ok(body
            .get("photos")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default())
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters, appending the API key last.
    fn build_url(&self, params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("api_key", &self.api_key);
        }
        url
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the
    /// response body as JSON.
    async fn request_json(&self, url: &Url) -> Result<Value, PlacesError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: redact_key(url),
            source: e,
        })
    }

    /// Checks the top-level `"error"` field SerpAPI uses for API-level
    /// failures (bad key, no results for the engine, quota exhausted).
    fn check_api_error(body: &Value) -> Result<(), PlacesError> {
        if let Some(message) = body.get("error").and_then(Value::as_str) {
            return Err(PlacesError::Api(message.to_owned()));
        }
        Ok(())
    }
}

/// URL rendered for log/error contexts with the API key stripped.
fn redact_key(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "api_key")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    redacted.set_query(None);
    {
        let mut qp = redacted.query_pairs_mut();
        for (k, v) in &pairs {
            qp.append_pair(k, v);
        }
    }
    redacted.to_string()
}

#[async_trait]
impl PlaceSource for SerpApiClient {
    async fn search_place(&self, name: &str) -> Option<Value> {
        match self.search(name).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(business = name, error = %e, "place search failed");
                None
            }
        }
    }

    async fn place_reviews(&self, data_id: &str, limit: usize) -> Vec<Value> {
        match self.reviews(data_id, limit).await {
            Ok(reviews) => reviews,
            Err(e) => {
                tracing::warn!(data_id, error = %e, "review lookup failed");
                Vec::new()
            }
        }
    }

    async fn place_photos(&self, data_id: &str) -> Vec<Value> {
        match self.photos(data_id).await {
            Ok(photos) => photos,
            Err(e) => {
                tracing::warn!(data_id, error = %e, "photo lookup failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> SerpApiClient {
        SerpApiClient::with_base_url("test-key", 10, "bizlens-test/0.1", base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_constructs_correct_query_string() {
        let client = test_client("https://serpapi.com/search");
        let url = client.build_url(&[("engine", "google_maps"), ("q", "Cafe Luna")]);
        assert_eq!(
            url.as_str(),
            "https://serpapi.com/search?engine=google_maps&q=Cafe+Luna&api_key=test-key"
        );
    }

    #[test]
    fn build_url_encodes_special_characters() {
        let client = test_client("https://serpapi.com/search");
        let url = client.build_url(&[("q", "Bar & Grill")]);
        assert!(
            url.as_str().contains("Bar+%26+Grill") || url.as_str().contains("Bar%20%26%20Grill"),
            "query param should be percent-encoded: {url}"
        );
    }

    #[test]
    fn redact_key_strips_api_key() {
        let client = test_client("https://serpapi.com/search");
        let url = client.build_url(&[("engine", "google_maps"), ("q", "x")]);
        let redacted = redact_key(&url);
        assert!(!redacted.contains("test-key"), "api key leaked: {redacted}");
        assert!(redacted.contains("engine=google_maps"));
    }
}
