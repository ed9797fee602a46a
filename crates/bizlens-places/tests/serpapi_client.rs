//! Integration tests for `SerpApiClient` using wiremock HTTP mocks.

use bizlens_places::{PlaceSource, PlacesError, SerpApiClient};
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> SerpApiClient {
    SerpApiClient::with_base_url("test-key", 10, "bizlens-test/0.1", base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn search_returns_place_results_directly() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "place_results": {
            "title": "Mario's Pizza",
            "data_id": "0x89:0xabc",
            "rating": 4.5,
            "reviews": 120
        }
    });

    Mock::given(method("GET"))
        .and(query_param("engine", "google_maps"))
        .and(query_param("q", "Mario's Pizza"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let record = client
        .search("Mario's Pizza")
        .await
        .expect("should parse search response")
        .expect("should find a place");

    assert_eq!(record["data_id"], "0x89:0xabc");
    assert_eq!(record["reviews"], 120);
}

#[tokio::test]
async fn search_follows_local_results_to_details() {
    let server = MockServer::start().await;

    let search_body = serde_json::json!({
        "local_results": [
            { "title": "Cafe Luna", "place_id": "ChIJ123" },
            { "title": "Cafe Luna II", "place_id": "ChIJ456" }
        ]
    });
    let details_body = serde_json::json!({
        "place_results": {
            "title": "Cafe Luna",
            "data_id": "0x1:0x2",
            "rating": 4.8
        }
    });

    Mock::given(method("GET"))
        .and(query_param("engine", "google_maps"))
        .and(query_param("q", "Cafe Luna"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&search_body))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("engine", "google_maps"))
        .and(query_param("place_id", "ChIJ123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&details_body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let record = client
        .search("Cafe Luna")
        .await
        .expect("should parse")
        .expect("should resolve first local result");

    assert_eq!(record["data_id"], "0x1:0x2");
}

#[tokio::test]
async fn search_returns_none_when_nothing_matches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let record = client.search("Ghost Business").await.expect("should parse");
    assert!(record.is_none());
}

#[tokio::test]
async fn search_surfaces_api_error_message() {
    let server = MockServer::start().await;

    let body = serde_json::json!({ "error": "Invalid API key" });
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search("Anything").await.unwrap_err();
    assert!(
        matches!(err, PlacesError::Api(ref msg) if msg == "Invalid API key"),
        "expected Api error, got: {err:?}"
    );
}

#[tokio::test]
async fn reviews_caps_requested_count_at_five() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "reviews": [
            { "rating": 5, "snippet": "Great" },
            { "rating": 4, "snippet": "Good" }
        ]
    });
    Mock::given(method("GET"))
        .and(query_param("engine", "google_maps_reviews"))
        .and(query_param("data_id", "0x1:0x2"))
        .and(query_param("num", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let reviews = client.reviews("0x1:0x2", 20).await.expect("should parse");
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0]["snippet"], "Great");
}

#[tokio::test]
async fn reviews_with_empty_data_id_skips_the_request() {
    // No mock mounted: a request would fail the test via connection refusal.
    let client = test_client("http://127.0.0.1:9");
    let reviews = client.reviews("", 5).await.expect("should short-circuit");
    assert!(reviews.is_empty());
}

#[tokio::test]
async fn photos_returns_photo_records() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "photos": [
            { "thumbnail": "https://lh5.example/t1.jpg", "title": "Storefront" }
        ]
    });
    Mock::given(method("GET"))
        .and(query_param("engine", "google_maps_photos"))
        .and(query_param("data_id", "0x1:0x2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let photos = client.photos("0x1:0x2").await.expect("should parse");
    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0]["title"], "Storefront");
}

#[tokio::test]
async fn place_source_absorbs_http_failures() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert!(client.search_place("Broken").await.is_none());
    assert!(client.place_reviews("0x1:0x2", 5).await.is_empty());
    assert!(client.place_photos("0x1:0x2").await.is_empty());
}

#[tokio::test]
async fn place_source_absorbs_malformed_bodies() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert!(client.search_place("Garbled").await.is_none());
}
