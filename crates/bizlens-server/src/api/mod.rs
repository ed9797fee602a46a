mod analyze;
mod compare;
mod competitors;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::analysis::Analyzer;
use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    /// Whether a generative text backend is configured; health reporting
    /// only, insight calls fall back transparently either way.
    pub generative: bool,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    insights: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// A trimmed, non-empty required string field, or a validation error.
pub(super) fn required_field<'a>(
    value: Option<&'a str>,
    field: &str,
    request_id: &str,
) -> Result<&'a str, ApiError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            ApiError::new(
                request_id.to_owned(),
                "validation_error",
                format!("{field} is required"),
            )
        })
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/analyze", post(analyze::analyze_business))
        .route("/api/v1/compare", post(compare::compare_businesses))
        .route("/api/v1/competitors", post(competitors::find_competitors))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);
    (
        StatusCode::OK,
        Json(ApiResponse {
            data: HealthData {
                status: "ok",
                insights: if state.generative {
                    "generative"
                } else {
                    "fallback"
                },
            },
            meta,
        }),
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use bizlens_core::ScoreWeights;
    use bizlens_insight::InsightGenerator;
    use bizlens_places::{NormalizeOptions, PlaceSource, YearPolicy};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;

    struct StubSource {
        records: HashMap<String, Value>,
    }

    #[async_trait]
    impl PlaceSource for StubSource {
        async fn search_place(&self, name: &str) -> Option<Value> {
            self.records.get(name).cloned()
        }

        async fn place_reviews(&self, _data_id: &str, _limit: usize) -> Vec<Value> {
            Vec::new()
        }

        async fn place_photos(&self, _data_id: &str) -> Vec<Value> {
            Vec::new()
        }
    }

    fn restaurant_record(reviews: u32) -> Value {
        let images: Vec<Value> = (0..10)
            .map(|i| json!({ "thumbnail": format!("https://img.example/{i}.jpg") }))
            .collect();
        json!({
            "rating": 4.5,
            "reviews": reviews,
            "images": images,
            "hours": [{ "monday": "11 AM–11 PM" }],
            "type": ["Italian restaurant"]
        })
    }

    fn app_with(records: HashMap<String, Value>) -> Router {
        let analyzer = Analyzer::new(
            Box::new(StubSource { records }),
            InsightGenerator::new(None, 5),
            ScoreWeights::default(),
            NormalizeOptions {
                year_policy: YearPolicy::Fixed(Some(2015)),
            },
        );
        build_app(AppState {
            analyzer: Arc::new(analyzer),
            generative: false,
        })
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request should build")
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        serde_json::from_slice(&bytes).expect("body should be JSON")
    }

    #[tokio::test]
    async fn health_reports_insight_mode() {
        let app = app_with(HashMap::new());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .expect("request should build"),
            )
            .await
            .expect("handler should respond");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["status"], "ok");
        assert_eq!(body["data"]["insights"], "fallback");
        assert!(body["meta"]["request_id"].is_string());
    }

    #[tokio::test]
    async fn analyze_requires_business_name() {
        let app = app_with(HashMap::new());
        let response = app
            .oneshot(post_json("/api/v1/analyze", json!({ "website": "https://x.example" })))
            .await
            .expect("handler should respond");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "validation_error");
        assert_eq!(body["error"]["message"], "business_name is required");
    }

    #[tokio::test]
    async fn analyze_rejects_blank_business_name() {
        let app = app_with(HashMap::new());
        let response = app
            .oneshot(post_json("/api/v1/analyze", json!({ "business_name": "   " })))
            .await
            .expect("handler should respond");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn analyze_returns_full_report() {
        let app = app_with(HashMap::from([(
            "Mario's Pizza".to_owned(),
            restaurant_record(120),
        )]));
        let response = app
            .oneshot(post_json(
                "/api/v1/analyze",
                json!({ "business_name": "Mario's Pizza" }),
            ))
            .await
            .expect("handler should respond");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let data = &body["data"];
        assert_eq!(data["business"]["category"], "Italian restaurant");
        assert_eq!(data["business"]["cuisine_type"], "Restaurant");
        assert_eq!(data["business"]["total_reviews"], 120);
        let score = data["score"].as_f64().expect("score should be a number");
        assert!(score > 38.0 && score <= 100.0, "score was {score}");
        assert!(data["analysis"]["summary"].is_string());
        assert!(data["analysis"]["suggestions"].is_array());
    }

    #[tokio::test]
    async fn analyze_unknown_business_still_succeeds() {
        let app = app_with(HashMap::new());
        let response = app
            .oneshot(post_json(
                "/api/v1/analyze",
                json!({ "business_name": "Ghost Business" }),
            ))
            .await
            .expect("handler should respond");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["business"]["name"], "Ghost Business");
        assert_eq!(body["data"]["business"]["category"], "Business");
    }

    #[tokio::test]
    async fn compare_requires_both_names() {
        let app = app_with(HashMap::new());
        let response = app
            .oneshot(post_json(
                "/api/v1/compare",
                json!({ "your_business": "Mine" }),
            ))
            .await
            .expect("handler should respond");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn compare_ranks_review_volume() {
        let app = app_with(HashMap::from([
            ("Strong".to_owned(), restaurant_record(100)),
            ("Weak".to_owned(), restaurant_record(10)),
        ]));
        let response = app
            .oneshot(post_json(
                "/api/v1/compare",
                json!({ "your_business": "Strong", "competitor_business": "Weak" }),
            ))
            .await
            .expect("handler should respond");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let data = &body["data"];
        let yours = data["your_score"].as_f64().expect("your_score");
        let theirs = data["competitor_score"].as_f64().expect("competitor_score");
        assert!(yours > theirs, "{yours} vs {theirs}");
        let strengths = data["comparison"]["strengths"]
            .as_array()
            .expect("strengths array");
        assert!(
            strengths
                .iter()
                .filter_map(Value::as_str)
                .any(|s| s.contains("review volume")),
            "strengths: {strengths:?}"
        );
    }

    #[tokio::test]
    async fn competitors_returns_guidance_stub() {
        let app = app_with(HashMap::new());
        let response = app
            .oneshot(post_json(
                "/api/v1/competitors",
                json!({ "business_name": "Cafe Luna", "location": "Springfield" }),
            ))
            .await
            .expect("handler should respond");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let data = &body["data"];
        assert_eq!(data["business_name"], "Cafe Luna");
        assert_eq!(data["competitors"], json!([]));
        assert!(data["message"]
            .as_str()
            .expect("message")
            .contains("not yet implemented"));
        assert_eq!(data["suggestions"].as_array().expect("suggestions").len(), 3);
    }

    #[tokio::test]
    async fn request_id_header_is_echoed() {
        let app = app_with(HashMap::new());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .header("x-request-id", "fixed-id-123")
                    .body(Body::empty())
                    .expect("request should build"),
            )
            .await
            .expect("handler should respond");

        assert_eq!(
            response.headers().get("x-request-id").expect("header"),
            "fixed-id-123"
        );
        let body = body_json(response).await;
        assert_eq!(body["meta"]["request_id"], "fixed-id-123");
    }

    #[test]
    fn api_error_validation_error_maps_to_bad_request() {
        let response = ApiError::new("req-1", "validation_error", "invalid input").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
