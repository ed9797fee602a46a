use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use serde::Deserialize;

use super::{required_field, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub your_business: Option<String>,
    pub your_website: Option<String>,
    pub competitor_business: Option<String>,
    pub competitor_website: Option<String>,
}

/// `POST /api/v1/compare` — head-to-head comparison of two businesses.
pub async fn compare_businesses(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<CompareRequest>,
) -> axum::response::Response {
    let yours = match required_field(request.your_business.as_deref(), "your_business", &req_id.0) {
        Ok(name) => name,
        Err(error) => return error.into_response(),
    };
    let competitor = match required_field(
        request.competitor_business.as_deref(),
        "competitor_business",
        &req_id.0,
    ) {
        Ok(name) => name,
        Err(error) => return error.into_response(),
    };

    let report = state
        .analyzer
        .compare(
            yours,
            request.your_website.as_deref(),
            competitor,
            request.competitor_website.as_deref(),
        )
        .await;
    (
        StatusCode::OK,
        Json(ApiResponse {
            data: report,
            meta: ResponseMeta::new(req_id.0),
        }),
    )
        .into_response()
}
