use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use serde::Deserialize;

use super::{required_field, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub business_name: Option<String>,
    pub website: Option<String>,
}

/// `POST /api/v1/analyze` — full analysis of one business.
pub async fn analyze_business(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<AnalyzeRequest>,
) -> axum::response::Response {
    let name = match required_field(request.business_name.as_deref(), "business_name", &req_id.0) {
        Ok(name) => name,
        Err(error) => return error.into_response(),
    };

    let report = state
        .analyzer
        .analyze(name, request.website.as_deref())
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
