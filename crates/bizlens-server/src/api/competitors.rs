use axum::{http::StatusCode, response::IntoResponse, Extension, Json};
use serde::{Deserialize, Serialize};

use super::{required_field, ApiResponse, ResponseMeta};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub struct CompetitorsRequest {
    pub business_name: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Serialize)]
struct CompetitorsData {
    business_name: String,
    location: Option<String>,
    competitors: Vec<serde_json::Value>,
    message: &'static str,
    suggestions: Vec<&'static str>,
}

/// `POST /api/v1/competitors` — placeholder: automatic competitor discovery
/// is not implemented, callers get manual-research guidance instead.
pub async fn find_competitors(
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<CompetitorsRequest>,
) -> axum::response::Response {
    let name = match required_field(request.business_name.as_deref(), "business_name", &req_id.0) {
        Ok(name) => name,
        Err(error) => return error.into_response(),
    };

    (
        StatusCode::OK,
        Json(ApiResponse {
            data: CompetitorsData {
                business_name: name.to_owned(),
                location: request.location,
                competitors: Vec::new(),
                message: "Competitor finding functionality not yet implemented. \
                          Please specify competitors manually.",
                suggestions: vec![
                    "Use Google Maps to search for similar businesses in your area",
                    "Look for businesses with similar categories or services",
                    "Check local business directories for competitors",
                ],
            },
            meta: ResponseMeta::new(req_id.0),
        }),
    )
        .into_response()
}
