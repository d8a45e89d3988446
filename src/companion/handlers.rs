use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::prompts::build_companion_prompt;

use super::{
    error::CompanionError,
    types::{CompanionRequest, CompanionResponse, DEFAULT_STUDENT_NAME},
    AppState,
};

/// CORS preflight. The headers are added by the router layers.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> (StatusCode, Json<Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
}

/// `POST` handler. Always answers `200` with a non-empty `message`; failures
/// only show up in the `error` field.
pub async fn companion_message(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Json<CompanionResponse> {
    let request_id = Uuid::new_v4().to_string();

    let request = match parse_request(body) {
        Ok(request) => request,
        Err(err) => {
            warn!(request_id = %request_id, error = %err, "rejected companion request body");
            return Json(CompanionResponse::degraded(&err, DEFAULT_STUDENT_NAME));
        }
    };

    let student_name = request.student_name();
    let kind = request.kind();

    match generate(&state, &request).await {
        Ok(message) => {
            info!(
                request_id = %request_id,
                kind = kind.as_str(),
                "companion message generated"
            );
            Json(CompanionResponse::generated(message, student_name))
        }
        Err(err) => {
            warn!(
                request_id = %request_id,
                kind = kind.as_str(),
                error = %err,
                "serving fallback companion message"
            );
            Json(CompanionResponse::degraded(&err, student_name))
        }
    }
}

fn parse_request(body: Result<Bytes, BytesRejection>) -> Result<CompanionRequest, CompanionError> {
    let body = body.map_err(|e| CompanionError::InvalidRequest(e.body_text()))?;
    serde_json::from_slice(&body).map_err(|e| CompanionError::InvalidRequest(e.to_string()))
}

async fn generate(state: &AppState, request: &CompanionRequest) -> Result<String, CompanionError> {
    let prompt = build_companion_prompt(request.kind(), request.student_name(), request.context())?;
    let client = state
        .anthropic
        .as_ref()
        .ok_or(CompanionError::ConfigurationMissing)?;
    client.complete(&prompt).await
}
