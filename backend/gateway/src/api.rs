use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::{Value, json};
use tracing::{info, warn};

use oravision_core::{AnalysisResult, FeatureKind, OravisionError};
use oravision_logging::{EventLogger, RequestEvent};
use oravision_understanding::AnalysisOutcome;

use crate::error::ApiError;
use crate::server::GatewayState;

pub const ANALYZE_IMAGE: &str = "/api/analyze-image";
pub const QUERY_ORA: &str = "/api/query-ora";
pub const ANALYZE_AND_QUERY: &str = "/api/analyze-and-query";
pub const HEALTH: &str = "/api/health";

// ---------------------------------------------------------------------------
// Body helpers
// ---------------------------------------------------------------------------

fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    body.map(|Json(v)| v).map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::TooLarge(rejection.body_text());
        }
        ApiError::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    })
}

/// A present, non-null, non-empty field. Only presence is checked.
fn required<'a>(body: &'a Value, field: &str) -> Result<&'a Value, ApiError> {
    match body.get(field) {
        None | Some(Value::Null) => Err(ApiError::missing(field)),
        Some(Value::String(s)) if s.is_empty() => Err(ApiError::missing(field)),
        Some(v) => Ok(v),
    }
}

/// String form of a field value; non-strings are passed on as their JSON text.
fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_features(body: &Value) -> Result<Vec<FeatureKind>, OravisionError> {
    match body.get("features") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => {
            let names: Vec<String> = items.iter().map(as_text).collect();
            FeatureKind::parse_list(&names)
        }
        Some(other) => Err(OravisionError::UnknownFeature(format!(
            "features must be an array of feature names, got {other}"
        ))),
    }
}

async fn run_analysis(
    state: &GatewayState,
    route: &str,
    image_url: &str,
    body: &Value,
) -> Result<AnalysisOutcome, OravisionError> {
    let features = parse_features(body)?;
    let outcome = state.vision.analyze_with_outcome(image_url, &features).await?;
    EventLogger::log_event(
        route,
        RequestEvent::Analyzed {
            image: short_ref(image_url),
            backend: outcome.backend.clone(),
            labels: outcome.result.labels.len(),
            objects: outcome.result.objects.len(),
            fallback: outcome.fallback,
        },
    );
    Ok(outcome)
}

/// Inline payloads are huge; log only their header.
fn short_ref(image_url: &str) -> String {
    match image_url.split_once(',') {
        Some((head, data)) if head.starts_with("data:") => format!("{head},<{} chars>", data.len()),
        _ => image_url.to_string(),
    }
}

fn log_failure(route: &str, error: &str) {
    EventLogger::log_event(route, RequestEvent::Failed { error_msg: error.to_string() });
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `POST /api/analyze-image`: `{imageUrl, features?}`.
pub async fn analyze_image(
    State(state): State<GatewayState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let body = json_body(body)?;
    let image_url = as_text(required(&body, "imageUrl")?);

    match run_analysis(&state, ANALYZE_IMAGE, &image_url, &body).await {
        Ok(outcome) => Ok(Json(json!({ "success": true, "data": outcome.result }))),
        Err(e) => {
            warn!(error = %e, "Image analysis failed");
            log_failure(ANALYZE_IMAGE, &e.to_string());
            Ok(Json(json!({ "success": false, "error": e.to_string() })))
        }
    }
}

/// `POST /api/query-ora`: `{imageAnalysis, query}`.
pub async fn query_ora(
    State(state): State<GatewayState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let body = json_body(body)?;
    let raw_analysis = required(&body, "imageAnalysis")?;
    let query = as_text(required(&body, "query")?);

    let analysis: AnalysisResult = match serde_json::from_value(raw_analysis.clone()) {
        Ok(analysis) => analysis,
        Err(e) => {
            let message = format!("Invalid imageAnalysis: {e}");
            log_failure(QUERY_ORA, &message);
            return Ok(Json(json!({ "error": message })));
        }
    };

    let answer = state.ora.ask(&analysis, &query).await;
    if let Some(text) = answer.text() {
        EventLogger::log_event(
            QUERY_ORA,
            RequestEvent::Answered { query: query.clone(), completion_chars: text.chars().count() },
        );
    }
    Ok(Json(serde_json::to_value(&answer).map_err(|e| ApiError::Internal(e.to_string()))?))
}

/// `POST /api/analyze-and-query`: `{imageUrl, query, features?}`.
pub async fn analyze_and_query(
    State(state): State<GatewayState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let body = json_body(body)?;
    let image_url = as_text(required(&body, "imageUrl")?);
    let query = as_text(required(&body, "query")?);

    let outcome = run_analysis(&state, ANALYZE_AND_QUERY, &image_url, &body)
        .await
        .map_err(|e| {
            log_failure(ANALYZE_AND_QUERY, &e.to_string());
            ApiError::Internal(e.to_string())
        })?;

    let answer = state.ora.ask(&outcome.result, &query).await;
    info!(fallback = outcome.fallback, "Analyzed and answered");

    Ok(Json(json!({
        "success": true,
        "imageAnalysis": outcome.result,
        "oraResponse": answer,
    })))
}

/// Health check endpoint.
pub async fn health(State(state): State<GatewayState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "oravision",
        "version": env!("CARGO_PKG_VERSION"),
        "visionBackend": state.vision.backend_name(),
        "oraBackend": state.ora.backend_name(),
    }))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_treats_null_and_empty_as_missing() {
        let body = json!({ "a": null, "b": "", "c": "x", "d": 0 });
        assert!(required(&body, "a").is_err());
        assert!(required(&body, "b").is_err());
        assert!(required(&body, "missing").is_err());
        assert_eq!(required(&body, "c").unwrap(), "x");
        assert_eq!(required(&body, "d").unwrap(), 0);
    }

    #[test]
    fn features_parse_from_array_only() {
        assert!(parse_features(&json!({})).unwrap().is_empty());
        assert_eq!(
            parse_features(&json!({ "features": ["TEXT_DETECTION"] })).unwrap(),
            vec![FeatureKind::TextDetection]
        );
        assert!(parse_features(&json!({ "features": "TEXT_DETECTION" })).is_err());
        assert!(parse_features(&json!({ "features": ["NOPE"] })).is_err());
    }

    #[test]
    fn inline_refs_are_shortened_for_logs() {
        assert_eq!(short_ref("data:image/png;base64,aGVsbG8="), "data:image/png;base64,<8 chars>");
        assert_eq!(short_ref("https://x/y.jpg"), "https://x/y.jpg");
    }
}
