//! Detection and redaction routes.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use textveil_core::{Entity, Error};

use crate::state::AppState;

// ---------------------------------------------------------------
// Route builder
// ---------------------------------------------------------------

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/detect", post(detect))
        .route("/redact", post(redact))
        .route("/status", get(status))
}

// ---------------------------------------------------------------
// Request/Response types
// ---------------------------------------------------------------

#[derive(serde::Deserialize)]
struct DetectInput {
    text: String,
}

#[derive(serde::Deserialize)]
struct RedactInput {
    text: String,
    /// Redact these entities instead of running detection. Offsets must
    /// reference `text` exactly as sent.
    entities: Option<Vec<Entity>>,
    mask: Option<String>,
}

fn error_response(err: Error) -> (StatusCode, Json<serde_json::Value>) {
    let code = match err {
        Error::InvalidInput(_) | Error::SpanOutOfBounds { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (code, Json(serde_json::json!({ "error": err.to_string() })))
}

// ---------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------

async fn detect(
    State(state): State<Arc<AppState>>,
    Json(input): Json<DetectInput>,
) -> Json<serde_json::Value> {
    let outcome = state.pipeline.detect_with_status(&input.text);
    let count = outcome.entities.len();
    Json(serde_json::json!({
        "entities": outcome.entities,
        "count": count,
        "recognizer": outcome.recognizer,
    }))
}

async fn redact(
    State(state): State<Arc<AppState>>,
    Json(input): Json<RedactInput>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    match input.entities {
        Some(entities) => {
            let (text, report) = state
                .pipeline
                .redact_entities(&input.text, &entities, input.mask.as_deref())
                .map_err(error_response)?;
            let count = report.len();
            Ok(Json(serde_json::json!({
                "text": text,
                "report": report,
                "count": count,
            })))
        }
        None => {
            let redaction = state.pipeline.redact(&input.text).map_err(error_response)?;
            let count = redaction.report.len();
            Ok(Json(serde_json::json!({
                "text": redaction.text,
                "report": redaction.report,
                "count": count,
                "recognizer": redaction.recognizer,
            })))
        }
    }
}

async fn status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "patterns": textveil_patterns::pattern_names(),
        "recognizer": {
            "backend": state.pipeline.recognizer_name(),
            "available": state.pipeline.recognizer_available(),
        },
        "mask": state.pipeline.mask(),
    }))
}
