// POST /chat: one turn of the claim assistant.
//
// Body is a ConversationTurn as JSON. Returns {"reply": ..., "language": ...}.
// The body is read raw so an empty or null payload gets the same JSON error
// shape as every other failure instead of axum's plain-text rejection.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

use crate::chat::ConversationTurn;
use crate::pipeline::conversation;
use crate::web::{api_error, AppState};

pub async fn chat(State(state): State<AppState>, body: Bytes) -> Response {
    let value: serde_json::Value = if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::Value::Null
    } else {
        match serde_json::from_slice(&body) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "Invalid chat JSON");
                return api_error(StatusCode::BAD_REQUEST, "Invalid JSON body");
            }
        }
    };

    if value.is_null() || value.as_object().is_some_and(|o| o.is_empty()) {
        return api_error(StatusCode::BAD_REQUEST, "No data provided");
    }

    let turn: ConversationTurn = match serde_json::from_value(value) {
        Ok(t) => t,
        Err(e) => {
            warn!(error = %e, "Chat body did not match the expected shape");
            return api_error(StatusCode::BAD_REQUEST, "Invalid chat request");
        }
    };

    match conversation::reply(state.generator.as_ref(), &turn).await {
        Ok(reply) => Json(reply).into_response(),
        Err(e) => {
            error!(error = %format!("{e:#}"), "Chat failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate a reply")
        }
    }
}
