use axum::{
    body::{Body, Bytes},
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use pagetalk_context::truncate_messages;
use pagetalk_core::{ChatRequest, RelayError, TruncationResult};
use pagetalk_provider::build_payload;
use pagetalk_stream::{transcode, DELTA_BUFFER_SIZE};
use serde_json::json;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, error, info};

use crate::server::{cors_headers, GatewayState};

/// Handler for `POST /api/chat`.
///
/// Failure asymmetry: everything up to and including the provider invocation
/// answers with a status code and a JSON error body. The moment the provider
/// call succeeds, 200 `text/event-stream` is committed, and any later fault
/// surfaces as an error on the body stream — the status can no longer change.
pub async fn chat(State(state): State<GatewayState>, body: Bytes) -> Response {
    let request: ChatRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            // Parse detail stays in the logs; the client gets the fixed message.
            debug!(error = %e, "rejecting unparseable chat request body");
            return invalid_request();
        }
    };
    if request.messages.is_empty() {
        debug!("rejecting chat request with empty messages array");
        return invalid_request();
    }

    let TruncationResult {
        messages,
        was_truncated,
    } = truncate_messages(&request.messages, state.context_limit_tokens);
    if was_truncated {
        info!(message_count = messages.len(), "chat history was truncated");
    }

    let payload = build_payload(&state.model, &messages, request.context.as_ref());

    let frames = match state.provider.stream_chat(&payload).await {
        Ok(frames) => frames,
        Err(e) => {
            error!(error = %e, "provider invocation failed before streaming");
            let err = RelayError::Provider {
                message: e.to_string(),
            };
            return error_json(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string());
        }
    };

    let (tx, rx) = mpsc::channel::<Result<Bytes, RelayError>>(DELTA_BUFFER_SIZE);
    let provider_name = state.provider.name().to_string();
    tokio::spawn(async move {
        transcode(frames, &provider_name, tx).await;
    });

    let headers = [
        ("content-type", "text/event-stream"),
        ("cache-control", "no-cache"),
    ];
    (
        StatusCode::OK,
        cors_headers(),
        headers,
        Body::from_stream(ReceiverStream::new(rx)),
    )
        .into_response()
}

fn invalid_request() -> Response {
    error_json(
        StatusCode::BAD_REQUEST,
        &RelayError::InvalidRequest.to_string(),
    )
}

fn error_json(status: StatusCode, message: &str) -> Response {
    (status, cors_headers(), Json(json!({ "error": message }))).into_response()
}
