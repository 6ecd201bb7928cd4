//! Chat endpoint handler

use axum::extract::State;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ChatMessageRequest, ChatMessageResponse, Json};
use crate::domain::ChatMode;

/// POST /chat
///
/// Always answers 200 with `{"response": ...}` once the body parsed; failures
/// are rendered into the response text.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatMessageRequest>,
) -> Json<ChatMessageResponse> {
    let mode = ChatMode::resolve(request.mode.as_deref());

    // Dropping the handler future (client gone) cancels the job's polling
    let cancel = state.shutdown.child_token();
    let _guard = cancel.clone().drop_guard();

    let result = state
        .gateway
        .run_chat_job(&request.message, mode, &cancel)
        .await;

    debug!(mode = %mode, kind = ?result.kind(), "Rendering chat result");

    Json(ChatMessageResponse::new(result.render()))
}
