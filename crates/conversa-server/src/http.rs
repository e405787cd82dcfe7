//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use conversa_core::{ChatOutcome, ConversaError};

use crate::AppState;

/// Liveness banner
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Request body for a conversational turn
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    #[serde(default)]
    pub texto: String,
    #[serde(default = "default_session_id")]
    pub session_id: String,
}

fn default_session_id() -> String {
    "sessao".to_string()
}

/// Response body for a conversational turn
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub resposta: String,
}

/// Response body for the context endpoint
#[derive(Debug, Serialize)]
pub struct ContextResponse {
    pub contexto: String,
}

/// Request body for a prompt update
#[derive(Debug, Deserialize)]
pub struct PromptUpdateRequest {
    pub conteudo: String,
}

/// Response body for a prompt update
#[derive(Debug, Serialize)]
pub struct PromptUpdateResponse {
    pub status: String,
    pub message: String,
}

/// Response body for the current prompt
#[derive(Debug, Serialize)]
pub struct PromptResponse {
    pub prompt: String,
}

/// Liveness/banner endpoint
pub async fn home() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "✅ API Z.ai ativa e mantendo contexto incremental.".to_string(),
    })
}

/// Handle one user message.
///
/// Always answers 200: business failures are rendered into `resposta`
/// rather than surfaced as transport errors.
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MessageRequest>,
) -> Json<MessageResponse> {
    let texto = request.texto.trim();

    if texto.is_empty() {
        return Json(MessageResponse {
            resposta: "Por favor, envie uma mensagem válida.".to_string(),
        });
    }

    let outcome = state.relay.handle(&request.session_id, texto).await;
    Json(MessageResponse {
        resposta: render_outcome(outcome),
    })
}

/// Render a turn outcome into the fixed user-facing string shapes.
///
/// The prefixes distinguish transport-layer from logic-layer failures and
/// are relied on by the frontend.
fn render_outcome(outcome: ChatOutcome) -> String {
    match outcome {
        ChatOutcome::Reply(text) => text,
        ChatOutcome::UpstreamError(body) => format!("❌ Erro na API Z.ai: {}", body),
        ChatOutcome::Empty => "⚠️ Nenhuma resposta gerada pela API Z.ai.".to_string(),
        ChatOutcome::Internal(detail) => format!("💥 Erro interno no backend: {}", detail),
    }
}

/// Get a session's running context (empty string if none recorded)
pub async fn get_context(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<ContextResponse>, (StatusCode, String)> {
    state
        .relay
        .context()
        .get(&session_id)
        .map(|contexto| Json(ContextResponse { contexto }))
        .map_err(internal_error)
}

/// Replace the global system prompt
pub async fn update_prompt(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PromptUpdateRequest>,
) -> Result<Json<PromptUpdateResponse>, (StatusCode, String)> {
    let conteudo = request.conteudo.trim();
    if conteudo.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "O conteúdo do prompt não pode ser vazio.".to_string(),
        ));
    }

    state
        .relay
        .prompt()
        .update(conteudo)
        .map_err(internal_error)?;

    Ok(Json(PromptUpdateResponse {
        status: "success".to_string(),
        message: "Prompt do sistema atualizado com sucesso.".to_string(),
    }))
}

/// Get the current global system prompt, seeding the default on first call
pub async fn current_prompt(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PromptResponse>, (StatusCode, String)> {
    state
        .relay
        .prompt()
        .current()
        .map(|prompt| Json(PromptResponse { prompt }))
        .map_err(internal_error)
}

fn internal_error(e: ConversaError) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
