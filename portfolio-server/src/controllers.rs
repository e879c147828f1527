use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    Json,
};
use portfolio_core::{validate_required, ContactRequest, Envelope, Message};
use tracing::{debug, info};

use crate::error::{ServiceError, FETCH_FAILED, SEND_FAILED};
use crate::AppState;

pub const SEND_OK: &str = "Message sent successfully!";

/// Handler per POST /api/contact
pub async fn submit_contact(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope>), ServiceError> {
    // un body non JSON diventa comunque un envelope di errore, non il testo di axum
    let Json(req) = payload.map_err(|e| ServiceError::MalformedBody(e.body_text()))?;

    // solo presenza dei campi: il formato dell'email lo controlla il client
    validate_required(&req)?;

    let saved = state
        .store
        .insert(&req)
        .await
        .map_err(|e| ServiceError::storage(SEND_FAILED, e))?;
    info!(message_id = %saved.id, created_at = %saved.created_at, "contact message stored");

    Ok((StatusCode::CREATED, Json(Envelope::ok(SEND_OK))))
}

/// Handler per GET /api/messages
pub async fn list_messages(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<Message>>, ServiceError> {
    let messages = state
        .store
        .list_newest_first()
        .await
        .map_err(|e| ServiceError::storage(FETCH_FAILED, e))?;
    debug!(count = messages.len(), "listing contact messages");
    Ok(Json(messages))
}
