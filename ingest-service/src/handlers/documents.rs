use crate::dtos::{InsertResponse, MessageResponse};
use crate::models::{document_from_json, document_to_json, id_to_string};
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use service_core::error::AppError;

/// Static placeholder; not backed by stored documents.
pub async fn get_data() -> Json<MessageResponse> {
    Json(MessageResponse::retrieved())
}

/// Inserts the JSON body as a new document and echoes it back as stored.
///
/// Every failure, from an unparseable body to an unreachable database, is
/// reported as a 400 carrying the underlying message.
pub async fn insert_data(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let response = insert_and_fetch(&state, payload).await.map_err(|e| {
        tracing::warn!(error = %e, "Insert failed");
        e.into_bad_request()
    })?;

    Ok((StatusCode::CREATED, Json(response)))
}

async fn insert_and_fetch(
    state: &AppState,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<InsertResponse, AppError> {
    let Json(payload) =
        payload.map_err(|rejection| AppError::BadRequest(anyhow::anyhow!(rejection.body_text())))?;
    tracing::debug!(payload = %payload, "Received insert payload");

    let document = document_from_json(&payload)?;
    let id = state.store.insert(document).await?;
    let id_string = id_to_string(&id);

    let stored = state.store.find_by_id(&id).await?.ok_or_else(|| {
        AppError::NotFound(anyhow::anyhow!(
            "inserted document {} could not be read back",
            id_string
        ))
    })?;

    tracing::info!(document_id = %id_string, "Document inserted");

    Ok(InsertResponse::new(id_string, document_to_json(stored)))
}
