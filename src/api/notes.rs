//! Character note endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, ValidatedJson};
use crate::domain::DomainError;
use crate::domain::note::Note;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNoteRequest {
    #[validate(range(min = 1))]
    pub character_id: i64,
    #[validate(length(min = 1, max = 200))]
    pub character_name: String,
    #[validate(length(min = 1, max = 5000))]
    pub note: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateNoteRequest {
    #[validate(length(min = 1, max = 5000))]
    pub note: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NoteCreatedResponse {
    pub note_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NoteListResponse {
    pub count: usize,
    pub data: Vec<Note>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// POST /api/notes
pub async fn create_note(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateNoteRequest>,
) -> Result<(StatusCode, Json<NoteCreatedResponse>), ApiError> {
    let note_id = state
        .notes
        .create(request.character_id, &request.character_name, &request.note)
        .await?;

    info!(note_id, character_id = request.character_id, "Note created");

    Ok((StatusCode::CREATED, Json(NoteCreatedResponse { note_id })))
}

/// GET /api/notes/{character_id}
pub async fn list_notes(
    State(state): State<AppState>,
    Path(character_id): Path<i64>,
) -> Result<Json<NoteListResponse>, ApiError> {
    let notes = state.notes.list_for_character(character_id).await?;

    Ok(Json(NoteListResponse {
        count: notes.len(),
        data: notes,
    }))
}

/// PUT /api/notes/{note_id}
pub async fn update_note(
    State(state): State<AppState>,
    Path(note_id): Path<i64>,
    ValidatedJson(request): ValidatedJson<UpdateNoteRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    if !state.notes.update(note_id, &request.note).await? {
        return Err(DomainError::not_found("Note").into());
    }

    Ok(Json(SuccessResponse { success: true }))
}

/// DELETE /api/notes/{note_id}
pub async fn delete_note(
    State(state): State<AppState>,
    Path(note_id): Path<i64>,
) -> Result<Json<SuccessResponse>, ApiError> {
    if !state.notes.delete(note_id).await? {
        return Err(DomainError::not_found("Note").into());
    }

    Ok(Json(SuccessResponse { success: true }))
}
