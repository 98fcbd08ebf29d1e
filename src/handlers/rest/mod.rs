use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use utoipa::OpenApi;

use crate::{
    dto::{
        CreateNoteRequest, MessageResponse, NoteResponse, SummarizeRequest, SummarizeResponse,
        UpdateNoteRequest,
    },
    error::ApiError,
    server::AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        create_note,
        update_note,
        delete_note,
        get_one_note,
        get_all_notes,
        summarize
    ),
    components(schemas(
        NoteResponse,
        CreateNoteRequest,
        UpdateNoteRequest,
        SummarizeRequest,
        SummarizeResponse,
        MessageResponse
    )),
    tags(
        (name = "notes", description = "Notes management API"),
        (name = "summarize", description = "AI text summarization")
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    post,
    path = "/api/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 200, description = "Note created successfully", body = NoteResponse),
        (status = 400, description = "Title missing or empty"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(state): State<AppState>,
    Json(payload): Json<CreateNoteRequest>,
) -> Result<Response, ApiError> {
    let note = state.notes.create_note(payload).await?;

    Ok((StatusCode::OK, Json(note)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated successfully", body = NoteResponse),
        (status = 400, description = "Title missing or empty"),
        (status = 404, description = "Note not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateNoteRequest>,
) -> Result<Response, ApiError> {
    let note = state.notes.update_note(id, payload).await?;

    Ok((StatusCode::OK, Json(note)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note deleted successfully", body = MessageResponse),
        (status = 404, description = "Note not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    state.notes.delete_note(id).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Note deleted successfully".to_string(),
        }),
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/api/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = NoteResponse),
        (status = 404, description = "Note not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_one_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let note = state.notes.get_one_note(id).await?;

    Ok((StatusCode::OK, Json(note)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/notes",
    responses(
        (status = 200, description = "All notes, most recently updated first", body = Vec<NoteResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_all_notes(State(state): State<AppState>) -> Result<Response, ApiError> {
    let notes = state.notes.get_all_notes().await?;

    Ok((StatusCode::OK, Json(notes)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/summarize",
    request_body = SummarizeRequest,
    responses(
        (status = 200, description = "Summary generated", body = SummarizeResponse),
        (status = 400, description = "Text missing or blank"),
        (status = 401, description = "Upstream rejected the API key"),
        (status = 429, description = "Upstream rate limit hit"),
        (status = 500, description = "Upstream or configuration failure")
    ),
    tag = "summarize"
)]
#[debug_handler]
pub async fn summarize(
    State(state): State<AppState>,
    Json(payload): Json<SummarizeRequest>,
) -> Result<Response, ApiError> {
    let summary = state.summarizer.summarize(payload.text).await?;

    Ok((StatusCode::OK, Json(SummarizeResponse { summary })).into_response())
}
