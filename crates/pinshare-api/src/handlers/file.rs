//! Uploaded-file handlers.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use pinshare_core::error::AppError;
use pinshare_core::types::file::FileRecord;
use pinshare_core::types::id::FileId;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::Owner;
use crate::state::AppState;

/// GET /api/files
pub async fn list_files(
    State(state): State<AppState>,
    owner: Owner,
) -> Result<Json<ApiResponse<Vec<FileRecord>>>, ApiError> {
    let files = state.uploads.list(&owner).await?;
    Ok(Json(ApiResponse::ok(files)))
}

/// GET /api/files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    owner: Owner,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<FileRecord>>, ApiError> {
    let file = state.uploads.get(&owner, FileId::from_uuid(id)).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// POST /api/files (multipart, `file` field)
pub async fn upload_file(
    State(state): State<AppState>,
    owner: Owner,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<FileRecord>>), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("Failed to read upload: {e}")))?;

        let record = state
            .uploads
            .upload(&owner, &file_name, content_type.as_deref(), data)
            .await?;
        return Ok((StatusCode::CREATED, Json(ApiResponse::ok(record))));
    }

    Err(AppError::validation("Multipart field 'file' is required").into())
}

/// DELETE /api/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    owner: Owner,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.uploads.delete(&owner, FileId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
