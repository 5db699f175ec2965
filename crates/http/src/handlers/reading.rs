use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use std::sync::Arc;

use readoku_core::{ReadingEvent, StoryId};

use crate::AppState;
use crate::api_error::ApiError;
use crate::auth::AuthUser;

pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<ReadingEvent>), ApiError> {
    let event = state.reading_service.mark_read(user_id, StoryId(id), Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn undo_last_read(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.reading_service.undo_last_read(user_id, StoryId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
