use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use std::sync::Arc;

use readoku_core::{Paginated, Story, StoryDetail, StoryId, StorySummary};

use crate::AppState;
use crate::api_error::ApiError;
use crate::auth::AuthUser;
use crate::query_types::{GenerateStoryRequest, ListStoriesQuery};

pub async fn generate_story(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<GenerateStoryRequest>,
) -> Result<(StatusCode, Json<Story>), ApiError> {
    let story = state.story_service.generate_story(user_id, &req.prompt, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(story)))
}

pub async fn list_stories(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<ListStoriesQuery>,
) -> Result<Json<Paginated<StorySummary>>, ApiError> {
    let page =
        state.story_service.list_stories(user_id, query.page(), query.capped_limit()).await?;
    Ok(Json(page))
}

pub async fn get_story(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<StoryDetail>, ApiError> {
    let detail = state.story_service.get_story(user_id, StoryId(id)).await?;
    Ok(Json(detail))
}
