use axum::{Json, extract::State};
use chrono::Utc;
use std::sync::Arc;

use readoku_core::{GenerationStatus, StatsSnapshot};

use crate::AppState;
use crate::api_error::ApiError;
use crate::auth::AuthUser;

pub async fn get_user_stats(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<StatsSnapshot>, ApiError> {
    let snapshot = state.stats_service.compute_stats(user_id, Utc::now()).await?;
    Ok(Json(snapshot))
}

pub async fn get_generation_status(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<GenerationStatus>, ApiError> {
    let status = state
        .quota_service
        .generation_status(user_id, state.config.daily_limit, Utc::now())
        .await?;
    Ok(Json(status))
}
