use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::ProfileService,
    types::{ProfileResponse, UpsertProfileRequest},
};
use crate::context::RequestContext;
use crate::shared::{AppError, AppState};

/// GET /profile
/// Returns the caller's profile
#[instrument(name = "get_profile", skip(state, ctx), fields(request_id = %ctx.request_id))]
pub async fn get_profile(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<ProfileResponse>, AppError> {
    let user_id = ctx.require_user()?;

    let service = ProfileService::new(Arc::clone(&state.profile_repository));
    Ok(Json(service.get_profile(user_id).await?))
}

/// PUT /profile
/// Creates or updates the caller's display name and linked stats account
#[instrument(name = "upsert_profile", skip(state, ctx), fields(request_id = %ctx.request_id))]
pub async fn upsert_profile(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(request): Json<UpsertProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user_id = ctx.require_user()?;
    info!(user_id = %user_id, "Saving profile");

    let service = ProfileService::new(Arc::clone(&state.profile_repository));
    Ok(Json(service.upsert_profile(user_id, request).await?))
}
