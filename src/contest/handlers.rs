use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::ContestService,
    types::{ContestResponse, CreateContestRequest},
};
use crate::context::RequestContext;
use crate::shared::{AppError, AppState};

fn contest_service(state: &AppState) -> ContestService {
    ContestService::new(
        Arc::clone(&state.contest_repository),
        Arc::clone(&state.profile_repository),
    )
}

/// HTTP handler for creating a new contest
///
/// POST /contests
/// The caller becomes the contest's creator
#[instrument(name = "create_contest", skip(state, ctx), fields(request_id = %ctx.request_id))]
pub async fn create_contest(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(request): Json<CreateContestRequest>,
) -> Result<(StatusCode, Json<ContestResponse>), AppError> {
    let user_id = ctx.require_user()?;
    info!(user_id = %user_id, title = %request.title, "Creating new contest");

    let contest = contest_service(&state)
        .create_contest(user_id, request)
        .await?;

    Ok((StatusCode::CREATED, Json(contest)))
}

/// GET /contests
#[instrument(name = "list_contests", skip(state))]
pub async fn list_contests(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContestResponse>>, AppError> {
    let contests = contest_service(&state).list_contests().await?;
    Ok(Json(contests))
}

/// GET /contests/:id
#[instrument(name = "get_contest", skip(state))]
pub async fn get_contest(
    State(state): State<AppState>,
    Path(contest_id): Path<String>,
) -> Result<Json<ContestResponse>, AppError> {
    let contest = contest_service(&state)
        .get_contest_details(&contest_id)
        .await?;
    Ok(Json(contest))
}

/// POST /contests/:id/join
#[instrument(name = "join_contest", skip(state, ctx), fields(request_id = %ctx.request_id))]
pub async fn join_contest(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(contest_id): Path<String>,
) -> Result<Json<ContestResponse>, AppError> {
    let user_id = ctx.require_user()?;
    let contest = contest_service(&state)
        .join_contest(&contest_id, user_id)
        .await?;
    Ok(Json(contest))
}

/// DELETE /contests/:id/join
#[instrument(name = "leave_contest", skip(state, ctx), fields(request_id = %ctx.request_id))]
pub async fn leave_contest(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(contest_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let user_id = ctx.require_user()?;
    contest_service(&state)
        .leave_contest(&contest_id, user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
