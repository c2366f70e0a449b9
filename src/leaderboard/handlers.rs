use axum::{
    extract::{Path, State},
    Json,
};
use tracing::instrument;

use super::ContestLeaderboard;
use crate::context::RequestContext;
use crate::shared::{AppError, AppState};

/// GET /contests/:id/leaderboard
///
/// Recomputed on every request from live provider stats. Anonymous viewers are allowed.
#[instrument(name = "get_leaderboard", skip(state, ctx), fields(request_id = %ctx.request_id))]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(contest_id): Path<String>,
) -> Result<Json<ContestLeaderboard>, AppError> {
    let leaderboard = state
        .aggregation_service
        .aggregate(&ctx, &contest_id)
        .await?;
    Ok(Json(leaderboard))
}
