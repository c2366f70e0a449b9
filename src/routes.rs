use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::contest::{create_contest, get_contest, join_contest, leave_contest, list_contests};
use crate::leaderboard::get_leaderboard;
use crate::profile::{get_profile, upsert_profile};
use crate::shared::AppState;

/// Builds the full HTTP router. Shared by `main` and the integration tests.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/contests", get(list_contests).post(create_contest))
        .route("/contests/:id", get(get_contest))
        .route("/contests/:id/join", post(join_contest).delete(leave_contest))
        .route("/contests/:id/leaderboard", get(get_leaderboard))
        .route("/profile", get(get_profile).put(upsert_profile))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
