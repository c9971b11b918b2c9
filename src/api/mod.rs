// Public API - what other modules can use
pub use handlers::{
    get_player_dashboard, get_status, list_badges, list_results, refresh_results,
};
pub use types::{ResultsQuery, ResultsResponse};

use axum::{
    routing::{get, post},
    Router,
};

use crate::shared::AppState;

// Internal modules
mod handlers;
mod types;

/// All routes of the insights service, without middleware layers
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "Match insights service" }))
        .route("/status", get(get_status))
        .route("/results", get(list_results))
        .route("/results/refresh", post(refresh_results))
        .route("/players/:name/dashboard", get(get_player_dashboard))
        .route("/badges", get(list_badges))
        .with_state(state)
}
