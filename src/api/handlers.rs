use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::{info, instrument, warn};

use super::types::{ResultsQuery, ResultsResponse};
use crate::records::StoreStatus;
use crate::shared::{AppError, AppState};
use crate::stats::{badge_definitions, player_dashboard, BadgeInfo, PlayerDashboard};

/// GET /status
pub async fn get_status(State(state): State<AppState>) -> Json<StoreStatus> {
    Json(state.store.status().await)
}

/// HTTP handler for refetching match records
///
/// POST /results/refresh
/// A failed fetch is reported through the returned status, not as an error
#[instrument(name = "refresh_results", skip(state))]
pub async fn refresh_results(State(state): State<AppState>) -> Json<StoreStatus> {
    match state.store.refresh(state.source.as_ref()).await {
        Ok(snapshot) => info!(
            generation = snapshot.generation,
            count = snapshot.records.len(),
            "Results refreshed"
        ),
        Err(err) => warn!(%err, "Results refresh did not produce a snapshot"),
    }

    Json(state.store.status().await)
}

/// HTTP handler for the results table
///
/// GET /results?search=&winner=&from=&to=&sort=&dir=&toggle=
/// Returns the filtered, sorted records with their summary
#[instrument(name = "list_results", skip(state))]
pub async fn list_results(
    State(state): State<AppState>,
    Query(query): Query<ResultsQuery>,
) -> Result<Json<ResultsResponse>, AppError> {
    let criteria = query.criteria()?;
    let sort = query.sort_spec()?;
    let snapshot = state.store.ready_snapshot().await?;

    let view = state
        .views
        .lock()
        .await
        .get_or_compute(&snapshot, &criteria, sort);

    info!(
        generation = snapshot.generation,
        shown = view.records.len(),
        total = snapshot.records.len(),
        "Results listed"
    );

    Ok(Json(ResultsResponse {
        sort,
        view: (*view).clone(),
    }))
}

/// HTTP handler for a player's profile
///
/// GET /players/:name/dashboard
#[instrument(name = "get_player_dashboard", skip(state))]
pub async fn get_player_dashboard(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<PlayerDashboard>, AppError> {
    let snapshot = state.store.ready_snapshot().await?;
    Ok(Json(player_dashboard(&snapshot.records, &name)))
}

/// GET /badges
pub async fn list_badges() -> Json<Vec<BadgeInfo>> {
    Json(badge_definitions().iter().map(|badge| badge.info()).collect())
}
