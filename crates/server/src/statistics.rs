//! Statistics API endpoints

use api_types::stats::Statistic;
use axum::{Json, extract::State};

use crate::{fuel_logs, server::ServerState};

/// Handle requests for the dashboard statistics
pub async fn get_stats(State(state): State<ServerState>) -> Json<Statistic> {
    let tracker = fuel_logs::refreshed(&state).await;
    Json(fuel_logs::map_stats(tracker.stats()))
}
