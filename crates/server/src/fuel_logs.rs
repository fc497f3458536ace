//! Fuel log API endpoints

use api_types::{
    fuel_log::{FuelEntry, FuelEntryNew, FuelEntryView, FuelLogSummary},
    stats::Statistic,
};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use engine::{DerivedEntry, NewEntry, RawEntry, Stats, Tracker};
use tokio::sync::MutexGuard;
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn map_entry(raw: &RawEntry) -> FuelEntry {
    FuelEntry {
        id: raw.id,
        date: raw.date,
        liters: raw.liters,
        total_price: raw.total_price,
        odometer: raw.odometer,
    }
}

fn map_view(entry: &DerivedEntry) -> FuelEntryView {
    FuelEntryView {
        entry: map_entry(&entry.raw),
        total_cost: entry.total_cost,
        trip_distance: entry.trip_distance,
        l100km: entry.l100km,
    }
}

pub(crate) fn map_stats(stats: Stats) -> Statistic {
    Statistic {
        average_consumption: stats.average_consumption,
        total_cost: stats.total_cost,
        total_distance: stats.total_distance,
    }
}

/// Lock the tracker and pull the latest entries from the database.
///
/// When the reload fails the previous log is served instead.
pub(crate) async fn refreshed(state: &ServerState) -> MutexGuard<'_, Tracker> {
    let mut tracker = state.tracker.lock().await;
    if let Err(err) = tracker.load().await {
        tracing::debug!("serving the previous fuel log after a failed reload: {err}");
    }
    tracker
}

/// Stored entries, ascending by odometer.
pub async fn list(State(state): State<ServerState>) -> Json<Vec<FuelEntry>> {
    let tracker = refreshed(&state).await;
    Json(
        tracker
            .entries()
            .iter()
            .map(|entry| map_entry(&entry.raw))
            .collect(),
    )
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<FuelEntryNew>, JsonRejection>,
) -> Result<(StatusCode, Json<FuelEntry>), ServerError> {
    let Json(payload) = payload?;
    let mut tracker = refreshed(&state).await;
    let stored = tracker
        .add(NewEntry {
            date: payload.date,
            liters: payload.liters,
            total_price: payload.total_price,
            odometer: payload.odometer,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(map_entry(&stored))))
}

pub async fn remove(
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ServerError> {
    let Path(id) = id?;
    state.tracker.lock().await.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Derived entries and statistics in one response.
pub async fn summary(State(state): State<ServerState>) -> Json<FuelLogSummary> {
    let tracker = refreshed(&state).await;
    Json(FuelLogSummary {
        entries: tracker.entries().iter().map(map_view).collect(),
        stats: map_stats(tracker.stats()),
    })
}
