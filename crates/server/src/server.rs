use axum::{
    Router,
    routing::{delete, get},
};
use tokio::sync::Mutex;

use std::sync::Arc;

use crate::{fuel_logs, statistics};
use engine::Tracker;

/// Shared handler state.
///
/// The tracker sits behind an async mutex so each persistence call and the
/// log rebuild that follows it happen as one step.
#[derive(Clone)]
pub struct ServerState {
    pub tracker: Arc<Mutex<Tracker>>,
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/fuel-logs", get(fuel_logs::list).post(fuel_logs::create))
        .route("/fuel-logs/summary", get(fuel_logs::summary))
        .route("/fuel-logs/{id}", delete(fuel_logs::remove))
        .route("/stats", get(statistics::get_stats))
        .with_state(state)
}

/// Build the application router around `tracker`.
pub fn app(tracker: Tracker) -> Router {
    router(ServerState {
        tracker: Arc::new(Mutex::new(tracker)),
    })
}

pub async fn run_with_listener(
    tracker: Tracker,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(tracker)).await
}

pub fn spawn_with_listener(
    tracker: Tracker,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(tracker, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
