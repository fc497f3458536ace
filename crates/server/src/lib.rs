use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::IntoResponse,
};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, app, run_with_listener, spawn_with_listener};

mod fuel_logs;
mod server;
mod statistics;

pub mod types {
    pub mod fuel_log {
        pub use api_types::fuel_log::{FuelEntry, FuelEntryNew, FuelEntryView, FuelLogSummary};
    }

    pub mod stats {
        pub use api_types::stats::Statistic;
    }
}

pub enum ServerError {
    Engine(EngineError),
    /// A request the extractors refused, with the status axum picked for it.
    Rejected(StatusCode, String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::DuplicateOdometer(_) => StatusCode::CONFLICT,
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::InvalidEntry(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::Persistence(_) | EngineError::InvalidConfig(_) | EngineError::Database(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::Persistence(_) | EngineError::InvalidConfig(_) => {
            tracing::error!("{err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Rejected(status, err) => {
                tracing::debug!("rejected request ({status}): {err}");
                (status, err)
            }
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        Self::Rejected(value.status(), value.body_text())
    }
}

impl From<PathRejection> for ServerError {
    fn from(value: PathRejection) -> Self {
        Self::Rejected(value.status(), value.body_text())
    }
}
