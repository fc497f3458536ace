//! The module contains the error the engine can throw.
//!
//! The derivation itself never fails: every error here comes from the
//! orchestration boundary ([`Tracker`]) or from a persistence gateway.
//!
//! - [`DuplicateOdometer`] thrown when a new entry repeats a positive odometer.
//! - [`KeyNotFound`] thrown when an entry to delete does not exist.
//! - [`Persistence`] thrown when a gateway could not complete an operation.
//!
//!  [`DuplicateOdometer`]: EngineError::DuplicateOdometer
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`Persistence`]: EngineError::Persistence
//!  [`Tracker`]: super::tracker::Tracker
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("an entry with odometer {0} km already exists")]
    DuplicateOdometer(u64),
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Persistence failure: {0}")]
    Persistence(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::DuplicateOdometer(a), Self::DuplicateOdometer(b)) => a == b,
            (Self::InvalidEntry(a), Self::InvalidEntry(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::Persistence(a), Self::Persistence(b)) => a == b,
            (Self::InvalidConfig(a), Self::InvalidConfig(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
