//! Fuel log engine.
//!
//! [`FuelLog`] turns raw fill-ups into an odometer-ordered view with trip
//! distance and consumption, plus aggregate [`Stats`]. [`Tracker`] keeps a log
//! in sync with a [`FuelGateway`].
pub use entry::{DerivedEntry, NewEntry, RawEntry};
pub use error::EngineError;
pub use fuel_log::{ConsumptionBasis, FuelLog, Stats};
pub use gateway::{DatabaseGateway, FuelGateway, LocalFileGateway};
pub use tracker::{Tracker, TrackerBuilder};

pub mod entry;
mod error;
mod fuel_log;
mod gateway;
mod tracker;

pub type ResultEngine<T> = Result<T, EngineError>;
