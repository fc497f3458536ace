//! JSON bodies exchanged between the fuel log server and its clients.
//!
//! Field names are camelCase on the wire.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod fuel_log {
    use super::*;

    /// Request body for a new fill-up.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct FuelEntryNew {
        /// Day of the fill-up, `YYYY-MM-DD`.
        pub date: NaiveDate,
        pub liters: f64,
        /// Total amount paid for the fill-up.
        #[serde(rename = "priceTotalLiter")]
        pub total_price: f64,
        pub odometer: u64,
    }

    /// A stored fill-up.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct FuelEntry {
        pub id: Uuid,
        pub date: NaiveDate,
        pub liters: f64,
        #[serde(rename = "priceTotalLiter")]
        pub total_price: f64,
        pub odometer: u64,
    }

    /// A stored fill-up with the values derived from the previous one.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct FuelEntryView {
        #[serde(flatten)]
        pub entry: FuelEntry,
        pub total_cost: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub trip_distance: Option<u64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub l100km: Option<f64>,
    }

    /// Response body of `GET /fuel-logs/summary`.
    ///
    /// `entries` are ascending by odometer.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct FuelLogSummary {
        pub entries: Vec<FuelEntryView>,
        pub stats: super::stats::Statistic,
    }
}

pub mod stats {
    use super::*;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Statistic {
        /// Liters per 100 km.
        pub average_consumption: f64,
        pub total_cost: f64,
        pub total_distance: u64,
    }
}
