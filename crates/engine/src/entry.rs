//! The module contains the fill-up records: the persisted [`RawEntry`], the
//! [`NewEntry`] submitted by callers and the [`DerivedEntry`] view.
use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// A fill-up as persisted by a gateway.
///
/// `total_price` is the amount paid for the whole fill-up. On the wire it keeps
/// the historical name `priceTotalLiter`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntry {
    /// Identifier assigned by the gateway, never by the engine.
    pub id: Uuid,
    pub date: NaiveDate,
    pub liters: f64,
    #[serde(rename = "priceTotalLiter")]
    pub total_price: f64,
    /// Cumulative distance reading in km.
    pub odometer: u64,
}

/// A fill-up not yet persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub date: NaiveDate,
    pub liters: f64,
    #[serde(rename = "priceTotalLiter")]
    pub total_price: f64,
    pub odometer: u64,
}

impl NewEntry {
    /// Attach the identity chosen by a gateway.
    #[must_use]
    pub fn with_id(self, id: Uuid) -> RawEntry {
        RawEntry {
            id,
            date: self.date,
            liters: self.liters,
            total_price: self.total_price,
            odometer: self.odometer,
        }
    }

    /// Reject volumes and prices no fill-up can have.
    pub fn validate(&self) -> ResultEngine<()> {
        if !self.liters.is_finite() || self.liters <= 0.0 {
            return Err(EngineError::InvalidEntry(
                "liters must be greater than 0".to_string(),
            ));
        }
        if !self.total_price.is_finite() || self.total_price < 0.0 {
            return Err(EngineError::InvalidEntry(
                "price must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// A raw entry enriched with the values derived from its neighbour.
#[derive(Clone, Debug, PartialEq)]
pub struct DerivedEntry {
    pub raw: RawEntry,
    /// Cost of this fill-up.
    pub total_cost: f64,
    /// Distance since the fill-up with the next-lower odometer.
    ///
    /// `None` for the lowest odometer in the log.
    pub trip_distance: Option<u64>,
    /// Liters per 100 km over the trip, only when the trip is longer than 0.
    pub l100km: Option<f64>,
}

impl DerivedEntry {
    pub fn id(&self) -> Uuid {
        self.raw.id
    }

    pub fn date(&self) -> NaiveDate {
        self.raw.date
    }

    pub fn liters(&self) -> f64 {
        self.raw.liters
    }

    pub fn odometer(&self) -> u64 {
        self.raw.odometer
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fuel_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub date: NaiveDate,
    #[sea_orm(column_type = "Double")]
    pub liters: f64,
    #[sea_orm(column_type = "Double")]
    pub total_price: f64,
    pub odometer: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for RawEntry {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&model.id)
            .map_err(|_| EngineError::InvalidEntry(format!("invalid entry id {}", model.id)))?;
        let odometer = u64::try_from(model.odometer).map_err(|_| {
            EngineError::InvalidEntry(format!("negative odometer for entry {id}"))
        })?;
        Ok(Self {
            id,
            date: model.date,
            liters: model.liters,
            total_price: model.total_price,
            odometer,
        })
    }
}

impl TryFrom<&RawEntry> for ActiveModel {
    type Error = EngineError;

    fn try_from(entry: &RawEntry) -> Result<Self, Self::Error> {
        let odometer = i64::try_from(entry.odometer)
            .map_err(|_| EngineError::InvalidEntry("odometer too large".to_string()))?;
        Ok(Self {
            id: ActiveValue::Set(entry.id.to_string()),
            date: ActiveValue::Set(entry.date),
            liters: ActiveValue::Set(entry.liters),
            total_price: ActiveValue::Set(entry.total_price),
            odometer: ActiveValue::Set(odometer),
        })
    }
}
