use async_trait::async_trait;
use sea_orm::{DatabaseConnection, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{EngineError, NewEntry, RawEntry, ResultEngine, entry};

use super::FuelGateway;

/// Gateway over the `fuel_logs` table.
#[derive(Debug, Clone)]
pub struct DatabaseGateway {
    database: DatabaseConnection,
}

impl DatabaseGateway {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

#[async_trait]
impl FuelGateway for DatabaseGateway {
    async fn load(&self) -> ResultEngine<Vec<RawEntry>> {
        entry::Entity::find()
            .order_by_asc(entry::Column::Odometer)
            .all(&self.database)
            .await?
            .into_iter()
            .map(RawEntry::try_from)
            .collect()
    }

    async fn add(&self, new_entry: NewEntry) -> ResultEngine<RawEntry> {
        let raw = new_entry.with_id(Uuid::new_v4());
        let model = entry::ActiveModel::try_from(&raw)?;
        model.insert(&self.database).await?;
        tracing::debug!("stored fuel entry {} at {} km", raw.id, raw.odometer);
        Ok(raw)
    }

    async fn delete(&self, id: Uuid) -> ResultEngine<()> {
        let result = entry::Entity::delete_by_id(id.to_string())
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound(id.to_string()));
        }
        Ok(())
    }
}
