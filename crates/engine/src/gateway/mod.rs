//! Persistence gateways.
//!
//! A [`FuelGateway`] stores raw entries and hands out their identity. The
//! engine ships a SQL implementation ([`DatabaseGateway`]) and a JSON file one
//! ([`LocalFileGateway`]); other crates can plug in their own, e.g. a REST
//! client.
use async_trait::async_trait;
use uuid::Uuid;

use crate::{NewEntry, RawEntry, ResultEngine};

pub use database::DatabaseGateway;
pub use local::LocalFileGateway;

mod database;
mod local;

#[async_trait]
pub trait FuelGateway: Send + Sync {
    /// Every stored entry, in no particular order.
    async fn load(&self) -> ResultEngine<Vec<RawEntry>>;

    /// Store `entry` and return it with its assigned id.
    async fn add(&self, entry: NewEntry) -> ResultEngine<RawEntry>;

    /// Remove the entry, failing with `KeyNotFound` if nothing was removed.
    async fn delete(&self, id: Uuid) -> ResultEngine<()>;
}
