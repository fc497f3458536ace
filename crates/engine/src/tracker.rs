//! The module contains `Tracker`, the owner of a gateway and of the current
//! [`FuelLog`].
//!
//! Every mutation talks to the gateway first and only then swaps in a log
//! rebuilt from the updated raw set. When the gateway fails the current log
//! is left untouched.
use uuid::Uuid;

use crate::{
    ConsumptionBasis, DerivedEntry, EngineError, FuelGateway, FuelLog, NewEntry, RawEntry,
    ResultEngine, Stats,
};

pub struct Tracker {
    gateway: Box<dyn FuelGateway>,
    log: FuelLog,
    basis: ConsumptionBasis,
}

impl std::fmt::Debug for Tracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracker")
            .field("log", &self.log)
            .field("basis", &self.basis)
            .finish_non_exhaustive()
    }
}

impl Tracker {
    /// Return a builder for `Tracker`. Help to build the struct.
    pub fn builder() -> TrackerBuilder {
        TrackerBuilder::default()
    }

    pub fn log(&self) -> &FuelLog {
        &self.log
    }

    pub fn entries(&self) -> &[DerivedEntry] {
        self.log.entries()
    }

    pub fn raw_entries(&self) -> &[RawEntry] {
        self.log.raw_entries()
    }

    /// Statistics computed with the configured consumption basis.
    pub fn stats(&self) -> Stats {
        self.log.stats_with(self.basis)
    }

    pub fn consumption_basis(&self) -> ConsumptionBasis {
        self.basis
    }

    /// Replace the log with what the gateway currently holds.
    pub async fn load(&mut self) -> ResultEngine<&FuelLog> {
        match self.gateway.load().await {
            Ok(raw_entries) => {
                tracing::debug!("loaded {} fuel entries", raw_entries.len());
                self.log = FuelLog::new(raw_entries);
                Ok(&self.log)
            }
            Err(err) => {
                tracing::warn!("failed to load fuel entries, keeping current log: {err}");
                Err(err)
            }
        }
    }

    /// Fail if `entry` repeats a positive odometer already in the log.
    pub fn check_duplicate(&self, entry: &NewEntry) -> ResultEngine<()> {
        if self.log.has_odometer(entry.odometer) {
            return Err(EngineError::DuplicateOdometer(entry.odometer));
        }
        Ok(())
    }

    /// Persist a new fill-up and rebuild the log around it.
    ///
    /// Invalid or duplicate entries never reach the gateway.
    pub async fn add(&mut self, entry: NewEntry) -> ResultEngine<RawEntry> {
        entry.validate()?;
        if let Err(err) = self.check_duplicate(&entry) {
            tracing::info!("rejected fuel entry: {err}");
            return Err(err);
        }

        let stored = self.gateway.add(entry).await?;
        self.log = self.log.appended(stored.clone());
        tracing::info!("added fuel entry {} at {} km", stored.id, stored.odometer);
        Ok(stored)
    }

    /// Delete a fill-up from the gateway, then drop it from the log.
    pub async fn delete(&mut self, id: Uuid) -> ResultEngine<()> {
        self.gateway.delete(id).await?;
        self.log = self.log.without(id);
        tracing::info!("deleted fuel entry {id}");
        Ok(())
    }
}

/// The builder for `Tracker`
#[derive(Default)]
pub struct TrackerBuilder {
    gateway: Option<Box<dyn FuelGateway>>,
    entries: Vec<RawEntry>,
    basis: ConsumptionBasis,
}

impl TrackerBuilder {
    /// Pass the required gateway
    pub fn gateway(mut self, gateway: impl FuelGateway + 'static) -> TrackerBuilder {
        self.gateway = Some(Box::new(gateway));
        self
    }

    /// Seed the log with entries already loaded by the caller.
    pub fn entries(mut self, entries: Vec<RawEntry>) -> TrackerBuilder {
        self.entries = entries;
        self
    }

    pub fn consumption_basis(mut self, basis: ConsumptionBasis) -> TrackerBuilder {
        self.basis = basis;
        self
    }

    /// Construct `Tracker`
    pub fn build(self) -> ResultEngine<Tracker> {
        let gateway = self
            .gateway
            .ok_or_else(|| EngineError::InvalidConfig("missing gateway".to_string()))?;
        Ok(Tracker {
            gateway,
            log: FuelLog::new(self.entries),
            basis: self.basis,
        })
    }
}
