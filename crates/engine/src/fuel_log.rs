//! The fuel log: sorted, enriched fill-ups and the statistics derived from
//! them.
//!
//! A [`FuelLog`] is immutable. Adding or removing a fill-up produces a new log
//! built from the updated raw set (see [`FuelLog::appended`] and
//! [`FuelLog::without`]).
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entry::{DerivedEntry, RawEntry};

/// Which fill-ups contribute liters to the average consumption.
///
/// By default every qualifying fill-up is summed, the first one included, even
/// though the distance starts at the first odometer. `ExcludeFirstFill` drops
/// the lowest-odometer fill-up from the liters total.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumptionBasis {
    #[default]
    IncludeFirstFill,
    ExcludeFirstFill,
}

/// Aggregate figures over a whole log.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Stats {
    /// Liters per 100 km.
    pub average_consumption: f64,
    pub total_cost: f64,
    /// Km between the lowest and the highest positive odometer.
    pub total_distance: u64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FuelLog {
    raw_entries: Vec<RawEntry>,
    entries: Vec<DerivedEntry>,
}

impl FuelLog {
    pub fn new(raw_entries: Vec<RawEntry>) -> Self {
        let entries = derive_entries(&raw_entries);
        Self {
            raw_entries,
            entries,
        }
    }

    /// Derived entries, ascending by odometer.
    pub fn entries(&self) -> &[DerivedEntry] {
        &self.entries
    }

    /// Raw entries in the order they were given.
    pub fn raw_entries(&self) -> &[RawEntry] {
        &self.raw_entries
    }

    pub fn is_empty(&self) -> bool {
        self.raw_entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.raw_entries.len()
    }

    /// Whether a fill-up with this odometer would clash with an existing one.
    ///
    /// A zero odometer never clashes.
    pub fn has_odometer(&self, odometer: u64) -> bool {
        odometer > 0
            && self
                .raw_entries
                .iter()
                .any(|entry| entry.odometer == odometer)
    }

    /// Build the log that also holds `entry`.
    #[must_use]
    pub fn appended(&self, entry: RawEntry) -> FuelLog {
        let mut raw_entries = self.raw_entries.clone();
        raw_entries.push(entry);
        FuelLog::new(raw_entries)
    }

    /// Build the log without the entry identified by `id`.
    #[must_use]
    pub fn without(&self, id: Uuid) -> FuelLog {
        let raw_entries = self
            .raw_entries
            .iter()
            .filter(|entry| entry.id != id)
            .cloned()
            .collect();
        FuelLog::new(raw_entries)
    }

    pub fn stats(&self) -> Stats {
        self.stats_with(ConsumptionBasis::default())
    }

    pub fn stats_with(&self, basis: ConsumptionBasis) -> Stats {
        calculate_stats(&self.entries, basis)
    }
}

/// Sort by odometer and compute trip distance and consumption of each fill-up
/// against the previous one.
///
/// The sort is stable: equal odometers keep their input order.
fn derive_entries(raw_entries: &[RawEntry]) -> Vec<DerivedEntry> {
    let mut sorted = raw_entries.to_vec();
    sorted.sort_by_key(|entry| entry.odometer);

    let mut previous_odometer: Option<u64> = None;
    sorted
        .into_iter()
        .map(|raw| {
            let trip_distance = previous_odometer.map(|previous| raw.odometer - previous);
            let l100km = trip_distance
                .filter(|distance| *distance > 0)
                .map(|distance| raw.liters / distance as f64 * 100.0);
            previous_odometer = Some(raw.odometer);
            DerivedEntry {
                total_cost: raw.total_price,
                trip_distance,
                l100km,
                raw,
            }
        })
        .collect()
}

fn calculate_stats(entries: &[DerivedEntry], basis: ConsumptionBasis) -> Stats {
    // Zero odometers are placeholders and never count.
    let qualifying: Vec<&DerivedEntry> = entries
        .iter()
        .filter(|entry| entry.odometer() > 0)
        .collect();
    let total_cost: f64 = qualifying.iter().map(|entry| entry.total_cost).sum();

    let (Some(first), Some(last)) = (qualifying.first(), qualifying.last()) else {
        return Stats::default();
    };
    if qualifying.len() < 2 {
        return Stats {
            total_cost,
            ..Stats::default()
        };
    }

    let total_distance = last.odometer() - first.odometer();
    let skip = match basis {
        ConsumptionBasis::IncludeFirstFill => 0,
        ConsumptionBasis::ExcludeFirstFill => 1,
    };
    let total_liters: f64 = qualifying
        .iter()
        .skip(skip)
        .map(|entry| entry.liters())
        .sum();
    let average_consumption = if total_distance > 0 {
        total_liters / total_distance as f64 * 100.0
    } else {
        0.0
    };

    Stats {
        average_consumption,
        total_cost,
        total_distance,
    }
}
