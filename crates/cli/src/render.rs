//! Plain-text rendering of the history and the dashboard.
use std::fmt::Write;

use engine::{DerivedEntry, Stats};

/// Entries as shown to a human: most recent day first, higher odometer first
/// within a day.
pub fn display_order(entries: &[DerivedEntry]) -> Vec<&DerivedEntry> {
    let mut sorted: Vec<&DerivedEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| {
        b.date()
            .cmp(&a.date())
            .then_with(|| b.odometer().cmp(&a.odometer()))
    });
    sorted
}

/// `12345` -> `12 345`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

pub fn history(entries: &[DerivedEntry]) -> String {
    if entries.is_empty() {
        return "No fill-ups recorded yet.\n".to_string();
    }

    let mut out = String::new();
    for entry in display_order(entries) {
        let consumption = entry
            .l100km
            .map(|value| format!("{value:.2} L/100km"))
            .unwrap_or_else(|| "-".to_string());
        let _ = write!(
            out,
            "{}  {:>10} km  {:>7.2} L  {:>8.2} €  {:>14}",
            entry.date().format("%Y-%m-%d"),
            group_thousands(entry.odometer()),
            entry.liters(),
            entry.total_cost,
            consumption,
        );
        if let Some(distance) = entry.trip_distance {
            let _ = write!(out, "  +{} km", group_thousands(distance));
        }
        let _ = writeln!(out, "  [{}]", entry.id());
    }
    out
}

pub fn stats(stats: &Stats) -> String {
    format!(
        "Average consumption: {:.2} L/100km\nTotal cost: {:.2} €\nTotal distance: {} km\n",
        stats.average_consumption,
        stats.total_cost,
        group_thousands(stats.total_distance),
    )
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use engine::{FuelLog, RawEntry};
    use uuid::Uuid;

    use super::*;

    fn raw(id: u128, day: u32, odometer: u64) -> RawEntry {
        RawEntry {
            id: Uuid::from_u128(id),
            date: NaiveDate::from_ymd_opt(2023, 1, day).unwrap(),
            liters: 35.0,
            total_price: 70.0,
            odometer,
        }
    }

    #[test]
    fn display_order_is_date_then_odometer_descending() {
        let log = FuelLog::new(vec![
            raw(1, 1, 10000),
            raw(2, 15, 10500),
            raw(3, 15, 10700),
            raw(4, 31, 11050),
        ]);
        let ids: Vec<Uuid> = display_order(log.entries())
            .iter()
            .map(|entry| entry.id())
            .collect();

        assert_eq!(
            ids,
            vec![
                Uuid::from_u128(4),
                Uuid::from_u128(3),
                Uuid::from_u128(2),
                Uuid::from_u128(1)
            ]
        );
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1050), "1 050");
        assert_eq!(group_thousands(1234567), "1 234 567");
    }

    #[test]
    fn history_shows_trip_only_when_known() {
        let log = FuelLog::new(vec![raw(1, 1, 10000), raw(2, 15, 10500)]);
        let text = history(log.entries());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("2023-01-15"));
        assert!(lines[0].contains("7.00 L/100km"));
        assert!(lines[0].contains("+500 km"));
        assert!(!lines[1].contains('+'));
    }

    #[test]
    fn empty_history() {
        assert_eq!(history(&[]), "No fill-ups recorded yet.\n");
    }

    #[test]
    fn stats_block() {
        let text = stats(&Stats {
            average_consumption: 10.762,
            total_cost: 202.0,
            total_distance: 1050,
        });

        assert_eq!(
            text,
            "Average consumption: 10.76 L/100km\nTotal cost: 202.00 €\nTotal distance: 1 050 km\n"
        );
    }
}
