//! Equipment status cache
//!
//! Derived view over the record log: per-serial checkout balance and last
//! known station. Maintained incrementally by folding in each new record as
//! it is appended; a full rebuild replays the log from empty state and must
//! produce the same result.

use indexmap::IndexMap;

use crate::models::{Record, RecordAction};

/// Derived status for one equipment serial
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquipmentStatus {
    /// Check-outs minus check-ins. Positive means currently checked out.
    /// Negative is accepted state (check-in with no prior check-out).
    pub balance: i32,
    /// Station from the most recent record carrying a non-empty station,
    /// by log order
    pub last_station: Option<String>,
}

/// Incrementally maintained balance/station view over the record log.
///
/// Maps are keyed in first-reference order so derived lists render in a
/// stable order.
#[derive(Debug, Clone, Default)]
pub struct StatusCache {
    balances: IndexMap<String, i32>,
    last_stations: IndexMap<String, String>,
}

impl StatusCache {
    /// Reset and replay the whole log. Used at startup and full reload.
    pub fn rebuild(&mut self, records: &[Record]) {
        self.balances.clear();
        self.last_stations.clear();
        for record in records {
            self.apply(record);
        }
    }

    /// Fold exactly one record into the cache. Must be called once per
    /// newly appended record, in append order.
    pub fn apply(&mut self, record: &Record) {
        for code in &record.equipment_barcodes {
            let balance = self.balances.entry(code.clone()).or_insert(0);
            match record.action {
                RecordAction::CheckOut => *balance += 1,
                RecordAction::CheckIn => *balance -= 1,
            }
            if !record.station.is_empty() {
                self.last_stations.insert(code.clone(), record.station.clone());
            }
        }
    }

    pub fn status_of(&self, serial: &str) -> EquipmentStatus {
        EquipmentStatus {
            balance: self.balances.get(serial).copied().unwrap_or(0),
            last_station: self.last_stations.get(serial).cloned(),
        }
    }

    /// Serials with a positive balance, in first-reference order
    pub fn overdue(&self) -> impl Iterator<Item = &str> {
        self.balances
            .iter()
            .filter(|(_, balance)| **balance > 0)
            .map(|(serial, _)| serial.as_str())
    }

    /// All (serial, last station) pairs, in first-station-report order
    pub fn last_stations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.last_stations
            .iter()
            .map(|(serial, station)| (serial.as_str(), station.as_str()))
    }
}
