//! Check-in/check-out record model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Direction of an equipment movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordAction {
    #[serde(rename = "Check-Out")]
    CheckOut,
    #[serde(rename = "Check-In")]
    CheckIn,
}

impl RecordAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordAction::CheckOut => "Check-Out",
            RecordAction::CheckIn => "Check-In",
        }
    }

    /// Parse the wire/display form of an action
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Check-Out" => Some(RecordAction::CheckOut),
            "Check-In" => Some(RecordAction::CheckIn),
            _ => None,
        }
    }
}

impl std::fmt::Display for RecordAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable entry of the append-only event log.
///
/// `equipment_names` is a positional snapshot matching `equipment_barcodes`
/// one-to-one. Synthetic records (home-station changes) carry an empty badge
/// and employee name but are otherwise shaped identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub timestamp: DateTime<Utc>,
    pub record_date: NaiveDate,
    #[serde(default)]
    pub badge: String,
    #[serde(default)]
    pub employee_name: String,
    /// Station at the time of the event. Empty on legacy records that
    /// predate station tracking.
    #[serde(default)]
    pub station: String,
    pub equipment_barcodes: Vec<String>,
    pub equipment_names: Vec<String>,
    pub action: RecordAction,
}

impl Record {
    pub fn new(
        badge: impl Into<String>,
        employee_name: impl Into<String>,
        station: impl Into<String>,
        equipment_barcodes: Vec<String>,
        equipment_names: Vec<String>,
        action: RecordAction,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp,
            record_date: timestamp.date_naive(),
            badge: badge.into(),
            employee_name: employee_name.into(),
            station: station.into(),
            equipment_barcodes,
            equipment_names,
            action,
        }
    }

    /// Synthetic check-in appended when an equipment's home station changes
    pub fn synthetic_check_in(
        serial: impl Into<String>,
        name: impl Into<String>,
        station: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self::new(
            "",
            "",
            station,
            vec![serial.into()],
            vec![name.into()],
            RecordAction::CheckIn,
            timestamp,
        )
    }

    /// Whether this record references the given equipment serial
    pub fn references(&self, serial: &str) -> bool {
        self.equipment_barcodes.iter().any(|code| code == serial)
    }
}

/// Criteria for the records view; all fields are conjunctive
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Case-insensitive substring match on badge or employee name
    pub search: Option<String>,
    /// Case-insensitive substring match on barcodes or equipment names
    pub equipment: Option<String>,
    /// Exact record date match
    pub date: Option<NaiveDate>,
}

impl RecordFilter {
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(search) = &self.search {
            let search = search.to_lowercase();
            let badge = record.badge.to_lowercase();
            let name = record.employee_name.to_lowercase();
            if !badge.contains(&search) && !name.contains(&search) {
                return false;
            }
        }
        if let Some(equipment) = &self.equipment {
            let equipment = equipment.to_lowercase();
            let combined = format!(
                "{} {}",
                record.equipment_barcodes.join(" "),
                record.equipment_names.join(" ")
            )
            .to_lowercase();
            if !combined.contains(&equipment) {
                return false;
            }
        }
        if let Some(date) = &self.date {
            if record.record_date != *date {
                return false;
            }
        }
        true
    }
}
