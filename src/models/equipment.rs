//! Equipment model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Equipment entry, keyed by serial ID in the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub name: String,
    /// Designated base location; compared case-insensitively against the
    /// last recorded station for away-from-home detection
    #[serde(default)]
    pub home_station: String,
}

/// Stored equipment value as found on disk.
///
/// Early snapshots stored a bare name string per serial; these are
/// normalized to the structured form once at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredEquipment {
    Entry(Equipment),
    Legacy(String),
}

impl StoredEquipment {
    /// Normalize a stored value into the structured equipment form
    pub fn normalize(self) -> Equipment {
        match self {
            StoredEquipment::Entry(equipment) => equipment,
            StoredEquipment::Legacy(name) => Equipment {
                name,
                home_station: String::new(),
            },
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, StoredEquipment::Legacy(_))
    }
}

/// Create equipment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEquipment {
    #[validate(length(min = 1, message = "Equipment serial is required."))]
    pub serial: String,
    #[validate(length(min = 1, message = "Equipment name is required."))]
    pub name: String,
    #[validate(length(min = 1, message = "Home station is required."))]
    pub home_station: String,
}

impl CreateEquipment {
    /// Trim all fields, matching what the admin form does before validation
    pub fn trimmed(self) -> Self {
        Self {
            serial: self.serial.trim().to_string(),
            name: self.name.trim().to_string(),
            home_station: self.home_station.trim().to_string(),
        }
    }
}

/// Update equipment request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEquipment {
    pub name: Option<String>,
    pub home_station: Option<String>,
}
