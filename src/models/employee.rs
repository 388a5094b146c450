//! Employee model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Employee entry, keyed by badge ID in the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub name: String,
    /// Designated base location; also the station stamped on records
    /// submitted against this badge
    #[serde(default)]
    pub home_station: String,
}

/// Create employee request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEmployee {
    #[validate(length(min = 1, message = "Badge ID is required."))]
    pub badge: String,
    #[validate(length(min = 1, message = "Employee name is required."))]
    pub name: String,
    #[validate(length(min = 1, message = "Home station is required."))]
    pub home_station: String,
}

impl CreateEmployee {
    /// Trim all fields, matching what the admin form does before validation
    pub fn trimmed(self) -> Self {
        Self {
            badge: self.badge.trim().to_string(),
            name: self.name.trim().to_string(),
            home_station: self.home_station.trim().to_string(),
        }
    }
}

/// Update employee request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    pub home_station: Option<String>,
}
