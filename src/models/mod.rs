//! Data models for the Toolcrib kiosk

pub mod employee;
pub mod equipment;
pub mod import_report;
pub mod record;

// Re-export commonly used types
pub use employee::{CreateEmployee, Employee, UpdateEmployee};
pub use equipment::{CreateEquipment, Equipment, StoredEquipment, UpdateEquipment};
pub use import_report::{ImportReport, SkipReason, SkippedRow};
pub use record::{Record, RecordAction, RecordFilter};
