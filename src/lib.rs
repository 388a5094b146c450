//! Toolcrib Equipment Check-In/Check-Out Kiosk
//!
//! A single-process kiosk core that associates employees (badge IDs) and
//! equipment (serial IDs) with a home station and logs check-out/check-in
//! events as an append-only record log persisted in local JSON storage.
//! Derived state (checkout balances, last known stations) is maintained
//! incrementally and surfaced through a single-slot notification engine.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use services::Kiosk;
