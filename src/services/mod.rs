//! Kiosk operations
//!
//! [`Kiosk`] is the application root: it owns the entity store, the
//! equipment status cache and the notification engine, and every operation
//! of the kiosk flows through it. UI collaborators (the CLI, forms,
//! scanners) call these methods and render [`Kiosk::notification`].

pub mod csv;
pub mod notify;
pub mod status;

use std::time::{Duration, Instant};

use chrono::Utc;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{
    CreateEmployee, CreateEquipment, Employee, Equipment, ImportReport, Record, RecordAction,
    RecordFilter, SkipReason, SkippedRow, UpdateEmployee, UpdateEquipment,
};
use crate::store::storage::Storage;
use crate::store::EntityStore;
use self::notify::{compose_ambient, NotificationEngine, NotificationView};
use self::status::{EquipmentStatus, StatusCache};

pub struct Kiosk {
    store: EntityStore,
    cache: StatusCache,
    notifier: NotificationEngine,
}

impl Kiosk {
    /// Load state from storage, rebuild the cache and compose the initial
    /// ambient message. Storage-corruption warnings queued during load are
    /// surfaced as deferred error toasts.
    pub fn new(storage: Box<dyn Storage>, toast_delay: Duration) -> AppResult<Self> {
        let mut store = EntityStore::new(storage);
        store.load()?;

        let mut cache = StatusCache::default();
        cache.rebuild(store.records());

        let mut notifier = NotificationEngine::new(toast_delay);
        notifier.update_ambient(compose_ambient(&cache, store.equipment()));
        for warning in store.take_load_warnings() {
            notifier.error(warning, Instant::now());
        }

        Ok(Self {
            store,
            cache,
            notifier,
        })
    }

    // --- Display slot ---

    pub fn notification(&self) -> &NotificationView {
        self.notifier.view()
    }

    /// Fire the toast expiry if due; returns true when the slot changed
    pub fn poll(&mut self, now: Instant) -> bool {
        self.notifier.poll(now)
    }

    fn refresh_ambient(&mut self) {
        let ambient = compose_ambient(&self.cache, self.store.equipment());
        self.notifier.update_ambient(ambient);
    }

    fn reject(&mut self, message: String) -> AppError {
        self.notifier.error(message.clone(), Instant::now());
        let error = AppError::Validation(message);
        tracing::warn!(code = ?error.code(), %error, "operation rejected");
        error
    }

    // --- Reads ---

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn status_of(&self, serial: &str) -> EquipmentStatus {
        self.cache.status_of(serial)
    }

    pub fn filter_records(&self, filter: &RecordFilter) -> Vec<&Record> {
        self.store
            .records()
            .iter()
            .filter(|record| filter.matches(record))
            .collect()
    }

    // --- Check-out / check-in flow ---

    /// Submit one check-out or check-in transaction.
    ///
    /// All validation happens before anything is appended; a failed
    /// submission leaves the log, cache and storage untouched. The record's
    /// station is inferred from the employee's home station.
    pub fn submit(&mut self, badge: &str, barcodes: &[String], action: RecordAction) -> AppResult<()> {
        let badge = badge.trim();
        let Some(employee) = self.store.employee(badge).cloned() else {
            return Err(self.reject(
                "Error: Employee badge not recognized. Please scan a valid badge.".to_string(),
            ));
        };

        let codes: Vec<String> = barcodes.iter().map(|code| code.trim().to_string()).collect();
        if codes.is_empty() {
            return Err(self.reject("Error: No equipment scanned.".to_string()));
        }
        if codes.iter().any(String::is_empty) {
            return Err(self.reject("Error: Equipment barcode is required.".to_string()));
        }
        let mut names = Vec::with_capacity(codes.len());
        for (index, code) in codes.iter().enumerate() {
            let name = match self.store.equipment_item(code) {
                Some(item) => item.name.clone(),
                None => {
                    return Err(self.reject(format!(
                        "Error: Equipment barcode '{code}' not recognized. \
                         Please scan a valid equipment barcode."
                    )));
                }
            };
            if codes[..index].contains(code) {
                return Err(self.reject(format!(
                    "Error: Equipment barcode '{code}' scanned more than once."
                )));
            }
            names.push(name);
        }

        let record = Record::new(
            badge,
            employee.name,
            employee.home_station,
            codes,
            names,
            action,
            Utc::now(),
        );
        self.store.append_record(record.clone())?;
        self.cache.apply(&record);
        tracing::info!(badge, action = %record.action, count = record.equipment_barcodes.len(), "record saved");
        self.notifier.success("Record saved locally!", Instant::now());
        self.refresh_ambient();
        Ok(())
    }

    // --- Employee admin ---

    pub fn add_employee(&mut self, data: CreateEmployee) -> AppResult<()> {
        let data = data.trimmed();
        if let Err(errors) = data.validate() {
            let message = crate::error::validation_message(&errors);
            self.notifier.error(message.clone(), Instant::now());
            return Err(AppError::Validation(message));
        }
        let employee = Employee {
            name: data.name,
            home_station: data.home_station,
        };
        if let Err(error) = self.store.insert_employee(data.badge, employee) {
            if matches!(error, AppError::Duplicate(_)) {
                self.notifier
                    .error("Employee with this badge ID already exists!", Instant::now());
            }
            return Err(error);
        }
        self.notifier
            .success("Employee added successfully!", Instant::now());
        Ok(())
    }

    pub fn update_employee(&mut self, badge: &str, data: &UpdateEmployee) -> AppResult<()> {
        match self.store.update_employee(badge.trim(), data) {
            Ok(()) => {
                self.notifier
                    .success("Employee updated successfully!", Instant::now());
                Ok(())
            }
            Err(error) => {
                self.notifier
                    .error("Invalid badge ID or employee not found!", Instant::now());
                Err(error)
            }
        }
    }

    pub fn remove_employee(&mut self, badge: &str) -> AppResult<()> {
        match self.store.remove_employee(badge.trim()) {
            Ok(_) => {
                self.notifier
                    .success("Employee removed successfully!", Instant::now());
                Ok(())
            }
            Err(error) => {
                self.notifier
                    .error("Invalid badge ID or employee not found!", Instant::now());
                Err(error)
            }
        }
    }

    // --- Equipment admin ---

    pub fn add_equipment(&mut self, data: CreateEquipment) -> AppResult<()> {
        let data = data.trimmed();
        if let Err(errors) = data.validate() {
            let message = crate::error::validation_message(&errors);
            self.notifier.error(message.clone(), Instant::now());
            return Err(AppError::Validation(message));
        }
        let equipment = Equipment {
            name: data.name,
            home_station: data.home_station,
        };
        if let Err(error) = self.store.insert_equipment(data.serial, equipment) {
            if matches!(error, AppError::Duplicate(_)) {
                self.notifier
                    .error("Equipment with this serial already exists!", Instant::now());
            }
            return Err(error);
        }
        self.notifier
            .success("Equipment added successfully!", Instant::now());
        self.refresh_ambient();
        Ok(())
    }

    /// Admin edit of an equipment entry. A home-station change routes
    /// through [`Kiosk::set_home_station`] so the record log stays
    /// consistent with the new expectation.
    pub fn update_equipment(&mut self, serial: &str, data: &UpdateEquipment) -> AppResult<()> {
        let serial = serial.trim();
        if self.store.equipment_item(serial).is_none() {
            self.notifier
                .error("Invalid equipment serial or equipment not found!", Instant::now());
            return Err(AppError::NotFound(format!(
                "No equipment with serial {serial}"
            )));
        }
        if let Some(name) = &data.name {
            self.store.update_equipment(
                serial,
                &UpdateEquipment {
                    name: Some(name.clone()),
                    home_station: None,
                },
            )?;
        }
        if let Some(home_station) = &data.home_station {
            self.set_home_station(serial, home_station)?;
        } else {
            self.refresh_ambient();
        }
        self.notifier
            .success("Equipment updated successfully!", Instant::now());
        Ok(())
    }

    pub fn remove_equipment(&mut self, serial: &str) -> AppResult<()> {
        match self.store.remove_equipment(serial.trim()) {
            Ok(_) => {
                self.notifier
                    .success("Equipment removed successfully!", Instant::now());
                self.refresh_ambient();
                Ok(())
            }
            Err(error) => {
                self.notifier
                    .error("Invalid equipment serial or equipment not found!", Instant::now());
                Err(error)
            }
        }
    }

    /// Change an equipment's declared home station.
    ///
    /// If the last record referencing the serial already carries the new
    /// station (case-insensitively), only the ambient message is refreshed.
    /// Otherwise a synthetic check-in at the new station is appended and
    /// folded into the cache, keeping the away-from-home detector from
    /// misfiring on the next recompute. The synthetic check-in decrements
    /// the checkout balance like a real one; that side effect is deliberate.
    pub fn set_home_station(&mut self, serial: &str, new_station: &str) -> AppResult<()> {
        let serial = serial.trim();
        let new_station = new_station.trim();
        if self.store.equipment_item(serial).is_none() {
            self.notifier
                .error("Invalid equipment serial or equipment not found!", Instant::now());
            return Err(AppError::NotFound(format!(
                "No equipment with serial {serial}"
            )));
        }
        self.store.set_equipment_home_station(serial, new_station)?;

        let already_synced = self
            .store
            .last_record_for(serial)
            .map(|record| record.station.to_lowercase() == new_station.to_lowercase())
            .unwrap_or(false);
        if !already_synced {
            let name = self
                .store
                .equipment_item(serial)
                .map(|item| item.name.clone())
                .unwrap_or_default();
            let synthetic = Record::synthetic_check_in(serial, name, new_station, Utc::now());
            self.store.append_record(synthetic.clone())?;
            self.cache.apply(&synthetic);
            tracing::info!(serial, station = new_station, "appended synthetic check-in");
        }
        self.refresh_ambient();
        Ok(())
    }

    // --- CSV import/export ---

    pub fn export_employees(&self) -> String {
        csv::export_employees(self.store.employees())
    }

    pub fn export_equipment(&self) -> String {
        csv::export_equipment(self.store.equipment())
    }

    pub fn export_records(&mut self) -> AppResult<String> {
        if self.store.records().is_empty() {
            return Err(self.reject("No records to export.".to_string()));
        }
        Ok(csv::export_records(self.store.records()))
    }

    /// Import employees from CSV text. `confirm` is consulted once per key
    /// collision; declining skips that row. Partial success is expected.
    pub fn import_employees(
        &mut self,
        text: &str,
        mut confirm: impl FnMut(&str) -> bool,
    ) -> AppResult<ImportReport> {
        let (rows, skipped) = csv::parse_entity_rows(text);
        let mut report = ImportReport {
            skipped,
            ..Default::default()
        };
        for (line, row) in rows {
            if self.store.employee(&row.id).is_some() && !confirm(&row.id) {
                report.skipped.push(SkippedRow {
                    line,
                    reason: SkipReason::OverwriteDeclined,
                    content: row.id,
                });
                continue;
            }
            let employee = Employee {
                name: row.name,
                home_station: row.home_station,
            };
            if self.store.replace_employee(row.id, employee)? {
                report.overwritten += 1;
            }
            report.imported += 1;
        }
        for row in &report.skipped {
            tracing::warn!(line = row.line, reason = ?row.reason, "skipped import row");
        }
        self.notifier
            .success("Employee CSV import completed successfully.", Instant::now());
        Ok(report)
    }

    /// Import equipment from CSV text; same collision handling as
    /// [`Kiosk::import_employees`].
    pub fn import_equipment(
        &mut self,
        text: &str,
        mut confirm: impl FnMut(&str) -> bool,
    ) -> AppResult<ImportReport> {
        let (rows, skipped) = csv::parse_entity_rows(text);
        let mut report = ImportReport {
            skipped,
            ..Default::default()
        };
        for (line, row) in rows {
            if self.store.equipment_item(&row.id).is_some() && !confirm(&row.id) {
                report.skipped.push(SkippedRow {
                    line,
                    reason: SkipReason::OverwriteDeclined,
                    content: row.id,
                });
                continue;
            }
            let equipment = Equipment {
                name: row.name,
                home_station: row.home_station,
            };
            if self.store.replace_equipment(row.id, equipment)? {
                report.overwritten += 1;
            }
            report.imported += 1;
        }
        for row in &report.skipped {
            tracing::warn!(line = row.line, reason = ?row.reason, "skipped import row");
        }
        self.notifier
            .success("Equipment CSV import completed successfully.", Instant::now());
        self.refresh_ambient();
        Ok(report)
    }

    /// Re-load all keys from storage and rebuild the derived state
    pub fn reload(&mut self) -> AppResult<()> {
        self.store.load()?;
        self.cache.rebuild(self.store.records());
        self.refresh_ambient();
        for warning in self.store.take_load_warnings() {
            self.notifier.error(warning, Instant::now());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::store::storage::MemoryStorage;
    use super::notify::ToastKind;

    const DELAY: Duration = Duration::from_millis(3000);

    fn kiosk() -> Kiosk {
        Kiosk::new(Box::new(MemoryStorage::new()), DELAY).unwrap()
    }

    fn employee(badge: &str, name: &str, station: &str) -> CreateEmployee {
        CreateEmployee {
            badge: badge.into(),
            name: name.into(),
            home_station: station.into(),
        }
    }

    fn equipment(serial: &str, name: &str, station: &str) -> CreateEquipment {
        CreateEquipment {
            serial: serial.into(),
            name: name.into(),
            home_station: station.into(),
        }
    }

    fn expire_toast(kiosk: &mut Kiosk) {
        kiosk.poll(Instant::now() + DELAY + Duration::from_millis(1));
    }

    fn seeded() -> Kiosk {
        let mut kiosk = kiosk();
        kiosk.add_employee(employee("B1", "Ada", "A")).unwrap();
        kiosk.add_equipment(equipment("E1", "Scanner", "A")).unwrap();
        kiosk.add_equipment(equipment("E2", "Drill", "A")).unwrap();
        expire_toast(&mut kiosk);
        kiosk
    }

    #[test]
    fn submit_appends_record_with_inferred_station() {
        let mut kiosk = seeded();
        kiosk
            .submit("B1", &["E1".to_string()], RecordAction::CheckOut)
            .unwrap();

        let records = kiosk.store().records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].station, "A");
        assert_eq!(records[0].employee_name, "Ada");
        assert_eq!(records[0].equipment_names, vec!["Scanner".to_string()]);
        assert_eq!(kiosk.status_of("E1").balance, 1);
        assert_eq!(kiosk.notification().text, "Record saved locally!");
        assert_eq!(kiosk.notification().kind, Some(ToastKind::Success));
    }

    #[test]
    fn submit_rejects_unknown_badge_without_writing() {
        let mut kiosk = seeded();
        let result = kiosk.submit("ghost", &["E1".to_string()], RecordAction::CheckOut);

        let error = result.unwrap_err();
        assert!(matches!(&error, AppError::Validation(_)));
        assert_eq!(error.code(), ErrorCode::ValidationError);
        assert!(kiosk.store().records().is_empty());
        assert_eq!(kiosk.notification().kind, Some(ToastKind::Error));
        assert!(kiosk.notification().text.contains("badge not recognized"));
    }

    #[test]
    fn submit_rejects_unknown_barcode_without_writing() {
        let mut kiosk = seeded();
        let result = kiosk.submit(
            "B1",
            &["E1".to_string(), "E9".to_string()],
            RecordAction::CheckOut,
        );

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(kiosk.store().records().is_empty());
        assert_eq!(kiosk.status_of("E1").balance, 0);
        assert!(kiosk.notification().text.contains("'E9'"));
    }

    #[test]
    fn submit_rejects_duplicate_scan_in_one_transaction() {
        let mut kiosk = seeded();
        let result = kiosk.submit(
            "B1",
            &["E1".to_string(), "E1".to_string()],
            RecordAction::CheckOut,
        );

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(kiosk.store().records().is_empty());
        assert!(kiosk.notification().text.contains("scanned more than once"));
    }

    #[test]
    fn submit_rejects_empty_equipment_list() {
        let mut kiosk = seeded();
        let result = kiosk.submit("B1", &[], RecordAction::CheckOut);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn unreturned_checkout_shows_overdue_after_toast_expires() {
        let mut kiosk = seeded();
        kiosk
            .submit("B1", &["E2".to_string()], RecordAction::CheckOut)
            .unwrap();
        expire_toast(&mut kiosk);

        let view = kiosk.notification();
        assert!(view.visible);
        assert_eq!(view.text, "Overdue Equipment: E2 (Drill)");
    }

    #[test]
    fn checkin_clears_overdue_ambient() {
        let mut kiosk = seeded();
        kiosk
            .submit("B1", &["E2".to_string()], RecordAction::CheckOut)
            .unwrap();
        kiosk
            .submit("B1", &["E2".to_string()], RecordAction::CheckIn)
            .unwrap();
        expire_toast(&mut kiosk);

        let view = kiosk.notification();
        assert!(!view.visible);
        assert_eq!(view.text, "");
    }

    #[test]
    fn add_employee_validates_required_fields() {
        let mut kiosk = kiosk();
        let result = kiosk.add_employee(employee("  ", "Ada", "A"));
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(kiosk.store().employees().is_empty());
    }

    #[test]
    fn add_employee_rejects_duplicate_badge() {
        let mut kiosk = kiosk();
        kiosk.add_employee(employee("B1", "Ada", "A")).unwrap();
        let result = kiosk.add_employee(employee("B1", "Grace", "B"));

        assert!(matches!(result, Err(AppError::Duplicate(_))));
        assert_eq!(kiosk.store().employee("B1").unwrap().name, "Ada");
        assert_eq!(
            kiosk.notification().text,
            "Employee with this badge ID already exists!"
        );
    }

    #[test]
    fn update_employee_edits_fields_and_toasts_success() {
        let mut kiosk = seeded();
        kiosk
            .update_employee(
                "B1",
                &UpdateEmployee {
                    name: Some("Ada Lovelace".into()),
                    home_station: None,
                },
            )
            .unwrap();

        assert_eq!(kiosk.store().employee("B1").unwrap().name, "Ada Lovelace");
        assert_eq!(kiosk.notification().text, "Employee updated successfully!");
        assert_eq!(kiosk.notification().kind, Some(ToastKind::Success));
    }

    #[test]
    fn update_missing_employee_reports_error() {
        let mut kiosk = seeded();
        let result = kiosk.update_employee("ghost", &UpdateEmployee::default());

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(
            kiosk.notification().text,
            "Invalid badge ID or employee not found!"
        );
        assert_eq!(kiosk.notification().kind, Some(ToastKind::Error));
    }

    #[test]
    fn update_equipment_renames_and_toasts_success() {
        let mut kiosk = seeded();
        kiosk
            .update_equipment(
                "E1",
                &UpdateEquipment {
                    name: Some("Barcode Scanner".into()),
                    home_station: None,
                },
            )
            .unwrap();

        assert_eq!(
            kiosk.store().equipment_item("E1").unwrap().name,
            "Barcode Scanner"
        );
        // Name-only edit never touches the record log
        assert!(kiosk.store().records().is_empty());
        assert_eq!(kiosk.notification().text, "Equipment updated successfully!");
        assert_eq!(kiosk.notification().kind, Some(ToastKind::Success));
    }

    #[test]
    fn update_equipment_home_station_routes_through_propagation() {
        let mut kiosk = seeded();
        kiosk
            .submit("B1", &["E1".to_string()], RecordAction::CheckIn)
            .unwrap();

        kiosk
            .update_equipment(
                "E1",
                &UpdateEquipment {
                    name: None,
                    home_station: Some("B".into()),
                },
            )
            .unwrap();

        assert_eq!(kiosk.store().equipment_item("E1").unwrap().home_station, "B");
        // The home change appended a synthetic check-in at the new station
        assert_eq!(kiosk.store().records().len(), 2);
        assert_eq!(kiosk.status_of("E1").last_station.as_deref(), Some("B"));
        assert_eq!(kiosk.notification().text, "Equipment updated successfully!");
    }

    #[test]
    fn update_missing_equipment_reports_error() {
        let mut kiosk = seeded();
        let result = kiosk.update_equipment(
            "E9",
            &UpdateEquipment {
                name: Some("Phantom".into()),
                home_station: None,
            },
        );

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(kiosk.store().records().is_empty());
        assert_eq!(
            kiosk.notification().text,
            "Invalid equipment serial or equipment not found!"
        );
        assert_eq!(kiosk.notification().kind, Some(ToastKind::Error));
    }

    #[test]
    fn remove_missing_equipment_reports_error() {
        let mut kiosk = kiosk();
        let result = kiosk.remove_equipment("E9");
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(
            kiosk.notification().text,
            "Invalid equipment serial or equipment not found!"
        );
    }

    #[test]
    fn set_home_station_is_noop_when_latest_record_matches() {
        let mut kiosk = seeded();
        // Latest record for E1 carries station "A" (Ada's home)
        kiosk
            .submit("B1", &["E1".to_string()], RecordAction::CheckIn)
            .unwrap();
        assert_eq!(kiosk.store().records().len(), 1);
        let balance_before = kiosk.status_of("E1").balance;

        // Case difference only: still considered in sync
        kiosk.set_home_station("E1", "a").unwrap();

        assert_eq!(kiosk.store().records().len(), 1);
        assert_eq!(kiosk.status_of("E1").balance, balance_before);
        assert_eq!(kiosk.store().equipment_item("E1").unwrap().home_station, "a");
    }

    #[test]
    fn set_home_station_appends_synthetic_checkin_when_out_of_sync() {
        let mut kiosk = seeded();
        kiosk
            .submit("B1", &["E1".to_string()], RecordAction::CheckIn)
            .unwrap();
        let balance_before = kiosk.status_of("E1").balance;

        kiosk.set_home_station("E1", "B").unwrap();

        let records = kiosk.store().records();
        assert_eq!(records.len(), 2);
        let synthetic = &records[1];
        assert_eq!(synthetic.action, RecordAction::CheckIn);
        assert_eq!(synthetic.station, "B");
        assert_eq!(synthetic.badge, "");
        assert_eq!(synthetic.employee_name, "");
        assert_eq!(synthetic.equipment_barcodes, vec!["E1".to_string()]);
        assert_eq!(synthetic.equipment_names, vec!["Scanner".to_string()]);
        assert_eq!(kiosk.status_of("E1").balance, balance_before - 1);
        assert_eq!(kiosk.status_of("E1").last_station.as_deref(), Some("B"));
    }

    #[test]
    fn set_home_station_with_no_records_appends_synthetic_checkin() {
        let mut kiosk = seeded();
        kiosk.set_home_station("E1", "B").unwrap();
        assert_eq!(kiosk.store().records().len(), 1);
        assert_eq!(kiosk.status_of("E1").balance, -1);
    }

    #[test]
    fn away_ambient_appears_after_home_station_drift() {
        let mut kiosk = seeded();
        // E1's home is A; a check-in through a B-based employee leaves its
        // last known station at B
        kiosk.add_employee(employee("B2", "Grace", "B")).unwrap();
        kiosk
            .submit("B2", &["E1".to_string()], RecordAction::CheckOut)
            .unwrap();
        kiosk
            .submit("B2", &["E1".to_string()], RecordAction::CheckIn)
            .unwrap();
        expire_toast(&mut kiosk);

        assert_eq!(
            kiosk.notification().text,
            "Equipment Away From Home: E1 (Scanner)"
        );
    }

    #[test]
    fn import_employees_applies_rows_and_reports_collisions() {
        let mut kiosk = kiosk();
        kiosk.add_employee(employee("B1", "Ada", "A")).unwrap();

        let text = "Badge ID,Employee Name,Home Station\n\
                    \"B1\",\"Ada Updated\",\"B\"\n\
                    \"B2\",\"Grace\",\"C\"\n\
                    bad\n";
        let report = kiosk.import_employees(text, |_| true).unwrap();

        assert_eq!(report.imported, 2);
        assert_eq!(report.overwritten, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].reason, SkipReason::Malformed);
        assert_eq!(kiosk.store().employee("B1").unwrap().name, "Ada Updated");
        assert_eq!(kiosk.store().employee("B2").unwrap().home_station, "C");
    }

    #[test]
    fn import_skips_rows_when_overwrite_declined() {
        let mut kiosk = kiosk();
        kiosk.add_equipment(equipment("E1", "Scanner", "A")).unwrap();

        let text = "Equipment Serial,Equipment Name,Home Station\n\
                    \"E1\",\"Imposter\",\"Z\"\n";
        let report = kiosk.import_equipment(text, |_| false).unwrap();

        assert_eq!(report.imported, 0);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].reason, SkipReason::OverwriteDeclined);
        assert_eq!(kiosk.store().equipment_item("E1").unwrap().name, "Scanner");
    }

    #[test]
    fn export_records_rejects_empty_log() {
        let mut kiosk = kiosk();
        let result = kiosk.export_records();
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(kiosk.notification().text, "No records to export.");
    }

    #[test]
    fn filter_records_combines_criteria() {
        let mut kiosk = seeded();
        kiosk
            .submit("B1", &["E1".to_string()], RecordAction::CheckOut)
            .unwrap();
        kiosk
            .submit("B1", &["E2".to_string()], RecordAction::CheckIn)
            .unwrap();

        let filter = RecordFilter {
            equipment: Some("drill".into()),
            ..Default::default()
        };
        let matches = kiosk.filter_records(&filter);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].equipment_barcodes, vec!["E2".to_string()]);

        let none = kiosk.filter_records(&RecordFilter {
            search: Some("nobody".into()),
            ..Default::default()
        });
        assert!(none.is_empty());
    }
}
