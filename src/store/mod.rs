//! Entity store: in-memory employee/equipment maps and the append-only
//! record log, backed by a key-value persistence layer.

pub mod storage;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::models::{
    Employee, Equipment, Record, StoredEquipment, UpdateEmployee, UpdateEquipment,
};
use self::storage::{Storage, EMPLOYEES_KEY, EQUIPMENT_KEY, RECORDS_KEY};

/// Owns all persisted kiosk state.
///
/// Every mutation persists the affected collection as a full snapshot before
/// returning; the record log is append-only through this API.
pub struct EntityStore {
    storage: Box<dyn Storage>,
    employees: IndexMap<String, Employee>,
    equipment: IndexMap<String, Equipment>,
    records: Vec<Record>,
    load_warnings: Vec<String>,
}

impl EntityStore {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self {
            storage,
            employees: IndexMap::new(),
            equipment: IndexMap::new(),
            records: Vec::new(),
            load_warnings: Vec::new(),
        }
    }

    /// Load all collections from storage.
    ///
    /// A missing key yields the empty default. A key that fails to parse is
    /// logged, reset to the default (which is persisted immediately), and
    /// queued as a deferred user-visible warning; loading never fails on bad
    /// stored data.
    pub fn load(&mut self) -> AppResult<()> {
        self.employees = self.load_or_reset(EMPLOYEES_KEY)?;
        self.records = self.load_or_reset(RECORDS_KEY)?;

        let stored: IndexMap<String, StoredEquipment> = self.load_or_reset(EQUIPMENT_KEY)?;
        let had_legacy = stored.values().any(StoredEquipment::is_legacy);
        self.equipment = stored
            .into_iter()
            .map(|(serial, value)| (serial, value.normalize()))
            .collect();
        // One-time migration of bare-name legacy entries to the structured form
        if had_legacy {
            tracing::info!("migrating legacy equipment entries to structured form");
            self.save_equipment()?;
        }
        Ok(())
    }

    fn load_or_reset<T>(&mut self, key: &str) -> AppResult<T>
    where
        T: Default + Serialize + DeserializeOwned,
    {
        let Some(raw) = self.storage.read(key)? else {
            return Ok(T::default());
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(error) => {
                tracing::warn!(key, %error, "failed to parse stored data, resetting to defaults");
                let fallback = T::default();
                self.save(key, &fallback)?;
                self.load_warnings
                    .push(format!("Stored data for {key} was invalid and has been reset."));
                Ok(fallback)
            }
        }
    }

    fn save<T: Serialize>(&mut self, key: &str, value: &T) -> AppResult<()> {
        let raw = serde_json::to_string(value)?;
        self.storage.write(key, &raw)
    }

    fn save_employees(&mut self) -> AppResult<()> {
        let employees = self.employees.clone();
        self.save(EMPLOYEES_KEY, &employees)
    }

    fn save_equipment(&mut self) -> AppResult<()> {
        let equipment = self.equipment.clone();
        self.save(EQUIPMENT_KEY, &equipment)
    }

    fn save_records(&mut self) -> AppResult<()> {
        let records = self.records.clone();
        self.save(RECORDS_KEY, &records)
    }

    /// Warnings queued during load, to be surfaced asynchronously as toasts
    pub fn take_load_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.load_warnings)
    }

    // --- Employees ---

    pub fn employees(&self) -> &IndexMap<String, Employee> {
        &self.employees
    }

    pub fn employee(&self, badge: &str) -> Option<&Employee> {
        self.employees.get(badge)
    }

    pub fn insert_employee(&mut self, badge: String, employee: Employee) -> AppResult<()> {
        if self.employees.contains_key(&badge) {
            return Err(AppError::Duplicate(format!(
                "Employee with badge ID {badge} already exists"
            )));
        }
        self.employees.insert(badge, employee);
        self.save_employees()
    }

    /// Insert or overwrite, used by CSV import after overwrite confirmation
    pub fn replace_employee(&mut self, badge: String, employee: Employee) -> AppResult<bool> {
        let existed = self.employees.insert(badge, employee).is_some();
        self.save_employees()?;
        Ok(existed)
    }

    pub fn update_employee(&mut self, badge: &str, data: &UpdateEmployee) -> AppResult<()> {
        let employee = self
            .employees
            .get_mut(badge)
            .ok_or_else(|| AppError::NotFound(format!("No employee with badge ID {badge}")))?;
        if let Some(name) = &data.name {
            employee.name = name.clone();
        }
        if let Some(home_station) = &data.home_station {
            employee.home_station = home_station.clone();
        }
        self.save_employees()
    }

    pub fn remove_employee(&mut self, badge: &str) -> AppResult<Employee> {
        let employee = self
            .employees
            .shift_remove(badge)
            .ok_or_else(|| AppError::NotFound(format!("No employee with badge ID {badge}")))?;
        self.save_employees()?;
        Ok(employee)
    }

    // --- Equipment ---

    pub fn equipment(&self) -> &IndexMap<String, Equipment> {
        &self.equipment
    }

    pub fn equipment_item(&self, serial: &str) -> Option<&Equipment> {
        self.equipment.get(serial)
    }

    pub fn insert_equipment(&mut self, serial: String, equipment: Equipment) -> AppResult<()> {
        if self.equipment.contains_key(&serial) {
            return Err(AppError::Duplicate(format!(
                "Equipment with serial {serial} already exists"
            )));
        }
        self.equipment.insert(serial, equipment);
        self.save_equipment()
    }

    /// Insert or overwrite, used by CSV import after overwrite confirmation
    pub fn replace_equipment(&mut self, serial: String, equipment: Equipment) -> AppResult<bool> {
        let existed = self.equipment.insert(serial, equipment).is_some();
        self.save_equipment()?;
        Ok(existed)
    }

    pub fn update_equipment(&mut self, serial: &str, data: &UpdateEquipment) -> AppResult<()> {
        let equipment = self
            .equipment
            .get_mut(serial)
            .ok_or_else(|| AppError::NotFound(format!("No equipment with serial {serial}")))?;
        if let Some(name) = &data.name {
            equipment.name = name.clone();
        }
        if let Some(home_station) = &data.home_station {
            equipment.home_station = home_station.clone();
        }
        self.save_equipment()
    }

    pub fn set_equipment_home_station(&mut self, serial: &str, station: &str) -> AppResult<()> {
        let equipment = self
            .equipment
            .get_mut(serial)
            .ok_or_else(|| AppError::NotFound(format!("No equipment with serial {serial}")))?;
        equipment.home_station = station.to_string();
        self.save_equipment()
    }

    pub fn remove_equipment(&mut self, serial: &str) -> AppResult<Equipment> {
        let equipment = self
            .equipment
            .shift_remove(serial)
            .ok_or_else(|| AppError::NotFound(format!("No equipment with serial {serial}")))?;
        self.save_equipment()?;
        Ok(equipment)
    }

    // --- Records ---

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Append one record and persist the log. The caller must fold the
    /// record into the status cache exactly once after this returns.
    pub fn append_record(&mut self, record: Record) -> AppResult<()> {
        self.records.push(record);
        self.save_records()
    }

    /// Last record referencing the given serial, by log order
    pub fn last_record_for(&self, serial: &str) -> Option<&Record> {
        self.records.iter().rev().find(|record| record.references(serial))
    }
}
