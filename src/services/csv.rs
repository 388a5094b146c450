//! CSV import/export
//!
//! Quote-aware parsing and fully quoted export of the kiosk's three CSV
//! shapes. Exports wrap every field in double quotes and escape embedded
//! quotes by doubling them.

use indexmap::IndexMap;

use crate::models::{Employee, Equipment, Record, SkipReason, SkippedRow};

pub const EMPLOYEES_HEADER: &str = "Badge ID,Employee Name,Home Station";
pub const EQUIPMENT_HEADER: &str = "Equipment Serial,Equipment Name,Home Station";
pub const RECORDS_HEADER: &str =
    "Timestamp,Employee Badge ID,Employee Name,Station,Equipment Barcodes,Equipment Names,Action";

/// Double embedded quotes so the value stays well-formed inside a quoted field
pub fn escape(value: &str) -> String {
    value.replace('"', "\"\"")
}

fn quoted_row(fields: &[String]) -> String {
    let quoted: Vec<String> = fields
        .iter()
        .map(|field| format!("\"{}\"", escape(field)))
        .collect();
    quoted.join(",")
}

/// Parse CSV text into rows of fields.
///
/// Handles quoted fields with embedded separators, newlines and doubled
/// quotes, and both LF and CRLF line endings.
pub fn parse(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                row.push(std::mem::take(&mut current));
            }
            '\r' | '\n' if !in_quotes => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut current));
                rows.push(std::mem::take(&mut row));
            }
            _ => current.push(ch),
        }
    }
    if !current.is_empty() || !row.is_empty() {
        row.push(current);
        rows.push(row);
    }
    rows
}

/// A parsed employee/equipment import row (shared two-or-three-column shape)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRow {
    pub id: String,
    pub name: String,
    pub home_station: String,
}

/// Parse entity import rows, skipping the header row.
///
/// Rows with fewer than two fields, or with an empty identifier or name
/// after trimming, are reported and skipped; parsing always continues.
pub fn parse_entity_rows(text: &str) -> (Vec<(usize, EntityRow)>, Vec<SkippedRow>) {
    let mut rows = Vec::new();
    let mut skipped = Vec::new();

    for (index, fields) in parse(text).into_iter().enumerate().skip(1) {
        let line = index + 1;
        if fields.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        if fields.len() < 2 {
            skipped.push(SkippedRow {
                line,
                reason: SkipReason::Malformed,
                content: fields.join(","),
            });
            continue;
        }
        let id = fields[0].trim().to_string();
        let name = fields[1].trim().to_string();
        let home_station = fields
            .get(2)
            .map(|field| field.trim().to_string())
            .unwrap_or_default();
        if id.is_empty() || name.is_empty() {
            skipped.push(SkippedRow {
                line,
                reason: SkipReason::EmptyField,
                content: fields.join(","),
            });
            continue;
        }
        rows.push((line, EntityRow { id, name, home_station }));
    }
    (rows, skipped)
}

pub fn export_employees(employees: &IndexMap<String, Employee>) -> String {
    let mut out = format!("{EMPLOYEES_HEADER}\n");
    for (badge, employee) in employees {
        out.push_str(&quoted_row(&[
            badge.clone(),
            employee.name.clone(),
            employee.home_station.clone(),
        ]));
        out.push('\n');
    }
    out
}

pub fn export_equipment(equipment: &IndexMap<String, Equipment>) -> String {
    let mut out = format!("{EQUIPMENT_HEADER}\n");
    for (serial, item) in equipment {
        out.push_str(&quoted_row(&[
            serial.clone(),
            item.name.clone(),
            item.home_station.clone(),
        ]));
        out.push('\n');
    }
    out
}

pub fn export_records(records: &[Record]) -> String {
    let mut out = format!("{RECORDS_HEADER}\n");
    for record in records {
        out.push_str(&quoted_row(&[
            record.timestamp.to_rfc3339(),
            record.badge.clone(),
            record.employee_name.clone(),
            record.station.clone(),
            record.equipment_barcodes.join("; "),
            record.equipment_names.join("; "),
            record.action.as_str().to_string(),
        ]));
        out.push('\n');
    }
    out
}
