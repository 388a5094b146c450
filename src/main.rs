//! Toolcrib Kiosk - interactive command-line front end
//!
//! A thin UI collaborator over the kiosk core: it parses operator commands,
//! calls into [`Kiosk`], and renders the single notification slot after
//! every interaction.

use std::fs;
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use toolcrib::models::{CreateEmployee, CreateEquipment, RecordAction, RecordFilter};
use toolcrib::services::notify::{NotificationView, ToastKind};
use toolcrib::store::storage::FileStorage;
use toolcrib::{AppConfig, AppError, Kiosk};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("toolcrib={}", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Toolcrib Kiosk v{}", env!("CARGO_PKG_VERSION"));

    let storage = FileStorage::new(&config.storage.path)?;
    let mut kiosk = Kiosk::new(
        Box::new(storage),
        Duration::from_millis(config.notifications.toast_delay_ms),
    )?;

    tracing::info!(path = %config.storage.path, "kiosk state loaded");
    println!("Toolcrib kiosk ready. Type 'help' for commands.");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        kiosk.poll(Instant::now());
        render_slot(kiosk.notification());

        print!("> ");
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let args = tokenize(&line);
        if args.is_empty() {
            continue;
        }
        match dispatch(&mut kiosk, &args) {
            Ok(true) => break,
            Ok(false) => {}
            Err(error) => match error.downcast_ref::<AppError>() {
                Some(app_error) => println!("error [{:?}]: {error}", app_error.code()),
                None => println!("error: {error}"),
            },
        }
    }

    Ok(())
}

fn render_slot(view: &NotificationView) {
    if !view.visible {
        return;
    }
    let tag = match view.kind {
        Some(ToastKind::Success) => "success",
        Some(ToastKind::Error) => "error",
        None => "status",
    };
    println!("[{tag}] {}", view.text);
}

/// Split a command line into tokens, honoring double-quoted phrases
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for ch in line.trim().chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn dispatch(kiosk: &mut Kiosk, args: &[String]) -> anyhow::Result<bool> {
    match (args[0].as_str(), &args[1..]) {
        ("help", _) => {
            print_help();
        }
        ("quit", _) | ("exit", _) => return Ok(true),
        ("out", [badge, codes @ ..]) if !codes.is_empty() => {
            let _ = kiosk.submit(badge, codes, RecordAction::CheckOut);
        }
        ("in", [badge, codes @ ..]) if !codes.is_empty() => {
            let _ = kiosk.submit(badge, codes, RecordAction::CheckIn);
        }
        ("add-employee", [badge, name, station]) => {
            let _ = kiosk.add_employee(CreateEmployee {
                badge: badge.clone(),
                name: name.clone(),
                home_station: station.clone(),
            });
        }
        ("rm-employee", [badge]) => {
            let _ = kiosk.remove_employee(badge);
        }
        ("add-equipment", [serial, name, station]) => {
            let _ = kiosk.add_equipment(CreateEquipment {
                serial: serial.clone(),
                name: name.clone(),
                home_station: station.clone(),
            });
        }
        ("rm-equipment", [serial]) => {
            let _ = kiosk.remove_equipment(serial);
        }
        ("set-home", [serial, station]) => {
            let _ = kiosk.set_home_station(serial, station);
        }
        ("status", [serial]) => {
            let status = kiosk.status_of(serial);
            println!(
                "{serial}: balance {} last station {}",
                status.balance,
                status.last_station.as_deref().unwrap_or("-")
            );
        }
        ("employees", _) => {
            for (badge, employee) in kiosk.store().employees() {
                println!("{badge}: {} ({})", employee.name, employee.home_station);
            }
        }
        ("equipment", _) => {
            for (serial, item) in kiosk.store().equipment() {
                println!("{serial}: {} ({})", item.name, item.home_station);
            }
        }
        ("records", filters) => {
            let filter = parse_filter(filters)?;
            for record in kiosk.filter_records(&filter) {
                println!(
                    "{} {} {} [{}] {} -> {}",
                    record.timestamp.to_rfc3339(),
                    record.badge,
                    record.employee_name,
                    record.station,
                    record.equipment_barcodes.join("; "),
                    record.action
                );
            }
        }
        ("export-employees", [path]) => {
            fs::write(path, kiosk.export_employees())?;
            println!("exported to {path}");
        }
        ("export-equipment", [path]) => {
            fs::write(path, kiosk.export_equipment())?;
            println!("exported to {path}");
        }
        ("export-records", [path]) => {
            if let Ok(text) = kiosk.export_records() {
                fs::write(path, text)?;
                println!("exported to {path}");
            }
        }
        ("import-employees", [path]) => {
            let text = fs::read_to_string(path)?;
            let report = kiosk.import_employees(&text, confirm_overwrite)?;
            println!(
                "imported {} ({} overwritten, {} skipped)",
                report.imported,
                report.overwritten,
                report.skipped.len()
            );
        }
        ("import-equipment", [path]) => {
            let text = fs::read_to_string(path)?;
            let report = kiosk.import_equipment(&text, confirm_overwrite)?;
            println!(
                "imported {} ({} overwritten, {} skipped)",
                report.imported,
                report.overwritten,
                report.skipped.len()
            );
        }
        ("reload", _) => {
            kiosk.reload()?;
            println!("state reloaded");
        }
        _ => {
            println!("unrecognized command; type 'help'");
        }
    }
    Ok(false)
}

fn parse_filter(args: &[String]) -> anyhow::Result<RecordFilter> {
    let mut filter = RecordFilter::default();
    for arg in args {
        match arg.split_once('=') {
            Some(("search", value)) => filter.search = Some(value.to_string()),
            Some(("equip", value)) => filter.equipment = Some(value.to_string()),
            Some(("date", value)) => filter.date = Some(value.parse()?),
            _ => anyhow::bail!("unrecognized filter '{arg}'"),
        }
    }
    Ok(filter)
}

fn confirm_overwrite(id: &str) -> bool {
    print!("{id} already exists. Overwrite? [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes")
}

fn print_help() {
    println!(
        "commands:\n\
         \x20 out <badge> <serial>...          check equipment out\n\
         \x20 in <badge> <serial>...           check equipment in\n\
         \x20 add-employee <badge> <name> <station>\n\
         \x20 rm-employee <badge>\n\
         \x20 add-equipment <serial> <name> <station>\n\
         \x20 rm-equipment <serial>\n\
         \x20 set-home <serial> <station>      change an equipment's home station\n\
         \x20 status <serial>                  derived balance / last station\n\
         \x20 employees | equipment            list entities\n\
         \x20 records [search=X] [equip=Y] [date=YYYY-MM-DD]\n\
         \x20 export-employees|export-equipment|export-records <file>\n\
         \x20 import-employees|import-equipment <file>\n\
         \x20 reload                           re-read state from storage\n\
         \x20 quit"
    );
}
