use clap::Subcommand;
use diesel::sqlite::SqliteConnection;
use regex::Regex;
use scada_api::{
    models::Device,
    orm::device::{get_device_by_id, list_devices, set_lockout, set_maintenance},
};

use crate::admin_cli::utils::{Switch, print_device};

#[derive(Subcommand)]
pub enum DeviceAction {
    #[command(about = "List devices, optionally filtered by name")]
    Ls {
        #[arg(help = "Search term (regex by default, use -F for fixed string)")]
        search_term: Option<String>,
        #[arg(
            short = 'F',
            long = "fixed-string",
            help = "Treat search term as fixed string instead of regex"
        )]
        fixed_string: bool,
    },
    #[command(about = "Put a device into or out of maintenance mode")]
    Maintenance {
        #[arg(help = "Device ID")]
        id: i32,
        #[arg(value_enum)]
        state: Switch,
    },
    #[command(about = "Apply or release lockout/tagout on a device")]
    Lockout {
        #[arg(help = "Device ID")]
        id: i32,
        #[arg(value_enum)]
        state: Switch,
    },
}

pub fn handle_device_command_with_conn(
    conn: &mut SqliteConnection,
    action: DeviceAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        DeviceAction::Ls { search_term, fixed_string } => {
            device_ls_impl(conn, search_term, fixed_string)?;
        }
        DeviceAction::Maintenance { id, state } => {
            let updated = set_maintenance(conn, id, state.is_on())?;
            report_toggle(conn, id, updated, "Maintenance mode", state)?;
        }
        DeviceAction::Lockout { id, state } => {
            let updated = set_lockout(conn, id, state.is_on())?;
            report_toggle(conn, id, updated, "Lockout/Tagout", state)?;
        }
    }
    Ok(())
}

/// Keeps the devices whose name matches `search_term`.
pub fn filter_devices(
    devices: Vec<Device>,
    search_term: Option<&str>,
    fixed_string: bool,
) -> Result<Vec<Device>, Box<dyn std::error::Error>> {
    let Some(term) = search_term else {
        return Ok(devices);
    };

    if fixed_string {
        Ok(devices.into_iter().filter(|device| device.name.contains(term)).collect())
    } else {
        let regex =
            Regex::new(term).map_err(|e| format!("Invalid regex pattern '{}': {}", term, e))?;
        Ok(devices.into_iter().filter(|device| regex.is_match(&device.name)).collect())
    }
}

pub fn device_ls_impl(
    conn: &mut SqliteConnection,
    search_term: Option<String>,
    fixed_string: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let devices = filter_devices(list_devices(conn)?, search_term.as_deref(), fixed_string)?;

    if devices.is_empty() {
        println!("No devices found.");
    } else {
        println!("Devices:");
        for device in &devices {
            print_device(device);
        }
    }
    Ok(())
}

fn report_toggle(
    conn: &mut SqliteConnection,
    id: i32,
    updated: usize,
    what: &str,
    state: Switch,
) -> Result<(), Box<dyn std::error::Error>> {
    if updated == 0 {
        // The change is still recorded in the audit log
        println!("No device with ID {}; nothing changed.", id);
        return Ok(());
    }

    let label = if state.is_on() { "on" } else { "off" };
    println!("{} {} for device {}", what, label, id);
    if let Some(device) = get_device_by_id(conn, id)? {
        print_device(&device);
    }
    Ok(())
}
