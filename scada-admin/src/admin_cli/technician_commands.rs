use clap::Subcommand;
use diesel::sqlite::SqliteConnection;
use scada_api::orm::technician::{assign, list_technicians};

#[derive(Subcommand)]
pub enum TechAction {
    #[command(about = "List technicians and their assigned devices")]
    Ls,
    #[command(about = "Assign a technician to a device, or clear the assignment")]
    Assign {
        #[arg(help = "Technician ID")]
        tech_id: i32,
        #[arg(short, long, help = "Device ID to assign (omit to unassign)")]
        device: Option<i32>,
    },
}

pub fn handle_tech_command_with_conn(
    conn: &mut SqliteConnection,
    action: TechAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TechAction::Ls => tech_ls_impl(conn)?,
        TechAction::Assign { tech_id, device } => tech_assign_impl(conn, tech_id, device)?,
    }
    Ok(())
}

pub fn tech_ls_impl(conn: &mut SqliteConnection) -> Result<(), Box<dyn std::error::Error>> {
    let technicians = list_technicians(conn)?;

    if technicians.is_empty() {
        println!("No technicians found.");
        return Ok(());
    }

    println!("Technicians:");
    for tech in technicians {
        let assignment = match tech.assigned_device_id {
            Some(device_id) => device_id.to_string(),
            None => "-".to_string(),
        };
        println!("  ID: {}, Name: {}, Device: {}", tech.id, tech.name, assignment);
    }
    Ok(())
}

pub fn tech_assign_impl(
    conn: &mut SqliteConnection,
    tech_id: i32,
    device_id: Option<i32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let updated = assign(conn, tech_id, device_id)?;

    if updated == 0 {
        println!("No technician with ID {}; nothing changed.", tech_id);
    } else {
        match device_id {
            Some(device_id) => println!("Technician {} assigned to device {}", tech_id, device_id),
            None => println!("Technician {} unassigned", tech_id),
        }
    }
    Ok(())
}
