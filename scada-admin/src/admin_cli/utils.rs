use clap::ValueEnum;
use diesel::sqlite::SqliteConnection;
use dotenvy::dotenv;
use scada_api::{models::Device, orm::seed::seed_if_empty};

/// Opens the database named by `DATABASE_URL`, bringing the schema up to
/// date and seeding the standard plant if it is empty.
pub fn establish_connection() -> Result<SqliteConnection, Box<dyn std::error::Error>> {
    dotenv().ok();
    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?;
    let mut conn = scada_api::orm::establish_connection(&database_url)
        .map_err(|e| format!("Failed to open {}: {}", database_url, e))?;

    let report = seed_if_empty(&mut conn)?;
    if report.devices_seeded > 0 || report.technicians_seeded > 0 {
        println!(
            "Seeded {} devices and {} technicians",
            report.devices_seeded, report.technicians_seeded
        );
    }
    Ok(conn)
}

/// Command-line spelling of a flag value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn is_on(self) -> bool {
        self == Switch::On
    }
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

pub fn print_device(device: &Device) {
    println!(
        "  ID: {}, Name: {}, Online: {}, Maintenance: {}, Lockout/Tagout: {}",
        device.id,
        device.name,
        yes_no(device.online),
        yes_no(device.maintenance_mode),
        yes_no(device.lockout_tagout)
    );
}
