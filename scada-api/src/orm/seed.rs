use diesel::prelude::*;

use crate::models::{NewDevice, NewTechnician};

/// Devices created on first start: `(name, online)`.
pub const SEED_DEVICES: &[(&str, bool)] = &[
    ("PLC-1", true),
    ("Pump-A", true),
    ("Valve-42", true),
    ("Compressor-X", false),
    ("Sensor-T", true),
    ("HMI-Panel", true),
];

pub const SEED_TECHNICIANS: &[&str] = &["Alice", "Bob", "Charlie"];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub devices_seeded: usize,
    pub technicians_seeded: usize,
}

/// Inserts the seed devices and technicians into whichever of the two
/// tables is empty. Tables that already hold rows are left untouched, so
/// calling this on every start is safe.
pub fn seed_if_empty(conn: &mut SqliteConnection) -> Result<SeedReport, diesel::result::Error> {
    use crate::schema::{devices, technicians};

    conn.immediate_transaction(|conn| {
        let mut report = SeedReport::default();

        let device_count: i64 = devices::table.count().get_result(conn)?;
        if device_count == 0 {
            let rows: Vec<NewDevice> = SEED_DEVICES
                .iter()
                .map(|(name, online)| NewDevice { name: name.to_string(), online: *online })
                .collect();
            report.devices_seeded = diesel::insert_into(devices::table).values(&rows).execute(conn)?;
        }

        let technician_count: i64 = technicians::table.count().get_result(conn)?;
        if technician_count == 0 {
            let rows: Vec<NewTechnician> = SEED_TECHNICIANS
                .iter()
                .map(|name| NewTechnician { name: name.to_string() })
                .collect();
            report.technicians_seeded =
                diesel::insert_into(technicians::table).values(&rows).execute(conn)?;
        }

        Ok(report)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orm::device::list_devices;
    use crate::orm::technician::list_technicians;
    use crate::orm::testing::setup_test_db;

    #[test]
    fn test_seed_populates_empty_store() {
        let mut conn = setup_test_db();

        let report = seed_if_empty(&mut conn).unwrap();
        assert_eq!(report, SeedReport { devices_seeded: 6, technicians_seeded: 3 });

        let all = list_devices(&mut conn).unwrap();
        assert_eq!(all.len(), 6);
        assert_eq!(all.iter().filter(|d| d.online).count(), 5);
        let offline: Vec<&str> = all.iter().filter(|d| !d.online).map(|d| d.name.as_str()).collect();
        assert_eq!(offline, vec!["Compressor-X"]);
    }

    #[test]
    fn test_seed_is_idempotent() {
        let mut conn = setup_test_db();

        seed_if_empty(&mut conn).unwrap();
        let report = seed_if_empty(&mut conn).unwrap();
        assert_eq!(report, SeedReport::default());
        assert_eq!(list_devices(&mut conn).unwrap().len(), 6);
        assert_eq!(list_technicians(&mut conn).unwrap().len(), 3);
    }

    #[test]
    fn test_seed_only_fills_empty_tables() {
        use crate::schema::devices;

        let mut conn = setup_test_db();
        diesel::insert_into(devices::table)
            .values(&NewDevice { name: "Boiler-7".to_string(), online: true })
            .execute(&mut conn)
            .unwrap();

        let report = seed_if_empty(&mut conn).unwrap();
        assert_eq!(report, SeedReport { devices_seeded: 0, technicians_seeded: 3 });
        let names: Vec<String> = list_devices(&mut conn).unwrap().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Boiler-7"]);
    }
}
