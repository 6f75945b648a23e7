use diesel::prelude::*;

use crate::models::{DEVICE_ISOLATION, Device, LogEntryInput, MAINTENANCE_END, MAINTENANCE_START};
use crate::orm::log_entry::append;

/// Gets all devices in the system, ordered by id.
pub fn list_devices(conn: &mut SqliteConnection) -> Result<Vec<Device>, diesel::result::Error> {
    use crate::schema::devices::dsl::*;
    devices.order(id.asc()).select(Device::as_select()).load(conn)
}

/// Gets a device by its ID.
pub fn get_device_by_id(
    conn: &mut SqliteConnection,
    device_id: i32,
) -> Result<Option<Device>, diesel::result::Error> {
    use crate::schema::devices::dsl::*;
    devices.filter(id.eq(device_id)).select(Device::as_select()).first(conn).optional()
}

/// Puts a device into, or takes it out of, maintenance mode and records a
/// `maintenance_start` / `maintenance_end` entry in the same transaction.
///
/// Returns the number of device rows updated. An unknown id updates nothing
/// and returns `0`; the log entry is still written. Every call logs, even
/// when the flag already had the requested value.
pub fn set_maintenance(
    conn: &mut SqliteConnection,
    device_id: i32,
    on: bool,
) -> Result<usize, diesel::result::Error> {
    let entry = if on {
        LogEntryInput::new(MAINTENANCE_START, "Device placed in maintenance mode")
    } else {
        LogEntryInput::new(MAINTENANCE_END, "Device released from maintenance mode")
    };

    conn.immediate_transaction(|conn| {
        use crate::schema::devices::dsl::*;

        let updated = diesel::update(devices.filter(id.eq(device_id)))
            .set(maintenance_mode.eq(on))
            .execute(conn)?;
        append(conn, entry.device(Some(device_id)))?;
        Ok(updated)
    })
}

/// Applies or releases lockout/tagout isolation on a device.
///
/// Both directions log `device_isolation`; only the detail text tells them
/// apart. Same row-count and logging rules as [`set_maintenance`].
pub fn set_lockout(
    conn: &mut SqliteConnection,
    device_id: i32,
    on: bool,
) -> Result<usize, diesel::result::Error> {
    let details = if on { "Lockout/Tagout applied" } else { "Lockout/Tagout released" };
    let entry = LogEntryInput::new(DEVICE_ISOLATION, details);

    conn.immediate_transaction(|conn| {
        use crate::schema::devices::dsl::*;

        let updated = diesel::update(devices.filter(id.eq(device_id)))
            .set(lockout_tagout.eq(on))
            .execute(conn)?;
        append(conn, entry.device(Some(device_id)))?;
        Ok(updated)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orm::log_entry::{count_entries, get_device_history};
    use crate::orm::testing::seeded_test_db;

    #[test]
    fn test_list_devices_returns_seed_in_id_order() {
        let mut conn = seeded_test_db();

        let all = list_devices(&mut conn).expect("Failed to list devices");
        let names: Vec<&str> = all.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["PLC-1", "Pump-A", "Valve-42", "Compressor-X", "Sensor-T", "HMI-Panel"]
        );
        assert!(all.windows(2).all(|w| w[0].id < w[1].id));
        assert!(all.iter().all(|d| !d.maintenance_mode && !d.lockout_tagout));
    }

    #[test]
    fn test_set_maintenance_on_and_off() {
        let mut conn = seeded_test_db();

        assert_eq!(set_maintenance(&mut conn, 2, true).unwrap(), 1);
        let device = get_device_by_id(&mut conn, 2).unwrap().unwrap();
        assert!(device.maintenance_mode);
        assert!(!device.lockout_tagout);

        assert_eq!(set_maintenance(&mut conn, 2, false).unwrap(), 1);
        assert!(!get_device_by_id(&mut conn, 2).unwrap().unwrap().maintenance_mode);

        let history = get_device_history(&mut conn, 2).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].type_, MAINTENANCE_START);
        assert_eq!(history[0].details, "Device placed in maintenance mode");
        assert_eq!(history[1].type_, MAINTENANCE_END);
        assert_eq!(history[1].details, "Device released from maintenance mode");
    }

    #[test]
    fn test_set_maintenance_logs_every_call() {
        let mut conn = seeded_test_db();

        set_maintenance(&mut conn, 1, true).unwrap();
        set_maintenance(&mut conn, 1, true).unwrap();

        assert!(get_device_by_id(&mut conn, 1).unwrap().unwrap().maintenance_mode);
        let history = get_device_history(&mut conn, 1).unwrap();
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|e| e.type_ == MAINTENANCE_START));
    }

    #[test]
    fn test_set_lockout_logs_isolation_both_ways() {
        let mut conn = seeded_test_db();

        assert_eq!(set_lockout(&mut conn, 3, true).unwrap(), 1);
        assert!(get_device_by_id(&mut conn, 3).unwrap().unwrap().lockout_tagout);
        assert_eq!(set_lockout(&mut conn, 3, false).unwrap(), 1);
        assert!(!get_device_by_id(&mut conn, 3).unwrap().unwrap().lockout_tagout);

        let history = get_device_history(&mut conn, 3).unwrap();
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|e| e.type_ == DEVICE_ISOLATION));
        assert_eq!(history[0].details, "Lockout/Tagout applied");
        assert_eq!(history[1].details, "Lockout/Tagout released");
    }

    #[test]
    fn test_flags_are_independent() {
        let mut conn = seeded_test_db();

        // Compressor-X is the offline device
        let compressor = get_device_by_id(&mut conn, 4).unwrap().unwrap();
        assert!(!compressor.online);

        set_maintenance(&mut conn, 4, true).unwrap();
        set_lockout(&mut conn, 4, true).unwrap();
        let compressor = get_device_by_id(&mut conn, 4).unwrap().unwrap();
        assert!(!compressor.online);
        assert!(compressor.maintenance_mode);
        assert!(compressor.lockout_tagout);

        set_maintenance(&mut conn, 4, false).unwrap();
        let compressor = get_device_by_id(&mut conn, 4).unwrap().unwrap();
        assert!(!compressor.maintenance_mode);
        assert!(compressor.lockout_tagout);
    }

    #[test]
    fn test_unknown_device_is_silent_noop() {
        let mut conn = seeded_test_db();
        let before = list_devices(&mut conn).unwrap();

        assert_eq!(set_maintenance(&mut conn, 9999, true).unwrap(), 0);
        assert_eq!(set_lockout(&mut conn, 9999, true).unwrap(), 0);

        assert_eq!(list_devices(&mut conn).unwrap(), before);
        // The log append is not skipped for a missing row
        assert_eq!(get_device_history(&mut conn, 9999).unwrap().len(), 2);
        assert_eq!(count_entries(&mut conn).unwrap(), 2);
    }

    #[test]
    fn test_failed_log_append_rolls_back_state() {
        use diesel::connection::SimpleConnection;

        let mut conn = seeded_test_db();
        conn.batch_execute(
            "CREATE TRIGGER reject_logs BEFORE INSERT ON logs BEGIN SELECT RAISE(ABORT, 'no'); END;",
        )
        .unwrap();

        assert!(set_maintenance(&mut conn, 1, true).is_err());
        assert!(set_lockout(&mut conn, 1, true).is_err());

        let device = get_device_by_id(&mut conn, 1).unwrap().unwrap();
        assert!(!device.maintenance_mode);
        assert!(!device.lockout_tagout);
        assert_eq!(count_entries(&mut conn).unwrap(), 0);
    }
}
