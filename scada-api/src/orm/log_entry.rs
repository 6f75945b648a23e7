use chrono::Utc;
use diesel::prelude::*;

use crate::models::{LogEntry, LogEntryInput, NewLogEntry};

/// Number of entries returned for an empty search.
pub const DEFAULT_RECENT_LIMIT: i64 = 100;

/// Appends an entry to the audit log.
///
/// The id and the UTC timestamp are assigned here. When called inside an
/// open transaction the insert joins it as a savepoint, so the entry commits
/// or rolls back together with the caller's state write.
pub fn append(
    conn: &mut SqliteConnection,
    input: LogEntryInput,
) -> Result<LogEntry, diesel::result::Error> {
    use crate::schema::logs::dsl::*;

    let new_entry = NewLogEntry {
        type_: input.type_,
        device_id: input.device_id,
        technician_id: input.technician_id,
        timestamp: Utc::now().naive_utc(),
        details: input.details,
    };

    conn.transaction(|conn| {
        diesel::insert_into(logs).values(&new_entry).execute(conn)?;

        // Still holding the write lock, so the newest row is ours
        logs.order(id.desc()).select(LogEntry::as_select()).first(conn)
    })
}

/// Most recent entries first: timestamp descending, ties by id descending.
pub fn recent(conn: &mut SqliteConnection, limit: i64) -> Result<Vec<LogEntry>, diesel::result::Error> {
    use crate::schema::logs::dsl::*;

    logs.order((timestamp.desc(), id.desc()))
        .limit(limit.max(0))
        .select(LogEntry::as_select())
        .load(conn)
}

/// Gets every entry referencing a device, oldest first.
pub fn get_device_history(
    conn: &mut SqliteConnection,
    device_id_val: i32,
) -> Result<Vec<LogEntry>, diesel::result::Error> {
    use crate::schema::logs::dsl::*;

    logs.filter(device_id.eq(device_id_val))
        .order((timestamp.asc(), id.asc()))
        .select(LogEntry::as_select())
        .load(conn)
}

/// Gets every entry referencing a technician, oldest first.
pub fn get_technician_history(
    conn: &mut SqliteConnection,
    technician_id_val: i32,
) -> Result<Vec<LogEntry>, diesel::result::Error> {
    use crate::schema::logs::dsl::*;

    logs.filter(technician_id.eq(technician_id_val))
        .order((timestamp.asc(), id.asc()))
        .select(LogEntry::as_select())
        .load(conn)
}

pub fn count_entries(conn: &mut SqliteConnection) -> Result<i64, diesel::result::Error> {
    use crate::schema::logs::dsl::*;
    logs.count().get_result(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MAINTENANCE_START, TECHNICIAN_ACCESS};
    use crate::orm::testing::setup_test_db;

    #[test]
    fn test_append_assigns_id_and_timestamp() {
        let mut conn = setup_test_db();

        let before = Utc::now().naive_utc();
        let entry = append(
            &mut conn,
            LogEntryInput::new(MAINTENANCE_START, "Device placed in maintenance mode").device(Some(2)),
        )
        .expect("Failed to append log entry");
        let after = Utc::now().naive_utc();

        assert!(entry.id > 0);
        assert_eq!(entry.type_, MAINTENANCE_START);
        assert_eq!(entry.device_id, Some(2));
        assert_eq!(entry.technician_id, None);
        assert!(entry.timestamp >= before && entry.timestamp <= after);
    }

    #[test]
    fn test_append_ids_increase() {
        let mut conn = setup_test_db();

        let first = append(&mut conn, LogEntryInput::new("note", "first")).unwrap();
        let second = append(&mut conn, LogEntryInput::new("note", "second")).unwrap();
        let third = append(&mut conn, LogEntryInput::new("note", "third")).unwrap();

        assert!(first.id < second.id);
        assert!(second.id < third.id);
        assert_eq!(count_entries(&mut conn).unwrap(), 3);
    }

    #[test]
    fn test_recent_is_newest_first_and_limited() {
        let mut conn = setup_test_db();

        for n in 0..5 {
            append(&mut conn, LogEntryInput::new("note", &format!("entry {}", n))).unwrap();
        }

        let entries = recent(&mut conn, 3).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].details, "entry 4");
        assert_eq!(entries[1].details, "entry 3");
        assert_eq!(entries[2].details, "entry 2");

        assert!(recent(&mut conn, 0).unwrap().is_empty());
        assert!(recent(&mut conn, -5).unwrap().is_empty());
    }

    #[test]
    fn test_recent_breaks_timestamp_ties_by_id() {
        use crate::models::NewLogEntry;
        use crate::schema::logs;

        let mut conn = setup_test_db();
        let same_instant = chrono::NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();

        for label in ["a", "b", "c"] {
            diesel::insert_into(logs::table)
                .values(&NewLogEntry {
                    type_: "note".to_string(),
                    device_id: None,
                    technician_id: None,
                    timestamp: same_instant,
                    details: label.to_string(),
                })
                .execute(&mut conn)
                .unwrap();
        }

        let details: Vec<String> = recent(&mut conn, 10).unwrap().into_iter().map(|e| e.details).collect();
        assert_eq!(details, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_history_filters_by_reference() {
        let mut conn = setup_test_db();

        append(&mut conn, LogEntryInput::new(MAINTENANCE_START, "x").device(Some(1))).unwrap();
        append(&mut conn, LogEntryInput::new(MAINTENANCE_START, "y").device(Some(2))).unwrap();
        append(
            &mut conn,
            LogEntryInput::new(TECHNICIAN_ACCESS, "z").device(Some(1)).technician(3),
        )
        .unwrap();

        let device_history = get_device_history(&mut conn, 1).unwrap();
        assert_eq!(device_history.len(), 2);
        assert_eq!(device_history[0].details, "x");
        assert_eq!(device_history[1].details, "z");

        let tech_history = get_technician_history(&mut conn, 3).unwrap();
        assert_eq!(tech_history.len(), 1);
        assert_eq!(tech_history[0].type_, TECHNICIAN_ACCESS);
    }

    #[test]
    fn test_entries_cannot_be_updated_or_deleted() {
        use crate::schema::logs::dsl::*;

        let mut conn = setup_test_db();
        let entry = append(&mut conn, LogEntryInput::new("note", "original")).unwrap();

        let update = diesel::update(logs.filter(id.eq(entry.id)))
            .set(details.eq("tampered"))
            .execute(&mut conn);
        assert!(update.is_err());

        let delete = diesel::delete(logs.filter(id.eq(entry.id))).execute(&mut conn);
        assert!(delete.is_err());

        let stored = recent(&mut conn, 1).unwrap();
        assert_eq!(stored[0].details, "original");
    }
}
