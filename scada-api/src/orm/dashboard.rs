use diesel::prelude::*;

use crate::models::StatusSummary;

/// Computes the dashboard counts from a single read snapshot.
///
/// `open_tickets` counts log rows whose type contains "ticket" using SQLite
/// `LIKE`, so the match ignores ASCII case.
pub fn summary(conn: &mut SqliteConnection) -> Result<StatusSummary, diesel::result::Error> {
    use crate::schema::{devices, logs};

    conn.transaction(|conn| {
        let assets_online = devices::table
            .filter(devices::online.eq(true))
            .count()
            .get_result(conn)?;
        let assets_offline = devices::table
            .filter(devices::online.eq(false))
            .count()
            .get_result(conn)?;
        let open_tickets = logs::table
            .filter(logs::type_.like("%ticket%"))
            .count()
            .get_result(conn)?;

        Ok(StatusSummary { assets_online, assets_offline, open_tickets })
    })
}
