use diesel::prelude::*;

use crate::models::{LogEntryInput, TECHNICIAN_ACCESS, Technician};
use crate::orm::log_entry::append;

/// Gets all technicians, ordered by id.
pub fn list_technicians(
    conn: &mut SqliteConnection,
) -> Result<Vec<Technician>, diesel::result::Error> {
    use crate::schema::technicians::dsl::*;
    technicians.order(id.asc()).select(Technician::as_select()).load(conn)
}

pub fn get_technician_by_id(
    conn: &mut SqliteConnection,
    tech_id: i32,
) -> Result<Option<Technician>, diesel::result::Error> {
    use crate::schema::technicians::dsl::*;
    technicians.filter(id.eq(tech_id)).select(Technician::as_select()).first(conn).optional()
}

/// Assigns a technician to a device, or clears the assignment with `None`.
///
/// The device id is stored as given without checking that the device
/// exists. A `technician_access` entry referencing both ids is appended in
/// the same transaction. Returns the number of technician rows updated, `0`
/// for an unknown technician.
pub fn assign(
    conn: &mut SqliteConnection,
    tech_id: i32,
    device_id: Option<i32>,
) -> Result<usize, diesel::result::Error> {
    let entry = LogEntryInput::new(TECHNICIAN_ACCESS, "Technician assignment updated")
        .device(device_id)
        .technician(tech_id);

    conn.immediate_transaction(|conn| {
        use crate::schema::technicians::dsl::*;

        let updated = diesel::update(technicians.filter(id.eq(tech_id)))
            .set(assigned_device_id.eq(device_id))
            .execute(conn)?;
        append(conn, entry)?;
        Ok(updated)
    })
}
