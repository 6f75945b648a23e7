use diesel::{Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::schema::technicians;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[diesel(table_name = technicians)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[ts(export)]
pub struct Technician {
    pub id: i32,
    pub name: String,
    /// Not validated against `devices`; may point at an id with no row.
    pub assigned_device_id: Option<i32>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = technicians)]
pub struct NewTechnician {
    pub name: String,
}
