use diesel::{Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::schema::devices;

/// A plant device. The three flags are independent of each other: a device
/// can be offline and in maintenance at the same time.
#[derive(
    Queryable,
    Selectable,
    Identifiable,
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    TS,
)]
#[diesel(table_name = devices)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[ts(export)]
pub struct Device {
    pub id: i32,
    pub name: String,
    pub online: bool,
    pub maintenance_mode: bool,
    pub lockout_tagout: bool,
}

/// Seed-time device row; maintenance and lockout start cleared.
#[derive(Insertable, Debug)]
#[diesel(table_name = devices)]
pub struct NewDevice {
    pub name: String,
    pub online: bool,
}
