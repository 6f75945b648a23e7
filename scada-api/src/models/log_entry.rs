use chrono::NaiveDateTime;
use diesel::{Identifiable, Insertable, Queryable, QueryableByName, Selectable};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::schema::logs;

pub const MAINTENANCE_START: &str = "maintenance_start";
pub const MAINTENANCE_END: &str = "maintenance_end";
pub const DEVICE_ISOLATION: &str = "device_isolation";
pub const TECHNICIAN_ACCESS: &str = "technician_access";

/// One row of the audit trail. Rows are never updated or deleted once
/// written; the table carries triggers that abort either statement.
#[derive(
    Queryable,
    Selectable,
    Identifiable,
    QueryableByName,
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    TS,
)]
#[diesel(table_name = logs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[ts(export)]
pub struct LogEntry {
    pub id: i32,
    #[serde(rename = "type")]
    pub type_: String,
    pub device_id: Option<i32>,
    pub technician_id: Option<i32>,
    #[ts(type = "string")]
    pub timestamp: NaiveDateTime,
    pub details: String,
}

/// Caller-supplied fields of a log entry. The id and timestamp are assigned
/// by the store in [`crate::orm::log_entry::append`].
#[derive(Debug, Clone, Deserialize, Serialize, TS)]
#[ts(export)]
pub struct LogEntryInput {
    #[serde(rename = "type")]
    pub type_: String,
    pub device_id: Option<i32>,
    pub technician_id: Option<i32>,
    pub details: String,
}

impl LogEntryInput {
    pub fn new(type_: &str, details: &str) -> Self {
        Self {
            type_: type_.to_string(),
            device_id: None,
            technician_id: None,
            details: details.to_string(),
        }
    }

    pub fn device(mut self, device_id: Option<i32>) -> Self {
        self.device_id = device_id;
        self
    }

    pub fn technician(mut self, technician_id: i32) -> Self {
        self.technician_id = Some(technician_id);
        self
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = logs)]
pub struct NewLogEntry {
    pub type_: String,
    pub device_id: Option<i32>,
    pub technician_id: Option<i32>,
    pub timestamp: NaiveDateTime,
    pub details: String,
}

/// Outcome of a free-text log search.
///
/// `warning` is set when the underlying match failed; `entries` is empty in
/// that case and the failure is not propagated further.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LogSearch {
    pub filtered_term: String,
    pub entries: Vec<LogEntry>,
    pub warning: Option<String>,
}
