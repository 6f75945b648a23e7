//! API endpoints for the audit log.

use rocket::{Route, State, serde::json::Json};

use super::{ApiResult, store_error};
use crate::{
    PlantConfig,
    models::{LogEntry, LogSearch},
    orm::{
        DbConn,
        log_entry::{DEFAULT_RECENT_LIMIT, recent},
        log_query::search,
    },
};

/// Log search endpoint.
///
/// - **URL:** `/api/1/logs?q=<term>`
/// - **Method:** `GET`
/// - **Purpose:** Free-text search over log type and details. A missing or
///   empty `q` returns the 100 most recent entries.
///
/// # Response
///
/// **Success (HTTP 200 OK):**
/// ```json
/// {
///   "filtered_term": "Lockout",
///   "entries": [{ "id": 3, "type": "device_isolation", "device_id": 2,
///                 "technician_id": null, "timestamp": "2025-09-01T09:00:00",
///                 "details": "Lockout/Tagout applied" }],
///   "warning": null
/// }
/// ```
///
/// A term that breaks the query still answers 200, with no entries and a
/// `warning` message.
#[get("/1/logs?<q>")]
pub async fn search_logs(db: DbConn, config: &State<PlantConfig>, q: Option<String>) -> ApiResult<LogSearch> {
    let policy = config.search_policy;
    let term = q.unwrap_or_default();
    db.run(move |conn| search(conn, &term, policy))
        .await
        .map(Json)
        .map_err(|e| store_error("searching logs", e))
}

/// Recent logs endpoint.
///
/// - **URL:** `/api/1/logs/recent?limit=<n>`
/// - **Method:** `GET`
/// - **Purpose:** Newest entries first; `limit` defaults to 100
#[get("/1/logs/recent?<limit>")]
pub async fn recent_logs(db: DbConn, limit: Option<i64>) -> ApiResult<Vec<LogEntry>> {
    let limit = limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    db.run(move |conn| recent(conn, limit))
        .await
        .map(Json)
        .map_err(|e| store_error("loading recent logs", e))
}

pub fn routes() -> Vec<Route> {
    routes![search_logs, recent_logs]
}
