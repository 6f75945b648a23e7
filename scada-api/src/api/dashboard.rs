use rocket::{Route, serde::json::Json};

use super::{ApiResult, store_error};
use crate::{
    models::StatusSummary,
    orm::{DbConn, dashboard::summary},
};

/// Dashboard summary endpoint.
///
/// - **URL:** `/api/1/dashboard`
/// - **Method:** `GET`
/// - **Purpose:** Online/offline device counts and open ticket count,
///   recomputed on every call
///
/// # Response
///
/// **Success (HTTP 200 OK):**
/// ```json
/// { "assets_online": 5, "assets_offline": 1, "open_tickets": 0 }
/// ```
#[get("/1/dashboard")]
pub async fn dashboard(db: DbConn) -> ApiResult<StatusSummary> {
    db.run(summary).await.map(Json).map_err(|e| store_error("computing summary", e))
}

pub fn routes() -> Vec<Route> {
    routes![dashboard]
}
