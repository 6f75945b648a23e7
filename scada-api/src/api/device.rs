//! API endpoints for plant devices.
//!
//! Devices are created by seeding only; the API lists them and toggles the
//! maintenance and lockout/tagout flags. The online flag has no endpoint.

use rocket::{Route, serde::json::Json};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{ApiResult, MutationResponse, store_error};
use crate::{
    models::Device,
    orm::{
        DbConn,
        device::{list_devices, set_lockout, set_maintenance},
    },
};

/// Request payload for the flag toggles.
#[derive(Deserialize, Serialize, TS)]
#[ts(export)]
pub struct ToggleRequest {
    pub on: bool,
}

/// List Devices endpoint.
///
/// - **URL:** `/api/1/devices`
/// - **Method:** `GET`
/// - **Purpose:** Returns every device ordered by id
#[get("/1/devices")]
pub async fn list_devices_endpoint(db: DbConn) -> ApiResult<Vec<Device>> {
    db.run(list_devices).await.map(Json).map_err(|e| store_error("listing devices", e))
}

/// Maintenance mode endpoint.
///
/// - **URL:** `/api/1/devices/<device_id>/maintenance`
/// - **Method:** `POST`
/// - **Purpose:** Sets or clears maintenance mode and logs
///   `maintenance_start` / `maintenance_end`
///
/// # Request Format
///
/// ```json
/// { "on": true }
/// ```
///
/// # Response
///
/// **Success (HTTP 200 OK):** `{ "rows_affected": 1 }`. An unknown device id
/// returns `0` rather than an error.
#[post("/1/devices/<device_id>/maintenance", data = "<request>")]
pub async fn maintenance_endpoint(
    db: DbConn,
    device_id: i32,
    request: Json<ToggleRequest>,
) -> ApiResult<MutationResponse> {
    let on = request.on;
    db.run(move |conn| set_maintenance(conn, device_id, on))
        .await
        .map(|rows_affected| Json(MutationResponse { rows_affected }))
        .map_err(|e| store_error("updating maintenance mode", e))
}

/// Lockout/Tagout endpoint.
///
/// - **URL:** `/api/1/devices/<device_id>/lockout`
/// - **Method:** `POST`
/// - **Purpose:** Applies or releases isolation and logs `device_isolation`
///
/// Same request and response shape as the maintenance endpoint.
#[post("/1/devices/<device_id>/lockout", data = "<request>")]
pub async fn lockout_endpoint(
    db: DbConn,
    device_id: i32,
    request: Json<ToggleRequest>,
) -> ApiResult<MutationResponse> {
    let on = request.on;
    db.run(move |conn| set_lockout(conn, device_id, on))
        .await
        .map(|rows_affected| Json(MutationResponse { rows_affected }))
        .map_err(|e| store_error("updating lockout/tagout", e))
}

pub fn routes() -> Vec<Route> {
    routes![list_devices_endpoint, maintenance_endpoint, lockout_endpoint]
}
