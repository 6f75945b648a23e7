use rocket::{Route, serde::json::Json};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{ApiResult, MutationResponse, store_error};
use crate::{
    models::Technician,
    orm::{
        DbConn,
        technician::{assign, list_technicians},
    },
};

/// Request payload for an assignment. `null` clears it; any other id is
/// stored without checking that the device exists.
#[derive(Deserialize, Serialize, TS)]
#[ts(export)]
pub struct AssignmentRequest {
    pub device_id: Option<i32>,
}

/// List Technicians endpoint.
///
/// - **URL:** `/api/1/technicians`
/// - **Method:** `GET`
#[get("/1/technicians")]
pub async fn list_technicians_endpoint(db: DbConn) -> ApiResult<Vec<Technician>> {
    db.run(list_technicians).await.map(Json).map_err(|e| store_error("listing technicians", e))
}

/// Assignment endpoint.
///
/// - **URL:** `/api/1/technicians/<tech_id>/assignment`
/// - **Method:** `POST`
/// - **Purpose:** Updates the technician's device and logs
///   `technician_access`
///
/// # Request Format
///
/// ```json
/// { "device_id": 3 }
/// ```
#[post("/1/technicians/<tech_id>/assignment", data = "<request>")]
pub async fn assignment_endpoint(
    db: DbConn,
    tech_id: i32,
    request: Json<AssignmentRequest>,
) -> ApiResult<MutationResponse> {
    let device_id = request.device_id;
    db.run(move |conn| assign(conn, tech_id, device_id))
        .await
        .map(|rows_affected| Json(MutationResponse { rows_affected }))
        .map_err(|e| store_error("updating assignment", e))
}

pub fn routes() -> Vec<Route> {
    routes![list_technicians_endpoint, assignment_endpoint]
}
