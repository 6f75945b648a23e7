//! Service status for operators and load balancers.

use rocket::{Route, State, serde::json::Json};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{PlantConfig, orm::log_query::SearchPolicy};

mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

#[derive(Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ServiceStatus {
    pub status: String,
    pub version: String,
    pub built_at: String,
    pub search_policy: SearchPolicy,
}

/// `GET /api/1/status`: answers `"running"` while the server is up, along
/// with the build and the log search policy in effect.
#[get("/1/status")]
pub fn service_status(config: &State<PlantConfig>) -> Json<ServiceStatus> {
    Json(ServiceStatus {
        status: "running".to_string(),
        version: built_info::PKG_VERSION.to_string(),
        built_at: built_info::BUILT_TIME_UTC.to_string(),
        search_policy: config.search_policy,
    })
}

pub fn routes() -> Vec<Route> {
    routes![service_status]
}
