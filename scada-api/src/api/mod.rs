//! Thin JSON dispatch over the store functions in [`crate::orm`].
//!
//! Handlers only translate between HTTP and primitive values; every state
//! rule lives in the `orm` layer.

use rocket::{Route, http::Status, response::status::Custom, serde::json::Json};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub mod dashboard;
pub mod device;
pub mod log;
pub mod status;
pub mod technician;

/// Error body returned when the store cannot complete a request.
#[derive(Serialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body returned by the mutating endpoints. `rows_affected` is `0` when the
/// id did not match a row.
#[derive(Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MutationResponse {
    pub rows_affected: usize,
}

pub(crate) type ApiResult<T> = Result<Json<T>, Custom<Json<ErrorResponse>>>;

/// Logs a store failure and turns it into a 500 for the current request only.
pub(crate) fn store_error(context: &str, e: diesel::result::Error) -> Custom<Json<ErrorResponse>> {
    error!("Database error while {}: {:?}", context, e);
    Custom(
        Status::InternalServerError,
        Json(ErrorResponse { error: format!("Database error while {}", context) }),
    )
}

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(status::routes());
    routes.extend(dashboard::routes());
    routes.extend(device::routes());
    routes.extend(technician::routes());
    routes.extend(log::routes());
    routes
}
