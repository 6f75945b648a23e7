use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Counts shown on the plant dashboard, recomputed on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StatusSummary {
    #[ts(type = "number")]
    pub assets_online: i64,
    #[ts(type = "number")]
    pub assets_offline: i64,
    #[ts(type = "number")]
    pub open_tickets: i64,
}
