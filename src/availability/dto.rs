use serde::{Deserialize, Serialize};
use time::Date;

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub date: Date,
    pub available: bool,
}

/// Echo of the requested state; returned even when the toggle was a no-op.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ToggleResponse {
    pub status: &'static str,
    pub date: Date,
    pub available: bool,
}

/// One day of the aggregate heatmap. Days nobody active is available on are omitted.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DailyAvailability {
    pub date: Date,
    pub count: i64,
    pub total_active_users: i64,
    pub available_user_names: Vec<String>,
}
