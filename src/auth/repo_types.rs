use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User record in the database. Rows are provisioned by the seed binary only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,              // unique user ID
    pub email: String,        // exact-match identity key
    pub display_name: String, // shown in aggregate views
    pub is_active: bool,      // inactive users are hidden from aggregation
}

/// Input row for provisioning.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub display_name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}
