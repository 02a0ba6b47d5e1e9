use sqlx::FromRow;
use time::Date;

/// A record joined to its (active) owner, as read for aggregation.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ActiveAvailabilityRow {
    pub date: Date,
    pub user_id: i64,
    pub display_name: String,
}

/// What a toggle actually did to the store. Every variant is a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Created,
    AlreadyPresent,
    Removed,
    AlreadyAbsent,
}

impl ToggleOutcome {
    pub fn changed(self) -> bool {
        matches!(self, ToggleOutcome::Created | ToggleOutcome::Removed)
    }
}
