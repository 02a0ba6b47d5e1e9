use std::collections::BTreeMap;

use sqlx::SqlitePool;
use time::Date;
use tracing::debug;

use super::dto::{DailyAvailability, ToggleResponse};
use super::repo;
use super::repo_types::ActiveAvailabilityRow;

pub async fn toggle(
    db: &SqlitePool,
    user_id: i64,
    date: Date,
    available: bool,
) -> sqlx::Result<ToggleResponse> {
    let outcome = repo::set_available(db, user_id, date, available).await?;
    if outcome.changed() {
        debug!(user_id, %date, available, ?outcome, "availability toggled");
    } else {
        debug!(user_id, %date, available, ?outcome, "availability already in requested state");
    }
    Ok(ToggleResponse {
        status: "success",
        date,
        available,
    })
}

pub async fn aggregate(db: &SqlitePool) -> sqlx::Result<Vec<DailyAvailability>> {
    let (total_active_users, rows) = repo::active_snapshot(db).await?;
    Ok(group_by_date(total_active_users, rows))
}

/// Group active-user rows per day. Output is ordered by date; names within a day
/// are ordered by user id. Every row carries the same denominator.
pub fn group_by_date(
    total_active_users: i64,
    rows: impl IntoIterator<Item = ActiveAvailabilityRow>,
) -> Vec<DailyAvailability> {
    let mut by_date: BTreeMap<Date, Vec<(i64, String)>> = BTreeMap::new();
    for row in rows {
        by_date
            .entry(row.date)
            .or_default()
            .push((row.user_id, row.display_name));
    }

    by_date
        .into_iter()
        .map(|(date, mut users)| {
            users.sort_by_key(|(id, _)| *id);
            DailyAvailability {
                date,
                count: users.len() as i64,
                total_active_users,
                available_user_names: users.into_iter().map(|(_, name)| name).collect(),
            }
        })
        .collect()
}
