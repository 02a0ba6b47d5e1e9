use sqlx::{Sqlite, SqlitePool, Transaction};
use time::Date;
use tracing::debug;

use super::repo_types::{ActiveAvailabilityRow, ToggleOutcome};

/// Dates the user is currently available on, ascending.
pub async fn list_dates(db: &SqlitePool, user_id: i64) -> sqlx::Result<Vec<Date>> {
    sqlx::query_scalar::<_, Date>(
        r#"
        SELECT date
        FROM availability
        WHERE user_id = ?
        ORDER BY date ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

/// Mark `(user_id, date)` available or unavailable in one transaction.
///
/// The write is issued first so concurrent identical calls queue on the write
/// lock. A duplicate insert trips the `(user_id, date)` unique constraint and is
/// collapsed into `AlreadyPresent`; the transaction is rolled back on drop.
pub async fn set_available(
    db: &SqlitePool,
    user_id: i64,
    date: Date,
    available: bool,
) -> sqlx::Result<ToggleOutcome> {
    let mut tx = db.begin().await?;

    let outcome = if available {
        let inserted = sqlx::query("INSERT INTO availability (user_id, date) VALUES (?, ?)")
            .bind(user_id)
            .bind(date)
            .execute(&mut *tx)
            .await;
        match inserted {
            Ok(_) => ToggleOutcome::Created,
            Err(e) if is_unique_violation(&e) => {
                debug!(user_id, %date, "availability already present");
                return Ok(ToggleOutcome::AlreadyPresent);
            }
            Err(e) => return Err(e),
        }
    } else {
        let deleted = sqlx::query("DELETE FROM availability WHERE user_id = ? AND date = ?")
            .bind(user_id)
            .bind(date)
            .execute(&mut *tx)
            .await?;
        if deleted.rows_affected() == 0 {
            ToggleOutcome::AlreadyAbsent
        } else {
            ToggleOutcome::Removed
        }
    };

    tx.commit().await?;
    Ok(outcome)
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// The active-user denominator and the active-user join, read from one snapshot.
pub async fn active_snapshot(db: &SqlitePool) -> sqlx::Result<(i64, Vec<ActiveAvailabilityRow>)> {
    let mut tx = db.begin().await?;
    let total = count_active_users(&mut tx).await?;
    let rows = active_rows(&mut tx).await?;
    tx.commit().await?;
    Ok((total, rows))
}

async fn count_active_users(tx: &mut Transaction<'_, Sqlite>) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE is_active = 1")
        .fetch_one(&mut **tx)
        .await
}

async fn active_rows(tx: &mut Transaction<'_, Sqlite>) -> sqlx::Result<Vec<ActiveAvailabilityRow>> {
    sqlx::query_as::<_, ActiveAvailabilityRow>(
        r#"
        SELECT a.date AS date, u.id AS user_id, u.display_name AS display_name
        FROM availability a
        JOIN users u ON u.id = a.user_id
        WHERE u.is_active = 1
        ORDER BY a.date ASC, u.id ASC
        "#,
    )
    .fetch_all(&mut **tx)
    .await
}
