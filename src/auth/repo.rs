use crate::auth::repo_types::{NewUser, User};
use sqlx::SqlitePool;

impl User {
    /// Find a user by exact (case-sensitive) email.
    pub async fn find_by_email(db: &SqlitePool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, display_name, is_active
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    #[cfg(test)]
    pub async fn find_by_id(db: &SqlitePool, id: i64) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, email, display_name, is_active FROM users WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Insert a user unless the email is already taken. Returns `None` for an existing email.
    pub async fn create_if_absent(db: &SqlitePool, new: &NewUser) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, display_name, is_active)
            VALUES (?, ?, ?)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, email, display_name, is_active
            "#,
        )
        .bind(&new.email)
        .bind(&new.display_name)
        .bind(new.is_active)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Soft-disable or re-enable a user. Availability rows are kept either way.
    pub async fn set_active(db: &SqlitePool, id: i64, is_active: bool) -> anyhow::Result<bool> {
        let res = sqlx::query("UPDATE users SET is_active = ? WHERE id = ?")
            .bind(is_active)
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() == 1)
    }

    /// Delete a user; their availability rows go with them via the cascading foreign key.
    pub async fn delete(db: &SqlitePool, id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_in_memory;

    fn new_user(email: &str, name: &str) -> NewUser {
        NewUser {
            email: email.into(),
            display_name: name.into(),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn create_and_find_by_email() {
        let db = connect_in_memory().await.unwrap();
        let created = User::create_if_absent(&db, &new_user("rob@example.com", "Rob"))
            .await
            .unwrap()
            .expect("first insert creates");
        assert!(created.is_active);

        let found = User::find_by_email(&db, "rob@example.com").await.unwrap();
        assert_eq!(found, Some(created.clone()));
        assert_eq!(User::find_by_id(&db, created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn email_match_is_case_sensitive() {
        let db = connect_in_memory().await.unwrap();
        User::create_if_absent(&db, &new_user("rob@example.com", "Rob"))
            .await
            .unwrap();
        assert!(User::find_by_email(&db, "Rob@Example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_not_created_twice() {
        let db = connect_in_memory().await.unwrap();
        let first = User::create_if_absent(&db, &new_user("rob@example.com", "Rob"))
            .await
            .unwrap();
        let second = User::create_if_absent(&db, &new_user("rob@example.com", "Robert"))
            .await
            .unwrap();
        assert!(first.is_some());
        assert!(second.is_none());

        let user = User::find_by_email(&db, "rob@example.com").await.unwrap().unwrap();
        assert_eq!(user.display_name, "Rob");
    }

    #[tokio::test]
    async fn set_active_and_delete_report_missing_ids() {
        let db = connect_in_memory().await.unwrap();
        assert!(!User::set_active(&db, 42, false).await.unwrap());
        assert!(!User::delete(&db, 42).await.unwrap());

        let u = User::create_if_absent(&db, &new_user("a@example.com", "A"))
            .await
            .unwrap()
            .unwrap();
        assert!(User::set_active(&db, u.id, false).await.unwrap());
        assert!(!User::find_by_id(&db, u.id).await.unwrap().unwrap().is_active);
        assert!(User::delete(&db, u.id).await.unwrap());
        assert!(User::find_by_id(&db, u.id).await.unwrap().is_none());
    }
}
