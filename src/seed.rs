//! Provisioning of user accounts. The request path never creates users; this does.

use std::path::Path;

use anyhow::Context;
use sqlx::SqlitePool;
use tracing::info;

use crate::auth::{NewUser, User};
use crate::config::AuthConfig;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub created: Vec<String>,
    pub existing: Vec<String>,
}

/// Read a JSON array of `{email, display_name, is_active?}`.
pub fn load_roster(path: &Path) -> anyhow::Result<Vec<NewUser>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read roster {}", path.display()))?;
    parse_roster(&raw).with_context(|| format!("parse roster {}", path.display()))
}

pub fn parse_roster(raw: &str) -> anyhow::Result<Vec<NewUser>> {
    let roster: Vec<NewUser> = serde_json::from_str(raw)?;
    if let Some(bad) = roster.iter().find(|u| u.email.trim().is_empty()) {
        anyhow::bail!("roster entry {:?} has an empty email", bad.display_name);
    }
    Ok(roster)
}

/// The account the development fallback resolves to.
pub fn dev_account(auth: &AuthConfig) -> NewUser {
    NewUser {
        email: auth.dev_email.clone(),
        display_name: "Kronk (Dev)".into(),
        is_active: true,
    }
}

/// Insert every roster entry whose email is not yet taken. Existing rows are left alone.
pub async fn seed_users(db: &SqlitePool, roster: &[NewUser]) -> anyhow::Result<SeedReport> {
    let mut report = SeedReport::default();
    for entry in roster {
        match User::create_if_absent(db, entry).await? {
            Some(user) => {
                info!(user_id = user.id, email = %user.email, "created user");
                report.created.push(user.email);
            }
            None => {
                info!(email = %entry.email, "user exists");
                report.existing.push(entry.email.clone());
            }
        }
    }
    Ok(report)
}
