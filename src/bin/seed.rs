//! Provision users: `seed [roster.json]`. Always ensures the development account in dev mode.

use std::path::PathBuf;

use kuzco::{
    config::{AppConfig, LogConfig},
    db, seed,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    kuzco::init_tracing(&LogConfig::from_env());

    let config = AppConfig::from_env()?;
    let pool = db::connect(&config.database_url).await?;
    db::migrate(&pool).await?;

    let mut roster = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => seed::load_roster(&path)?,
        None => Vec::new(),
    };
    if config.auth.mode.is_development() {
        roster.push(seed::dev_account(&config.auth));
    }
    if roster.is_empty() {
        tracing::warn!("nothing to seed; pass a roster file");
        return Ok(());
    }

    let report = seed::seed_users(&pool, &roster).await?;
    tracing::info!(
        created = report.created.len(),
        existing = report.existing.len(),
        "seeding complete"
    );
    Ok(())
}
