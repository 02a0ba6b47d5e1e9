use crate::auth::IdentityResolver;
use crate::config::AppConfig;
use crate::db;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub resolver: Arc<IdentityResolver>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let db = db::connect(&config.database_url).await?;
        Ok(Self::from_parts(db, config))
    }

    pub fn from_parts(db: SqlitePool, config: AppConfig) -> Self {
        let resolver = Arc::new(IdentityResolver::from_config(&config.auth));
        Self {
            db,
            config: Arc::new(config),
            resolver,
        }
    }

    /// State over a fresh, migrated in-memory store.
    pub async fn in_memory(config: AppConfig) -> anyhow::Result<Self> {
        let db = db::connect_in_memory().await?;
        Ok(Self::from_parts(db, config))
    }
}
