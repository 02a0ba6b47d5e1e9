use axum::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, error, warn};

use crate::auth::repo_types::User;
use crate::config::{AuthConfig, RuntimeMode};
use crate::error::AppError;

/// Read-only view of provisioned accounts, as needed by identity resolution.
#[async_trait]
pub trait UserLookup: Send + Sync {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
}

#[async_trait]
impl UserLookup for SqlitePool {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        User::find_by_email(self, email).await
    }
}

/// Maps the upstream-asserted identity (or its absence) to a provisioned user.
///
/// Closed world: a principal is only ever an existing row. Resolution order is
/// the trusted header first, then the development fallback, then rejection.
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    mode: RuntimeMode,
    dev_email: String,
}

impl IdentityResolver {
    pub fn new(mode: RuntimeMode, dev_email: impl Into<String>) -> Self {
        Self {
            mode,
            dev_email: dev_email.into(),
        }
    }

    pub fn from_config(cfg: &AuthConfig) -> Self {
        Self::new(cfg.mode, cfg.dev_email.clone())
    }

    pub fn mode(&self) -> RuntimeMode {
        self.mode
    }

    pub async fn resolve<L>(&self, users: &L, trusted_email: Option<&str>) -> Result<User, AppError>
    where
        L: UserLookup + ?Sized,
    {
        // An empty header carries no identity.
        let trusted_email = trusted_email.filter(|e| !e.trim().is_empty());

        if let Some(email) = trusted_email {
            return match users.find_by_email(email).await? {
                Some(user) => {
                    debug!(user_id = user.id, "principal resolved from trusted header");
                    Ok(user)
                }
                None => {
                    warn!(%email, "authenticated email is not provisioned");
                    Err(AppError::Forbidden(email.to_string()))
                }
            };
        }

        if self.mode.is_development() {
            return match users.find_by_email(&self.dev_email).await? {
                Some(user) => {
                    debug!(user_id = user.id, "principal resolved from development account");
                    Ok(user)
                }
                None => {
                    error!(email = %self.dev_email, "development account missing");
                    Err(AppError::MisconfiguredEnvironment(self.dev_email.clone()))
                }
            };
        }

        warn!("request without trusted identity header");
        Err(AppError::Unauthenticated)
    }
}
