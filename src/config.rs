use std::net::SocketAddr;
use std::str::FromStr;

use anyhow::Context;
use axum::http::HeaderName;
use serde::Deserialize;

/// Fallback account used when no trusted identity header is present in development.
pub const DEFAULT_DEV_EMAIL: &str = "kronk@dev.local";

/// Header set by the upstream access proxy once it has authenticated the caller.
pub const DEFAULT_TRUSTED_HEADER: &str = "cf-access-authenticated-user-email";

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "kuzco=debug,axum=info,tower_http=info";

/// Deployment mode, read once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    Production,
    Development,
}

impl RuntimeMode {
    pub fn is_development(self) -> bool {
        self == RuntimeMode::Development
    }
}

impl FromStr for RuntimeMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(RuntimeMode::Development),
            "prod" | "production" => Ok(RuntimeMode::Production),
            other => anyhow::bail!("unknown ENVIRONMENT value: {other:?}"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub mode: RuntimeMode,
    pub dev_email: String,
    pub trusted_header: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://kuzco.db".into());
        let listen_addr = format!(
            "{}:{}",
            std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            std::env::var("APP_PORT").unwrap_or_else(|_| "8080".into())
        )
        .parse()
        .context("parse APP_HOST/APP_PORT")?;
        let auth = AuthConfig {
            mode: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "dev".into())
                .parse()?,
            dev_email: std::env::var("DEV_USER_EMAIL")
                .unwrap_or_else(|_| DEFAULT_DEV_EMAIL.into()),
            trusted_header: match std::env::var("TRUSTED_EMAIL_HEADER") {
                Ok(v) => parse_header_name(&v)?,
                Err(_) => DEFAULT_TRUSTED_HEADER.into(),
            },
        };
        Ok(Self {
            database_url,
            listen_addr,
            auth,
        })
    }

    /// Config for tests and local tooling: in-memory store, given mode, default header names.
    pub fn for_mode(mode: RuntimeMode) -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            auth: AuthConfig {
                mode,
                dev_email: DEFAULT_DEV_EMAIL.into(),
                trusted_header: DEFAULT_TRUSTED_HEADER.into(),
            },
        }
    }
}

/// A header name that `HeaderMap` lookups can actually match, lowercased.
pub fn parse_header_name(raw: &str) -> anyhow::Result<String> {
    let name = HeaderName::from_str(raw.trim())
        .with_context(|| format!("invalid TRUSTED_EMAIL_HEADER {raw:?}"))?;
    Ok(name.as_str().to_string())
}

/// Log output settings. Read before `AppConfig` so config errors are logged.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub filter: String,
    pub json: bool,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self {
            filter: std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
            json: std::env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_modes() {
        assert_eq!("dev".parse::<RuntimeMode>().unwrap(), RuntimeMode::Development);
        assert_eq!(
            " Development ".parse::<RuntimeMode>().unwrap(),
            RuntimeMode::Development
        );
        assert_eq!("prod".parse::<RuntimeMode>().unwrap(), RuntimeMode::Production);
        assert_eq!(
            "PRODUCTION".parse::<RuntimeMode>().unwrap(),
            RuntimeMode::Production
        );
    }

    #[test]
    fn rejects_unknown_mode() {
        let err = "staging".parse::<RuntimeMode>().unwrap_err();
        assert!(err.to_string().contains("staging"));
    }

    #[test]
    fn for_mode_uses_defaults() {
        let cfg = AppConfig::for_mode(RuntimeMode::Production);
        assert_eq!(cfg.auth.dev_email, DEFAULT_DEV_EMAIL);
        assert_eq!(cfg.auth.trusted_header, DEFAULT_TRUSTED_HEADER);
        assert!(!cfg.auth.mode.is_development());
    }

    #[test]
    fn header_name_is_normalized() {
        assert_eq!(
            parse_header_name(" X-Auth-Email ").unwrap(),
            "x-auth-email"
        );
        assert_eq!(
            parse_header_name(DEFAULT_TRUSTED_HEADER).unwrap(),
            DEFAULT_TRUSTED_HEADER
        );
    }

    #[test]
    fn invalid_header_name_is_rejected() {
        let err = parse_header_name("user email").unwrap_err();
        assert!(err.to_string().contains("TRUSTED_EMAIL_HEADER"));
        assert!(parse_header_name("").is_err());
    }
}
