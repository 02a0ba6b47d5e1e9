//! Kuzco: a shared calendar of the days each provisioned user is available.
//!
//! Callers are identified by an email asserted by an upstream access proxy.
//! Availability is stored sparsely (a row per available day) and summarized
//! per day across active users.

pub mod app;
pub mod auth;
pub mod availability;
pub mod config;
pub mod db;
pub mod error;
pub mod seed;
pub mod state;

pub use state::AppState;

/// Install the global subscriber from `log`.
pub fn init_tracing(log: &config::LogConfig) {
    let builder = tracing_subscriber::fmt().with_env_filter(log.filter.as_str());
    if log.json {
        builder.with_target(false).json().init();
    } else {
        builder.init();
    }
}
