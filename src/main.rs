use kuzco::{
    app,
    config::{AppConfig, LogConfig},
    db, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    kuzco::init_tracing(&LogConfig::from_env());

    let config = AppConfig::from_env()?;
    let addr = config.listen_addr;
    let app_state = AppState::init(config).await?;
    db::migrate(&app_state.db).await?;

    let mode = app_state.resolver.mode();
    if mode.is_development() {
        tracing::warn!(
            dev_email = %app_state.config.auth.dev_email,
            "running in development mode; requests without an identity header use the development account"
        );
    } else {
        tracing::info!(?mode, "identity header required");
    }

    app::serve(app::build_app(app_state), addr).await
}
