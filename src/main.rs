use routekeeper::{app, config::AppConfig, state::AppState, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let config = AppConfig::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "invalid configuration; refusing to start");
    })?;
    tracing::info!(
        transport = ?config.transport,
        ttl_minutes = config.jwt.ttl_minutes,
        "configuration loaded"
    );
    let serve_config = config.clone();

    let (app_state, db) = AppState::init(config).await?;

    // Embedded migrations. A failure is logged and the server still starts.
    if let Err(e) = sqlx::migrate!("./migrations").run(&db).await {
        tracing::warn!(error = %e, "migration failed; continuing");
    }

    let app = app::build_app(app_state);
    app::serve(app, &serve_config).await
}
