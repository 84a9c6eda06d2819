use anyhow::Context;
use routekeeper::{seed, store::pg::PgStore, telemetry};
use sqlx::postgres::PgPoolOptions;

/// Loads the development fixtures into `DATABASE_URL`. Exits non-zero on any failure.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let db = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .context("connect to database")?;
    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .context("run migrations")?;

    let store = PgStore::new(db.clone());
    let result = seed::run(&store, &store).await;
    db.close().await;

    let user = result.inspect_err(|e| tracing::error!(error = %e, "seeding failed"))?;
    tracing::info!(user_id = %user.id, routes = seed::SEED_ROUTES.len(), "seed complete");
    Ok(())
}
