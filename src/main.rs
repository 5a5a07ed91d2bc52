use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bank_dashboard::{create_router, templates, AppConfig, AppState, PgStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bank_dashboard=info,tower_http=debug".into()),
        )
        .init();

    dotenvy::dotenv().ok();
    let config = AppConfig::from_env();

    info!(
        host = %config.db.host,
        port = config.db.port,
        database = %config.db.name,
        "connecting to database"
    );
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.db.connect_url())
        .await?;

    let state = AppState {
        store: Arc::new(PgStore::new(pool)),
        templates: Arc::new(templates::build_registry().map_err(|e| anyhow::anyhow!(e))?),
        coverage: config.coverage.clone(),
    };
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    info!("starting server on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
