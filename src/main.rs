//! Binary entry point that glues the SQLite-backed record store to the HTTP
//! router. The bootstrapping pipeline is deliberately linear: load the
//! environment, install logging, build the immutable configuration, bring up
//! the database, and serve until interrupted.

use anyhow::{Context, Result};
use song_library_api::{create_router, ensure_schema, Config, EnrichmentClient};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing `.env` is not an error; the process environment is then
    // used as-is.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        database = %config.database_path.display(),
        enrichment = config.external_api_url.as_deref().unwrap_or("disabled"),
        port = config.port,
        "configuration loaded"
    );

    let conn = ensure_schema(&config.database_path)?;

    let enrichment = config.external_api_url.clone().map(EnrichmentClient::new);
    if enrichment.is_none() {
        tracing::warn!("EXTERNAL_API_URL not set, song enrichment disabled");
    }

    let app = create_router(conn, enrichment);
    let addr = format!("0.0.0.0:{}", config.port);

    tracing::info!("listening on http://{addr}");
    tracing::info!("  GET    /library           - filtered, paginated listing");
    tracing::info!("  POST   /library           - create, with optional enrichment");
    tracing::info!("  GET    /library/:id       - fetch one song");
    tracing::info!("  PUT    /library/:id       - partial update");
    tracing::info!("  DELETE /library/:id       - delete");
    tracing::info!("  GET    /library/:id/text  - verse-paginated lyrics");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("failed to bind listener")?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
