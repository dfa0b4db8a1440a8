use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use companies_core::{JwtAuth, JwtConfig, JwtSettings};
use companies_db::{Database, DatabaseConfig};
use companies_server::config::ServerConfig;
use companies_server::error::handle_panic;
use companies_server::routes;
use companies_server::state::AppState;
use companies_server::versioning::ApiVersioning;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("companies=info".parse()?))
        .with_target(false)
        .init();

    // Must fail before the listener binds when SECRET, issuer or audience is missing.
    let config = ServerConfig::from_env()?;
    let jwt_config = JwtConfig::from_env(JwtSettings::from_file(&config.settings_path)?)?;
    tracing::info!(
        issuer = %jwt_config.valid_issuer,
        audience = %jwt_config.valid_audience,
        "Bearer token validation configured"
    );

    let db = Database::connect(&DatabaseConfig::from_env()?).await?;
    db.migrate().await?;

    let state = Arc::new(AppState {
        db,
        jwt: JwtAuth::new(&jwt_config),
        versioning: ApiVersioning::default(),
    });

    let app = routes::router(state)
        .layer(config.cors_layer()?)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic));

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {addr}");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install CTRL+C handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
