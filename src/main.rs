mod model;
mod server;

use axum::http::{header, Method};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
};
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config, error::AppError, router, scheduler::event_jobs, startup, state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db).await?;
    let mailer = startup::build_mailer(&config)?;

    startup::check_for_admin(&db, &config).await?;

    let state = AppState::new(db, mailer, &config);

    let mut scheduler = event_jobs::start_scheduler(state.clone()).await?;

    let app = router::router()
        .with_state(state)
        .layer(session)
        .layer(build_cors_layer(config.cors_allowed_origins.as_deref()));

    let app = match &config.frontend_dir {
        Some(frontend_dir) if std::path::Path::new(frontend_dir).exists() => {
            tracing::info!("Serving frontend from {}", frontend_dir);
            let index_path = format!("{}/index.html", frontend_dir);
            app.fallback_service(
                ServeDir::new(frontend_dir).not_found_service(ServeFile::new(index_path)),
            )
        }
        Some(frontend_dir) => {
            tracing::warn!(
                "Frontend directory not found at {}, serving API only",
                frontend_dir
            );
            app
        }
        None => app,
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to bind {}: {}", config.bind_addr, e)))?;

    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::InternalError(format!("Server error: {}", e)))?;

    scheduler.shutdown().await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }

    tracing::info!("Shutdown signal received");
}

/// Build CORS layer based on environment configuration.
///
/// If CORS_ALLOWED_ORIGINS is set, only those origins are allowed and credentials
/// (the session cookie) are sent along. If not set, defaults to permissive CORS.
fn build_cors_layer(allowed_origins: Option<&str>) -> CorsLayer {
    let Some(origins) = allowed_origins else {
        tracing::warn!(
            "CORS_ALLOWED_ORIGINS not set, using permissive CORS (not recommended for production)"
        );
        return CorsLayer::permissive();
    };

    let origins: Vec<_> = origins
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    if origins.is_empty() {
        tracing::warn!(
            "CORS_ALLOWED_ORIGINS is set but empty, using permissive CORS (not recommended for production)"
        );
        return CorsLayer::permissive();
    }

    tracing::info!("CORS configured for origins: {:?}", origins);
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
