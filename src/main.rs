//! Resonance export HTTP server.

use std::sync::Arc;

use resonance::adapters::auth::{SupabaseJwtConfig, SupabaseJwtValidator};
use resonance::adapters::http::{app_router, middleware::AuthState, ExportAppState};
use resonance::application::ExportUserDataHandler;
use resonance::config::{AppConfig, ValidationError};
use resonance::startup::{init_tracing, user_data_reader, StartupError};

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "invalid configuration");
        return Err(e.into());
    }

    let reader = user_data_reader(&config.store)?;
    let export_handler = Arc::new(ExportUserDataHandler::new(reader));

    let jwt_secret = config
        .auth
        .jwt_secret
        .clone()
        .ok_or(ValidationError::MissingRequired("AUTH__JWT_SECRET"))?;
    let mut jwt_config = SupabaseJwtConfig::new(jwt_secret, config.auth.audience.clone());
    if let Some(issuer) = &config.auth.issuer {
        jwt_config = jwt_config.with_issuer(issuer.clone());
    }
    let validator: AuthState = Arc::new(SupabaseJwtValidator::new(jwt_config));

    let app = app_router(ExportAppState::new(export_handler), validator, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "resonance listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("resonance stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
