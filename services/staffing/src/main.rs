//! Staffing service entry point.

use std::future::IntoFuture;
use std::sync::Arc;

use anyhow::Result;
use rust_common::{
    init_tracing, run_with_graceful_shutdown, wait_for_signal, ShutdownController, TracingConfig,
};
use staffing_service::{create_app, AppState, Config, TokenSettings, SERVICE_NAME};
use token_codec::FileKeyProvider;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    init_tracing(
        &TracingConfig::default()
            .with_service_name(SERVICE_NAME)
            .with_log_level(&config.log_level)
            .with_json_output(config.log_json),
    );

    info!(
        algorithm = %config.algorithm,
        signature_encoding = %config.signature_encoding,
        "Starting {}", SERVICE_NAME
    );

    let keys = FileKeyProvider::load(&config.private_key_path, &config.public_key_path)?;
    let state = AppState::in_memory(TokenSettings::from_config(&config, Arc::new(keys)));

    if let Some(user) = &config.bootstrap_user {
        state.seed_user(user).await?;
    }

    let app = create_app(state, config.request_timeout());
    let listener = TcpListener::bind(config.bind_address()).await?;
    info!(address = %listener.local_addr()?, "Listening");

    let controller = Arc::new(ShutdownController::new());
    tokio::spawn({
        let controller = Arc::clone(&controller);
        async move {
            wait_for_signal().await;
            controller.trigger();
        }
    });

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(controller.subscribe().recv())
        .into_future();

    run_with_graceful_shutdown(server, &controller, config.shutdown_timeout()).await?;

    info!("Service shutdown complete");
    Ok(())
}
