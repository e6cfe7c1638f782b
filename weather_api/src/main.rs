use shared::error::{ConfigError, InitializationError};
use shared::{init_tracing, load_config, shutdown_listener};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info};
use weather_api::nws::NwsClient;
use weather_api::state::AppState;

#[derive(Debug, Error)]
enum MainError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Init(#[from] InitializationError),
    #[error("failed to build NWS client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), MainError> {
    let config = load_config()?;
    let telemetry = init_tracing("weather_api", &config.telemetry)?;
    info!(name: "config.loaded", nws = ?config.nws, server = ?config.weather_api, "config loaded");

    let nws = match NwsClient::new(&config.nws) {
        Ok(nws) => nws,
        Err(e) => {
            error!(name: "nws.client.build.failed", error = ?e, "could not build NWS client");
            telemetry.shutdown();
            return Err(e.into());
        }
    };
    let app = weather_api::app(AppState { nws }, &config.weather_api.template_path);

    let listen_addr = &config.weather_api.listen_addr;
    info!(name: "server.starting", "starting server at {listen_addr}");
    let listener = TcpListener::bind(listen_addr).await?;
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_listener(None))
        .await;

    telemetry.shutdown();
    Ok(served?)
}
