use shared::error::{ConfigError, InitializationError};
use shared::{init_tracing, initialize_db, load_config, shutdown_listener};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Debug, Error)]
enum MainError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Init(#[from] InitializationError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), MainError> {
    let config = load_config()?;
    let telemetry = init_tracing("locations_api", &config.telemetry)?;

    let Some(pg_config) = config.postgres.as_ref() else {
        error!(name: "config.postgres.missing", "no [postgres] configuration, refusing to start");
        telemetry.shutdown();
        return Err(ConfigError::MissingSection("postgres").into());
    };
    let pool = match initialize_db(pg_config).await {
        Ok(pool) => pool,
        Err(e) => {
            error!(name: "db.connect.failed", error = ?e, "could not connect to database");
            telemetry.shutdown();
            return Err(e.into());
        }
    };

    let app = locations_api::app(pool);

    let listen_addr = &config.locations_api.listen_addr;
    info!(name: "server.starting", "starting server at {listen_addr}");
    let listener = TcpListener::bind(listen_addr).await?;
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_listener(None))
        .await;

    telemetry.shutdown();
    Ok(served?)
}
