pub mod telemetry;

use crate::error::{ConfigError, InitializationError};
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

pub use telemetry::{Telemetry, init_tracing};

pub const ENV_VAR_PREFIX: &str = "CRISIS_CLOUD__";
pub const SETTINGS_FILE: &str = "Settings.toml";
/// Un-prefixed variable older deployments use to identify themselves to the NWS.
pub const LEGACY_USER_AGENT_VAR: &str = "NWS_USER_AGENT";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub postgres: Option<PostgresConfig>,
    pub nws: NwsConfig,
    pub weather_api: WeatherApiConfig,
    pub locations_api: LocationsApiConfig,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PostgresConfig {
    pub connection_string: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default)]
    pub migrate: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct NwsConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl Default for NwsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.weather.gov".to_string(),
            user_agent: "CrisisCloud/1.0 (demo@example.com)".to_string(),
            timeout_seconds: 20,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct WeatherApiConfig {
    pub listen_addr: String,
    pub template_path: String,
}

impl Default for WeatherApiConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            template_path: "templates/crisisCloud.html".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LocationsApiConfig {
    pub listen_addr: String,
}

impl Default for LocationsApiConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct TelemetryConfig {
    pub format: LogFormat,
    /// Export spans, logs and metrics over OTLP in addition to the console.
    pub otlp: bool,
}

fn default_max_connections() -> u32 {
    5
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config = Figment::new()
        .merge(Toml::file(SETTINGS_FILE))
        .merge(Env::prefixed(ENV_VAR_PREFIX).split("__"))
        .merge(
            Env::raw()
                .only(&[LEGACY_USER_AGENT_VAR])
                .map(|_| "nws.user_agent".into()),
        )
        .extract::<Config>()?;
    config.validate()?;
    Ok(config)
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = &self.nws.base_url;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "nws.base_url must be an http(s) URL, got {base_url:?}"
            )));
        }
        if self.nws.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "nws.user_agent must not be empty".to_string(),
            ));
        }
        if !(1..=300).contains(&self.nws.timeout_seconds) {
            return Err(ConfigError::Invalid(format!(
                "nws.timeout_seconds must be between 1 and 300, got {}",
                self.nws.timeout_seconds
            )));
        }
        Ok(())
    }
}

pub mod error {
    use thiserror::Error;
    use tracing_subscriber::util::TryInitError;

    #[derive(Debug, Error)]
    pub enum ConfigError {
        #[error("failed to load configuration: {0}")]
        Figment(#[from] figment::Error),
        #[error("invalid configuration: {0}")]
        Invalid(String),
        #[error("missing configuration section [{0}]")]
        MissingSection(&'static str),
    }

    #[derive(Debug, Error)]
    pub enum InitializationError {
        #[error(transparent)]
        Tracing(#[from] TryInitError),
        #[error(transparent)]
        Otlp(#[from] opentelemetry_otlp::ExporterBuildError),
        #[error(transparent)]
        Config(#[from] ConfigError),
        #[error(transparent)]
        Migration(#[from] sqlx::migrate::MigrateError),
        #[error(transparent)]
        Db(#[from] sqlx::Error),
    }
}

/// Creates the Postgres pool and verifies connectivity. An unreachable database is a startup error.
#[instrument(skip(pg_config))]
pub async fn initialize_db(pg_config: &PostgresConfig) -> Result<Pool<Postgres>, InitializationError> {
    let pool = PgPoolOptions::new()
        .max_connections(pg_config.max_connections)
        .connect(&pg_config.connection_string)
        .await?;

    info!(name: "db.connected", "db pool created and connected");

    if pg_config.migrate {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!(name: "db.migrated", "db migrations applied");
    }

    Ok(pool)
}

pub async fn shutdown_listener(token: Option<CancellationToken>) {
    let ctrl_c = signal::ctrl_c();
    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(name: "signal.sigterm.install", error = ?e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!(name: "signal.ctrlc.received", "received Ctrl+C signal, shutting down"),
        () = terminate => info!(name: "signal.sigterm.received", "received SIGTERM signal, shutting down"),
    }

    if let Some(token) = token {
        token.cancel();
    }
}
