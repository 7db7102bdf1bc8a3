//! Ace Case API server entry point.
//!
//! Loads `acecase-config.yaml` (path from `ACECASE_CONFIG`), reads the
//! signing key pair from the environment, opens the configured subscriber
//! store, and serves the HTTP API until `Ctrl-C`.

use std::path::PathBuf;
use std::sync::Arc;

use acecase_core::config::{
    AppConfig, ConfigSource, LiveKitCredentials, StorageBackend, StorageSettings,
};
use acecase_core::credential::CredentialIssuer;
use acecase_db::{DbError, FileSubscriberStore, PostgresConfig, PostgresPool, SubscriberStore};
use acecase_server::{AppState, start_server};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Default config location when `ACECASE_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "acecase-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, storage setup, or the server fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::var("ACECASE_CONFIG")
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let (config, source) = AppConfig::load(&config_path)?;

    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    if source == ConfigSource::Defaults {
        info!(path = %config_path.display(), "config file not found, using defaults");
    }

    info!(
        config = %config_path.display(),
        livekit_url = config.livekit.url,
        room = config.livekit.room,
        backend = ?config.storage.backend,
        "acecase-server starting"
    );

    let credentials = LiveKitCredentials::from_env()?;
    let issuer = CredentialIssuer::new(&config.livekit, credentials);

    let subscribers = open_store(&config.storage).await?;
    info!(backend = subscribers.backend_name(), "subscriber store ready");

    let state = Arc::new(AppState::new(&config, issuer, subscribers)?);
    start_server(&config.server, state).await?;

    Ok(())
}

async fn open_store(settings: &StorageSettings) -> Result<SubscriberStore, DbError> {
    match settings.backend {
        StorageBackend::Postgres => {
            let pg_config = PostgresConfig::new(&settings.database_url)
                .with_max_connections(settings.max_connections);
            Ok(PostgresPool::open(&pg_config).await?.into())
        }
        StorageBackend::File => Ok(FileSubscriberStore::new(&settings.file_path).into()),
    }
}
