//! Process wiring: store selection, client seeding and shutdown.

use crate::config::{Config, StoreBackend};
use crate::error::IdpError;
use crate::service::TokenService;
use crate::store::{CredentialStore, MemoryCredentialStore, RedisCredentialStore};
use std::sync::Arc;
use tokio::signal;
use tracing::info;

/// Connect the configured credential store and register seed clients.
///
/// # Errors
///
/// Fails when the backend cannot be reached or a seed client cannot be saved.
pub async fn build_store(config: &Config) -> Result<Arc<dyn CredentialStore>, IdpError> {
    let store: Arc<dyn CredentialStore> = match &config.store {
        StoreBackend::Memory => Arc::new(MemoryCredentialStore::new()),
        StoreBackend::Redis { url, key_prefix } => {
            let store = RedisCredentialStore::connect(url, key_prefix.as_str())
                .await
                .map_err(|e| IdpError::StoreUnavailable(e.to_string()))?;
            info!(key_prefix = %key_prefix, "Connected to Redis credential store");
            Arc::new(store)
        }
    };

    for (client_id, client_secret) in &config.seed_clients {
        store
            .save(client_id, client_secret)
            .await
            .map_err(|e| IdpError::StoreUnavailable(e.to_string()))?;
        info!(client_id = %client_id, "Registered seed client");
    }

    Ok(store)
}

/// Build the token service described by `config`.
pub async fn build_service(config: &Config) -> Result<TokenService, IdpError> {
    let store = build_store(config).await?;
    Ok(TokenService::new(store, config.signing_key.clone()))
}

/// Resolves on Ctrl-C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl-C"),
        () = terminate => info!("Received SIGTERM"),
    }
}
