use crate::error::StoreError;
use crate::store::{Credential, CredentialStore};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Process-local credential store.
///
/// Backs local runs and tests; contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    clients: RwLock<HashMap<String, Credential>>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-register a client.
    #[must_use]
    pub fn with_client(mut self, client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        let credential = Credential::new(client_id, client_secret);
        self.clients
            .get_mut()
            .insert(credential.client_id.clone(), credential);
        self
    }

    pub async fn len(&self) -> usize {
        self.clients.read().await.len()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self, client_id: &str) -> Result<Credential, StoreError> {
        self.clients
            .read()
            .await
            .get(client_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                client_id: client_id.to_string(),
            })
    }

    async fn save(&self, client_id: &str, client_secret: &str) -> Result<Credential, StoreError> {
        let credential = Credential::new(client_id, client_secret);
        self.clients
            .write()
            .await
            .insert(client_id.to_string(), credential.clone());

        debug!(client_id = %client_id, "Saved client credential");
        Ok(credential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_unknown_client() {
        let store = MemoryCredentialStore::new();

        let err = store.get("123").await.unwrap_err();
        assert_eq!(
            err,
            StoreError::NotFound {
                client_id: "123".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_save_then_get() {
        let store = MemoryCredentialStore::new();

        let saved = store.save("123456789", "client_secret").await.unwrap();
        let fetched = store.get("123456789").await.unwrap();

        assert_eq!(saved, fetched);
        assert_eq!(fetched.client_secret, "client_secret");
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let store = MemoryCredentialStore::new().with_client("a", "old");

        store.save("a", "new").await.unwrap();

        assert_eq!(store.get("a").await.unwrap().client_secret, "new");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_with_client_seeds() {
        let store = MemoryCredentialStore::new()
            .with_client("1234567890", "client_secret")
            .with_client("other", "secret");

        assert_eq!(store.len().await, 2);
        assert!(store.get("1234567890").await.unwrap().secret_matches("client_secret"));
    }
}
