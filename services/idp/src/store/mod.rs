//! Client credential storage.
//!
//! The token service only needs a two-method key-value contract; backends
//! decide where credentials actually live.

pub mod memory;
pub mod redis;

pub use self::memory::MemoryCredentialStore;
pub use self::redis::RedisCredentialStore;

use crate::error::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use subtle::ConstantTimeEq;

/// A registered client and its shared secret.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub client_id: String,
    pub client_secret: String,
}

impl Credential {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Exact equality with the stored secret, compared in constant time.
    #[must_use]
    pub fn secret_matches(&self, presented: &str) -> bool {
        self.client_secret
            .as_bytes()
            .ct_eq(presented.as_bytes())
            .into()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// Lookup and registration of client credentials.
///
/// Every call is a single request/response; retry policy belongs to the
/// backend, not to callers.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Fetch the credential for `client_id`.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] for unknown clients, [`StoreError::Unavailable`]
    /// when the backend cannot be reached.
    async fn get(&self, client_id: &str) -> Result<Credential, StoreError>;

    /// Register (or overwrite) a client.
    async fn save(&self, client_id: &str, client_secret: &str) -> Result<Credential, StoreError>;
}
