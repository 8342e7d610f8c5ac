use crate::error::StoreError;
use crate::store::{Credential, CredentialStore};
use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::{debug, warn};

/// Credential store backed by a Redis key-value table.
///
/// Each client is one JSON document under `{prefix}:{client_id}`.
#[derive(Clone)]
pub struct RedisCredentialStore {
    conn: ConnectionManager,
    key_prefix: String,
}

impl RedisCredentialStore {
    pub async fn connect(redis_url: &str, key_prefix: impl Into<String>) -> Result<Self, StoreError> {
        let client = redis::Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;

        Ok(RedisCredentialStore {
            conn,
            key_prefix: key_prefix.into(),
        })
    }

    fn key(&self, client_id: &str) -> String {
        credential_key(&self.key_prefix, client_id)
    }
}

fn credential_key(prefix: &str, client_id: &str) -> String {
    format!("{prefix}:{client_id}")
}

#[async_trait]
impl CredentialStore for RedisCredentialStore {
    async fn get(&self, client_id: &str) -> Result<Credential, StoreError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(self.key(client_id)).await.map_err(|e| {
            warn!(client_id = %client_id, error = %e, "Credential lookup failed");
            StoreError::from(e)
        })?;

        match value {
            Some(v) => Ok(serde_json::from_str(&v)?),
            None => Err(StoreError::NotFound {
                client_id: client_id.to_string(),
            }),
        }
    }

    async fn save(&self, client_id: &str, client_secret: &str) -> Result<Credential, StoreError> {
        let credential = Credential::new(client_id, client_secret);
        let value = serde_json::to_string(&credential)?;

        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(self.key(client_id), value).await?;

        debug!(client_id = %client_id, "Saved client credential");
        Ok(credential)
    }
}
