//! Client-credentials issuance and token introspection.

use crate::clock::{Clock, SystemClock};
use crate::error::{IdpError, StoreError};
use crate::jwt::{JwtSerializer, SigningKey, TokenClaims, TokenCodec};
use crate::store::{Credential, CredentialStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// The only grant this provider understands.
pub const CLIENT_CREDENTIALS_GRANT: &str = "client_credentials";

/// `token_type` of every issued token.
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

/// Access token lifetime in seconds.
pub const ACCESS_TOKEN_TTL_SECONDS: i64 = 3600;

/// Successful issuance response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime in seconds, rendered as a string on the wire.
    pub expires_in: String,
}

/// Introspection verdict. `sub` is only present for active tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Introspection {
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
}

impl Introspection {
    #[must_use]
    pub const fn inactive() -> Self {
        Self {
            active: false,
            sub: None,
        }
    }

    #[must_use]
    pub fn active(sub: impl Into<String>) -> Self {
        Self {
            active: true,
            sub: Some(sub.into()),
        }
    }
}

/// Issues and introspects client-credentials tokens.
///
/// Holds no per-request state; clone freely or share behind an `Arc`.
#[derive(Clone)]
pub struct TokenService {
    store: Arc<dyn CredentialStore>,
    clock: Arc<dyn Clock>,
    codec: Arc<dyn TokenCodec>,
    signing_key: SigningKey,
}

impl TokenService {
    /// Service on the wall clock with the HS256 codec.
    pub fn new(store: Arc<dyn CredentialStore>, signing_key: SigningKey) -> Self {
        TokenService {
            store,
            clock: Arc::new(SystemClock),
            codec: Arc::new(JwtSerializer::hs256()),
            signing_key,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    #[must_use]
    pub fn with_codec(mut self, codec: impl TokenCodec + 'static) -> Self {
        self.codec = Arc::new(codec);
        self
    }

    /// Mint an access token for a client presenting its own credentials.
    ///
    /// # Errors
    ///
    /// - [`IdpError::UnsupportedGrantType`] for any grant other than
    ///   `client_credentials`, before the store is consulted.
    /// - [`IdpError::Unauthorized`] for an unknown client or a wrong secret.
    /// - [`IdpError::StoreUnavailable`] when the store cannot answer.
    pub async fn issue(
        &self,
        client_id: &str,
        client_secret: &str,
        grant_type: &str,
    ) -> Result<IssuedToken, IdpError> {
        if grant_type != CLIENT_CREDENTIALS_GRANT {
            debug!(grant_type = %grant_type, "Rejected unsupported grant type");
            return Err(IdpError::UnsupportedGrantType);
        }

        let credential = self.authenticate(client_id, client_secret).await?;

        let claims = TokenClaims::new(
            credential.client_id,
            self.clock.unix_now(),
            ACCESS_TOKEN_TTL_SECONDS,
        );
        let access_token = self.codec.encode(&claims, &self.signing_key)?;

        info!(client_id = %claims.sub, exp = claims.exp, "Issued access token");

        Ok(IssuedToken {
            access_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: ACCESS_TOKEN_TTL_SECONDS.to_string(),
        })
    }

    /// Report whether `token` is currently active.
    ///
    /// Untrusted input never produces an error: bad signatures, unknown
    /// subjects and expired tokens all come back inactive.
    ///
    /// # Errors
    ///
    /// [`IdpError::StoreUnavailable`] when the subject cannot be looked up.
    /// An outage is not evidence that the token is inactive.
    pub async fn introspect(&self, token: &str) -> Result<Introspection, IdpError> {
        let claims = match self.codec.decode(token, &self.signing_key) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(reason = %e, "Introspected token failed verification");
                return Ok(Introspection::inactive());
            }
        };

        let credential = match self.store.get(&claims.sub).await {
            Ok(credential) => credential,
            Err(StoreError::NotFound { client_id }) => {
                debug!(client_id = %client_id, "Introspected token has unknown subject");
                return Ok(Introspection::inactive());
            }
            Err(e) => {
                error!(error = %e, "Credential store failed during introspection");
                return Err(IdpError::StoreUnavailable(e.to_string()));
            }
        };

        if !claims.is_active_at(self.clock.unix_now()) {
            debug!(client_id = %credential.client_id, exp = claims.exp, "Introspected token expired");
            return Ok(Introspection::inactive());
        }

        Ok(Introspection::active(credential.client_id))
    }

    async fn authenticate(&self, client_id: &str, client_secret: &str) -> Result<Credential, IdpError> {
        let credential = match self.store.get(client_id).await {
            Ok(credential) => credential,
            Err(StoreError::NotFound { .. }) => {
                warn!(client_id = %client_id, "Token requested for unknown client");
                return Err(IdpError::Unauthorized);
            }
            Err(e) => {
                error!(client_id = %client_id, error = %e, "Credential store failed during issuance");
                return Err(IdpError::StoreUnavailable(e.to_string()));
            }
        };

        if !credential.secret_matches(client_secret) {
            warn!(client_id = %client_id, "Token requested with wrong client secret");
            return Err(IdpError::Unauthorized);
        }

        Ok(credential)
    }
}
