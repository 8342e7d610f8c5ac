use thiserror::Error;

/// Errors surfaced by the identity provider.
///
/// `Unauthorized` deliberately carries no detail: an unknown client and a
/// wrong secret must be indistinguishable to the caller.
#[derive(Error, Debug)]
pub enum IdpError {
    #[error("Invalid body")]
    InvalidBody,

    #[error("Unsupported grant type")]
    UnsupportedGrantType,

    #[error("Client is not authorized")]
    Unauthorized,

    #[error("Credential store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("JWT encoding error: {0}")]
    TokenEncoding(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl IdpError {
    /// Build a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the failure was caused by the caller rather than by the service.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidBody | Self::UnsupportedGrantType | Self::Unauthorized
        )
    }
}

/// Failures reported by a credential store backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("client not found: {client_id}")]
    NotFound { client_id: String },

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("stored credential is corrupt: {0}")]
    Serialization(String),
}

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        Self::Unavailable(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for IdpError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::TokenEncoding(err.to_string())
    }
}

/// Why a presented token could not be decoded.
///
/// Never reaches a caller of introspection; it only decides `active: false`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("token is not a three-part compact JWS")]
    Malformed,

    #[error("token signature invalid: {0}")]
    InvalidSignature(String),

    #[error("token claims invalid: {0}")]
    InvalidClaims(String),
}

impl From<jsonwebtoken::errors::Error> for CodecError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Utf8(_) => Self::Malformed,
            ErrorKind::Json(_) | ErrorKind::MissingRequiredClaim(_) => {
                Self::InvalidClaims(err.to_string())
            }
            _ => Self::InvalidSignature(err.to_string()),
        }
    }
}
