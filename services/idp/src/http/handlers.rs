//! Request handlers for the token and introspection endpoints.
//!
//! Bodies are read as raw bytes and parsed as JSON whatever the
//! `Content-Type`, so every parse failure maps to the same `Invalid body`
//! response.

use crate::error::IdpError;
use crate::http::AppState;
use crate::service::{IssuedToken, Introspection};
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{CACHE_CONTROL, PRAGMA};
use axum::response::IntoResponse;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

/// `POST /token` body.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub client_id: String,
    pub client_secret: String,
    pub grant_type: String,
}

/// `POST /introspect` body.
#[derive(Debug, Deserialize)]
pub struct IntrospectRequest {
    pub token: String,
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, IdpError> {
    serde_json::from_slice(body).map_err(|_| IdpError::InvalidBody)
}

/// `POST /token`: client-credentials grant.
pub async fn token_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, IdpError> {
    let request: TokenRequest = parse_body(&body)?;

    let issued: IssuedToken = state
        .service
        .issue(&request.client_id, &request.client_secret, &request.grant_type)
        .await?;

    Ok(([(CACHE_CONTROL, "no-store"), (PRAGMA, "no-cache")], Json(issued)))
}

/// `POST /introspect`: report whether a token is active.
pub async fn introspect_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Introspection>, IdpError> {
    let request: IntrospectRequest = parse_body(&body)?;

    let result = state.service.introspect(&request.token).await?;
    Ok(Json(result))
}

/// `GET /health`: liveness probe.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_request_requires_all_fields() {
        assert!(parse_body::<TokenRequest>(br#"{"client_id":"a","client_secret":"b"}"#).is_err());
        assert!(
            parse_body::<TokenRequest>(
                br#"{"client_id":"a","client_secret":"b","grant_type":"client_credentials"}"#
            )
            .is_ok()
        );
    }

    #[test]
    fn test_introspect_request_rejects_null_and_missing_token() {
        assert!(parse_body::<IntrospectRequest>(br#"{"token":null}"#).is_err());
        assert!(parse_body::<IntrospectRequest>(br#"{"accessToken":"x"}"#).is_err());
        assert!(parse_body::<IntrospectRequest>(b"token=x").is_err());
        assert!(parse_body::<IntrospectRequest>(br#"{"token":"x"}"#).is_ok());
    }

    #[test]
    fn test_body_parsing_is_strict_json() {
        let valid = br#"{"client_id":"a","client_secret":"b","grant_type":"client_credentials"}"#;

        assert!(parse_body::<TokenRequest>(&[valid.as_slice(), b" \n"].concat()).is_ok());
        assert!(matches!(
            parse_body::<TokenRequest>(&[valid.as_slice(), b"{}"].concat()),
            Err(IdpError::InvalidBody)
        ));
        assert!(matches!(
            parse_body::<TokenRequest>(
                br#"{"Client_Id":"a","Client_Secret":"b","Grant_Type":"client_credentials"}"#
            ),
            Err(IdpError::InvalidBody)
        ));
        assert!(
            parse_body::<TokenRequest>(
                br#"{"client_id":"a","client_secret":"b","grant_type":"client_credentials","scope":"x"}"#
            )
            .is_ok()
        );
    }
}
