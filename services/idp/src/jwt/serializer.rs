use crate::error::{CodecError, IdpError};
use crate::jwt::claims::TokenClaims;
use crate::jwt::key::SigningKey;
use jsonwebtoken::{Algorithm, Header, Validation, decode, encode};

/// Turns claims into a compact signed token and back.
///
/// Implementations are pure: no clock, no I/O. Expiry is judged by the caller.
pub trait TokenCodec: Send + Sync {
    /// Sign `claims` with `key`.
    fn encode(&self, claims: &TokenClaims, key: &SigningKey) -> Result<String, IdpError>;

    /// Verify `token` against `key` and return its claims.
    fn decode(&self, token: &str, key: &SigningKey) -> Result<TokenClaims, CodecError>;
}

/// HMAC family accepted on decode. The shared key never verifies `none` or
/// asymmetric signatures.
const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// HMAC compact JWS codec.
///
/// Encodes with a single algorithm; decodes any HMAC algorithm the token
/// header declares.
#[derive(Debug, Clone, Copy)]
pub struct JwtSerializer {
    algorithm: Algorithm,
}

impl JwtSerializer {
    #[must_use]
    pub const fn hs256() -> Self {
        JwtSerializer {
            algorithm: Algorithm::HS256,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        // exp is checked against the injected clock, not the system time.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation
    }
}

impl Default for JwtSerializer {
    fn default() -> Self {
        Self::hs256()
    }
}

impl TokenCodec for JwtSerializer {
    fn encode(&self, claims: &TokenClaims, key: &SigningKey) -> Result<String, IdpError> {
        let header = Header::new(self.algorithm);
        encode(&header, claims, &key.encoding_key()).map_err(IdpError::from)
    }

    fn decode(&self, token: &str, key: &SigningKey) -> Result<TokenClaims, CodecError> {
        if token.split('.').count() != 3 {
            return Err(CodecError::Malformed);
        }

        let token_data = decode::<TokenClaims>(token, &key.decoding_key(), &self.validation())?;
        Ok(token_data.claims)
    }
}
