use serde::{Deserialize, Serialize};

/// Scope granted to every client-credentials token.
pub const DEFAULT_SCOPE: &str = "read:example";

/// Claims embedded in an access token.
///
/// Field order matters for wire compatibility: payloads serialize as
/// `exp`, `scope`, `sub`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    pub exp: i64,
    #[serde(default)]
    pub scope: String,
    pub sub: String,
}

impl TokenClaims {
    pub fn new(subject: impl Into<String>, issued_at: i64, ttl_seconds: i64) -> Self {
        TokenClaims {
            exp: issued_at + ttl_seconds,
            scope: DEFAULT_SCOPE.to_string(),
            sub: subject.into(),
        }
    }

    /// Active strictly before `exp`; a token whose `exp` equals `timestamp`
    /// is already expired.
    pub fn is_active_at(&self, timestamp: i64) -> bool {
        timestamp < self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_creation() {
        let claims = TokenClaims::new("1234567890", 915_148_800, 3600);

        assert_eq!(claims.sub, "1234567890");
        assert_eq!(claims.exp, 915_152_400);
        assert_eq!(claims.scope, "read:example");
    }

    #[test]
    fn test_expiry_boundary_is_exclusive() {
        let claims = TokenClaims::new("client", 1000, 3600);

        assert!(claims.is_active_at(claims.exp - 1));
        assert!(!claims.is_active_at(claims.exp));
        assert!(!claims.is_active_at(claims.exp + 1));
    }

    #[test]
    fn test_payload_field_order() {
        let claims = TokenClaims::new("1234567890", 915_148_800, 3600);
        let json = serde_json::to_string(&claims).unwrap();

        assert_eq!(
            json,
            r#"{"exp":915152400,"scope":"read:example","sub":"1234567890"}"#
        );
    }
}
