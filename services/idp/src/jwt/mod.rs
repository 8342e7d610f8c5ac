pub mod claims;
pub mod key;
pub mod serializer;

pub use claims::{DEFAULT_SCOPE, TokenClaims};
pub use key::SigningKey;
pub use serializer::{JwtSerializer, TokenCodec};
