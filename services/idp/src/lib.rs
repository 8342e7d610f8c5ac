//! Open IdP library.
//!
//! Implements the OAuth2 client-credentials grant: clients trade their
//! static credentials for a short-lived HS256 bearer token, and any caller
//! can later ask whether a token is still active.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod http;
pub mod jwt;
pub mod service;
pub mod store;
pub mod telemetry;

// Re-exports for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use error::{IdpError, StoreError};
pub use jwt::{SigningKey, TokenClaims};
pub use service::{Introspection, IssuedToken, TokenService};
pub use store::{Credential, CredentialStore, MemoryCredentialStore};
