use crate::error::IdpError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

impl IdpError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidBody | Self::UnsupportedGrantType => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::StoreUnavailable(_) | Self::TokenEncoding(_) | Self::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Fixed plain-text bodies; internal details only go to the log.
impl IntoResponse for IdpError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_client_error() {
            return (status, self.to_string()).into_response();
        }

        error!(error = %self, "Request failed");
        (status, "Internal server error").into_response()
    }
}
