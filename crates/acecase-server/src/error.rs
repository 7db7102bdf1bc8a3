//! Error types for the Ace Case API server.
//!
//! [`ApiError`] unifies all failure modes into a single enum that
//! can be converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.
//! Internal causes are logged, never echoed to the client.

use acecase_types::ErrorBody;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The token request body was unusable.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The requested case is not in the catalog.
    #[error("unknown case: {0}")]
    UnknownCase(String),

    /// The subscribe body was unusable or the address failed validation.
    #[error("invalid email")]
    InvalidEmail,

    /// Signing the credential failed.
    #[error("credential error: {0}")]
    Credential(#[from] acecase_core::credential::CredentialError),

    /// The subscriber store failed.
    #[error("subscriber store error: {0}")]
    Storage(#[from] acecase_db::DbError),

    /// Rendering the landing page failed.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

impl ApiError {
    /// HTTP status for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::UnknownCase(_) | Self::InvalidEmail => {
                StatusCode::BAD_REQUEST
            }
            Self::Credential(_) | Self::Storage(_) | Self::Template(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message placed in the response body.
    fn public_message(&self) -> String {
        match self {
            Self::BadRequest(msg) => msg.clone(),
            Self::UnknownCase(_) => String::from("unknown case"),
            Self::InvalidEmail => String::from("Invalid email"),
            Self::Credential(_) => String::from("Failed to issue token"),
            Self::Storage(_) => String::from("Failed to subscribe"),
            Self::Template(_) => String::from("Failed to render page"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        let body = ErrorBody {
            error: self.public_message(),
            status: status.as_u16(),
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_400() {
        assert_eq!(ApiError::InvalidEmail.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::UnknownCase(String::from("nope")).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn storage_message_is_generic() {
        let err = ApiError::Storage(acecase_db::DbError::Config(String::from(
            "secret connection detail",
        )));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Failed to subscribe");
    }
}
