use axum::{Json, http::StatusCode, response::IntoResponse};
use tracing::debug;

use crate::auth::error::AuthError;
use crate::prelude::*;
use crate::proxy::ProxyError;

use super::response::ApiResponse;

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            Error::ReadBody(_) | Error::BindRequest(_) => {
                (StatusCode::BAD_REQUEST, "failed to bind request")
            }
            Error::RequestTimeout => (StatusCode::REQUEST_TIMEOUT, "request timed out"),

            // Credential failures keep the 500 existing clients expect.
            Error::AuthenticationFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to authentificate user",
            ),
            Error::TokenIssuanceFailed => {
                (StatusCode::INTERNAL_SERVER_ERROR, "failed to issue token")
            }

            Error::Auth(AuthError::InvalidToken) => (StatusCode::UNAUTHORIZED, "invalid token"),
            Error::Auth(AuthError::TokenMissing) => (StatusCode::UNAUTHORIZED, "missing token"),

            Error::Proxy(ProxyError::Serialize(_) | ProxyError::Build(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to create proxy request",
            ),
            Error::Proxy(ProxyError::Dispatch(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to do proxy request",
            ),

            Error::StorageUnavailable => (StatusCode::SERVICE_UNAVAILABLE, "storage unavailable"),

            // Internal errors - hide details
            Error::Auth(_)
            | Error::Storage(_)
            | Error::IO(_)
            | Error::Config(_)
            | Error::MissingEnv(_)
            | Error::EmptyEnv(_)
            | Error::SignupTimeout { .. }
            | Error::Join(_)
            | Error::Middleware(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal server error"),
        };

        debug!(error = %self, %status, "Creating API error response");
        (status, Json(ApiResponse::error(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::{Value, json};

    use super::*;

    async fn render(error: Error) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn authentication_failure_is_generic() {
        let (status, body) = render(Error::AuthenticationFailed).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({ "state": { "status": "Error", "error": "failed to authentificate user" } })
        );
    }

    #[tokio::test]
    async fn internal_details_are_hidden() {
        let (status, body) = render(Error::Storage(crate::storage::StorageError::Migration(
            String::from("relation \"users\" already exists"),
        )))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["state"]["error"], "internal server error");
    }

    #[tokio::test]
    async fn invalid_token_is_unauthorized() {
        let (status, body) = render(AuthError::InvalidToken.into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["state"]["error"], "invalid token");
    }
}
