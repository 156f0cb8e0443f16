//! Request context resolved from the bearer token.

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use crate::auth::{AUTH_HEADER, AUTH_HEADER_PREFIX, auth_token::AuthToken, error::AuthError};
use crate::prelude::*;

use super::ApiState;

/// Claims of the caller's validated token.
#[derive(Clone, Debug)]
pub struct Ctx {
    pub claims: AuthToken,
}

impl FromRequestParts<ApiState> for Ctx {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &ApiState) -> Result<Self> {
        let token = parts
            .headers
            .get(AUTH_HEADER)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix(AUTH_HEADER_PREFIX))
            .ok_or(AuthError::TokenMissing)?;

        let claims = state.keys.validate(token).inspect_err(|err| {
            warn!(op = "web::ctx", error = %err, "rejecting bearer token");
        })?;

        Ok(Self { claims })
    }
}
