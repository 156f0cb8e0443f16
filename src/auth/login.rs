//! Credential login: lookup, password check, token issuance.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::prelude::*;
use crate::storage::{StorageError, UserStore};

use super::{auth_body::AuthBody, jwt::TokenKeys, secret_hash::verify_password};

const OP: &str = "auth::login::authenticate";

/// Credentials sent to `/log-in` and `/sign-in`.
#[derive(Clone, Deserialize, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"REDACTED")
            .finish()
    }
}

/// Authenticates `request` against `store` and issues a token.
///
/// Lookup and password failures both come back as
/// [`Error::AuthenticationFailed`]; a signing failure comes back as
/// [`Error::TokenIssuanceFailed`]. The underlying cause is logged here and
/// never returned.
///
/// Blocks on storage and Argon2; call it from a blocking context.
pub fn authenticate(
    request: &LoginRequest,
    store: &dyn UserStore,
    keys: &TokenKeys,
) -> Result<AuthBody> {
    let record = store
        .find_by_username(&request.username)
        .map_err(|err| {
            match err {
                StorageError::UserNotFound => {
                    warn!(op = OP, username = %request.username, "user not found")
                }
                err => {
                    error!(op = OP, username = %request.username, error = %err, "user lookup failed")
                }
            }
            Error::AuthenticationFailed
        })?;

    match verify_password(&request.password, &record.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            warn!(op = OP, username = %request.username, "password mismatch");
            return Err(Error::AuthenticationFailed);
        }
        Err(err) => {
            error!(op = OP, username = %request.username, error = %err, "stored hash rejected");
            return Err(Error::AuthenticationFailed);
        }
    }

    let token = keys.issue(record.user_id).map_err(|err| {
        error!(op = OP, user_id = record.user_id, error = %err, "failed to sign token");
        Error::TokenIssuanceFailed
    })?;

    info!(op = OP, user_id = record.user_id, "user authenticated");
    Ok(AuthBody::new(token))
}
