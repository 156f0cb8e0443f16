//! Claim set carried by gateway tokens.

use chrono::{TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::error::AuthError;

/// Claims of a gateway bearer token.
///
/// # JSON Format
///
/// ```json
/// { "userId": 42, "authorized": true, "exp": 1718000000, "iat": 1717996400 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    /// Subject: the user the token was issued to.
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub authorized: bool,
    /// Expiration time (unix seconds).
    pub exp: i64,
    /// Issued at time (unix seconds).
    pub iat: i64,
}

impl AuthToken {
    pub fn new(user_id: i64, token_duration: TimeDelta) -> Result<Self, AuthError> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(token_duration)
            .ok_or(AuthError::TokenLifetime)?;

        Ok(Self {
            user_id,
            authorized: true,
            exp: expiration.timestamp(),
            iat: now.timestamp(),
        })
    }

    pub fn is_expired(&self) -> bool {
        self.exp <= Utc::now().timestamp()
    }
}
