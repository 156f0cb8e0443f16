//! JWT issuance and validation.
//!
//! [`TokenKeys`] is built once at startup from the [`JwtSecret`] and shared by
//! every request. Tokens are signed with HS256; validation accepts any member
//! of the HMAC family and nothing else, so a token whose header names an
//! asymmetric algorithm (or `none`) is rejected before its signature is even
//! looked at.
//!
//! # Examples
//!
//! ```rust
//! use authgate::auth::jwt::TokenKeys;
//! use authgate::config::JwtSecret;
//!
//! let keys = TokenKeys::new(&JwtSecret::new("MySuperSecret").unwrap());
//! let token = keys.issue(42).unwrap();
//! let claims = keys.validate(&token).unwrap();
//! assert_eq!(claims.user_id, 42);
//! ```

use chrono::TimeDelta;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Serialize;

use crate::config::JwtSecret;

use super::{auth_token::AuthToken, error::AuthError};

/// Algorithm used to sign new tokens.
const ALGORITHM: Algorithm = Algorithm::HS256;

/// Algorithms accepted on validation.
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Lifetime of an issued token.
pub const TOKEN_LIFETIME: TimeDelta = TimeDelta::hours(1);

/// Signing and verification keys derived from the signing secret.
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenKeys {
    pub fn new(secret: &JwtSecret) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Issues a token for `user_id`, valid for [`TOKEN_LIFETIME`].
    pub fn issue(&self, user_id: i64) -> Result<String, AuthError> {
        let claims = AuthToken::new(user_id, TOKEN_LIFETIME)?;
        self.sign(&claims)
    }

    /// Validates `token` and returns its claims.
    ///
    /// Every failure (malformed token, wrong algorithm, bad signature,
    /// expiration) is reported as [`AuthError::InvalidToken`]; the actual
    /// cause is only logged.
    pub fn validate(&self, token: &str) -> Result<AuthToken, AuthError> {
        let claims = decode::<AuthToken>(token, &self.decoding, &self.validation)
            .map_err(|err| {
                log::debug!("Failed to decode jwt token {err}");
                AuthError::InvalidToken
            })?
            .claims;

        // jsonwebtoken accepts `exp == now`
        if claims.is_expired() || !claims.authorized {
            log::debug!("Rejecting expired or unauthorized token for user {}", claims.user_id);
            return Err(AuthError::InvalidToken);
        }
        Ok(claims)
    }

    fn sign<T: Serialize>(&self, claims: &T) -> Result<String, AuthError> {
        Ok(encode(&Header::new(ALGORITHM), claims, &self.encoding)?)
    }
}
