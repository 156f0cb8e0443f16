//! Password hashing and verification.
//!
//! New hashes are Argon2 PHC strings (`$argon2id$v=19$...`) carrying their own
//! salt and cost parameters. Accounts created by the user service are stored
//! as bcrypt strings (`$2a$`, `$2b$`, `$2y$`); verification picks the
//! algorithm from the hash prefix.
//!
//! # Examples
//!
//! ```rust
//! use authgate::auth::secret_hash::{hash_password, verify_password};
//!
//! let hash = hash_password("user_password_123").unwrap();
//! assert!(verify_password("user_password_123", &hash).unwrap());
//! assert!(!verify_password("wrong_password", &hash).unwrap());
//! ```

use argon2::{
    Argon2, PasswordHasher, PasswordVerifier,
    password_hash::{self, PasswordHash, SaltString},
};
use rand::rngs::OsRng;

use super::error::AuthError;

/// Hashes `pw` with a fresh random salt.
///
/// Two calls with the same input never return the same string.
pub fn hash_password(pw: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    Ok(argon2.hash_password(pw.as_bytes(), &salt)?.to_string())
}

const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

fn is_bcrypt(hash: &str) -> bool {
    BCRYPT_PREFIXES.iter().any(|prefix| hash.starts_with(prefix))
}

/// Verifies `pw` against a stored Argon2 or bcrypt hash.
///
/// # Returns
///
/// * `Ok(true)` - Password matches the hash
/// * `Ok(false)` - Password does not match the hash
/// * `Err(AuthError::PasswordHash)` - The stored hash is not a valid Argon2 PHC string
/// * `Err(AuthError::Bcrypt)` - The stored hash is a malformed bcrypt string
pub fn verify_password(pw: &str, hash: &str) -> Result<bool, AuthError> {
    if is_bcrypt(hash) {
        return Ok(bcrypt::verify(pw, hash)?);
    }

    let hash = PasswordHash::new(hash)?;

    match Argon2::default().verify_password(pw.as_bytes(), &hash) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(err.into()),
    }
}
