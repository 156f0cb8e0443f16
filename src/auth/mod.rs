pub mod auth_body;
pub mod auth_token;
pub mod error;
pub mod jwt;
pub mod login;
pub mod secret_hash;

pub const AUTH_HEADER: &str = "Authorization";
pub const AUTH_HEADER_PREFIX: &str = "Bearer ";
