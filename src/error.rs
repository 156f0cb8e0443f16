//! Main Crate Error

use axum::extract::rejection::BytesRejection;

use crate::{auth::error::AuthError, proxy::ProxyError, storage::StorageError};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] toml::de::Error),

    #[error("Env Variable '{0}' missing")]
    MissingEnv(&'static str),

    #[error("Env Variable '{0}' is empty")]
    EmptyEnv(&'static str),

    #[error("signup timeout ({signup}s) must be shorter than the request timeout ({request}s)")]
    SignupTimeout { signup: u64, request: u64 },

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Proxy(#[from] ProxyError),

    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),

    /* Api Errors */
    #[error("Failed to read request body: {0}")]
    ReadBody(#[from] BytesRejection),

    #[error("Failed to bind request: {0}")]
    BindRequest(#[from] serde_json::Error),

    #[error("Request timed out")]
    RequestTimeout,

    #[error("Middleware failure: {0}")]
    Middleware(String),

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Token issuance failed")]
    TokenIssuanceFailed,

    #[error("Storage unavailable")]
    StorageUnavailable,
}
