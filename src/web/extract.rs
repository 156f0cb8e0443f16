//! JSON body extractor that ignores `Content-Type`.
//!
//! Clients such as `curl -d` send JSON labelled as form data; the body is
//! decoded as JSON whatever the header says.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use tracing::error;

use crate::prelude::*;

pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let path = req.uri().path().to_owned();
        let bytes = Bytes::from_request(req, state).await.inspect_err(|err| {
            error!(op = "web::extract", path = %path, error = %err, "failed to read request body");
        })?;

        let value = serde_json::from_slice(&bytes).inspect_err(|err| {
            error!(op = "web::extract", path = %path, error = %err, "failed to bind request");
        })?;
        Ok(Self(value))
    }
}
