//! Sign-up relay to the user service.
//!
//! The gateway does not own account creation. It re-sends the sign-up body
//! with the caller's method and headers to the user service and hands the
//! answer back untouched: status, `Content-Type` and body.

use std::time::Duration;

use axum::{
    body::Body,
    http::{HeaderMap, HeaderName, HeaderValue, Method, header},
    response::Response,
};
use serde::Serialize;
use tracing::debug;

pub const DEFAULT_SIGNUP_URL: &str = "http://backend:8069/user";

/// Headers that describe the inbound connection or the original body
/// encoding; the outbound client sets its own.
const SKIPPED_HEADERS: [HeaderName; 10] = [
    header::HOST,
    header::CONTENT_LENGTH,
    header::CONNECTION,
    header::TRANSFER_ENCODING,
    header::TE,
    header::TRAILER,
    header::UPGRADE,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    HeaderName::from_static("keep-alive"),
];

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("failed to serialize proxy body: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to build proxy request: {0}")]
    Build(#[source] reqwest::Error),

    #[error("failed to send proxy request: {0}")]
    Dispatch(#[source] reqwest::Error),
}

/// Client for the downstream user service.
#[derive(Debug, Clone)]
pub struct SignupProxy {
    client: reqwest::Client,
    target: String,
}

impl SignupProxy {
    /// `timeout` bounds the whole downstream exchange, body included.
    pub fn new(target: impl Into<String>, timeout: Duration) -> Result<Self, ProxyError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ProxyError::Build)?;
        Ok(Self {
            client,
            target: target.into(),
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Builds the outbound request without sending it.
    pub fn build_request<T: Serialize>(
        &self,
        method: Method,
        headers: &HeaderMap,
        body: &T,
    ) -> Result<reqwest::Request, ProxyError> {
        let payload = serde_json::to_vec(body)?;
        let mut headers = forwarded_headers(headers);
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        self.client
            .request(method, &self.target)
            .headers(headers)
            .body(payload)
            .build()
            .map_err(ProxyError::Build)
    }

    /// Sends `body` to the user service with the caller's method and headers.
    pub async fn forward<T: Serialize>(
        &self,
        method: Method,
        headers: &HeaderMap,
        body: &T,
    ) -> Result<reqwest::Response, ProxyError> {
        let request = self.build_request(method, headers, body)?;
        debug!(url = %self.target, method = %request.method(), "forwarding request");

        self.client
            .execute(request)
            .await
            .map_err(ProxyError::Dispatch)
    }
}

/// Copies `headers` minus the connection-level ones.
pub fn forwarded_headers(headers: &HeaderMap) -> HeaderMap {
    let mut forwarded = headers.clone();
    for name in &SKIPPED_HEADERS {
        forwarded.remove(name);
    }
    forwarded
}

/// Turns the upstream answer into our response, streaming the body through.
///
/// The upstream body is released when the stream ends or the response is
/// dropped.
pub fn relay(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let content_type = upstream.headers().get(header::CONTENT_TYPE).cloned();

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    if let Some(content_type) = content_type {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, content_type);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::login::LoginRequest;

    fn proxy(target: &str) -> SignupProxy {
        SignupProxy::new(target, Duration::from_secs(1)).unwrap()
    }

    fn inbound_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("gateway:8080"));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("12"));
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        headers.insert("x-request-id", HeaderValue::from_static("req-1"));
        headers
    }

    #[test]
    fn connection_headers_are_dropped() {
        let forwarded = forwarded_headers(&inbound_headers());

        assert!(forwarded.get(header::HOST).is_none());
        assert!(forwarded.get(header::CONTENT_LENGTH).is_none());
        assert!(forwarded.get(header::CONNECTION).is_none());
        assert_eq!(forwarded[header::CONTENT_TYPE], "application/json");
        assert_eq!(forwarded[header::AUTHORIZATION], "Bearer abc");
        assert_eq!(forwarded["x-request-id"], "req-1");
    }

    #[test]
    fn request_keeps_method_headers_and_body() {
        let request = proxy("http://users.internal:8069/user")
            .build_request(
                Method::POST,
                &inbound_headers(),
                &LoginRequest::new("alice", "wonderland"),
            )
            .unwrap();

        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.url().as_str(), "http://users.internal:8069/user");
        assert_eq!(request.headers()[header::AUTHORIZATION], "Bearer abc");

        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "username": "alice", "password": "wonderland" })
        );
    }

    #[test]
    fn body_is_labelled_as_json() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        let request = proxy("http://users.internal:8069/user")
            .build_request(Method::POST, &headers, &LoginRequest::new("alice", "wonderland"))
            .unwrap();

        let content_types: Vec<_> = request.headers().get_all(header::CONTENT_TYPE).iter().collect();
        assert_eq!(content_types, ["application/json"]);
    }

    #[test]
    fn bad_target_is_a_build_error() {
        let err = proxy("not a url")
            .build_request(Method::POST, &HeaderMap::new(), &serde_json::json!({}))
            .unwrap_err();
        assert!(matches!(err, ProxyError::Build(_)));
    }

    #[tokio::test]
    async fn unreachable_target_is_a_dispatch_error() {
        let err = proxy("http://127.0.0.1:1/user")
            .forward(Method::POST, &HeaderMap::new(), &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ProxyError::Dispatch(_)));
    }
}
