//! HTTP surface of the gateway.

use std::sync::Arc;

use axum::{
    BoxError, Router,
    body::Body,
    error_handling::HandleErrorLayer,
    http::{HeaderName, HeaderValue, Method, Request, header},
    routing::{get, post},
};
use tower::{ServiceBuilder, timeout::error::Elapsed};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{Span, debug_span, error, warn};
use uuid::Uuid;

use crate::auth::jwt::TokenKeys;
use crate::config::{AppConfig, CorsConfig};
use crate::error::Error;
use crate::proxy::SignupProxy;
use crate::storage::UserStore;

pub mod ctx;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Shared, read-only handler state.
#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<dyn UserStore>,
    pub keys: Arc<TokenKeys>,
    pub signup: SignupProxy,
}

impl ApiState {
    pub fn new(store: Arc<dyn UserStore>, keys: TokenKeys, signup: SignupProxy) -> Self {
        Self {
            store,
            keys: Arc::new(keys),
            signup,
        }
    }
}

pub fn router(state: ApiState, config: &AppConfig) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/log-in", post(handlers::log_in))
        .route("/sign-in", post(handlers::sign_in))
        .route("/verify", get(handlers::verify))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    request_id.clone(),
                    |_req: &Request<Body>| HeaderValue::from_str(&Uuid::new_v4().to_string()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(request_id))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors(&config.cors))
                .layer(HandleErrorLayer::new(handle_layer_error))
                .timeout(config.http_server.timeout()),
        )
        .with_state(state)
}

fn cors(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| {
            HeaderValue::from_str(origin)
                .inspect_err(|_| warn!(origin, "ignoring invalid CORS origin"))
                .ok()
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// Answers with the error envelope when the request timeout elapses.
async fn handle_layer_error(err: BoxError) -> Error {
    if err.is::<Elapsed>() {
        warn!("request timed out");
        return Error::RequestTimeout;
    }
    error!(error = %err, "unhandled middleware error");
    Error::Middleware(err.to_string())
}

fn make_span(request: &Request<Body>) -> Span {
    let path = request.uri().path();
    let method = request.method().as_str();
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");

    debug_span!("http-request", method, path, request_id)
}
