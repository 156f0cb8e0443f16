use axum::{
    Json,
    extract::State,
    http::{HeaderMap, Method},
    response::Response,
};
use tracing::{debug, error, info};

use crate::auth::{
    auth_body::AuthBody,
    auth_token::AuthToken,
    login::{LoginRequest, authenticate},
};
use crate::prelude::*;
use crate::proxy::relay;

use super::{ApiState, ctx::Ctx, extract::JsonBody, response::ApiResponse};

pub async fn root() -> &'static str {
    "Hello World!"
}

#[axum::debug_handler]
pub async fn health(State(state): State<ApiState>) -> Result<Json<ApiResponse<()>>> {
    let store = state.store.clone();
    tokio::task::spawn_blocking(move || store.ping())
        .await?
        .map_err(|err| {
            error!(op = "web::handlers::health", error = %err, "storage ping failed");
            Error::StorageUnavailable
        })?;

    Ok(Json(ApiResponse::success()))
}

#[axum::debug_handler]
pub async fn log_in(
    State(state): State<ApiState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<ApiResponse<AuthBody>>> {
    debug!(op = "web::handlers::log_in", req = ?request, "decoded request");

    let store = state.store.clone();
    let keys = state.keys.clone();
    let body =
        tokio::task::spawn_blocking(move || authenticate(&request, store.as_ref(), &keys)).await??;

    Ok(Json(ApiResponse::ok(body)))
}

#[axum::debug_handler]
pub async fn sign_in(
    State(state): State<ApiState>,
    method: Method,
    headers: HeaderMap,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Response> {
    const OP: &str = "web::handlers::sign_in";

    info!(op = OP, url = state.signup.target(), "Redirecting to another service");
    let upstream = state
        .signup
        .forward(method, &headers, &request)
        .await
        .inspect_err(|err| {
            error!(op = OP, error = %err, "proxy request failed");
        })?;

    Ok(relay(upstream))
}

#[axum::debug_handler(state = ApiState)]
pub async fn verify(ctx: Ctx) -> Json<ApiResponse<AuthToken>> {
    Json(ApiResponse::ok(ctx.claims))
}
