#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use authgate::{
    auth::jwt::TokenKeys,
    config::{AppConfig, JwtSecret},
    proxy::SignupProxy,
    storage::{UserStore, memory::MemoryUserStore},
    web::{ApiState, router},
};
use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, header},
    response::IntoResponse,
    routing::post,
};

pub mod api_client;
pub mod db_test_context;

pub const SECRET: &str = "MySuperSecret";

pub fn from_env(var: &str) -> String {
    std::env::var(var).expect(&format!("Env Variable '{}' missing", var))
}

pub fn keys() -> TokenKeys {
    TokenKeys::new(&JwtSecret::new(SECRET).expect("valid secret"))
}

/// Store holding `alice` / `wonderland`.
pub fn store_with_alice() -> Arc<MemoryUserStore> {
    let store = MemoryUserStore::new();
    store
        .insert_with_password("alice", "wonderland")
        .expect("Couldn't insert alice");
    Arc::new(store)
}

pub fn app(store: Arc<dyn UserStore>, signup_url: &str, signup_timeout: Duration) -> Router {
    let mut config = AppConfig::default();
    config.signup.url = signup_url.to_owned();
    config.signup.timeout_secs = signup_timeout.as_secs();
    app_with_config(store, &config)
}

/// Builds the app the way the server binary does, timeouts included.
pub fn app_with_config(store: Arc<dyn UserStore>, config: &AppConfig) -> Router {
    let signup = SignupProxy::new(config.signup.url.clone(), config.signup.timeout())
        .expect("Couldn't build proxy");
    router(ApiState::new(store, keys(), signup), config)
}

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Couldn't bind test listener");
    let addr = listener.local_addr().expect("Couldn't read local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });
    format!("http://{addr}")
}

/// A request received by the stub user service.
#[derive(Debug, Clone)]
pub struct Captured {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[derive(Debug, Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Captured>>>);

impl Recorder {
    pub fn requests(&self) -> Vec<Captured> {
        self.0.lock().expect("recorder lock").clone()
    }
    fn push(&self, request: Captured) {
        self.0.lock().expect("recorder lock").push(request);
    }
}

async fn create_user(
    State(recorder): State<Recorder>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    recorder.push(Captured {
        method,
        headers,
        body,
    });
    (
        StatusCode::CREATED,
        [(header::CONTENT_TYPE, "application/json")],
        r#"{"id":42}"#,
    )
}

async fn conflict() -> impl IntoResponse {
    (
        StatusCode::CONFLICT,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "username already exists",
    )
}

async fn slow() -> impl IntoResponse {
    tokio::time::sleep(Duration::from_secs(3)).await;
    StatusCode::CREATED
}

async fn stall() -> impl IntoResponse {
    tokio::time::sleep(Duration::from_secs(6)).await;
    StatusCode::CREATED
}

/// Stub user service: `/user` answers `201 {"id":42}`, `/conflict` answers
/// `409` in plain text, `/slow` takes three seconds and `/stall` six.
pub async fn spawn_user_service() -> (String, Recorder) {
    let recorder = Recorder::default();
    let app = Router::new()
        .route("/user", post(create_user))
        .route("/conflict", post(conflict))
        .route("/slow", post(slow))
        .route("/stall", post(stall))
        .with_state(recorder.clone());
    (spawn(app).await, recorder)
}
