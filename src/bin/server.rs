use std::sync::Arc;

use authgate::{
    auth::jwt::TokenKeys,
    config::{AppConfig, Env, JwtSecret},
    db::{config::DbConfig, connection::DbConnection},
    prelude::*,
    proxy::SignupProxy,
    storage::UserStore,
    web::{ApiState, router},
};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    init_tracing(config.env);
    info!(env = ?config.env, "Config loaded");

    let secret = JwtSecret::from_env()?;

    let db = DbConnection::new(&DbConfig::from_env()?)?.setup()?;
    info!("Storage was set up");
    let store: Arc<dyn UserStore> = Arc::new(db);

    let signup = SignupProxy::new(config.signup.url.clone(), config.signup.timeout())?;
    let api_state = ApiState::new(store.clone(), TokenKeys::new(&secret), signup);
    let app = router(api_state, &config);

    let listener = tokio::net::TcpListener::bind(&config.http_server.address).await?;
    info!("Serving on address {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close();
    info!("Server stopped");
    Ok(())
}

fn init_tracing(env: Env) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "authgate=debug,server=debug,tower_http=debug".into());
    let json = env == Env::Prod;

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to listen for SIGTERM {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Gracefully shutting down");
}
