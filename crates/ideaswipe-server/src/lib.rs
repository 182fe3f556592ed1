//! HTTP front for the idea service.
//!
//! Two POST endpoints, `/generate-idea` and `/refine-idea`, each formatting a
//! prompt, making one call to the configured text-generation provider, and
//! returning the idea recovered from its reply. CORS is open to all origins.
//!
//! # Configuration
//! - `IDEASWIPE_PORT` (default 3000)
//! - `~/.ideaswipe/settings.json`, overridden by `IDEASWIPE_PROVIDER`,
//!   `IDEASWIPE_MODEL`, `IDEASWIPE_API_KEY` / `CLAUDE_API_KEY`,
//!   `IDEASWIPE_MAX_TOKENS`, `IDEASWIPE_TIMEOUT_SECS`
//! - `RUST_LOG` for log filtering
//!
//! ```sh
//! RUST_LOG=info CLAUDE_API_KEY=... cargo run -p ideaswipe-server
//! ```
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::post,
};
use signal::ctrl_c;
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use config::Config;
use routes::{generate_idea, method_not_allowed, preflight, refine_idea};
use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route(
            "/generate-idea",
            post(generate_idea).options(preflight).fallback(method_not_allowed),
        )
        .route(
            "/refine-idea",
            post(refine_idea).options(preflight).fallback(method_not_allowed),
        )
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading configuration...");
    let config = Config::load();
    info!("Using {} ({})", config.ai.provider, config.ai.model);

    let state = AppState::new(config)?;
    let address = format!("0.0.0.0:{}", state.config.port);
    let app = router(state);

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
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
}
