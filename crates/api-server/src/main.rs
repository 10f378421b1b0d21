use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use api_server::http::{self, AppState, SessionRegistry};
use shared::config::{ApiConfig, load_dotenv};
use shared::llm::{ApiClient, PerplexityGateway};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let dotenv_result = load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "api_server=debug,shared=info,axum=info".to_string()),
        )
        .init();

    if let Err(err) = dotenv_result {
        error!("failed to load environment: {err}");
        std::process::exit(1);
    }

    let config = match ApiConfig::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            error!("failed to read config: {err}");
            std::process::exit(1);
        }
    };

    let addr: SocketAddr = match config.bind_addr.parse() {
        Ok(addr) => addr,
        Err(err) => {
            error!("invalid API_BIND_ADDR '{}': {err}", config.bind_addr);
            std::process::exit(1);
        }
    };

    let gateway = match PerplexityGateway::new(config.gateway.clone()) {
        Ok(gateway) => gateway,
        Err(err) => {
            error!("failed to initialize completions gateway: {err}");
            std::process::exit(1);
        }
    };

    let sessions = SessionRegistry::default();
    let _session_pruner = sessions.spawn_pruner(
        Duration::from_secs(config.session_prune_interval_secs),
        Duration::from_secs(config.session_idle_ttl_secs),
    );

    let app = http::build_router(AppState {
        sessions,
        client: ApiClient::new(Arc::new(gateway)),
        presentation: config.presentation,
    });

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("failed to bind {addr}: {err}");
            std::process::exit(1);
        }
    };

    info!(
        model = %config.gateway.model,
        presentation = config.presentation.as_str(),
        session_idle_ttl_secs = config.session_idle_ttl_secs,
        "api server listening on {}",
        listener.local_addr().unwrap_or(addr)
    );

    if let Err(err) = axum::serve(listener, app).await {
        error!("server stopped: {err}");
        std::process::exit(1);
    }
}
