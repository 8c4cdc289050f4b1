use std::net::SocketAddr;
use std::process::ExitCode;
use std::time::Duration;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use itinerary_server::cache::CacheConfig;
use itinerary_server::catalog::load_catalog;
use itinerary_server::planner::PlannerConfig;
use itinerary_server::web::{AppState, create_router};

const DEFAULT_CATALOG_PATH: &str = "catalog.json";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_PLAN_TIMEOUT_MS: u64 = 5000;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let catalog_path =
        std::env::var("CATALOG_PATH").unwrap_or_else(|_| DEFAULT_CATALOG_PATH.to_string());
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let addr: SocketAddr = match bind_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!(bind_addr = %bind_addr, error = %e, "invalid BIND_ADDR");
            return ExitCode::FAILURE;
        }
    };
    let timeout_ms = match std::env::var("PLAN_TIMEOUT_MS") {
        Ok(raw) => match raw.parse::<u64>() {
            Ok(ms) => ms,
            Err(e) => {
                error!(value = %raw, error = %e, "invalid PLAN_TIMEOUT_MS");
                return ExitCode::FAILURE;
            }
        },
        Err(_) => DEFAULT_PLAN_TIMEOUT_MS,
    };

    // Fail fast: the server is useless without a catalog
    let catalog = match load_catalog(&catalog_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!(path = %catalog_path, error = %e, "failed to load catalog");
            return ExitCode::FAILURE;
        }
    };

    let planner_config = PlannerConfig {
        time_budget: Some(Duration::from_millis(timeout_ms)),
        ..PlannerConfig::default()
    };
    if let Err(e) = planner_config.validate() {
        error!(error = %e, "invalid planner configuration");
        return ExitCode::FAILURE;
    }

    let state = AppState::new(catalog, planner_config, &CacheConfig::default());
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %addr, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!(addr = %addr, "itinerary planner listening");
    info!("  GET  /health          - Health check");
    info!("  GET  /catalog/lines   - List bus lines");
    info!("  GET  /itinerary/plan  - Plan an itinerary (?from=&to=)");
    info!("  POST /itinerary/plan  - Plan an itinerary (JSON body)");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
