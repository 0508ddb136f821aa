use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use trip_server::cities::CityList;
use trip_server::config::ServerConfig;
use trip_server::engine::EngineInvoker;
use trip_server::planner::Planner;
use trip_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("trip_server=info,tower_http=info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            std::process::exit(2);
        }
    };

    let invoker = EngineInvoker::new(config.engine.clone());

    // Paths with a directory part are resolved from the engine's working
    // directory; bare names are looked up on PATH and not checked here.
    let engine = invoker.config();
    if engine.program.components().count() > 1 && !engine.working_dir.join(&engine.program).exists()
    {
        warn!(
            program = %engine.program.display(),
            "engine executable not found; trip planning will fail until it is installed"
        );
    }
    let planner = Planner::new(Arc::new(invoker));

    // A missing city file only disables suggestions
    let cities = match CityList::load(&config.cities_path).await {
        Ok(cities) => {
            let count = cities.len().await;
            info!(count, "loaded city list");
            cities
        }
        Err(e) => {
            warn!(error = %e, "city suggestions unavailable");
            CityList::empty(&config.cities_path)
        }
    };

    // Spawn background task to pick up edits to the city file
    let cities_refresh = cities.clone();
    let reload_every = config.cities_reload;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(reload_every);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match cities_refresh.reload().await {
                Ok(count) => info!(count, "reloaded city list"),
                Err(e) => warn!(
                    path = %cities_refresh.path().display(),
                    error = %e,
                    "failed to reload city list"
                ),
            }
        }
    });

    let state = AppState::new(planner, cities);
    let app = create_router(state, &config.static_dir);

    let addr = config.bind_addr;
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!("Travel Planner listening on http://{addr}");
    info!("  GET  /                   - Trip form");
    info!("  GET  /health             - Health check");
    info!("  POST /plan-trip          - Plan a trip");
    info!("  GET  /api/cities/search  - City suggestions");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        std::process::exit(1);
    }
}
