use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info, warn};

use metro_server::config::{ConfigError, ServerConfig};
use metro_server::graph::GraphError;
use metro_server::logging;
use metro_server::network::{JsonFileStore, NetworkStore, StoreError, verify};
use metro_server::planner::Planner;
use metro_server::web::{AppState, create_router};

/// Failure before the server started accepting requests.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to initialise logging: {0}")]
    Logging(String),

    #[error("failed to load network: {0}")]
    Store(#[from] StoreError),

    #[error("failed to build route graph: {0}")]
    Graph(#[from] GraphError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Logging may not be up yet
            eprintln!("metro-server: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    logging::init(logging::DEFAULT_LEVEL).map_err(|e| StartupError::Logging(e.to_string()))?;
    let config = ServerConfig::from_env()?;

    let store = JsonFileStore::open(&config.network_file)?;
    info!(path = %store.path().display(), "Loaded network file");

    let report = verify(&*store.data()?);
    for issue in &report.issues {
        warn!(%issue, "Network data issue");
    }

    let store: Arc<dyn NetworkStore> = Arc::new(store);
    let planner = Planner::load(store, &config.route_cache)?;
    {
        let live = planner.graph().current().await;
        info!(
            stations = live.graph.station_count(),
            lines = live.graph.line_count(),
            interchanges = live.graph.interchange_stations().count(),
            "Route graph ready"
        );
    }

    // Periodically reload the network file and republish the graph
    if !config.refresh_interval.is_zero() {
        let refresher = planner.clone();
        let period = config.refresh_interval;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await; // First tick is immediate, skip it
            loop {
                interval.tick().await;
                if let Err(e) = refresher.refresh().await {
                    error!(error = %e, "Scheduled network refresh failed");
                }
            }
        });
    }

    let app = create_router(AppState::new(planner), &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(addr = %config.listen_addr, "Metro route planner listening");
    axum::serve(listener, app).await?;
    Ok(())
}
