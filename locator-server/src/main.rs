use std::error::Error;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use station_locator::config::{AddressBackends, LocatorConfig};
use station_locator::web::{AppState, create_router};

const DEFAULT_LOG_FILTER: &str = "station_locator=info,locator_server=info,tower_http=info";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    if let Err(e) = run().await {
        error!(error = %e, "locator server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let config = LocatorConfig::from_env()?;

    // Catalog and backend must agree on datum before we accept traffic
    let catalog = config.load_catalog()?;
    let backends = AddressBackends::build(&config, catalog.datum())?;
    info!(
        stations = catalog.len(),
        datum = %catalog.datum(),
        backend = ?backends.kind,
        "catalog ready"
    );

    let state = AppState::new(catalog, backends, config.default_k);
    let app = create_router(state, &config.static_dir);

    let addr = config.listen_addr;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Station locator listening on http://{addr}");
    info!("API endpoints:");
    info!("  GET /health                            - Health check");
    info!("  GET /api/stations                      - Station catalog");
    info!("  GET /api/nearest?lat=&lon=[&k=|&all=]  - Nearest stations to a point");
    info!("  GET /api/nearest/by-address?address=   - Nearest stations to an address");
    info!("  GET /api/suggest?q=                    - Address suggestions");

    axum::serve(listener, app).await?;
    Ok(())
}
