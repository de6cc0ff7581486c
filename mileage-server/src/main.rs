use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use mileage_server::catalog::FlightCatalog;
use mileage_server::planner::SearchConfig;
use mileage_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let catalog_path =
        std::env::var("MILEAGE_CATALOG").unwrap_or_else(|_| "cached_flights.csv".to_string());
    let carrier = std::env::var("MILEAGE_CARRIER").unwrap_or_else(|_| "Delta".to_string());

    let catalog =
        FlightCatalog::load_csv(&catalog_path, &carrier).expect("Failed to load flight catalog");
    if catalog.is_empty() {
        eprintln!("Warning: no {carrier} legs found in {catalog_path}. Searches will find nothing.");
    }

    let state = AppState::new(catalog, SearchConfig::default());
    let app = create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Mileage Run Finder listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health         - Health check");
    println!("  POST /routes/build   - Search for qualifying itineraries");
    println!("  POST /routes/rerank  - Re-rank a previous search");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");
    axum::serve(listener, app)
        .await
        .expect("Server error");
}
