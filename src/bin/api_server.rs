//! REST API Server for the logistics dashboard
//!
//! Serves the generated tables as JSON. Every data endpoint accepts an
//! optional `?seed=N`; without it the server's session seed is used, so
//! reloading the dashboard shows the same data until the server restarts.
//!
//! Usage:
//!   ./target/release/api_server [options]
//!
//! Options:
//!   --port PORT       Port to listen on (default: 8080)
//!   --seed N          Session seed (default: random)
//!   --config PATH     JSON generator config
//!   --logo PATH       Logo image served at /api/v1/logo
//!
//! REST endpoints:
//!   GET /api/v1/health                   - Health check
//!   GET /api/v1/dashboard                - All chart tables
//!   GET /api/v1/delays/distribution      - Box plot values
//!   GET /api/v1/delays/routes            - Average delay per route
//!   GET /api/v1/delays/vehicles          - Average delay per vehicle
//!   GET /api/v1/delays/route-lengths     - Average delay per route length
//!   GET /api/v1/warehouses/products      - Product count per warehouse
//!   GET /api/v1/vehicles/:id/deliveries  - Fact rows for one vehicle
//!   GET /api/v1/logo                     - Logo image

use anyhow::Result;
use clap::Parser;
use logistics_dashboard::api::{create_router, DashboardService};
use logistics_dashboard::assets::LogoAsset;
use logistics_dashboard::dashboard::session_seed;
use logistics_dashboard::GeneratorConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "api_server")]
#[command(about = "Serve the logistics dashboard tables as JSON")]
struct Args {
    /// Port to listen on
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Session seed
    #[arg(long)]
    seed: Option<u64>,

    /// JSON generator config; defaults are used for missing fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Logo image served at /api/v1/logo
    #[arg(long)]
    logo: Option<PathBuf>,
}

fn print_banner(port: u16, seed: u64) {
    println!("============================================================");
    println!("         LOGISTICS DASHBOARD API SERVER");
    println!("============================================================");
    println!();
    println!("  Port:     {}", port);
    println!("  REST:     http://localhost:{}/api/v1/", port);
    println!("  Seed:     {}", seed);
    println!();
    println!("REST Endpoints:");
    println!("  GET /api/v1/health                   Health check");
    println!("  GET /api/v1/dashboard                All chart tables");
    println!("  GET /api/v1/delays/distribution      Delay distribution");
    println!("  GET /api/v1/delays/routes            Delay per route");
    println!("  GET /api/v1/delays/vehicles          Delay per vehicle");
    println!("  GET /api/v1/delays/route-lengths     Delay per route length");
    println!("  GET /api/v1/warehouses/products      Products per warehouse");
    println!("  GET /api/v1/vehicles/:id/deliveries  Vehicle deliveries");
    println!("  GET /api/v1/logo                     Logo");
    println!("============================================================");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GeneratorConfig::from_json_file(path)?,
        None => GeneratorConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(session_seed);

    let mut service = DashboardService::new(config, seed);
    if let Some(path) = &args.logo {
        service = service.with_logo(LogoAsset::load(path)?);
    }
    let service = Arc::new(service);

    // Fail before binding if the session dashboard cannot be built
    service.dashboard(None).await?;

    print_banner(args.port, seed);

    let addr: SocketAddr = format!("0.0.0.0:{}", args.port).parse()?;
    let app = create_router(service);
    tracing::info!("Starting REST server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
