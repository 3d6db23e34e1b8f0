//! Dashboard report
//!
//! Generates one synthetic dataset and prints every dashboard table.
//!
//! Usage:
//!   cargo run --release -- [OPTIONS]
//!
//! Options:
//!   --seed <N>        Random seed for reproducibility (optional)
//!   --config <PATH>   JSON generator config (optional)
//!   --today <DATE>    Reference date, YYYY-MM-DD (default: local date)
//!   --vehicle <ID>    Vehicle whose deliveries are listed (default: V4006)

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Parser;
use logistics_dashboard::dashboard::{session_seed, DashboardTables};
use logistics_dashboard::GeneratorConfig;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "logistics_dashboard")]
#[command(about = "Print the delay dashboard tables for one synthetic dataset")]
struct Args {
    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// JSON generator config; defaults are used for missing fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reference date all date windows are relative to
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Vehicle whose fact rows are listed
    #[arg(long, default_value = "V4006")]
    vehicle: String,
}

fn print_section(title: &str) {
    println!("\n{}", title);
    println!("{}", "-".repeat(60));
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GeneratorConfig::from_json_file(path)?,
        None => GeneratorConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(session_seed);
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    info!("Generating dashboard with seed {}", seed);

    let tables = DashboardTables::generate(&config, seed, today)?;

    println!("\n{}", "=".repeat(60));
    println!("            LOGISTICS DELAY DASHBOARD");
    println!("{}", "=".repeat(60));
    println!("  Last updated: {}", tables.generated_on.format("%d %B %Y"));
    println!("  Seed:         {}", tables.seed);

    let ds = &tables.dataset;
    print_section("ENTITY COUNTS");
    println!("  Warehouses:         {:>6}", ds.warehouses.len());
    println!("  Employees:          {:>6}", ds.employees.len());
    println!("  Products:           {:>6}", ds.products.len());
    println!("  Vehicles:           {:>6}", ds.vehicles.len());
    println!("  Routes:             {:>6}", ds.routes.len());
    println!("  Receiving parties:  {:>6}", ds.receiving_parties.len());
    println!("  Fact rows:          {:>6}", tables.fact.len());

    print_section("DISTRIBUTION OF DELAYS");
    let delays = &tables.delay_distribution;
    let min = delays.iter().min().copied().unwrap_or(0);
    let max = delays.iter().max().copied().unwrap_or(0);
    let mean = delays.iter().sum::<i64>() as f64 / delays.len().max(1) as f64;
    println!("  Min: {}  Max: {}  Mean: {:.2} days", min, max, mean);
    println!("  Values: {:?}", delays);

    print_section("AVERAGE DELAY PER ROUTE");
    for row in &tables.average_delay_per_route {
        let bar = "#".repeat(row.average_delay_days.max(0.0).round() as usize);
        println!("  {:8} {:>10.2}  {}", row.route_id, row.average_delay_days, bar);
    }

    print_section("VEHICLES AND AVERAGE DELAYS");
    println!("  {:8} {:>10} {:>10}", "Vehicle", "Mileage", "Avg Delay");
    for row in &tables.average_delay_per_vehicle {
        println!(
            "  {:8} {:>10} {:>10.2}",
            row.vehicle_id, row.vehicle_mileage, row.average_delay_days
        );
    }

    print_section("ROUTE LENGTH VS AVERAGE DELAY");
    for row in &tables.route_length_delays {
        println!("  {:>5} {:>10.2}", row.route_length, row.average_delay_days);
    }

    print_section("PRODUCTS PER WAREHOUSE");
    for row in &tables.warehouse_product_counts {
        println!("  {:18} {:>6}", row.warehouse_name, row.product_count);
    }

    print_section(&format!("DELIVERIES FOR {}", args.vehicle));
    let deliveries = tables.deliveries_for_vehicle(&args.vehicle);
    if deliveries.is_empty() {
        println!("  (no deliveries)");
    }
    for row in deliveries {
        println!(
            "  {:8} {:10} {:24} {} -> {} {:>4}",
            row.route_id,
            row.receiver_id,
            row.receiver_name,
            row.date_promised,
            row.date_received,
            row.delay_days
        );
    }

    println!("\n{}", "=".repeat(60));
    Ok(())
}
