//! Chart-ready tables and memoized generation
//!
//! [`DashboardTables::generate`] is a pure function of (config, seed,
//! reference date): the seed drives a `StdRng`, so the same key always yields
//! the same tables. [`GenerationCache`] memoizes it for repeated dashboard
//! loads within a session.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::GeneratorConfig;
use crate::dataset::Dataset;
use crate::error::{DashboardError, Result};
use crate::models::{FactRow, RouteDelay, RouteLengthDelay, VehicleDelay, WarehouseProductCount};
use crate::pipeline;

/// Everything the presentation layer needs for one dashboard load
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardTables {
    /// Reference date, shown as "last updated"
    pub generated_on: NaiveDate,
    pub seed: u64,
    /// Box plot: DelayDays of every receiving party
    pub delay_distribution: Vec<i64>,
    pub average_delay_per_route: Vec<RouteDelay>,
    pub average_delay_per_vehicle: Vec<VehicleDelay>,
    pub route_length_delays: Vec<RouteLengthDelay>,
    pub warehouse_product_counts: Vec<WarehouseProductCount>,
    #[serde(skip)]
    pub fact: Vec<FactRow>,
    #[serde(skip)]
    pub dataset: Dataset,
}

impl DashboardTables {
    /// Generate a dataset from `seed` and aggregate it
    pub fn generate(config: &GeneratorConfig, seed: u64, today: NaiveDate) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let dataset = Dataset::generate(config, today, &mut rng)?;
        Self::build(dataset, seed)
    }

    /// Run the join/aggregate pipeline over an existing dataset
    ///
    /// Fails when the joins leave a chart with nothing to draw.
    pub fn build(dataset: Dataset, seed: u64) -> Result<Self> {
        let fact = pipeline::build_fact_table(
            &dataset.vehicle_routes,
            &dataset.routes,
            &dataset.vehicles,
            &dataset.receiving_parties,
        );
        if fact.is_empty() {
            warn!("Vehicle/route/receiving-party join produced no rows");
            return Err(DashboardError::EmptyTable("fact"));
        }

        let warehouse_product_counts =
            pipeline::warehouse_product_counts(&dataset.warehouses, &dataset.products);
        if warehouse_product_counts.is_empty() {
            warn!("Warehouse/product join produced no rows");
            return Err(DashboardError::EmptyTable("warehouse_product_counts"));
        }

        let tables = Self {
            generated_on: dataset.generated_on,
            seed,
            delay_distribution: dataset.delay_distribution(),
            average_delay_per_route: pipeline::average_delay_per_route(&fact),
            average_delay_per_vehicle: pipeline::average_delay_per_vehicle(&fact),
            route_length_delays: pipeline::average_delay_per_route_length(&fact),
            warehouse_product_counts,
            fact,
            dataset,
        };
        debug!(
            fact_rows = tables.fact.len(),
            routes = tables.average_delay_per_route.len(),
            vehicles = tables.average_delay_per_vehicle.len(),
            "Aggregated dashboard tables"
        );
        Ok(tables)
    }

    /// Fact rows for one vehicle
    pub fn deliveries_for_vehicle(&self, vehicle_id: &str) -> Vec<&FactRow> {
        pipeline::fact_rows_for_vehicle(&self.fact, vehicle_id)
    }
}

/// Seed for runs that were not given one
pub fn session_seed() -> u64 {
    StdRng::from_entropy().gen()
}

/// Memo key: the complete input of [`DashboardTables::generate`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenerationKey {
    pub config: GeneratorConfig,
    pub seed: u64,
    pub today: NaiveDate,
}

/// Bounded memo of generated dashboards, oldest entry evicted first
#[derive(Debug)]
pub struct GenerationCache {
    entries: HashMap<GenerationKey, Arc<DashboardTables>>,
    order: VecDeque<GenerationKey>,
    capacity: usize,
}

impl GenerationCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn get(&self, key: &GenerationKey) -> Option<Arc<DashboardTables>> {
        self.entries.get(key).cloned()
    }

    pub fn get_or_generate(&mut self, key: GenerationKey) -> Result<Arc<DashboardTables>> {
        if let Some(tables) = self.get(&key) {
            debug!(seed = key.seed, "Dashboard cache hit");
            return Ok(tables);
        }

        let tables = Arc::new(DashboardTables::generate(&key.config, key.seed, key.today)?);
        info!(seed = key.seed, today = %key.today, "Generated dashboard tables");

        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, Arc::clone(&tables));
        Ok(tables)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for GenerationCache {
    fn default() -> Self {
        Self::new(16)
    }
}
