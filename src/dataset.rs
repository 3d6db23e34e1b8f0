//! One generation run: every entity table plus the vehicle/route junction

use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::generators;
use crate::models::{Employee, Product, ReceivingParty, Route, Vehicle, VehicleRoute, Warehouse};
use crate::relationships;

/// All generated tables, immutable once built
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub generated_on: NaiveDate,
    pub warehouses: Vec<Warehouse>,
    pub employees: Vec<Employee>,
    pub products: Vec<Product>,
    pub vehicles: Vec<Vehicle>,
    pub routes: Vec<Route>,
    pub vehicle_routes: Vec<VehicleRoute>,
    pub receiving_parties: Vec<ReceivingParty>,
}

impl Dataset {
    /// Generate every table, parents before children
    pub fn generate(
        config: &GeneratorConfig,
        today: NaiveDate,
        rng: &mut impl Rng,
    ) -> Result<Self> {
        config.validate()?;
        let counts = &config.counts;

        let warehouses = generators::generate_warehouses(config, rng)?;
        let warehouse_ids: Vec<String> =
            warehouses.iter().map(|w| w.warehouse_id.clone()).collect();

        let employer_ids =
            relationships::sample_keys(&warehouse_ids, counts.employees, "warehouses", rng)?;
        let employees = generators::generate_employees(config, today, employer_ids, rng);

        let stock_ids =
            relationships::sample_keys(&warehouse_ids, counts.products, "warehouses", rng)?;
        let products = generators::generate_products(config, today, stock_ids, rng)?;

        let employee_ids: Vec<String> = employees.iter().map(|e| e.employee_id.clone()).collect();
        let driver_ids = relationships::pair_one_to_one(counts.vehicles, &employee_ids)?;
        let vehicles = generators::generate_vehicles(config, driver_ids, rng);

        let routes = generators::generate_routes(config, rng)?;
        let route_ids: Vec<String> = routes.iter().map(|r| r.route_id.clone()).collect();
        let vehicle_routes = relationships::assign_vehicle_routes(&vehicles, &route_ids, rng)?;

        let receiver_routes =
            relationships::sample_keys(&route_ids, counts.receiving_parties, "routes", rng)?;
        let receiving_parties =
            generators::generate_receiving_parties(config, today, receiver_routes, rng);

        debug!(
            warehouses = warehouses.len(),
            employees = employees.len(),
            products = products.len(),
            vehicles = vehicles.len(),
            routes = routes.len(),
            receiving_parties = receiving_parties.len(),
            "Generated entity tables"
        );
        info!("Generated synthetic dataset for {}", today);

        Ok(Self {
            generated_on: today,
            warehouses,
            employees,
            products,
            vehicles,
            routes,
            vehicle_routes,
            receiving_parties,
        })
    }

    /// Delay of every receiving party, in table order (box plot input)
    pub fn delay_distribution(&self) -> Vec<i64> {
        self.receiving_parties.iter().map(ReceivingParty::delay_days).collect()
    }

    /// Check primary-key uniqueness and foreign-key resolution
    ///
    /// Returns one message per violation; empty when the tables are consistent.
    pub fn integrity_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();

        let warehouse_ids = unique_keys(
            "warehouses",
            self.warehouses.iter().map(|w| w.warehouse_id.as_str()),
            &mut violations,
        );
        let employee_ids = unique_keys(
            "employees",
            self.employees.iter().map(|e| e.employee_id.as_str()),
            &mut violations,
        );
        unique_keys(
            "products",
            self.products.iter().map(|p| p.product_id.as_str()),
            &mut violations,
        );
        let vehicle_ids = unique_keys(
            "vehicles",
            self.vehicles.iter().map(|v| v.vehicle_id.as_str()),
            &mut violations,
        );
        let route_ids = unique_keys(
            "routes",
            self.routes.iter().map(|r| r.route_id.as_str()),
            &mut violations,
        );
        unique_keys(
            "receiving_parties",
            self.receiving_parties.iter().map(|p| p.receiver_id.as_str()),
            &mut violations,
        );

        for e in &self.employees {
            resolve_key(&mut violations, "employees", &e.warehouse_id, &warehouse_ids);
        }
        for p in &self.products {
            resolve_key(&mut violations, "products", &p.warehouse_id, &warehouse_ids);
        }
        for v in &self.vehicles {
            resolve_key(&mut violations, "vehicles", &v.employee_id, &employee_ids);
        }
        for vr in &self.vehicle_routes {
            resolve_key(&mut violations, "vehicle_routes", &vr.vehicle_id, &vehicle_ids);
            resolve_key(&mut violations, "vehicle_routes", &vr.route_id, &route_ids);
        }
        for p in &self.receiving_parties {
            resolve_key(&mut violations, "receiving_parties", &p.route_id, &route_ids);
        }

        violations
    }
}

fn resolve_key(violations: &mut Vec<String>, table: &str, key: &str, parents: &HashSet<&str>) {
    if !parents.contains(key) {
        violations.push(format!("{}: dangling foreign key {}", table, key));
    }
}

fn unique_keys<'a>(
    table: &str,
    keys: impl Iterator<Item = &'a str>,
    violations: &mut Vec<String>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            violations.push(format!("{}: duplicate primary key {}", table, key));
        }
    }
    seen
}
