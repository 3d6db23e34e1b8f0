//! Synthetic entity generators
//!
//! Each generator produces `count` rows keyed `<prefix><base + i>` and fills
//! the remaining fields from the value pools, the faker lexicons, or the
//! configured date windows and numeric ranges. Foreign keys come in already
//! sampled (see [`crate::relationships`]).

use chrono::NaiveDate;
use fake::faker::company::en::CompanyName;
use fake::faker::name::en::Name;
use fake::Fake;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::GeneratorConfig;
use crate::error::{ConfigError, Result};
use crate::models::{Employee, Product, ReceivingParty, Route, Vehicle, Warehouse};

pub const WAREHOUSE_ID_BASE: usize = 1000;
pub const EMPLOYEE_ID_BASE: usize = 2000;
pub const PRODUCT_ID_BASE: usize = 3000;
pub const VEHICLE_ID_BASE: usize = 4000;
pub const ROUTE_ID_BASE: usize = 5000;
pub const RECEIVER_ID_BASE: usize = 6000;

/// Synthetic primary key, e.g. `W1003`
pub fn synthetic_id(prefix: &str, base: usize, index: usize) -> String {
    format!("{}{}", prefix, base + index)
}

fn pick(pool: &[String], name: &'static str, rng: &mut impl Rng) -> Result<String> {
    pool.choose(rng)
        .cloned()
        .ok_or_else(|| ConfigError::EmptyPool(name).into())
}

pub fn generate_warehouses(
    config: &GeneratorConfig,
    rng: &mut impl Rng,
) -> Result<Vec<Warehouse>> {
    (0..config.counts.warehouses)
        .map(|i| -> Result<Warehouse> {
            Ok(Warehouse {
                warehouse_id: synthetic_id("W", WAREHOUSE_ID_BASE, i),
                warehouse_name: pick(&config.pools.warehouse_names, "warehouse_names", rng)?,
                warehouse_manager: pick(&config.pools.managers, "managers", rng)?,
            })
        })
        .collect()
}

/// `warehouse_ids[i]` is the employer of the i-th employee
pub fn generate_employees(
    config: &GeneratorConfig,
    today: NaiveDate,
    warehouse_ids: Vec<String>,
    rng: &mut impl Rng,
) -> Vec<Employee> {
    warehouse_ids
        .into_iter()
        .enumerate()
        .map(|(i, warehouse_id)| Employee {
            employee_id: synthetic_id("E", EMPLOYEE_ID_BASE, i),
            employee_name: Name().fake_with_rng(rng),
            employee_start_date: config.employee_start.sample(today, rng),
            warehouse_id,
        })
        .collect()
}

pub fn generate_products(
    config: &GeneratorConfig,
    today: NaiveDate,
    warehouse_ids: Vec<String>,
    rng: &mut impl Rng,
) -> Result<Vec<Product>> {
    warehouse_ids
        .into_iter()
        .enumerate()
        .map(|(i, warehouse_id)| -> Result<Product> {
            Ok(Product {
                product_id: synthetic_id("P", PRODUCT_ID_BASE, i),
                product_name: pick(&config.pools.product_names, "product_names", rng)?,
                product_expiration: config.product_expiration.sample(today, rng),
                warehouse_id,
            })
        })
        .collect()
}

/// `employee_ids[i]` drives the i-th vehicle
pub fn generate_vehicles(
    config: &GeneratorConfig,
    employee_ids: Vec<String>,
    rng: &mut impl Rng,
) -> Vec<Vehicle> {
    employee_ids
        .into_iter()
        .enumerate()
        .map(|(i, employee_id)| Vehicle {
            vehicle_id: synthetic_id("V", VEHICLE_ID_BASE, i),
            vehicle_name: format!("Vehicle{}", i + 1),
            vehicle_mileage: config.mileage.sample(rng),
            employee_id,
        })
        .collect()
}

pub fn generate_routes(config: &GeneratorConfig, rng: &mut impl Rng) -> Result<Vec<Route>> {
    (0..config.counts.routes)
        .map(|i| -> Result<Route> {
            Ok(Route {
                route_id: synthetic_id("R", ROUTE_ID_BASE, i),
                route_name: config
                    .pools
                    .route_name(i)
                    .ok_or(ConfigError::EmptyPool("route_names"))?
                    .to_string(),
                route_length: config.route_length.sample(rng),
                origin: pick(&config.pools.cities, "cities", rng)?,
                destination: pick(&config.pools.cities, "cities", rng)?,
            })
        })
        .collect()
}

/// Promise and receipt dates are drawn independently; receipt before promise
/// is kept as is and yields a negative delay.
pub fn generate_receiving_parties(
    config: &GeneratorConfig,
    today: NaiveDate,
    route_ids: Vec<String>,
    rng: &mut impl Rng,
) -> Vec<ReceivingParty> {
    route_ids
        .into_iter()
        .enumerate()
        .map(|(i, route_id)| ReceivingParty {
            receiver_id: synthetic_id("RCV", RECEIVER_ID_BASE, i),
            receiver_name: CompanyName().fake_with_rng(rng),
            date_promised: config.date_promised.sample(today, rng),
            date_received: config.date_received.sample(today, rng),
            route_id,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_synthetic_id() {
        assert_eq!(synthetic_id("W", WAREHOUSE_ID_BASE, 0), "W1000");
        assert_eq!(synthetic_id("RCV", RECEIVER_ID_BASE, 14), "RCV6014");
    }

    #[test]
    fn test_warehouses_use_pools() {
        let config = GeneratorConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        let warehouses = generate_warehouses(&config, &mut rng).unwrap();

        assert_eq!(warehouses.len(), 10);
        assert_eq!(warehouses[9].warehouse_id, "W1009");
        for w in &warehouses {
            assert!(config.pools.warehouse_names.contains(&w.warehouse_name));
            assert!(config.pools.managers.contains(&w.warehouse_manager));
        }
    }

    #[test]
    fn test_employee_start_dates_in_window() {
        let config = GeneratorConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        let warehouse_ids = vec!["W1000".to_string(); 20];
        let employees = generate_employees(&config, today(), warehouse_ids, &mut rng);

        assert_eq!(employees.len(), 20);
        for e in &employees {
            assert!(!e.employee_name.is_empty());
            assert!(config.employee_start.contains(today(), e.employee_start_date));
        }
    }

    #[test]
    fn test_vehicles_follow_employees() {
        let config = GeneratorConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        let employee_ids: Vec<String> =
            (0..3).map(|i| synthetic_id("E", EMPLOYEE_ID_BASE, i)).collect();
        let vehicles = generate_vehicles(&config, employee_ids.clone(), &mut rng);

        assert_eq!(vehicles.len(), 3);
        assert_eq!(vehicles[0].vehicle_name, "Vehicle1");
        assert_eq!(vehicles[2].vehicle_id, "V4002");
        for (v, e) in vehicles.iter().zip(&employee_ids) {
            assert_eq!(&v.employee_id, e);
            assert!((5_000..=120_000).contains(&v.vehicle_mileage));
        }
    }

    #[test]
    fn test_routes_take_names_in_order() {
        let config = GeneratorConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        let routes = generate_routes(&config, &mut rng).unwrap();

        let names: Vec<&str> = routes.iter().map(|r| r.route_name.as_str()).collect();
        assert_eq!(
            names,
            ["Coastal Loop", "Desert Express", "Mountain Trail", "Valley Run", "Metro Circuit"]
        );
        for r in &routes {
            assert!((50..=300).contains(&r.route_length));
            assert!(config.pools.cities.contains(&r.origin));
            assert!(config.pools.cities.contains(&r.destination));
        }
    }

    #[test]
    fn test_receiving_party_dates_in_windows() {
        let config = GeneratorConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        let route_ids = vec!["R5000".to_string(); 15];
        let parties = generate_receiving_parties(&config, today(), route_ids, &mut rng);

        assert_eq!(parties.len(), 15);
        assert_eq!(parties[0].receiver_id, "RCV6000");
        for p in &parties {
            assert!(config.date_promised.contains(today(), p.date_promised));
            assert!(config.date_received.contains(today(), p.date_received));
            assert!(!p.receiver_name.is_empty());
        }
    }

    #[test]
    fn test_same_seed_same_rows() {
        let config = GeneratorConfig::default();
        let a = generate_routes(&config, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = generate_routes(&config, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }
}
