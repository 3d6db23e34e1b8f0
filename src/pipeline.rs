//! Join and aggregate pipeline
//!
//! Builds the denormalized fact table (vehicle × route × receiving party) and
//! the grouped delay statistics the dashboard charts consume. Everything here
//! is a pure function of its input tables.
//!
//! Join order:
//! 1. vehicle_routes LEFT JOIN routes ON RouteID
//! 2. INNER JOIN vehicles ON VehicleID
//! 3. INNER JOIN receiving_parties ON RouteID
//!
//! Inner joins drop unmatched keys, so a route without receiving parties (or
//! without vehicles) never shows up in any delay aggregate.

use std::collections::{BTreeMap, HashMap};

use crate::models::{
    FactRow, Product, ReceivingParty, Route, RouteDelay, RouteLengthDelay, Vehicle, VehicleDelay,
    VehicleRoute, Warehouse, WarehouseProductCount,
};

/// Running arithmetic mean
#[derive(Debug, Default, Clone, Copy)]
struct Mean {
    sum: i64,
    count: usize,
}

impl Mean {
    fn push(&mut self, value: i64) {
        self.sum += value;
        self.count += 1;
    }

    fn value(&self) -> f64 {
        self.sum as f64 / self.count as f64
    }
}

/// Group `rows` by `key` and average their delay; keys come out sorted
fn mean_delay_by<K: Ord>(
    rows: &[FactRow],
    key: impl Fn(&FactRow) -> Option<K>,
) -> BTreeMap<K, f64> {
    let mut groups: BTreeMap<K, Mean> = BTreeMap::new();
    for row in rows {
        if let Some(k) = key(row) {
            groups.entry(k).or_default().push(row.delay_days);
        }
    }
    groups.into_iter().map(|(k, m)| (k, m.value())).collect()
}

/// Index rows by key, preserving their original order within each key
fn index_by<'a, T>(rows: &'a [T], key: impl Fn(&T) -> &str) -> HashMap<&'a str, Vec<&'a T>> {
    let mut index: HashMap<&str, Vec<&T>> = HashMap::new();
    for row in rows {
        index.entry(key(row)).or_default().push(row);
    }
    index
}

/// Build the fact table
///
/// Row order follows the junction table; each junction row expands into one
/// row per receiving party on its route, in receiving-party order.
pub fn build_fact_table(
    vehicle_routes: &[VehicleRoute],
    routes: &[Route],
    vehicles: &[Vehicle],
    receiving_parties: &[ReceivingParty],
) -> Vec<FactRow> {
    let routes_by_id: HashMap<&str, &Route> =
        routes.iter().map(|r| (r.route_id.as_str(), r)).collect();
    let vehicles_by_id = index_by(vehicles, |v| v.vehicle_id.as_str());
    let parties_by_route = index_by(receiving_parties, |p| p.route_id.as_str());

    let mut fact = Vec::new();
    for link in vehicle_routes {
        // Left join: a missing route keeps the row with empty route columns
        let route = routes_by_id.get(link.route_id.as_str()).copied();

        let Some(matched_vehicles) = vehicles_by_id.get(link.vehicle_id.as_str()) else {
            continue;
        };
        let Some(parties) = parties_by_route.get(link.route_id.as_str()) else {
            continue;
        };

        for vehicle in matched_vehicles {
            for party in parties {
                fact.push(FactRow {
                    vehicle_id: link.vehicle_id.clone(),
                    route_id: link.route_id.clone(),
                    route_name: route.map(|r| r.route_name.clone()),
                    route_length: route.map(|r| r.route_length),
                    origin: route.map(|r| r.origin.clone()),
                    destination: route.map(|r| r.destination.clone()),
                    vehicle_name: vehicle.vehicle_name.clone(),
                    vehicle_mileage: vehicle.vehicle_mileage,
                    employee_id: vehicle.employee_id.clone(),
                    receiver_id: party.receiver_id.clone(),
                    receiver_name: party.receiver_name.clone(),
                    date_promised: party.date_promised,
                    date_received: party.date_received,
                    delay_days: party.delay_days(),
                });
            }
        }
    }
    fact
}

/// Mean delay per RouteID
pub fn average_delay_per_route(fact: &[FactRow]) -> Vec<RouteDelay> {
    mean_delay_by(fact, |row| Some(row.route_id.clone()))
        .into_iter()
        .map(|(route_id, average_delay_days)| RouteDelay {
            route_id,
            average_delay_days,
        })
        .collect()
}

/// Mean delay per (VehicleID, VehicleMileage)
pub fn average_delay_per_vehicle(fact: &[FactRow]) -> Vec<VehicleDelay> {
    mean_delay_by(fact, |row| Some((row.vehicle_id.clone(), row.vehicle_mileage)))
        .into_iter()
        .map(|((vehicle_id, vehicle_mileage), average_delay_days)| VehicleDelay {
            vehicle_id,
            vehicle_mileage,
            average_delay_days,
        })
        .collect()
}

/// Mean delay per RouteLength, ascending; rows with no route data are skipped
pub fn average_delay_per_route_length(fact: &[FactRow]) -> Vec<RouteLengthDelay> {
    mean_delay_by(fact, |row| row.route_length)
        .into_iter()
        .map(|(route_length, average_delay_days)| RouteLengthDelay {
            route_length,
            average_delay_days,
        })
        .collect()
}

/// Products per warehouse name
///
/// Warehouses are joined to products on WarehouseID and grouped by NAME, so
/// two warehouses sharing a name are counted together. Warehouses with no
/// products are dropped by the inner join.
pub fn warehouse_product_counts(
    warehouses: &[Warehouse],
    products: &[Product],
) -> Vec<WarehouseProductCount> {
    let products_by_warehouse = index_by(products, |p| p.warehouse_id.as_str());

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for warehouse in warehouses {
        if let Some(stocked) = products_by_warehouse.get(warehouse.warehouse_id.as_str()) {
            *counts.entry(warehouse.warehouse_name.as_str()).or_insert(0) += stocked.len();
        }
    }

    counts
        .into_iter()
        .map(|(name, product_count)| WarehouseProductCount {
            warehouse_name: name.to_string(),
            product_count,
        })
        .collect()
}

/// Fact rows of one vehicle, in fact-table order
pub fn fact_rows_for_vehicle<'a>(fact: &'a [FactRow], vehicle_id: &str) -> Vec<&'a FactRow> {
    fact.iter().filter(|row| row.vehicle_id == vehicle_id).collect()
}
