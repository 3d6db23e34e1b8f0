//! Foreign-key assignment between generated tables
//!
//! Children always sample from the parent's already generated key list, so
//! every assigned key resolves.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{ConfigError, DashboardError, Result};
use crate::models::{Vehicle, VehicleRoute};

/// Uniformly pick one parent key
pub fn sample_key<'a>(
    keys: &'a [String],
    parent: &'static str,
    rng: &mut impl Rng,
) -> Result<&'a str> {
    keys.choose(rng)
        .map(String::as_str)
        .ok_or(DashboardError::NoParentKeys { parent })
}

/// Uniformly pick `count` parent keys, with replacement
pub fn sample_keys(
    keys: &[String],
    count: usize,
    parent: &'static str,
    rng: &mut impl Rng,
) -> Result<Vec<String>> {
    if count == 0 {
        return Ok(Vec::new());
    }
    (0..count)
        .map(|_| sample_key(keys, parent, rng).map(str::to_string))
        .collect()
}

/// Pair the i-th child with the i-th parent key
pub fn pair_one_to_one(child_count: usize, parent_keys: &[String]) -> Result<Vec<String>> {
    if child_count != parent_keys.len() {
        return Err(ConfigError::VehicleEmployeeMismatch {
            vehicles: child_count,
            employees: parent_keys.len(),
        }
        .into());
    }
    Ok(parent_keys.to_vec())
}

/// Build the vehicle/route junction: one sampled route per vehicle
///
/// Routes are sampled with replacement, so a route may carry many vehicles or
/// none at all.
pub fn assign_vehicle_routes(
    vehicles: &[Vehicle],
    route_ids: &[String],
    rng: &mut impl Rng,
) -> Result<Vec<VehicleRoute>> {
    vehicles
        .iter()
        .map(|vehicle| -> Result<VehicleRoute> {
            let route_id = sample_key(route_ids, "routes", rng)?;
            Ok(VehicleRoute {
                vehicle_id: vehicle.vehicle_id.clone(),
                route_id: route_id.to_string(),
            })
        })
        .collect()
}
