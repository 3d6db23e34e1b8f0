//! Value pools for synthetic entity generation
//! Static lexicons sampled by the generators when filling categorical fields

use serde::{Deserialize, Serialize};

/// Warehouse display names (sampled with replacement, so names repeat)
pub const WAREHOUSE_NAMES: &[&str] = &[
    "North Hub",
    "East Depot",
    "South Terminal",
    "West Yard",
    "Central Storage",
];

/// Warehouse managers
pub const MANAGERS: &[&str] = &[
    "Alice Johnson",
    "Bob Smith",
    "Carlos Martinez",
    "Diana Wu",
    "Ethan Patel",
];

/// Product lexicon
pub const PRODUCT_NAMES: &[&str] = &[
    "Canned Beans",
    "Toilet Paper",
    "LED Bulb",
    "Wrench Set",
    "Notebook",
    "Shampoo",
    "Cleaning Spray",
    "Box of Nails",
    "Chocolate Bar",
    "Energy Drink",
];

/// Route names, assigned to routes in order
pub const ROUTE_NAMES: &[&str] = &[
    "Coastal Loop",
    "Desert Express",
    "Mountain Trail",
    "Valley Run",
    "Metro Circuit",
];

/// Route endpoints
pub const CITIES: &[&str] = &[
    "San Diego",
    "Los Angeles",
    "Phoenix",
    "Las Vegas",
    "Tucson",
    "Santa Barbara",
    "Riverside",
];

/// The set of lexicons a generation run draws from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuePools {
    pub warehouse_names: Vec<String>,
    pub managers: Vec<String>,
    pub product_names: Vec<String>,
    pub route_names: Vec<String>,
    pub cities: Vec<String>,
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

impl Default for ValuePools {
    fn default() -> Self {
        Self {
            warehouse_names: owned(WAREHOUSE_NAMES),
            managers: owned(MANAGERS),
            product_names: owned(PRODUCT_NAMES),
            route_names: owned(ROUTE_NAMES),
            cities: owned(CITIES),
        }
    }
}

impl ValuePools {
    /// Name of the first empty pool, if any
    pub fn first_empty(&self) -> Option<&'static str> {
        [
            ("warehouse_names", &self.warehouse_names),
            ("managers", &self.managers),
            ("product_names", &self.product_names),
            ("route_names", &self.route_names),
            ("cities", &self.cities),
        ]
        .into_iter()
        .find(|(_, pool)| pool.is_empty())
        .map(|(name, _)| name)
    }

    /// Route name for the route at `index`, cycling through the pool
    pub fn route_name(&self, index: usize) -> Option<&str> {
        let len = self.route_names.len().max(1);
        self.route_names.get(index % len).map(String::as_str)
    }
}
