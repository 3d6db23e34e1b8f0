use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Storage site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Warehouse {
    #[serde(rename = "WarehouseID")]
    pub warehouse_id: String,
    pub warehouse_name: String,
    pub warehouse_manager: String,
}

/// Warehouse staff member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Employee {
    #[serde(rename = "EmployeeID")]
    pub employee_id: String,
    pub employee_name: String,
    pub employee_start_date: NaiveDate,
    #[serde(rename = "WarehouseID")]
    pub warehouse_id: String,
}

/// Stocked product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    #[serde(rename = "ProductID")]
    pub product_id: String,
    pub product_name: String,
    pub product_expiration: NaiveDate,
    #[serde(rename = "WarehouseID")]
    pub warehouse_id: String,
}

/// Delivery vehicle, driven by exactly one employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Vehicle {
    #[serde(rename = "VehicleID")]
    pub vehicle_id: String,
    pub vehicle_name: String,
    pub vehicle_mileage: u32,
    #[serde(rename = "EmployeeID")]
    pub employee_id: String,
}

/// Delivery route between two cities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Route {
    #[serde(rename = "RouteID")]
    pub route_id: String,
    pub route_name: String,
    pub route_length: u32,
    pub origin: String,
    pub destination: String,
}

/// Junction row: vehicle assigned to a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRoute {
    #[serde(rename = "VehicleID")]
    pub vehicle_id: String,
    #[serde(rename = "RouteID")]
    pub route_id: String,
}

/// Customer awaiting a delivery on a route
///
/// The delay is always computed from the two dates; it is exported as the
/// `DelayDays` column but cannot be set directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "ReceivingPartyRecord")]
pub struct ReceivingParty {
    pub receiver_id: String,
    pub receiver_name: String,
    pub date_promised: NaiveDate,
    pub date_received: NaiveDate,
    pub route_id: String,
}

impl ReceivingParty {
    /// Days between promise and receipt; negative when received early
    pub fn delay_days(&self) -> i64 {
        (self.date_received - self.date_promised).num_days()
    }
}

/// Export shape of a receiving party, with the derived delay column
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReceivingPartyRecord {
    #[serde(rename = "ReceiverID")]
    pub receiver_id: String,
    pub receiver_name: String,
    pub date_promised: NaiveDate,
    pub date_received: NaiveDate,
    #[serde(rename = "RouteID")]
    pub route_id: String,
    pub delay_days: i64,
}

impl From<ReceivingParty> for ReceivingPartyRecord {
    fn from(p: ReceivingParty) -> Self {
        let delay_days = p.delay_days();
        Self {
            receiver_id: p.receiver_id,
            receiver_name: p.receiver_name,
            date_promised: p.date_promised,
            date_received: p.date_received,
            route_id: p.route_id,
            delay_days,
        }
    }
}

/// Denormalized vehicle × route × receiving-party row
///
/// Route columns are optional: the vehicle/route junction is left-joined to
/// the route table, so a dangling route id keeps its row with no route data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FactRow {
    #[serde(rename = "VehicleID")]
    pub vehicle_id: String,
    #[serde(rename = "RouteID")]
    pub route_id: String,
    pub route_name: Option<String>,
    pub route_length: Option<u32>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub vehicle_name: String,
    pub vehicle_mileage: u32,
    #[serde(rename = "EmployeeID")]
    pub employee_id: String,
    #[serde(rename = "ReceiverID")]
    pub receiver_id: String,
    pub receiver_name: String,
    pub date_promised: NaiveDate,
    pub date_received: NaiveDate,
    pub delay_days: i64,
}

/// Bar chart row: average delay per route
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RouteDelay {
    #[serde(rename = "RouteID")]
    pub route_id: String,
    pub average_delay_days: f64,
}

/// Bar chart row: average delay per vehicle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VehicleDelay {
    #[serde(rename = "VehicleID")]
    pub vehicle_id: String,
    pub vehicle_mileage: u32,
    #[serde(rename = "DelayDays")]
    pub average_delay_days: f64,
}

/// Line chart point: average delay per route length
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RouteLengthDelay {
    pub route_length: u32,
    #[serde(rename = "DelayDays")]
    pub average_delay_days: f64,
}

/// Bar chart row: products stocked under a warehouse name
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct WarehouseProductCount {
    pub warehouse_name: String,
    pub product_count: usize,
}
