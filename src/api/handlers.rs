//! REST API handlers for the dashboard tables
//!
//! These handlers use the shared DashboardService.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::service::DashboardService;
use crate::dashboard::DashboardTables;
use crate::error::DashboardError;
use crate::models::{FactRow, RouteDelay, RouteLengthDelay, VehicleDelay, WarehouseProductCount};

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct DashboardResponse {
    pub last_updated: String,
    pub seed: u64,
    pub delay_distribution: DelayDistributionResponse,
    pub average_delay_per_route: Vec<RouteDelay>,
    pub average_delay_per_vehicle: Vec<VehicleDelay>,
    pub route_length_delays: Vec<RouteLengthDelay>,
    pub warehouse_product_counts: Vec<WarehouseProductCount>,
}

impl From<&DashboardTables> for DashboardResponse {
    fn from(t: &DashboardTables) -> Self {
        Self {
            last_updated: t.generated_on.format("%d %B %Y").to_string(),
            seed: t.seed,
            delay_distribution: DelayDistributionResponse::from_values(&t.delay_distribution),
            average_delay_per_route: t.average_delay_per_route.clone(),
            average_delay_per_vehicle: t.average_delay_per_vehicle.clone(),
            route_length_delays: t.route_length_delays.clone(),
            warehouse_product_counts: t.warehouse_product_counts.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct DelayDistributionResponse {
    pub values: Vec<i64>,
    pub count: usize,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub mean: Option<f64>,
}

impl DelayDistributionResponse {
    fn from_values(values: &[i64]) -> Self {
        let mean = if values.is_empty() {
            None
        } else {
            Some(values.iter().sum::<i64>() as f64 / values.len() as f64)
        };
        Self {
            values: values.to_vec(),
            count: values.len(),
            min: values.iter().min().copied(),
            max: values.iter().max().copied(),
            mean,
        }
    }
}

#[derive(Serialize)]
pub struct DeliveriesResponse {
    pub vehicle_id: String,
    pub deliveries: Vec<FactRow>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Query Parameters
// ============================================================================

#[derive(Deserialize)]
pub struct SeedQuery {
    pub seed: Option<u64>,
}

// ============================================================================
// Handlers
// ============================================================================

pub type AppState = Arc<DashboardService>;

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn error_response(e: DashboardError) -> HandlerError {
    let status = match e {
        DashboardError::EmptyTable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    tracing::error!("Dashboard request failed: {}", e);
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

async fn load(
    service: &DashboardService,
    seed: Option<u64>,
) -> Result<Arc<DashboardTables>, HandlerError> {
    service.dashboard(seed).await.map_err(error_response)
}

/// GET /api/v1/health
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

/// GET /api/v1/dashboard
pub async fn get_dashboard(
    State(service): State<AppState>,
    Query(params): Query<SeedQuery>,
) -> Result<Json<DashboardResponse>, HandlerError> {
    let tables = load(&service, params.seed).await?;
    Ok(Json(DashboardResponse::from(tables.as_ref())))
}

/// GET /api/v1/delays/distribution
pub async fn get_delay_distribution(
    State(service): State<AppState>,
    Query(params): Query<SeedQuery>,
) -> Result<Json<DelayDistributionResponse>, HandlerError> {
    let tables = load(&service, params.seed).await?;
    Ok(Json(DelayDistributionResponse::from_values(&tables.delay_distribution)))
}

/// GET /api/v1/delays/routes
pub async fn get_route_delays(
    State(service): State<AppState>,
    Query(params): Query<SeedQuery>,
) -> Result<Json<Vec<RouteDelay>>, HandlerError> {
    let tables = load(&service, params.seed).await?;
    Ok(Json(tables.average_delay_per_route.clone()))
}

/// GET /api/v1/delays/vehicles
pub async fn get_vehicle_delays(
    State(service): State<AppState>,
    Query(params): Query<SeedQuery>,
) -> Result<Json<Vec<VehicleDelay>>, HandlerError> {
    let tables = load(&service, params.seed).await?;
    Ok(Json(tables.average_delay_per_vehicle.clone()))
}

/// GET /api/v1/delays/route-lengths
pub async fn get_route_length_delays(
    State(service): State<AppState>,
    Query(params): Query<SeedQuery>,
) -> Result<Json<Vec<RouteLengthDelay>>, HandlerError> {
    let tables = load(&service, params.seed).await?;
    Ok(Json(tables.route_length_delays.clone()))
}

/// GET /api/v1/warehouses/products
pub async fn get_warehouse_products(
    State(service): State<AppState>,
    Query(params): Query<SeedQuery>,
) -> Result<Json<Vec<WarehouseProductCount>>, HandlerError> {
    let tables = load(&service, params.seed).await?;
    Ok(Json(tables.warehouse_product_counts.clone()))
}

/// GET /api/v1/vehicles/:id/deliveries
pub async fn get_vehicle_deliveries(
    State(service): State<AppState>,
    Path(vehicle_id): Path<String>,
    Query(params): Query<SeedQuery>,
) -> Result<Json<DeliveriesResponse>, HandlerError> {
    let tables = load(&service, params.seed).await?;
    if !tables.dataset.vehicles.iter().any(|v| v.vehicle_id == vehicle_id) {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Vehicle not found: {}", vehicle_id),
            }),
        ));
    }
    let deliveries = tables
        .deliveries_for_vehicle(&vehicle_id)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(DeliveriesResponse { vehicle_id, deliveries }))
}

/// GET /api/v1/logo
pub async fn get_logo(State(service): State<AppState>) -> Response {
    match service.logo() {
        Some(logo) => (
            [(header::CONTENT_TYPE, logo.content_type)],
            logo.bytes.clone(),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "No logo configured".to_string(),
            }),
        )
            .into_response(),
    }
}
