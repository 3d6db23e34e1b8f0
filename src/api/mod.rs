//! API module for the logistics dashboard
//!
//! Serves the finished tables as JSON to the external presentation layer.

pub mod handlers;
pub mod service;

pub use service::DashboardService;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn create_router(service: Arc<DashboardService>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(handlers::health))
        .route("/api/v1/dashboard", get(handlers::get_dashboard))
        // Chart tables
        .route("/api/v1/delays/distribution", get(handlers::get_delay_distribution))
        .route("/api/v1/delays/routes", get(handlers::get_route_delays))
        .route("/api/v1/delays/vehicles", get(handlers::get_vehicle_delays))
        .route("/api/v1/delays/route-lengths", get(handlers::get_route_length_delays))
        .route("/api/v1/warehouses/products", get(handlers::get_warehouse_products))
        .route("/api/v1/vehicles/:id/deliveries", get(handlers::get_vehicle_deliveries))
        .route("/api/v1/logo", get(handlers::get_logo))
        // State and middleware
        .with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::LogoAsset;
    use crate::config::{GeneratorConfig, TableCounts};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use chrono::NaiveDate;
    use std::path::PathBuf;
    use tower::ServiceExt;

    fn service() -> DashboardService {
        let config = GeneratorConfig::with_counts(TableCounts {
            routes: 1,
            ..TableCounts::default()
        })
        .unwrap();
        DashboardService::new(config, 42).with_today(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let app = create_router(Arc::new(service()));
        let (status, json) = get_json(app, "/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_dashboard_uses_session_seed() {
        let app = create_router(Arc::new(service()));
        let (status, json) = get_json(app, "/api/v1/dashboard").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["seed"], 42);
        assert_eq!(json["last_updated"], "15 June 2024");
        assert_eq!(json["delay_distribution"]["count"], 15);
        assert_eq!(json["average_delay_per_route"][0]["RouteID"], "R5000");
    }

    #[tokio::test]
    async fn test_reload_is_memoized() {
        let service = Arc::new(service());
        let app = create_router(Arc::clone(&service));

        let (_, first) = get_json(app.clone(), "/api/v1/delays/routes").await;
        let (_, second) = get_json(app.clone(), "/api/v1/delays/routes").await;
        assert_eq!(first, second);
        assert_eq!(service.cached_dashboards().await, 1);

        let (status, _) = get_json(app, "/api/v1/delays/routes?seed=7").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(service.cached_dashboards().await, 2);
    }

    #[tokio::test]
    async fn test_chart_tables() {
        let app = create_router(Arc::new(service()));

        let (status, vehicles) = get_json(app.clone(), "/api/v1/delays/vehicles").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(vehicles.as_array().unwrap().len(), 20);

        let (_, lengths) = get_json(app.clone(), "/api/v1/delays/route-lengths").await;
        assert_eq!(lengths.as_array().unwrap().len(), 1);

        let (_, warehouses) = get_json(app, "/api/v1/warehouses/products").await;
        let total: u64 = warehouses
            .as_array()
            .unwrap()
            .iter()
            .map(|w| w["ProductCount"].as_u64().unwrap())
            .sum();
        assert_eq!(total, 25);
    }

    #[tokio::test]
    async fn test_vehicle_deliveries() {
        let app = create_router(Arc::new(service()));

        let (status, json) = get_json(app.clone(), "/api/v1/vehicles/V4006/deliveries").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["vehicle_id"], "V4006");
        assert_eq!(json["deliveries"].as_array().unwrap().len(), 15);

        let (status, _) = get_json(app, "/api/v1/vehicles/V9999/deliveries").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_empty_join_is_reported() {
        let config = GeneratorConfig::with_counts(TableCounts {
            receiving_parties: 0,
            ..TableCounts::default()
        })
        .unwrap();
        let app = create_router(Arc::new(DashboardService::new(config, 1)));

        let (status, json) = get_json(app, "/api/v1/dashboard").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json["error"].as_str().unwrap().contains("empty"));
    }

    #[tokio::test]
    async fn test_logo() {
        let app = create_router(Arc::new(service()));
        let (status, _) = get_json(app, "/api/v1/logo").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let logo = LogoAsset {
            path: PathBuf::from("BLC_LOGO.jpg"),
            content_type: "image/jpeg",
            bytes: vec![0xFF, 0xD8, 0xFF],
        };
        let app = create_router(Arc::new(service().with_logo(logo)));
        let response = app
            .oneshot(Request::builder().uri("/api/v1/logo").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/jpeg");
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body.as_ref(), &[0xFF, 0xD8, 0xFF]);
    }
}
