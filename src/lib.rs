//! Synthetic logistics data and delay aggregates for a single-page dashboard
//!
//! Generation ([`dataset`]) produces warehouses, employees, products,
//! vehicles, routes and receiving parties; the [`pipeline`] joins them and
//! computes the delay statistics bundled in [`dashboard::DashboardTables`].

pub mod api;
pub mod assets;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod export;
pub mod generators;
pub mod models;
pub mod pipeline;
pub mod relationships;
pub mod value_pools;

pub use config::GeneratorConfig;
pub use dashboard::DashboardTables;
pub use error::{ConfigError, DashboardError};
