//! Error types for generation, aggregation and asset loading

use std::path::PathBuf;
use thiserror::Error;

/// Rejected generation settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("vehicle count ({vehicles}) must equal employee count ({employees}) for 1:1 assignment")]
    VehicleEmployeeMismatch { vehicles: usize, employees: usize },

    #[error("cannot generate {child} without any {parent}")]
    EmptyParent {
        child: &'static str,
        parent: &'static str,
    },

    #[error("value pool '{0}' is empty")]
    EmptyPool(&'static str),

    #[error("date window '{name}' starts after it ends ({start} > {end} days)")]
    InvertedWindow {
        name: &'static str,
        start: i64,
        end: i64,
    },

    #[error("date window '{name}' ({start}..={end} days) exceeds the {limit}-day limit")]
    WindowOutOfBounds {
        name: &'static str,
        start: i64,
        end: i64,
        limit: i64,
    },

    #[error("range '{name}' has min {min} above max {max}")]
    InvertedRange {
        name: &'static str,
        min: u32,
        max: u32,
    },

    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures surfaced by the dashboard pipeline
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("invalid generator config: {0}")]
    Config(#[from] ConfigError),

    #[error("no {parent} keys to sample from")]
    NoParentKeys { parent: &'static str },

    #[error("table '{0}' is empty after joins")]
    EmptyTable(&'static str),

    #[error("failed to write {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to load asset {}: {source}", path.display())]
    Asset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = DashboardError> = std::result::Result<T, E>;
