//! Generation settings
//!
//! `GeneratorConfig` carries everything one generation run needs: row counts,
//! date windows relative to the reference date, numeric ranges and the value
//! pools. It can be loaded from a JSON file where every field is optional.
//! Cross-table invariants (one vehicle per employee, non-empty parents) are
//! checked by [`GeneratorConfig::validate`] before any row is produced.

use chrono::{Duration, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::value_pools::ValuePools;

/// Rows requested per table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TableCounts {
    pub warehouses: usize,
    pub employees: usize,
    pub products: usize,
    pub vehicles: usize,
    pub routes: usize,
    pub receiving_parties: usize,
}

impl Default for TableCounts {
    fn default() -> Self {
        Self {
            warehouses: 10,
            employees: 20,
            products: 25,
            vehicles: 20,
            routes: 5,
            receiving_parties: 15,
        }
    }
}

/// Largest day offset a date window may reach in either direction (100 years)
pub const MAX_WINDOW_DAYS: i64 = 36_525;

/// Inclusive window of day offsets from the reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    pub start_days: i64,
    pub end_days: i64,
}

impl DateWindow {
    pub const fn new(start_days: i64, end_days: i64) -> Self {
        Self { start_days, end_days }
    }

    /// Uniformly sample a date inside the window
    pub fn sample(&self, reference: NaiveDate, rng: &mut impl Rng) -> NaiveDate {
        let offset = rng.gen_range(self.start_days..=self.end_days);
        reference + Duration::days(offset)
    }

    pub fn contains(&self, reference: NaiveDate, date: NaiveDate) -> bool {
        let offset = (date - reference).num_days();
        (self.start_days..=self.end_days).contains(&offset)
    }
}

/// Inclusive integer range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntRange {
    pub min: u32,
    pub max: u32,
}

impl IntRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn sample(&self, rng: &mut impl Rng) -> u32 {
        rng.gen_range(self.min..=self.max)
    }
}

/// Settings for one generation run
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub counts: TableCounts,
    /// Employee start date: within the last 5 years
    pub employee_start: DateWindow,
    /// Product expiration: within the next 3 years
    pub product_expiration: DateWindow,
    /// Promise date: within the last year
    pub date_promised: DateWindow,
    /// Receipt date: within the next 15 days
    pub date_received: DateWindow,
    pub mileage: IntRange,
    pub route_length: IntRange,
    pub pools: ValuePools,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            counts: TableCounts::default(),
            employee_start: DateWindow::new(-5 * 365, 0),
            product_expiration: DateWindow::new(0, 3 * 365),
            date_promised: DateWindow::new(-365, 0),
            date_received: DateWindow::new(0, 15),
            mileage: IntRange::new(5_000, 120_000),
            route_length: IntRange::new(50, 300),
            pools: ValuePools::default(),
        }
    }
}

impl GeneratorConfig {
    /// Default windows and pools with the given row counts, validated
    pub fn with_counts(counts: TableCounts) -> Result<Self, ConfigError> {
        let config = Self {
            counts,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file; missing fields fall back to defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let counts = &self.counts;

        // Vehicles are paired positionally with employees
        if counts.vehicles != counts.employees {
            return Err(ConfigError::VehicleEmployeeMismatch {
                vehicles: counts.vehicles,
                employees: counts.employees,
            });
        }

        let parents = [
            ("employees", counts.employees, "warehouses", counts.warehouses),
            ("products", counts.products, "warehouses", counts.warehouses),
            ("receiving_parties", counts.receiving_parties, "routes", counts.routes),
            ("vehicles", counts.vehicles, "routes", counts.routes),
        ];
        for (child, child_count, parent, parent_count) in parents {
            if child_count > 0 && parent_count == 0 {
                return Err(ConfigError::EmptyParent { child, parent });
            }
        }

        if let Some(pool) = self.pools.first_empty() {
            return Err(ConfigError::EmptyPool(pool));
        }

        let windows = [
            ("employee_start", self.employee_start),
            ("product_expiration", self.product_expiration),
            ("date_promised", self.date_promised),
            ("date_received", self.date_received),
        ];
        for (name, window) in windows {
            if window.start_days > window.end_days {
                return Err(ConfigError::InvertedWindow {
                    name,
                    start: window.start_days,
                    end: window.end_days,
                });
            }
            if window.start_days < -MAX_WINDOW_DAYS || window.end_days > MAX_WINDOW_DAYS {
                return Err(ConfigError::WindowOutOfBounds {
                    name,
                    start: window.start_days,
                    end: window.end_days,
                    limit: MAX_WINDOW_DAYS,
                });
            }
        }

        for (name, range) in [("mileage", self.mileage), ("route_length", self.route_length)] {
            if range.min > range.max {
                return Err(ConfigError::InvertedRange {
                    name,
                    min: range.min,
                    max: range.max,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_vehicle_employee_mismatch_rejected() {
        let counts = TableCounts {
            vehicles: 19,
            ..TableCounts::default()
        };
        let err = GeneratorConfig::with_counts(counts).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::VehicleEmployeeMismatch { vehicles: 19, employees: 20 }
        ));
    }

    #[test]
    fn test_children_without_parent_rejected() {
        let counts = TableCounts {
            routes: 0,
            ..TableCounts::default()
        };
        let err = GeneratorConfig::with_counts(counts).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyParent { parent: "routes", .. }));
    }

    #[test]
    fn test_empty_tables_allowed() {
        let counts = TableCounts {
            warehouses: 0,
            employees: 0,
            products: 0,
            vehicles: 0,
            routes: 0,
            receiving_parties: 0,
        };
        assert!(GeneratorConfig::with_counts(counts).is_ok());
    }

    #[test]
    fn test_inverted_window_rejected() {
        let config = GeneratorConfig {
            date_received: DateWindow::new(15, 0),
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedWindow { name: "date_received", .. })
        ));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let config = GeneratorConfig {
            mileage: IntRange::new(10, 5),
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedRange { name: "mileage", .. })
        ));
    }

    #[test]
    fn test_oversized_window_rejected() {
        let config: GeneratorConfig = serde_json::from_str(
            r#"{"date_received": {"start_days": 0, "end_days": 9000000000000}}"#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::WindowOutOfBounds { name: "date_received", .. })
        ));

        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(crate::dataset::Dataset::generate(&config, today, &mut rng).is_err());
    }

    #[test]
    fn test_window_at_limit_accepted() {
        let config = GeneratorConfig {
            employee_start: DateWindow::new(-MAX_WINDOW_DAYS, 0),
            product_expiration: DateWindow::new(0, MAX_WINDOW_DAYS),
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{"counts": {"routes": 3}}"#).unwrap();
        assert_eq!(config.counts.routes, 3);
        assert_eq!(config.counts.warehouses, 10);
        assert_eq!(config.mileage, IntRange::new(5_000, 120_000));
    }

    #[test]
    fn test_missing_config_file() {
        let err = GeneratorConfig::from_json_file("does/not/exist.json").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_window_sampling_stays_inside() {
        let mut rng = StdRng::seed_from_u64(42);
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let window = DateWindow::new(-365, 0);
        for _ in 0..500 {
            let date = window.sample(today, &mut rng);
            assert!(window.contains(today, date));
            assert!(date <= today);
        }
    }
}
