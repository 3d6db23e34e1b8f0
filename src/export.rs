//! CSV export of every generated and aggregated table
//!
//! One file per table, headers taken from the row types' column names.
//! An empty table produces an empty file.

use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::dashboard::DashboardTables;
use crate::error::{DashboardError, Result};

/// Serialize `rows` as CSV into `writer`
pub fn write_table<W: Write, T: Serialize>(writer: W, rows: &[T]) -> csv::Result<()> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_file<T: Serialize>(dir: &Path, name: &str, rows: &[T]) -> Result<PathBuf> {
    let path = dir.join(format!("{}.csv", name));
    let export_err = |source: csv::Error| DashboardError::Export {
        path: path.clone(),
        source,
    };
    let file = std::fs::File::create(&path).map_err(|e| export_err(e.into()))?;
    write_table(file, rows).map_err(export_err)?;
    info!("   Wrote {:>4} rows to {}", rows.len(), path.display());
    Ok(path)
}

/// Write every table of `tables` into `dir`, returning the files written
pub fn export_all(tables: &DashboardTables, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|e| DashboardError::Export {
        path: dir.to_path_buf(),
        source: e.into(),
    })?;

    let ds = &tables.dataset;
    Ok(vec![
        write_file(dir, "warehouses", &ds.warehouses)?,
        write_file(dir, "employees", &ds.employees)?,
        write_file(dir, "products", &ds.products)?,
        write_file(dir, "vehicles", &ds.vehicles)?,
        write_file(dir, "routes", &ds.routes)?,
        write_file(dir, "vehicle_routes", &ds.vehicle_routes)?,
        write_file(dir, "receiving_parties", &ds.receiving_parties)?,
        write_file(dir, "fact_vehicle_route_receiver", &tables.fact)?,
        write_file(dir, "average_delay_per_route", &tables.average_delay_per_route)?,
        write_file(dir, "average_delay_per_vehicle", &tables.average_delay_per_vehicle)?,
        write_file(dir, "route_length_average_delay", &tables.route_length_delays)?,
        write_file(dir, "warehouse_product_counts", &tables.warehouse_product_counts)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeneratorConfig, TableCounts};
    use crate::models::{ReceivingParty, RouteDelay};
    use chrono::NaiveDate;

    fn to_string<T: Serialize>(rows: &[T]) -> String {
        let mut buf = Vec::new();
        write_table(&mut buf, rows).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_route_delay_csv() {
        let rows = vec![
            RouteDelay {
                route_id: "R5000".to_string(),
                average_delay_days: 3.0,
            },
            RouteDelay {
                route_id: "R5001".to_string(),
                average_delay_days: 7.5,
            },
        ];
        assert_eq!(to_string(&rows), "RouteID,AverageDelayDays\nR5000,3.0\nR5001,7.5\n");
    }

    #[test]
    fn test_receiving_party_csv_has_delay() {
        let rows = vec![ReceivingParty {
            receiver_id: "RCV6000".to_string(),
            receiver_name: "Acme".to_string(),
            date_promised: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            date_received: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            route_id: "R5000".to_string(),
        }];
        assert_eq!(
            to_string(&rows),
            "ReceiverID,ReceiverName,DatePromised,DateReceived,RouteID,DelayDays\n\
             RCV6000,Acme,2024-01-10,2024-01-08,R5000,-2\n"
        );
    }

    #[test]
    fn test_export_all_writes_every_table() {
        let config = GeneratorConfig::with_counts(TableCounts {
            routes: 1,
            ..TableCounts::default()
        })
        .unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let tables = DashboardTables::generate(&config, 42, today).unwrap();

        let dir = std::env::temp_dir().join(format!("dashboard-export-{}", std::process::id()));
        let files = export_all(&tables, &dir).unwrap();
        assert_eq!(files.len(), 12);

        let routes = std::fs::read_to_string(dir.join("routes.csv")).unwrap();
        assert!(routes.starts_with("RouteID,RouteName,RouteLength,Origin,Destination\n"));
        let fact = std::fs::read_to_string(dir.join("fact_vehicle_route_receiver.csv")).unwrap();
        assert_eq!(fact.lines().count(), 1 + tables.fact.len());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
