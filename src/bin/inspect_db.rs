//! Print the layout of a climate dataset: tables, columns, row counts and a
//! few sample rows. Useful for checking a file before serving it.

use std::path::PathBuf;

use anyhow::Context;
use surfsup::models::{MEASUREMENT_TABLE, STATION_TABLE};
use surfsup::ClimateStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let file_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("../Resources/hawaii.sqlite"));

    println!("Inspecting dataset: {}", file_path.display());

    let store = ClimateStore::open(&file_path, 1)
        .await
        .with_context(|| format!("failed to open {}", file_path.display()))?;

    println!("\n=== TABLES ===");
    for table in store.table_names().await? {
        let columns = store.table_columns(&table).await?;
        println!("  {} ({})", table, columns.join(", "));
    }

    let summary = store.summary().await?;
    println!("\n=== {} ===", MEASUREMENT_TABLE);
    println!("  rows: {}", summary.measurement_count);
    println!(
        "  dates: {} .. {}",
        summary.first_date.as_deref().unwrap_or("-"),
        summary.last_date.as_deref().unwrap_or("-")
    );
    for m in store.sample_measurements(5).await? {
        println!(
            "  #{} {} {} prcp={} tobs={}",
            m.id,
            m.station,
            m.date,
            m.prcp.map(|p| p.to_string()).unwrap_or_else(|| "null".to_string()),
            m.tobs
        );
    }

    println!("\n=== {} ===", STATION_TABLE);
    println!("  distinct stations: {}", summary.station_count);
    for s in store.stations().await? {
        println!(
            "  #{} {} {} ({}, {}) elev={}",
            s.id,
            s.station,
            s.name.as_deref().unwrap_or("-"),
            s.latitude.map(|v| v.to_string()).unwrap_or_default(),
            s.longitude.map(|v| v.to_string()).unwrap_or_default(),
            s.elevation.map(|v| v.to_string()).unwrap_or_default()
        );
    }

    store.close().await;
    Ok(())
}
