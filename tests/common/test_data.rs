//! Test data generation utilities.
//!
//! This module builds SQLite files laid out like the Hawaii climate dataset,
//! with deterministic observations so tests can compute expected aggregates.

use chrono::{Duration, NaiveDate};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::path::Path;
use surfsup::{Measurement, Station};

type Result<T> = std::result::Result<T, sqlx::Error>;

/// Stations present in the generated dataset
pub const STATION_IDS: [&str; 3] = ["USC00519397", "USC00513117", "USC00519281"];

/// A day on which no station reported
pub const MISSING_DAY: &str = "2017-02-14";

/// First and last generated dates
pub const FIRST_DAY: &str = "2015-01-01";
pub const LAST_DAY: &str = "2017-08-23";

/// Daily observations for every station between FIRST_DAY and LAST_DAY.
///
/// Temperatures cycle through 62..=78 and every fifth reading has no
/// precipitation value.
pub fn generate_measurements() -> Vec<Measurement> {
    let first = NaiveDate::parse_from_str(FIRST_DAY, "%Y-%m-%d").unwrap();
    let last = NaiveDate::parse_from_str(LAST_DAY, "%Y-%m-%d").unwrap();

    let mut measurements = Vec::new();
    let mut id = 1;
    let mut day = first;
    let mut d: i64 = 0;

    while day <= last {
        let date = day.format("%Y-%m-%d").to_string();
        if date != MISSING_DAY {
            for (s, station) in STATION_IDS.iter().enumerate() {
                let s = s as i64;
                let tobs = 62.0 + ((d * 7 + s * 13) % 17) as f64;
                let prcp = if (d + s) % 5 == 0 {
                    None
                } else {
                    Some(((d * 3 + s) % 10) as f64 / 20.0)
                };

                measurements.push(Measurement {
                    id,
                    station: station.to_string(),
                    date: date.clone(),
                    prcp,
                    tobs,
                });
                id += 1;
            }
        }

        day += Duration::days(1);
        d += 1;
    }

    measurements
}

/// Station rows, with the first station listed twice
pub fn generate_stations() -> Vec<Station> {
    let mut stations: Vec<Station> = STATION_IDS
        .iter()
        .enumerate()
        .map(|(i, code)| Station {
            id: i as i64 + 1,
            station: code.to_string(),
            name: Some(format!("STATION {}, HI US", i + 1)),
            latitude: Some(21.2 + i as f64 / 10.0),
            longitude: Some(-157.8 - i as f64 / 10.0),
            elevation: Some(3.0 * (i + 1) as f64),
        })
        .collect();

    let mut duplicate = stations[0].clone();
    duplicate.id = STATION_IDS.len() as i64 + 1;
    stations.push(duplicate);
    stations
}

/// Write a dataset file with the given rows
pub async fn create_climate_db(
    path: &Path,
    measurements: &[Measurement],
    stations: &[Station],
) -> Result<()> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Delete);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    sqlx::query(
        "CREATE TABLE measurement (id INTEGER PRIMARY KEY, station TEXT, date TEXT, prcp FLOAT, tobs FLOAT)",
    )
    .execute(&pool)
    .await?;
    sqlx::query(
        "CREATE TABLE station (id INTEGER PRIMARY KEY, station TEXT, name TEXT, latitude FLOAT, longitude FLOAT, elevation FLOAT)",
    )
    .execute(&pool)
    .await?;

    // One transaction keeps thousands of inserts fast
    let mut tx = pool.begin().await?;
    for m in measurements {
        sqlx::query("INSERT INTO measurement (id, station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4, ?5)")
            .bind(m.id)
            .bind(m.station.as_str())
            .bind(m.date.as_str())
            .bind(m.prcp)
            .bind(m.tobs)
            .execute(&mut *tx)
            .await?;
    }
    for s in stations {
        sqlx::query(
            "INSERT INTO station (id, station, name, latitude, longitude, elevation) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(s.id)
        .bind(s.station.as_str())
        .bind(s.name.as_deref())
        .bind(s.latitude)
        .bind(s.longitude)
        .bind(s.elevation)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    pool.close().await;
    Ok(())
}

/// Expected `[min, max, avg]` over rows with `start <= date <= end`
pub fn expected_stats(
    measurements: &[Measurement],
    start: &str,
    end: Option<&str>,
) -> Option<(f64, f64, f64)> {
    let temps: Vec<f64> = measurements
        .iter()
        .filter(|m| m.date.as_str() >= start && end.map_or(true, |end| m.date.as_str() <= end))
        .map(|m| m.tobs)
        .collect();

    if temps.is_empty() {
        return None;
    }

    let min = temps.iter().copied().fold(f64::INFINITY, f64::min);
    let max = temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let avg = temps.iter().sum::<f64>() / temps.len() as f64;
    Some((min, max, avg))
}
