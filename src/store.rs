//! Read-only access to the SQLite climate dataset.
//!
//! The store owns a connection pool opened in read-only mode. Every query
//! checks out a connection for its own duration, so handlers running on
//! different worker threads never share a handle.

use chrono::NaiveDate;
use futures::TryStreamExt;
use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

use crate::dates;
use crate::error::{Result, SurfsUpError};
use crate::models::{
    Measurement, Station, TemperatureStats, MEASUREMENT_COLUMNS, MEASUREMENT_TABLE,
    STATION_COLUMNS, STATION_TABLE,
};

/// Date-keyed precipitation, later rows overwriting earlier ones
pub type PrecipitationByDate = BTreeMap<String, Option<f64>>;

/// Counts and date span of the loaded dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub measurement_count: i64,
    pub station_count: i64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
}

/// Handle on the climate dataset
#[derive(Debug, Clone)]
pub struct ClimateStore {
    pool: SqlitePool,
    path: PathBuf,
}

impl ClimateStore {
    /// Open the dataset read-only and verify its schema.
    pub async fn open(path: &Path, max_connections: u32) -> Result<Self> {
        // A missing file would otherwise surface as an opaque driver error
        if !path.exists() {
            return Err(SurfsUpError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database file not found: {}", path.display()),
            )));
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        info!(
            path = %path.display(),
            max_connections = max_connections,
            "Opened climate dataset"
        );

        let store = Self {
            pool,
            path: path.to_path_buf(),
        };
        store.verify_schema().await?;

        Ok(store)
    }

    /// Path of the underlying database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check that both tables carry every column the queries rely on
    async fn verify_schema(&self) -> Result<()> {
        for (table, required) in [
            (MEASUREMENT_TABLE, MEASUREMENT_COLUMNS),
            (STATION_TABLE, STATION_COLUMNS),
        ] {
            let columns = self.table_columns(table).await?;
            if columns.is_empty() {
                return Err(SurfsUpError::Schema {
                    message: format!("table {} not found in {}", table, self.path.display()),
                });
            }

            let missing: Vec<&str> = required
                .iter()
                .copied()
                .filter(|col| !columns.iter().any(|c| c.eq_ignore_ascii_case(col)))
                .collect();

            if !missing.is_empty() {
                return Err(SurfsUpError::Schema {
                    message: format!(
                        "table {} is missing column(s): {}",
                        table,
                        missing.join(", ")
                    ),
                });
            }

            debug!(table = table, columns = ?columns, "Schema check passed");
        }

        Ok(())
    }

    /// Column names of a table, empty if the table does not exist
    pub async fn table_columns(&self, table: &str) -> Result<Vec<String>> {
        let columns = sqlx::query_scalar::<_, String>("SELECT name FROM pragma_table_info(?1)")
            .bind(table)
            .fetch_all(&self.pool)
            .await?;
        Ok(columns)
    }

    /// Names of all user tables in the file
    pub async fn table_names(&self) -> Result<Vec<String>> {
        let tables = sqlx::query_scalar::<_, String>(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(tables)
    }

    /// Precipitation for every observation on or after `start`.
    ///
    /// Several stations report on the same day; the row read last wins.
    pub async fn precipitation_since(&self, start: NaiveDate) -> Result<PrecipitationByDate> {
        let started = Instant::now();

        let by_date = sqlx::query_as::<_, (String, Option<f64>)>(
            "SELECT date, CAST(prcp AS REAL) FROM measurement WHERE date >= ?1 ORDER BY id",
        )
        .bind(dates::format_date(start))
        .fetch(&self.pool)
        .try_fold(BTreeMap::new(), |mut acc, (date, prcp)| async move {
            acc.insert(date, prcp);
            Ok::<_, sqlx::Error>(acc)
        })
        .await?;

        debug!(
            start = %start,
            dates = by_date.len(),
            duration_us = started.elapsed().as_micros() as u64,
            "Loaded precipitation"
        );

        Ok(by_date)
    }

    /// Temperature observations on or after `start`, in row order
    pub async fn temperatures_since(&self, start: NaiveDate) -> Result<Vec<Option<f64>>> {
        let temperatures = sqlx::query_scalar::<_, Option<f64>>(
            "SELECT CAST(tobs AS REAL) FROM measurement WHERE date >= ?1 ORDER BY id",
        )
        .bind(dates::format_date(start))
        .fetch_all(&self.pool)
        .await?;

        debug!(start = %start, rows = temperatures.len(), "Loaded temperatures");
        Ok(temperatures)
    }

    /// Each station identifier once, in order of first appearance
    pub async fn distinct_stations(&self) -> Result<Vec<String>> {
        let stations = sqlx::query_scalar::<_, String>(
            "SELECT station FROM station WHERE station IS NOT NULL GROUP BY station ORDER BY MIN(id)",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(stations)
    }

    /// Min, max and mean temperature for `start <= date`, bounded by `end` when given
    pub async fn temperature_stats(
        &self,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<TemperatureStats> {
        let stats = sqlx::query_as::<_, TemperatureStats>(
            "SELECT CAST(MIN(tobs) AS REAL) AS min, \
                    CAST(MAX(tobs) AS REAL) AS max, \
                    AVG(tobs) AS avg \
             FROM measurement \
             WHERE date >= ?1 AND (?2 IS NULL OR date <= ?2)",
        )
        .bind(dates::format_date(start))
        .bind(end.map(dates::format_date))
        .fetch_one(&self.pool)
        .await?;

        debug!(start = %start, end = ?end, stats = ?stats, "Computed temperature stats");
        Ok(stats)
    }

    /// Newest observation date in the dataset
    pub async fn latest_date(&self) -> Result<Option<NaiveDate>> {
        let latest = sqlx::query_scalar::<_, Option<String>>("SELECT MAX(date) FROM measurement")
            .fetch_one(&self.pool)
            .await?;

        latest
            .map(|raw| {
                dates::parse_date(&raw).map_err(|_| SurfsUpError::Schema {
                    message: format!("measurement.date holds a non YYYY-MM-DD value: {}", raw),
                })
            })
            .transpose()
    }

    /// Row counts and date span
    pub async fn summary(&self) -> Result<DatasetSummary> {
        let (measurement_count, first_date, last_date) =
            sqlx::query_as::<_, (i64, Option<String>, Option<String>)>(
                "SELECT COUNT(*), MIN(date), MAX(date) FROM measurement",
            )
            .fetch_one(&self.pool)
            .await?;

        let station_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(DISTINCT station) FROM station")
                .fetch_one(&self.pool)
                .await?;

        Ok(DatasetSummary {
            measurement_count,
            station_count,
            first_date,
            last_date,
        })
    }

    /// The first `limit` measurements, for inspection
    pub async fn sample_measurements(&self, limit: i64) -> Result<Vec<Measurement>> {
        let rows = sqlx::query_as::<_, Measurement>(
            "SELECT id, station, date, CAST(prcp AS REAL) AS prcp, CAST(tobs AS REAL) AS tobs \
             FROM measurement \
             WHERE station IS NOT NULL AND date IS NOT NULL AND tobs IS NOT NULL \
             ORDER BY id LIMIT ?1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Full station records, for inspection
    pub async fn stations(&self) -> Result<Vec<Station>> {
        let rows = sqlx::query_as::<_, Station>(
            "SELECT id, station, name, \
                    CAST(latitude AS REAL) AS latitude, \
                    CAST(longitude AS REAL) AS longitude, \
                    CAST(elevation AS REAL) AS elevation \
             FROM station ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
