//! Application state management for surfsup.
//!
//! This module defines the shared state that is passed to all handlers:
//! the dataset handle, the resolved reference date and a startup summary.

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;

use crate::config::{Config, ReferenceDate};
use crate::dates;
use crate::error::{Result, SurfsUpError};
use crate::store::{ClimateStore, DatasetSummary};

/// The main application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Dataset access
    pub store: ClimateStore,
    /// End of the trailing one-year window
    pub reference_date: NaiveDate,
    /// Counts gathered when the dataset was opened
    pub summary: DatasetSummary,
}

impl AppState {
    /// Create a new AppState
    pub fn new(
        config: Config,
        store: ClimateStore,
        reference_date: NaiveDate,
        summary: DatasetSummary,
    ) -> Self {
        Self {
            config,
            store,
            reference_date,
            summary,
        }
    }

    /// Open the configured dataset and resolve the reference date
    pub async fn initialize(config: Config) -> Result<Self> {
        let store =
            ClimateStore::open(&config.data.database_path, config.data.max_connections).await?;

        let reference_date = match config.reference_date()? {
            ReferenceDate::Fixed(date) => date,
            ReferenceDate::Latest => {
                store
                    .latest_date()
                    .await?
                    .ok_or_else(|| SurfsUpError::Config {
                        message: "reference_date is \"latest\" but the measurement table is empty"
                            .to_string(),
                    })?
            }
        };

        let summary = store.summary().await?;

        info!(
            reference_date = %reference_date,
            window_start = %dates::one_year_before(reference_date),
            "Resolved reference date"
        );

        Ok(Self::new(config, store, reference_date, summary))
    }

    /// Create a new AppState wrapped in an Arc for shared ownership
    pub async fn initialize_shared(config: Config) -> Result<Arc<Self>> {
        Ok(Arc::new(Self::initialize(config).await?))
    }

    /// First date included by the precipitation and tobs routes
    pub fn window_start(&self) -> NaiveDate {
        dates::one_year_before(self.reference_date)
    }
}
