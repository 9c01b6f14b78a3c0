//! Configuration management for surfsup.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use chrono::NaiveDate;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::dates;
use crate::error::{Result, SurfsUpError};

/// Keyword selecting the newest measurement date as the reference date
pub const LATEST_REFERENCE: &str = "latest";

/// Command-line arguments for surfsup
#[derive(Parser, Debug)]
#[command(name = "surfsup")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the SQLite climate dataset
    #[arg(env = "SURFSUP_DATABASE")]
    pub database: Option<PathBuf>,

    /// Host address to bind to
    #[arg(short = 'H', long, env = "SURFSUP_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "SURFSUP_PORT")]
    pub port: Option<u16>,

    /// Number of worker threads
    #[arg(short, long, env = "SURFSUP_WORKERS")]
    pub workers: Option<usize>,

    /// Maximum number of pooled read connections
    #[arg(long, env = "SURFSUP_MAX_CONNECTIONS")]
    pub max_connections: Option<u32>,

    /// Reference date for the one-year window (YYYY-MM-DD or "latest")
    #[arg(long, env = "SURFSUP_REFERENCE_DATE")]
    pub reference_date: Option<String>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "SURFSUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "SURFSUP_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads (None = number of CPU cores)
    #[serde(default)]
    pub workers: Option<usize>,
}

/// Dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the SQLite file
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Maximum number of pooled read connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Reference date, either YYYY-MM-DD or "latest"
    #[serde(default = "default_reference_date")]
    pub reference_date: String,
}

/// How the end of the one-year window is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceDate {
    /// A fixed calendar date
    Fixed(NaiveDate),
    /// The newest measurement date found at startup
    Latest,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Data configuration
    #[serde(default)]
    pub data: DataConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Build configuration from already-parsed arguments
    pub fn from_args(args: Args) -> Result<Self> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments
        if let Some(database) = args.database {
            config.data.database_path = database;
        }
        if let Some(host) = args.host {
            config.server.host = host;
        }
        if let Some(port) = args.port {
            config.server.port = port;
        }
        if args.workers.is_some() {
            config.server.workers = args.workers;
        }
        if let Some(max_connections) = args.max_connections {
            config.data.max_connections = max_connections;
        }
        if let Some(reference_date) = args.reference_date {
            config.data.reference_date = reference_date;
        }
        if let Some(log_level) = args.log_level {
            config.log_level = log_level;
        }

        Ok(config)
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.server.host = other.server.host;
        self.server.port = other.server.port;
        if other.server.workers.is_some() {
            self.server.workers = other.server.workers;
        }
        self.data = other.data;
        self.log_level = other.log_level;
    }

    /// Interpret the configured reference date
    pub fn reference_date(&self) -> Result<ReferenceDate> {
        let raw = self.data.reference_date.trim();
        if raw.eq_ignore_ascii_case(LATEST_REFERENCE) {
            return Ok(ReferenceDate::Latest);
        }

        dates::parse_date(raw)
            .map(ReferenceDate::Fixed)
            .map_err(|_| SurfsUpError::Config {
                message: format!(
                    "Invalid reference date: {}. Must be YYYY-MM-DD or \"{}\"",
                    self.data.reference_date, LATEST_REFERENCE
                ),
            })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(SurfsUpError::Config {
                message: "Server host cannot be empty".to_string(),
            });
        }

        // 0 is not a valid port for users
        if self.server.port == 0 {
            return Err(SurfsUpError::Config {
                message: "Server port cannot be 0".to_string(),
            });
        }

        if self.server.workers == Some(0) {
            return Err(SurfsUpError::Config {
                message: "Worker count cannot be 0".to_string(),
            });
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(SurfsUpError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        if self.data.database_path.as_os_str().is_empty() {
            return Err(SurfsUpError::Config {
                message: "Database path cannot be empty".to_string(),
            });
        }

        if self.data.max_connections == 0 {
            return Err(SurfsUpError::Config {
                message: "max_connections must be at least 1".to_string(),
            });
        }

        self.reference_date()?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            data: DataConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            max_connections: default_max_connections(),
            reference_date: default_reference_date(),
        }
    }
}

// Default value functions for serde
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_database_path() -> PathBuf {
    PathBuf::from("../Resources/hawaii.sqlite")
}

fn default_max_connections() -> u32 {
    4
}

fn default_reference_date() -> String {
    dates::format_date(dates::default_reference_date())
}

fn default_log_level() -> String {
    "info".to_string()
}
