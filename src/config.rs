//! Configuration loader for the collector.
//!
//! This module centralizes all runtime values and their defaults, loading
//! from environment variables (with optional `.env` file support provided
//! by the caller). Every value has a compiled-in default, so the binary
//! runs with no flags and an empty environment.

use std::env;
use std::time::Duration;

use anyhow::{anyhow, Result};

// ---

/// Upstream endpoint publishing the full synop dataset as a JSON array.
pub const DEFAULT_API_URL: &str = "https://danepubliczne.imgw.pl/api/data/synop";

/// The stations collected when `STATIONS` is not set.
pub const DEFAULT_STATIONS: &[&str] = &[
    "Białystok",
    "Gdańsk",
    "Łódź",
    "Kraków",
    "Poznań",
    "Suwałki",
    "Szczecin",
    "Warszawa",
    "Wrocław",
];

/// Parse an optional integer environment variable with a default value.
macro_rules! parse_env_u64 {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<u64>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Read a string environment variable, falling back to a default.
macro_rules! env_or {
    ($var_name:expr, $default:expr) => {
        env::var($var_name).unwrap_or_else(|_| $default.to_string())
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent
/// configuration snapshot for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// SQLite database URL.
    pub db_url: String,

    /// Upstream synop endpoint.
    pub api_url: String,

    /// Steady-state tick period in seconds.
    pub poll_interval_secs: u64,

    /// Append-only job log file.
    pub job_log_path: String,

    /// Stations collected each cycle.
    pub stations: Vec<String>,
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `DATABASE_URL` – SQLite URL (default: `sqlite:weather.db`)
/// - `IMGW_API_URL` – upstream endpoint (default: the IMGW synop URL)
/// - `POLL_INTERVAL_SECS` – tick period (default: 600)
/// - `JOB_LOG_PATH` – job log file (default: `collector.log`)
/// - `STATIONS` – comma-separated station names (default: nine Polish
///   cities)
///
/// Returns an error if a set variable fails to parse.
pub fn load_from_env() -> Result<Config> {
    // ---
    let db_url = env_or!("DATABASE_URL", "sqlite:weather.db");
    let api_url = env_or!("IMGW_API_URL", DEFAULT_API_URL);
    let poll_interval_secs = parse_env_u64!("POLL_INTERVAL_SECS", 600);
    let job_log_path = env_or!("JOB_LOG_PATH", "collector.log");

    let stations = match env::var("STATIONS") {
        Ok(raw) => {
            let stations = parse_stations(&raw);
            if stations.is_empty() {
                return Err(anyhow!("STATIONS is set but names no stations"));
            }
            stations
        }
        Err(_) => DEFAULT_STATIONS.iter().map(|s| s.to_string()).collect(),
    };

    Ok(Config {
        db_url,
        api_url,
        poll_interval_secs,
        job_log_path,
        stations,
    })
}

/// Split a comma-separated station list, dropping empty segments.
fn parse_stations(raw: &str) -> Vec<String> {
    // ---
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Config {
    // ---
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  DATABASE_URL       : {}", self.db_url);
        tracing::info!("  IMGW_API_URL       : {}", self.api_url);
        tracing::info!("  POLL_INTERVAL_SECS : {}", self.poll_interval_secs);
        tracing::info!("  JOB_LOG_PATH       : {}", self.job_log_path);
        tracing::info!("  STATIONS           : {}", self.stations.join(", "));
    }
}
