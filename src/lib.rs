//! Scheduled collector for IMGW synoptic weather observations.
//!
//! Periodically fetches the public synop dataset, picks out a fixed list
//! of Polish stations, and persists new readings into a local SQLite
//! database, deduplicating by (observation date, station, measurement
//! hour). Every insert, duplicate skip, and job boundary is also appended
//! to a plain-text job log.

pub mod collector;
pub mod config;
pub mod fetch;
pub mod joblog;
pub mod models;
pub mod schema;
pub mod store;

pub use collector::{Collector, CycleSummary};
pub use config::Config;
pub use joblog::JobLog;
pub use models::{Observation, WeatherReading};
