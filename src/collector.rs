//! The fetch-and-store cycle and the interval scheduler driving it.
//!
//! One cycle fetches the upstream dataset once, then walks the configured
//! stations: look the station up in the payload, insert its reading unless
//! the (date, station, hour) key is already present, and log the outcome.
//! The scheduler runs the first cycle immediately at startup, then repeats
//! at a fixed interval; cycles never overlap.

use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use sqlx::SqlitePool;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::{fetch, store, Config, JobLog, Observation};

// ---

/// Per-cycle outcome counters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleSummary {
    // ---
    /// Readings written to the store.
    pub inserted: usize,
    /// Readings skipped because their natural key was already present.
    pub skipped: usize,
    /// Configured stations absent from the upstream payload.
    pub missing: usize,
}

pub struct Collector {
    // ---
    pool: SqlitePool,
    client: reqwest::Client,
    config: Config,
    job_log: JobLog,
}

impl Collector {
    // ---
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        // ---
        let job_log = JobLog::new(&config.job_log_path);
        Self {
            pool,
            client: reqwest::Client::new(),
            config,
            job_log,
        }
    }

    /// Run the scheduler until the surrounding task is cancelled.
    ///
    /// The first tick completes immediately (the initial pass over all
    /// stations), every later tick fires one poll interval after the
    /// previous one. A cycle always finishes before the next may begin;
    /// a failed cycle is logged and retried on the next tick.
    pub async fn run(&self) -> Result<()> {
        // ---
        info!(
            "Starting collector: {} stations, polling every {}s",
            self.config.stations.len(),
            self.config.poll_interval_secs
        );

        let mut ticks = tick_interval(self.config.poll_interval());

        loop {
            ticks.tick().await;

            self.job_log.job_started();
            match self.run_cycle().await {
                Ok(summary) => {
                    info!(
                        "Cycle complete: {} inserted, {} duplicates skipped, {} stations absent upstream",
                        summary.inserted, summary.skipped, summary.missing
                    );
                }
                Err(e) => {
                    error!("Cycle failed, will retry next tick: {:#}", e);
                }
            }
            self.job_log.job_completed();
        }
    }

    /// One full fetch-and-store pass over the configured stations.
    pub async fn run_cycle(&self) -> Result<CycleSummary> {
        // ---
        let observations =
            fetch::fetch_observations(&self.client, &self.config.api_url).await?;
        self.ingest(&observations).await
    }

    /// Store every configured station's reading from an already-fetched
    /// payload, deduplicating on (date, station, hour).
    pub async fn ingest(&self, observations: &[Observation]) -> Result<CycleSummary> {
        // ---
        let today = Local::now().date_naive();
        let mut summary = CycleSummary::default();

        for station in &self.config.stations {
            let Some(observation) = fetch::find_station(observations, station) else {
                debug!("No observation for {} in upstream payload", station);
                summary.missing += 1;
                continue;
            };

            let reading = observation.to_reading(today);

            if store::insert_reading(&self.pool, &reading).await? {
                info!(
                    "Added weather data for {} at {}",
                    station, reading.measurement_hour
                );
                self.job_log.reading_inserted(station, &reading.measurement_hour);
                summary.inserted += 1;
            } else {
                info!(
                    "Weather data for {} at {} already exists, skipping",
                    station, reading.measurement_hour
                );
                self.job_log.duplicate_skipped(station, &reading.measurement_hour);
                summary.skipped += 1;
            }
        }

        Ok(summary)
    }
}

/// Fixed-period tick source. The first tick completes immediately; missed
/// ticks are delayed rather than bursted, so cycles cannot pile up.
fn tick_interval(period: Duration) -> Interval {
    // ---
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}
