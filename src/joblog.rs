//! Append-only job log.
//!
//! Every cycle boundary, insert, and duplicate skip lands as one
//! human-readable timestamped line in a UTF-8 text file. This is a data
//! artifact of the job, separate from the `tracing` console output; a
//! failed append is warned about and never aborts a cycle.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::warn;

// ---

pub struct JobLog {
    path: PathBuf,
}

impl JobLog {
    // ---
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn job_started(&self) {
        self.record("Job started");
    }

    pub fn job_completed(&self) {
        self.record("Job completed");
    }

    pub fn reading_inserted(&self, station: &str, measurement_hour: &str) {
        // ---
        self.record(&format!(
            "Added weather data for {station} at {measurement_hour}."
        ));
    }

    pub fn duplicate_skipped(&self, station: &str, measurement_hour: &str) {
        // ---
        self.record(&format!(
            "Weather data for {station} at {measurement_hour} already exists in the database; skipping."
        ));
    }

    fn record(&self, message: &str) {
        // ---
        if let Err(error) = self.append(message) {
            warn!(
                "Failed to append to job log {}: {}",
                self.path.display(),
                error
            );
        }
    }

    fn append(&self, message: &str) -> io::Result<()> {
        // ---
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(
            file,
            "{} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            message
        )
    }
}
