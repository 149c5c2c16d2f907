//! Client for the IMGW public synop endpoint.
//!
//! The upstream returns one JSON array covering every station in the
//! network. A cycle fetches that array once and looks stations up in
//! memory; there is no retry, backoff, or request timeout.

use anyhow::{anyhow, Result};
use serde_json::Value;
use tracing::debug;

use crate::Observation;

// ---

/// Fetch the full set of synoptic observations from the upstream API.
///
/// Records that fail to decode are dropped individually (logged at debug
/// level); a network error or a non-array body fails the whole attempt.
pub async fn fetch_observations(client: &reqwest::Client, url: &str) -> Result<Vec<Observation>> {
    // ---
    debug!("Fetching observations from: {}", url);

    let response: Value = client.get(url).send().await?.json().await?;

    let records = response
        .as_array()
        .ok_or_else(|| anyhow!("upstream response is not a JSON array"))?;

    let observations = decode_observations(records);

    debug!(
        "Fetched {} observations ({} records)",
        observations.len(),
        records.len()
    );
    Ok(observations)
}

/// Decode upstream records one by one, keeping whatever parses.
fn decode_observations(records: &[Value]) -> Vec<Observation> {
    // ---
    let mut observations = Vec::with_capacity(records.len());

    for (i, record) in records.iter().enumerate() {
        match serde_json::from_value::<Observation>(record.clone()) {
            Ok(observation) => {
                observations.push(observation);
            }
            Err(e) => {
                debug!("Failed to parse record {}: {} - Raw record: {}", i, e, record);
            }
        }
    }

    observations
}

/// First record whose station name matches, or `None`.
pub fn find_station<'a>(
    observations: &'a [Observation],
    station: &str,
) -> Option<&'a Observation> {
    // ---
    observations.iter().find(|o| o.stacja == station)
}
