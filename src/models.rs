//! Data models for the collector.

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

// ---

/// One raw synoptic record as published by the IMGW API.
///
/// Field names follow the upstream payload verbatim. Numeric values arrive
/// as JSON strings (`"temperatura": "5.3"`), so they are decoded leniently
/// from either a string or a number. `cisnienie` is absent for
/// high-mountain stations.
#[derive(Debug, Clone, Deserialize)]
pub struct Observation {
    // ---
    pub stacja: String,
    pub godzina_pomiaru: String,
    #[serde(deserialize_with = "f64_from_api")]
    pub temperatura: f64,
    #[serde(default, deserialize_with = "opt_f64_from_api")]
    pub cisnienie: Option<f64>,
}

/// A persisted weather reading.
///
/// Natural key: (observation_date, station, measurement_hour). Rows are
/// immutable once inserted.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct WeatherReading {
    // ---
    pub station: String,
    #[sqlx(rename = "created_at")]
    pub observation_date: NaiveDate,
    #[sqlx(rename = "godzina_pomiaru")]
    pub measurement_hour: String,
    pub temperature: f64,
    pub pressure: Option<f64>,
    #[sqlx(rename = "added_at")]
    pub recorded_at: NaiveDateTime,
}

impl Observation {
    // ---
    /// Turn an upstream record into a reading dated `observation_date`,
    /// stamped with the local wall-clock time.
    pub fn to_reading(&self, observation_date: NaiveDate) -> WeatherReading {
        // ---
        WeatherReading {
            station: self.stacja.clone(),
            observation_date,
            measurement_hour: self.godzina_pomiaru.clone(),
            temperature: self.temperatura,
            pressure: self.cisnienie,
            recorded_at: Local::now().naive_local(),
        }
    }
}

// ---

fn numeric(value: &Value) -> Option<f64> {
    // ---
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn f64_from_api<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    // ---
    let value = Value::deserialize(deserializer)?;
    numeric(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("expected a numeric value, got {value}")))
}

fn opt_f64_from_api<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    // ---
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => numeric(&value).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("expected a numeric value, got {value}"))
        }),
    }
}
