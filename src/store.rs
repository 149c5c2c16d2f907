//! Reads and writes on the `weather` table.

use anyhow::Result;
use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::WeatherReading;

// ---

/// Point lookup on the natural key (observation date, station, hour).
pub async fn exists(
    pool: &SqlitePool,
    observation_date: NaiveDate,
    station: &str,
    measurement_hour: &str,
) -> Result<bool> {
    // ---
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM weather
        WHERE created_at = ? AND station = ? AND godzina_pomiaru = ?
        "#,
    )
    .bind(observation_date)
    .bind(station)
    .bind(measurement_hour)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}

/// Insert a reading unless its natural key is already present.
///
/// Returns whether a row was actually written; `false` means the reading
/// was a duplicate and the table is unchanged.
pub async fn insert_reading(pool: &SqlitePool, reading: &WeatherReading) -> Result<bool> {
    // ---
    let result = sqlx::query(
        r#"
        INSERT INTO weather (created_at, added_at, godzina_pomiaru, station, temperature, pressure)
        VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT (created_at, station, godzina_pomiaru) DO NOTHING
        "#,
    )
    .bind(reading.observation_date)
    .bind(reading.recorded_at)
    .bind(&reading.measurement_hour)
    .bind(&reading.station)
    .bind(reading.temperature)
    .bind(reading.pressure)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::schema::create_schema;
    use chrono::{Local, NaiveDate};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        // ---
        // A single connection keeps every query on the same in-memory
        // database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        create_schema(&pool).await.unwrap();
        pool
    }

    fn reading(station: &str, hour: &str) -> WeatherReading {
        // ---
        WeatherReading {
            station: station.to_string(),
            observation_date: NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
            measurement_hour: hour.to_string(),
            temperature: 5.3,
            pressure: Some(1012.1),
            recorded_at: Local::now().naive_local(),
        }
    }

    #[tokio::test]
    async fn test_insert_then_exists() {
        // ---
        let pool = test_pool().await;
        let r = reading("Kraków", "12");

        assert!(!exists(&pool, r.observation_date, "Kraków", "12").await.unwrap());
        assert!(insert_reading(&pool, &r).await.unwrap());
        assert!(exists(&pool, r.observation_date, "Kraków", "12").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_ignored() {
        // ---
        let pool = test_pool().await;
        let r = reading("Kraków", "12");

        assert!(insert_reading(&pool, &r).await.unwrap());
        assert!(!insert_reading(&pool, &r).await.unwrap());

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM weather")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_same_station_different_hour_is_new() {
        // ---
        let pool = test_pool().await;

        assert!(insert_reading(&pool, &reading("Kraków", "12")).await.unwrap());
        assert!(insert_reading(&pool, &reading("Kraków", "13")).await.unwrap());

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM weather")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_create_schema_is_idempotent() {
        // ---
        let pool = test_pool().await;

        insert_reading(&pool, &reading("Gdańsk", "12")).await.unwrap();

        // Re-running the DDL must not error or lose rows.
        create_schema(&pool).await.unwrap();
        create_schema(&pool).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM weather")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
