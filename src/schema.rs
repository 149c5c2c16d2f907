//! Database schema management for the collector.
//!
//! Ensures the `weather` table and its natural-key index exist before the
//! first cycle runs. Applied once on startup from `main.rs`.

use anyhow::Result;
use sqlx::SqlitePool;

// ---

/// Create or update the database schema (idempotent).
///
/// `created_at` holds the observation date and `added_at` the insert
/// wall-clock time. Uniqueness of (created_at, station, godzina_pomiaru)
/// is enforced by the index, so duplicate cycles cannot write twice even
/// without a pre-insert existence check.
///
/// Safe to call on every startup; no-op if objects already exist.
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    // ---
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS weather (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at      TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            added_at        TIMESTAMP,
            godzina_pomiaru TEXT,
            station         TEXT,
            temperature     REAL,
            pressure        REAL
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_weather_natural_key
            ON weather (created_at, station, godzina_pomiaru);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}
