use anyhow::Context;
use async_trait::async_trait;

use crate::db::PgRepo;
use crate::error::StoreError;
use crate::records::repo_types::{IncidentRecord, WeatherRecord, WeatherRow};

/// Read-only access to incident and weather reference data.
#[async_trait]
pub trait RecordRepo: Send + Sync {
    async fn all_incidents(&self) -> Result<Vec<IncidentRecord>, StoreError>;
    async fn weather_by_year(&self, year: i32) -> Result<Vec<WeatherRecord>, StoreError>;
}

#[async_trait]
impl RecordRepo for PgRepo {
    async fn all_incidents(&self) -> Result<Vec<IncidentRecord>, StoreError> {
        let rows = sqlx::query_as::<_, IncidentRecord>(
            r#"
            SELECT id, incident, injury, amount, total, year
            FROM mountain_accident
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("list incident records")?;
        Ok(rows)
    }

    async fn weather_by_year(&self, year: i32) -> Result<Vec<WeatherRecord>, StoreError> {
        let rows = sqlx::query_as::<_, WeatherRow>(
            r#"
            SELECT id, year, amount, metrics
            FROM mountain_accident_weather
            WHERE year = $1
            "#,
        )
        .bind(year)
        .fetch_all(&self.pool)
        .await
        .context("list weather records by year")?;
        Ok(rows.into_iter().map(WeatherRecord::from).collect())
    }
}
