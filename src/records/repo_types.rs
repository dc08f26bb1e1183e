use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

/// One logged mountain accident. Loaded externally, read-only here.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct IncidentRecord {
    pub id: Uuid,
    pub incident: String,
    pub injury: String,
    pub amount: f64,
    pub total: f64,
    pub year: i32,
}

#[derive(Debug, FromRow)]
pub struct WeatherRow {
    pub id: Uuid,
    pub year: i32,
    pub amount: f64,
    pub metrics: Json<Map<String, Value>>,
}

/// Monthly climate observation; the metric set differs per record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherRecord {
    pub id: Uuid,
    pub year: i32,
    pub amount: f64,
    #[serde(flatten)]
    pub metrics: Map<String, Value>,
}

/// Field names owned by the fixed columns; a metric may not shadow them.
pub const RESERVED_FIELDS: [&str; 3] = ["id", "year", "amount"];

impl From<WeatherRow> for WeatherRecord {
    fn from(r: WeatherRow) -> Self {
        let mut metrics = r.metrics.0;
        metrics.retain(|k, _| !RESERVED_FIELDS.contains(&k.as_str()));
        Self {
            id: r.id,
            year: r.year,
            amount: r.amount,
            metrics,
        }
    }
}
