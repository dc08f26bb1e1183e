use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, instrument};

use super::{
    aggregate,
    dto::{IncidentByYear, IncidentTotal, InvolvedYears, WeatherQuery},
    repo_types::{IncidentRecord, WeatherRecord},
};
use crate::{error::PlainError, state::AppState};

pub fn record_routes() -> Router<AppState> {
    Router::new()
        .route("/getAll", get(get_all))
        .route("/groupByIncident", get(group_by_incident))
        .route("/allInvolvedYear", get(all_involved_year))
        .route("/groupByYears", get(group_by_years))
        .route("/indident-weather", post(incident_weather))
}

#[instrument(skip(state))]
pub async fn get_all(
    State(state): State<AppState>,
) -> Result<Json<Vec<IncidentRecord>>, PlainError> {
    Ok(Json(state.records.all_incidents().await?))
}

#[instrument(skip(state))]
pub async fn group_by_incident(
    State(state): State<AppState>,
) -> Result<Json<Vec<IncidentTotal>>, PlainError> {
    let records = state.records.all_incidents().await?;
    Ok(Json(aggregate::by_incident_totals(&records)))
}

#[instrument(skip(state))]
pub async fn all_involved_year(
    State(state): State<AppState>,
) -> Result<Json<InvolvedYears>, PlainError> {
    let records = state.records.all_incidents().await?;
    Ok(Json(aggregate::all_involved_years(&records)))
}

#[instrument(skip(state))]
pub async fn group_by_years(
    State(state): State<AppState>,
) -> Result<Json<Vec<IncidentByYear>>, PlainError> {
    let records = state.records.all_incidents().await?;
    Ok(Json(aggregate::by_incident_by_year(&records)))
}

#[instrument(skip(state))]
pub async fn incident_weather(
    State(state): State<AppState>,
    Json(query): Json<WeatherQuery>,
) -> Result<Json<Vec<WeatherRecord>>, PlainError> {
    let metric = query.filter.as_deref().unwrap_or_default();
    let records = state.records.weather_by_year(query.year).await?;
    debug!(count = records.len(), metric, "weather records loaded");
    Ok(Json(aggregate::project_weather(records, metric)))
}
