use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncidentTotal {
    pub incident: String,
    pub total: f64,
}

/// Per-year totals for one incident type; year keys serialize as strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncidentByYear {
    pub incident: String,
    pub data: BTreeMap<i32, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvolvedYears {
    pub years: Vec<i32>,
}

/// Body of `POST /indident-weather`.
#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub year: i32,
    #[serde(default)]
    pub filter: Option<String>,
}
