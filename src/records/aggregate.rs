//! Fixed reports over the incident and weather records.
//!
//! Every function here is a pure function of the records it is handed, so the
//! handlers load the current data and the results are deterministic.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Map;

use super::dto::{IncidentByYear, IncidentTotal, InvolvedYears};
use super::repo_types::{IncidentRecord, WeatherRecord, RESERVED_FIELDS};

/// Sum of `amount` per incident type, ascending by total, ties by name.
pub fn by_incident_totals(records: &[IncidentRecord]) -> Vec<IncidentTotal> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for r in records {
        *totals.entry(r.incident.as_str()).or_default() += r.amount;
    }

    let mut out: Vec<IncidentTotal> = totals
        .into_iter()
        .map(|(incident, total)| IncidentTotal {
            incident: incident.to_string(),
            total,
        })
        .collect();
    // stable sort keeps the name order from the BTreeMap for equal totals
    out.sort_by(|a, b| a.total.total_cmp(&b.total));
    out
}

/// Distinct years, ascending. Empty input gives an empty list.
pub fn all_involved_years(records: &[IncidentRecord]) -> InvolvedYears {
    let years: BTreeSet<i32> = records.iter().map(|r| r.year).collect();
    InvolvedYears {
        years: years.into_iter().collect(),
    }
}

/// Totals grouped by (incident, year), then folded into one row per incident.
pub fn by_incident_by_year(records: &[IncidentRecord]) -> Vec<IncidentByYear> {
    let mut pairs: BTreeMap<(&str, i32), f64> = BTreeMap::new();
    for r in records {
        *pairs.entry((r.incident.as_str(), r.year)).or_default() += r.amount;
    }

    let mut grouped: BTreeMap<&str, BTreeMap<i32, f64>> = BTreeMap::new();
    for ((incident, year), total) in pairs {
        grouped.entry(incident).or_default().insert(year, total);
    }

    grouped
        .into_iter()
        .map(|(incident, data)| IncidentByYear {
            incident: incident.to_string(),
            data,
        })
        .collect()
}

/// Keeps `year`, `amount` and the named metric; a metric the record does not
/// carry is simply left out. The name is matched exactly as given. An empty
/// name keeps the record whole.
pub fn project_weather(records: Vec<WeatherRecord>, metric: &str) -> Vec<WeatherRecord> {
    if metric.is_empty() {
        return records;
    }

    records
        .into_iter()
        .map(|mut r| {
            let mut kept = Map::new();
            if !RESERVED_FIELDS.contains(&metric) {
                if let Some(value) = r.metrics.remove(metric) {
                    kept.insert(metric.to_string(), value);
                }
            }
            r.metrics = kept;
            r
        })
        .collect()
}
