//! Informational payloads of the prediction service.

use serde::Serialize;
use serde_json::Value;

/// Reply of `GET /health`. The shape is not fixed, so the raw JSON is kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Health {
    pub status: Option<String>,
    pub model_loaded: Option<bool>,
    pub raw: Value,
}

impl Health {
    pub fn from_json(value: Value) -> Self {
        Self {
            status: value["status"].as_str().map(str::to_string),
            model_loaded: value["model_loaded"].as_bool(),
            raw: value,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status.as_deref() == Some("healthy")
    }
}

/// Summary of the historical data behind the model, from `GET /traffic-stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrafficStats {
    pub total_records: u64,
    pub date_start: Option<String>,
    pub date_end: Option<String>,
    pub avg_vehicles: Option<f64>,
    pub max_vehicles: Option<f64>,
    pub min_vehicles: Option<f64>,
    /// Busiest hours of the day, busiest first.
    pub peak_hours: Vec<u32>,
}

impl TrafficStats {
    pub fn from_json(value: &Value) -> Self {
        let overall = &value["overall_stats"];
        let peak_hours = value["peak_hours"]
            .as_array()
            .map(|hours| {
                hours
                    .iter()
                    .filter_map(Value::as_u64)
                    .filter_map(|h| u32::try_from(h).ok())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            total_records: value["total_records"].as_u64().unwrap_or(0),
            date_start: value["date_range"]["start"].as_str().map(str::to_string),
            date_end: value["date_range"]["end"].as_str().map(str::to_string),
            avg_vehicles: overall["avg_vehicles"].as_f64(),
            max_vehicles: overall["max_vehicles"].as_f64(),
            min_vehicles: overall["min_vehicles"].as_f64(),
            peak_hours,
        }
    }
}
