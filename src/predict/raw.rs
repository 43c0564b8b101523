//! The backend's prediction payload, read field by field.

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Coarse traffic level for the route between the two junctions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RouteEstimate {
    Low,
    #[default]
    Moderate,
    High,
    /// Anything else the backend sent, kept verbatim for display.
    Other(String),
}

impl RouteEstimate {
    /// Matches the backend's exact lowercase labels. Any other spelling,
    /// `"LOW"` included, is kept verbatim and bucketed as moderate.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "" | "moderate" => Self::Moderate,
            "low" => Self::Low,
            "high" => Self::High,
            _ => Self::Other(raw.to_string()),
        }
    }

    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::parse(s),
            Value::Number(n) if n.as_f64() != Some(0.0) => Self::Other(n.to_string()),
            Value::Bool(true) => Self::Other("true".to_string()),
            _ => Self::Moderate,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for RouteEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RouteEstimate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Prediction payload as returned by `POST /predict`.
///
/// Every field is optional on the wire. Missing or mistyped values take
/// their defaults instead of failing the whole response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPrediction {
    pub source_predicted_vehicles: f64,
    pub destination_predicted_vehicles: f64,
    pub route_traffic_estimate: RouteEstimate,
    pub source_junction: Option<u32>,
    pub destination_junction: Option<u32>,

    // informational, echoed by the backend
    pub date: Option<String>,
    pub time: Option<String>,
    pub traffic_difference: Option<f64>,
    pub peak_hour: Option<bool>,
    pub weekend: Option<bool>,
}

impl RawPrediction {
    pub fn from_json(value: &Value) -> Self {
        Self {
            source_predicted_vehicles: vehicles(&value["source_predicted_vehicles"]),
            destination_predicted_vehicles: vehicles(&value["destination_predicted_vehicles"]),
            route_traffic_estimate: RouteEstimate::from_json(&value["route_traffic_estimate"]),
            source_junction: junction_number(&value["source_junction"]),
            destination_junction: junction_number(&value["destination_junction"]),
            date: value["date"].as_str().map(str::to_string),
            time: value["time"].as_str().map(str::to_string),
            traffic_difference: value["traffic_difference"].as_f64(),
            peak_hour: value["peak_hour"].as_bool(),
            weekend: value["weekend"].as_bool(),
        }
    }
}

fn vehicles(value: &Value) -> f64 {
    value.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0)
}

fn junction_number(value: &Value) -> Option<u32> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| *n > 0)
}
