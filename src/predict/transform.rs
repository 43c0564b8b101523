//! Turns a [`RawPrediction`] into the citizen and delivery view models.
//!
//! The backend only predicts two vehicle counts and a traffic level; the
//! hourly chart and the route list are synthesized from those. Chart volumes
//! include a random offset, drawn from an [`OffsetSource`] so callers can
//! pin the output.

use rand::Rng;
use serde::Serialize;

use super::raw::{RawPrediction, RouteEstimate};

/// First hour shown on the chart.
pub const CHART_START_HOUR: u32 = 8;
/// Number of hourly chart points.
pub const CHART_POINTS: usize = 7;
/// Offsets are drawn from `0..OFFSET_SPAN`.
pub const OFFSET_SPAN: u32 = 40;
/// Chart volumes never drop below this.
pub const MIN_VOLUME: f64 = 20.0;

const OPTIMAL_DISTANCE: &str = "8.5 km";
const ALTERNATE_DISTANCE: &str = "10.2 km";
/// Junction every alternate route passes through.
const ALTERNATE_VIA: u32 = 3;
const DEFAULT_SOURCE: u32 = 1;
const DEFAULT_DESTINATION: u32 = 2;

/// Supplies the per-point chart offset.
pub trait OffsetSource {
    fn next_offset(&mut self) -> u32;
}

/// Offsets drawn uniformly from `0..OFFSET_SPAN`.
pub struct RandomOffsets<R>(pub R);

impl<R: Rng> OffsetSource for RandomOffsets<R> {
    fn next_offset(&mut self) -> u32 {
        self.0.random_range(0..OFFSET_SPAN)
    }
}

/// The same offset every time.
#[derive(Debug, Clone, Copy)]
pub struct FixedOffset(pub u32);

impl OffsetSource for FixedOffset {
    fn next_offset(&mut self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficPoint {
    pub time: String,
    pub volume: f64,
}

/// Best-time-to-travel presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CitizenView {
    pub best_time_slot: String,
    pub message: String,
    pub traffic_data: Vec<TrafficPoint>,
    pub source_vehicles: f64,
    pub destination_vehicles: f64,
    pub route_estimate: RouteEstimate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteOption {
    pub path: String,
    pub estimated_time: String,
    pub distance: String,
}

/// Route-recommendation presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryView {
    pub optimal_route: RouteOption,
    pub alternative_routes: Vec<RouteOption>,
    pub source_vehicles: f64,
    pub destination_vehicles: f64,
    pub route_estimate: RouteEstimate,
}

/// Both presentations of one backend answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub citizen: CitizenView,
    pub delivery: DeliveryView,
}

impl Prediction {
    pub fn into_citizen(self) -> CitizenView {
        self.citizen
    }

    pub fn into_delivery(self) -> DeliveryView {
        self.delivery
    }
}

pub fn transform<O: OffsetSource + ?Sized>(raw: &RawPrediction, offsets: &mut O) -> Prediction {
    let source_vehicles = raw.source_predicted_vehicles;
    let destination_vehicles = raw.destination_predicted_vehicles;
    let estimate = raw.route_traffic_estimate.clone();

    let traffic_data = traffic_series(source_vehicles + destination_vehicles, offsets);
    let best_time_slot = format!("{} - {}", traffic_data[0].time, traffic_data[1].time);

    let citizen = CitizenView {
        best_time_slot,
        message: format!(
            "Based on AI prediction: {source_vehicles} vehicles at source, \
             {destination_vehicles} at destination. Traffic estimate: {estimate}"
        ),
        traffic_data,
        source_vehicles,
        destination_vehicles,
        route_estimate: estimate.clone(),
    };

    let source = raw.source_junction.unwrap_or(DEFAULT_SOURCE);
    let destination = raw.destination_junction.unwrap_or(DEFAULT_DESTINATION);
    let (direct_minutes, alternate_minutes) = travel_minutes(&estimate);

    let delivery = DeliveryView {
        optimal_route: RouteOption {
            path: format!("J{source} → J{destination}"),
            estimated_time: format!("{direct_minutes} minutes"),
            distance: OPTIMAL_DISTANCE.to_string(),
        },
        alternative_routes: vec![RouteOption {
            path: format!("J{source} → J{ALTERNATE_VIA} → J{destination}"),
            estimated_time: format!("{alternate_minutes} minutes"),
            distance: ALTERNATE_DISTANCE.to_string(),
        }],
        source_vehicles,
        destination_vehicles,
        route_estimate: estimate,
    };

    Prediction { citizen, delivery }
}

/// Direct and alternate travel time in minutes for a traffic level.
pub fn travel_minutes(estimate: &RouteEstimate) -> (u32, u32) {
    match estimate {
        RouteEstimate::Low => (15, 20),
        RouteEstimate::High => (35, 40),
        RouteEstimate::Moderate | RouteEstimate::Other(_) => (25, 30),
    }
}

fn traffic_series<O: OffsetSource + ?Sized>(vehicles: f64, offsets: &mut O) -> Vec<TrafficPoint> {
    (0..CHART_POINTS as u32)
        .map(|i| {
            let offset = f64::from(offsets.next_offset());
            TrafficPoint {
                time: format!("{}:00", CHART_START_HOUR + i),
                volume: (offset + vehicles - 10.0).max(MIN_VOLUME),
            }
        })
        .collect()
}
