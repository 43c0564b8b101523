//! Text and JSON rendering of pages and backend payloads.
//!
//! Renderers build one line per entry and return the joined text,
//! newline-terminated.

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use crate::infra::backend::{Health, TrafficStats};
use crate::junction::Junction;
use crate::predict::{CitizenView, DeliveryView, RouteOption};
use crate::views::{FormStatus, LandingPage};

/// Widest chart bar, in characters.
const BAR_WIDTH: usize = 40;

/// Debug-logs a rendered view in Rust's pretty-print format.
pub fn log_view<T: std::fmt::Debug>(view: &T) {
    debug!("{:#?}", view);
}

/// Serializes a view or payload as pretty-printed JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn join(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn render_landing(page: &LandingPage) -> String {
    let mut lines = vec![LandingPage::TITLE.to_string(), String::new()];
    lines.extend(page.destinations().iter().map(|destination| {
        format!(
            "  {:<10} {}: {}",
            destination.command(),
            destination.title(),
            destination.description()
        )
    }));
    join(lines)
}

/// One selector option per line, as `id - name`.
pub fn render_junctions(junctions: &[Junction]) -> String {
    junctions
        .iter()
        .map(|junction| format!("{} - {}\n", junction.id.get(), junction.name))
        .collect()
}

/// Renders whatever the form currently holds.
pub fn render_status<V>(status: &FormStatus<V>, render: impl Fn(&V) -> String) -> String {
    match status {
        FormStatus::Idle => "Enter your travel details to see results\n".to_string(),
        FormStatus::Submitting => "Analyzing traffic patterns...\n".to_string(),
        FormStatus::Success(view) => render(view),
        FormStatus::Error(message) => format!("{message}\n"),
    }
}

pub fn render_citizen(view: &CitizenView) -> String {
    let mut lines = vec![
        format!("Best Travel Time: {}", view.best_time_slot),
        view.message.clone(),
        String::new(),
        "Traffic Volume Forecast".to_string(),
    ];

    let peak = view
        .traffic_data
        .iter()
        .map(|p| p.volume)
        .fold(0.0_f64, f64::max);

    lines.extend(view.traffic_data.iter().map(|point| {
        let bar = if peak > 0.0 {
            ((point.volume / peak) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        format!(
            "  {:>5} | {:<width$} {}",
            point.time,
            "#".repeat(bar),
            point.volume,
            width = BAR_WIDTH
        )
    }));
    join(lines)
}

pub fn render_delivery(view: &DeliveryView) -> String {
    let mut lines = vec!["Optimal Route".to_string()];
    lines.extend(route_lines(&view.optimal_route));

    if !view.alternative_routes.is_empty() {
        lines.push("Alternative Routes".to_string());
        lines.extend(view.alternative_routes.iter().flat_map(route_lines));
    }

    lines.push(format!(
        "Predicted vehicles: {} at source, {} at destination ({} traffic)",
        view.source_vehicles, view.destination_vehicles, view.route_estimate
    ));
    join(lines)
}

fn route_lines(route: &RouteOption) -> [String; 3] {
    [
        format!("  Path:           {}", route.path),
        format!("  Estimated Time: {}", route.estimated_time),
        format!("  Distance:       {}", route.distance),
    ]
}

pub fn render_health(health: &Health) -> String {
    match (&health.status, health.model_loaded) {
        (Some(status), Some(loaded)) => format!("Backend {status} (model loaded: {loaded})\n"),
        (Some(status), None) => format!("Backend {status}\n"),
        _ => format!("Backend replied: {}\n", health.raw),
    }
}

pub fn render_stats(stats: &TrafficStats) -> String {
    let mut lines = vec![format!("Records: {}", stats.total_records)];
    if let (Some(start), Some(end)) = (&stats.date_start, &stats.date_end) {
        lines.push(format!("Range:   {start} to {end}"));
    }
    if let Some(avg) = stats.avg_vehicles {
        lines.push(format!("Average vehicles: {avg}"));
    }
    if let (Some(min), Some(max)) = (stats.min_vehicles, stats.max_vehicles) {
        lines.push(format!("Vehicles range:   {min} to {max}"));
    }
    if !stats.peak_hours.is_empty() {
        let hours: Vec<String> = stats.peak_hours.iter().map(|h| format!("{h}:00")).collect();
        lines.push(format!("Peak hours:       {}", hours.join(", ")));
    }
    join(lines)
}
