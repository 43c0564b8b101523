//! CLI entry point for the traffic prediction client.
//!
//! Provides subcommands for the citizen (best travel time) and delivery
//! (route) pages, plus junction listing and backend health checks.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use traffic_client::{
    config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_ORIGIN, DEFAULT_TIMEOUT_SECS},
    infra::backend::BackendClient,
    output,
    predict::PredictionClient,
    services::catalog_api::fetch_junctions,
    views::{CitizenPage, DeliveryPage, FormStatus, LandingPage, SubmitRejected, citizen_catalog},
};

#[derive(Parser)]
#[command(name = "traffic_client")]
#[command(about = "Traffic and delivery-route predictions between road junctions", long_about = None)]
struct Cli {
    #[command(flatten)]
    backend: BackendArgs,

    /// Print results as JSON instead of text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct BackendArgs {
    /// Prediction service URL, or a path prefix such as "/api"
    #[arg(long, global = true, env = "TRAFFIC_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Scheme and host used when the base URL is a path prefix
    #[arg(long, global = true, env = "TRAFFIC_API_ORIGIN", default_value = DEFAULT_ORIGIN)]
    origin: String,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "TRAFFIC_API_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Seed for the illustrative chart offsets (reproducible output)
    #[arg(long, global = true, env = "TRAFFIC_CHART_SEED")]
    seed: Option<u64>,
}

impl BackendArgs {
    fn config(&self) -> ClientConfig {
        ClientConfig::new(self.base_url.clone())
            .with_origin(self.origin.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_seed(self.seed)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the available pages
    Landing,
    /// List junctions that can be used as source or destination
    Junctions {
        /// Ask the backend instead of using the built-in table
        #[arg(short, long, default_value_t = false)]
        remote: bool,
    },
    /// Check that the prediction service is up
    Health,
    /// Show statistics about the historical traffic data
    Stats,
    /// Find the best time to travel between two junctions
    Citizen {
        /// Source junction (e.g. 1 or J001)
        source: String,
        /// Destination junction
        destination: String,
        /// Preferred date and time, e.g. 2025-09-20T08:30
        date_time: String,
    },
    /// Plan a delivery route between two junctions
    Delivery {
        /// Source junction (e.g. 1 or J001)
        source: String,
        /// Destination junction
        destination: String,
        /// Departure date and time; defaults to now
        #[arg(long, value_name = "DATE_TIME")]
        at: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _log_guard = init_tracing()?;

    let cli = Cli::parse();
    let config = cli.backend.config();
    info!(api_root = %config.api_root(), "Using prediction service");

    match cli.command.unwrap_or(Commands::Landing) {
        Commands::Landing => {
            print!("{}", output::render_landing(&LandingPage));
        }
        Commands::Junctions { remote } => {
            let junctions = if remote {
                let backend = BackendClient::from_config(config)?;
                fetch_junctions(&backend).await
            } else {
                fetch_junctions(&citizen_catalog()).await
            };

            if cli.json {
                println!("{}", output::to_json(&junctions)?);
            } else {
                print!("{}", output::render_junctions(&junctions));
            }
        }
        Commands::Health => {
            let backend = BackendClient::from_config(config)?;
            let health = backend.health().await?;
            if !health.is_healthy() {
                warn!(raw = %health.raw, "Backend does not report healthy");
            }

            if cli.json {
                println!("{}", output::to_json(&health.raw)?);
            } else {
                print!("{}", output::render_health(&health));
            }
        }
        Commands::Stats => {
            let backend = BackendClient::from_config(config)?;
            let stats = backend.traffic_stats().await?;

            if cli.json {
                println!("{}", output::to_json(&stats)?);
            } else {
                print!("{}", output::render_stats(&stats));
            }
        }
        Commands::Citizen {
            source,
            destination,
            date_time,
        } => {
            let client = PredictionClient::new(BackendClient::from_config(config)?);
            let mut page = CitizenPage::new();
            page.form.source = source;
            page.form.destination = destination;
            page.form.date_time = date_time;

            report_rejection(page.submit(&client).await);
            print_status(page.form.status(), cli.json, output::render_citizen)?;
        }
        Commands::Delivery {
            source,
            destination,
            at,
        } => {
            let client = PredictionClient::new(BackendClient::from_config(config)?);
            let mut page = DeliveryPage::new();
            page.form.source = source;
            page.form.destination = destination;
            if let Some(at) = at {
                page.form.date_time = at;
            }

            report_rejection(page.open(client.backend(), &client).await);
            info!(
                junctions = page.junctions().len(),
                "Junction selectors enabled"
            );
            print_status(page.form.status(), cli.json, output::render_delivery)?;
        }
    }

    Ok(())
}

/// Colored stderr plus a daily-rolling JSON log file.
///
/// The returned guard flushes the file writer when dropped.
fn init_tracing() -> Result<WorkerGuard> {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/traffic_client.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("traffic_client.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(guard)
}

fn report_rejection(submitted: Result<(), SubmitRejected>) {
    if let Err(rejected) = submitted {
        warn!(reason = %rejected, "Prediction not requested");
        eprintln!("{rejected}");
    }
}

fn print_status<V: serde::Serialize + std::fmt::Debug>(
    status: &FormStatus<V>,
    json: bool,
    render: impl Fn(&V) -> String,
) -> Result<()> {
    if let FormStatus::Success(view) = status {
        output::log_view(view);
    }
    match status {
        FormStatus::Success(view) if json => println!("{}", output::to_json(view)?),
        FormStatus::Error(_) => eprint!("{}", output::render_status(status, render)),
        _ => print!("{}", output::render_status(status, render)),
    }
    Ok(())
}
