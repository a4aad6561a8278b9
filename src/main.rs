use anyhow::Context;
use clap::{Parser, Subcommand};
use configuration::{Config, LogFormat, init_tracing, load_config};
use datasource::{DataSource, Dataset};
use indicatif::{ProgressBar, ProgressStyle};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use views::{Analysis, Page, ViewRequest, ViewSelector, default_year};
use web_server::AppState;

mod render;

/// The main entry point for the Shoplens dashboard.
#[tokio::main]
async fn main() -> ExitCode {
    // `.env` is optional; it only carries SHOPLENS__* overrides.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Explore the e-commerce orders dataset: delivery times, order status, customers,
/// regional delivery, holiday effects and user locations.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a config file. Defaults to an optional `shoplens.toml` in the working directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides `logging.format` from the config file.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the views as a JSON API.
    Serve(ServeArgs),
    /// List the purchase years available for filtering.
    Years,
    /// Show row counts and data-quality counters from the load.
    Summary,
    /// Compute one view and print it.
    View(ViewArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Overrides `server.addr` from the config file (e.g., "127.0.0.1:8080").
    #[arg(long)]
    addr: Option<SocketAddr>,
}

#[derive(Parser)]
struct ViewArgs {
    /// The page: eda, explanatory or geospatial.
    page: Page,

    /// The analysis on that page, e.g. delivery-time or holiday-trend.
    analysis: Analysis,

    /// The purchase year to filter by. Defaults to the latest year with orders.
    #[arg(long)]
    year: Option<i32>,

    /// Print the view as JSON instead of a table.
    #[arg(long)]
    json: bool,

    /// Print at most this many rows.
    #[arg(long)]
    limit: Option<usize>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    // Keep the guard alive for the whole run so the log file is flushed on exit.
    let _log_guard = init_tracing(&config.logging)?;

    let dataset = load_with_spinner(&config)?;

    match cli.command {
        Commands::Serve(args) => handle_serve(args, config, dataset).await,
        Commands::Years => {
            render::print_years(&analytics::available_years(dataset.orders()));
            Ok(())
        }
        Commands::Summary => {
            render::print_summary(dataset.summary());
            Ok(())
        }
        Commands::View(args) => handle_view(args, &config, &dataset),
    }
}

/// Loads the CSV files once, with a spinner on the terminal.
fn load_with_spinner(config: &Config) -> anyhow::Result<Arc<Dataset>> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    spinner.set_message("Loading orders, payments, customers and geolocation...");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let source = DataSource::new(config.data.clone());
    let loaded = source.load();
    spinner.finish_and_clear();

    Ok(loaded?)
}

async fn handle_serve(args: ServeArgs, config: Config, dataset: Arc<Dataset>) -> anyhow::Result<()> {
    let addr = args.addr.unwrap_or(config.server.addr);
    let state = AppState {
        dataset,
        holidays: Arc::new(config.holiday_calendar()?),
        geo: config.geo,
    };
    web_server::run_server(addr, state).await
}

fn handle_view(args: ViewArgs, config: &Config, dataset: &Dataset) -> anyhow::Result<()> {
    let holidays = config.holiday_calendar()?;
    let selector = ViewSelector::new(dataset, &holidays, config.geo);

    let year = args.year.or_else(|| default_year(dataset));
    let request = ViewRequest::new(args.page, args.analysis, year)?;
    tracing::debug!(?request, "Rendering view.");
    let view = selector.select(&request);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        render::print_view(args.analysis, &view, args.limit);
    }
    Ok(())
}
