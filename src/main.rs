use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use hotel_reports::config::{self, ReportConfig};
use hotel_reports::{range, DateRange, OutputPlan, ReportError, ReportGenerator, Result};

/// Generate daily GMV, gross revenue and booking count reports for a space.
///
/// The text report goes to standard output; logs go to standard error.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Space to report on.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    space_id: u64,

    /// First day of the report (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date_arg)]
    start_date: NaiveDate,

    /// Last day of the report, inclusive (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date_arg)]
    end_date: NaiveDate,

    /// Also write the daily series to this JSON file.
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Also render a PDF report to this file.
    #[arg(long, value_name = "PATH")]
    pdf: Option<PathBuf>,

    /// Base URL of the reporting API.
    #[arg(long, env = config::BASE_URL_ENV)]
    base_url: Option<String>,

    /// API key sent as a bearer token.
    #[arg(long, env = config::API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    /// HTTP timeout in seconds.
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// JSON config file (defaults to the platform config directory).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Do not print the text report.
    #[arg(short, long)]
    quiet: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_date_arg(value: &str) -> std::result::Result<NaiveDate, String> {
    range::parse_date(value).map_err(|e| e.to_string())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("Error: {}", err);
        print_error_sources(&err);
        std::process::exit(err.exit_code());
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hotel_reports={level},warn")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<()> {
    // Validated before anything touches the network.
    let range = DateRange::new(args.start_date, args.end_date)?;
    let config = resolve_config(&args)?;

    let generator = ReportGenerator::builder().config(config).build()?;
    debug!("{}", generator);

    let report = generator.generate(args.space_id, range)?;
    info!(
        space_id = report.space_id(),
        days = report.range().len(),
        "report ready"
    );

    OutputPlan {
        console: !args.quiet,
        json: args.output,
        pdf: args.pdf,
    }
    .write(&report)
}

/// Flags and environment override the config file, which overrides defaults.
fn resolve_config(args: &Args) -> Result<ReportConfig> {
    let mut config = ReportConfig::default();

    let file = match &args.config {
        Some(path) => Some(config::load_file(path)?.ok_or_else(|| {
            ReportError::Config(format!("config file {} does not exist", path.display()))
        })?),
        None => match config::default_config_path() {
            Some(path) => config::load_file(&path)?,
            None => None,
        },
    };
    if let Some(file) = file {
        config = config.merge_file(file);
    }

    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(api_key) = &args.api_key {
        config.api_key = Some(api_key.clone());
    }
    if let Some(secs) = args.timeout {
        config.timeout = Duration::from_secs(secs);
    }
    Ok(config)
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
