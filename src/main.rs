//! CLI entry point for the groundhog scorecard.
//!
//! With no arguments, grades every whistle-pig against every location for
//! 2000 through 2019 and prints the scorecard on stdout. Nothing is printed
//! to stdout if any year fails to load.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use groundhog_scorecard::analyzers::aggregate::aggregate;
use groundhog_scorecard::fetch::BasicClient;
use groundhog_scorecard::infra::csv_archive::CsvArchive;
use groundhog_scorecard::output::{render, render_json, render_year};
use groundhog_scorecard::services::YearSource;
use std::ffi::OsStr;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEFAULT_FROM: i32 = 2000;
const DEFAULT_TO: i32 = 2019;

#[derive(Parser)]
#[command(name = "groundhog_scorecard")]
#[command(about = "Grades groundhog shadow predictions against observed temperatures", long_about = None)]
#[command(after_help = "The deviation and prediction archives are not bundled. Supply them with \
--deviations/--predictions or GROUNDHOG_DEVIATIONS/GROUNDHOG_PREDICTIONS; \
the defaults are data/deviations.csv and data/predictions.csv.")]
struct Cli {
    /// Deviation archive (year,location,temperature_difference): path or URL
    #[arg(long, global = true, env = "GROUNDHOG_DEVIATIONS", default_value = "data/deviations.csv")]
    deviations: String,

    /// Live prediction archive (year,whistle_pig,prediction): path or URL
    #[arg(long, global = true, env = "GROUNDHOG_PREDICTIONS", default_value = "data/predictions.csv")]
    predictions: String,

    /// First year of the scorecard, inclusive
    #[arg(long, global = true, default_value_t = DEFAULT_FROM)]
    from: i32,

    /// Last year of the scorecard, inclusive
    #[arg(long, global = true, default_value_t = DEFAULT_TO)]
    to: i32,

    /// Scorecard output format
    #[arg(short, long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the multi-year scorecard (the default)
    Scorecard,
    /// Show every whistle-pig's grade at every location for one year
    Year {
        #[arg(value_name = "YEAR")]
        year: i32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/groundhog_scorecard.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("groundhog_scorecard.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

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

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!(error = %e, "Run failed, no report produced");
        return Err(e);
    }

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or(Commands::Scorecard);

    let client = BasicClient::new().context("Failed to build HTTP client")?;
    let archive = CsvArchive::load(&client, &cli.deviations, &cli.predictions)
        .context("Failed to load archives")?;

    match command {
        Commands::Scorecard => {
            let (from, to) = (cli.from, cli.to);
            if from > to {
                bail!("--from {from} is after --to {to}");
            }

            info!(from, to, whistle_pigs = ?archive.roster(), "Building scorecard");
            let scorecard = aggregate(from..=to, &archive)?;

            let report = match cli.format {
                Format::Text => render(&scorecard),
                Format::Json => render_json(&scorecard)?,
            };
            print!("{report}");
        }
        Commands::Year { year } => {
            let record = archive
                .fetch(year)
                .with_context(|| format!("Failed to load {year}"))?;
            print!("{}", render_year(&record));
        }
    }

    Ok(())
}
