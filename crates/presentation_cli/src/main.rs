//! SkyCast CLI
//!
//! Command-line front end for the weather gateway: one-shot lookups and an
//! interactive session that keeps its cache and recent searches.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod render;
mod repl;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use domain::GeoLocation;
use infrastructure::{AppConfig, build_session, init_tracing};

use crate::render::{JsonReport, UnitLabels};

/// SkyCast CLI
#[derive(Parser)]
#[command(name = "skycast")]
#[command(author, version, about = "Current weather and forecasts from OpenWeatherMap", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Configuration file (default: ./skycast.toml if present)
    #[arg(short, long, env = "SKYCAST_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Current weather and daily outlook for a city
    ///
    /// Example: skycast city New York
    City {
        /// City name (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Current weather and daily outlook at a position
    ///
    /// Example: skycast coords 51.5074 -0.1278
    Coords {
        /// Latitude in degrees (-90..=90)
        #[arg(allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in degrees (-180..=180)
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },

    /// Forecast readings at a position
    Forecast {
        /// Latitude in degrees (-90..=90)
        #[arg(allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in degrees (-180..=180)
        #[arg(allow_negative_numbers = true)]
        lon: f64,

        /// Only the first reading of each upcoming day
        #[arg(long)]
        daily: bool,
    },

    /// Interactive session with cached lookups and recent searches
    Interactive,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Join the words of a city argument
fn city_argument(words: &[String]) -> String {
    words.join(" ")
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if cli.verbose > 0 {
        config.telemetry.log_filter = log_filter_from_verbosity(cli.verbose).to_string();
    }
    init_tracing(&config.telemetry).context("Failed to initialize logging")?;

    let units = UnitLabels::for_units(&config.weather.units);
    let session = build_session(&config)?;

    match cli.command {
        Commands::City { name } => {
            let report = session.search_city(&city_argument(&name)).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&JsonReport::from(&report))?);
            } else {
                print_lines(&render::report_lines(&report, units));
            }
        },

        Commands::Coords { lat, lon } => {
            let report = session.locate(GeoLocation::new(lat, lon)?).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&JsonReport::from(&report))?);
            } else {
                print_lines(&render::report_lines(&report, units));
            }
        },

        Commands::Forecast { lat, lon, daily } => {
            let location = GeoLocation::new(lat, lon)?;
            let bundle = session.gateway().get_forecast(&location).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&*bundle)?);
            } else if daily {
                print_lines(&render::outlook_lines(&bundle, units));
            } else {
                print_lines(&render::forecast_lines(&bundle, units));
            }
        },

        Commands::Interactive => {
            repl::run(&session, repl::ReplOptions {
                json: cli.json,
                units,
            })
            .await?;
        },
    }

    tracing::debug!(stats = ?session.gateway().stats(), "Finished");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        },
    }
}
