mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tripcal_core::trip::{DEFAULT_TRIP_TYPE, parse_date, parse_time};
use tripcal_core::{Pace, TripRequest, TripcalResult};

#[derive(Parser)]
#[command(name = "tripcal")]
#[command(about = "Plan a trip with an AI model and export the itinerary to your calendar")]
struct Cli {
    /// Show debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an itinerary and write its calendar file
    Plan {
        #[command(flatten)]
        trip: TripArgs,

        /// Directory for the .ics file (defaults to output_dir from config)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Also keep the raw service response in this file
        #[arg(long)]
        save_response: Option<PathBuf>,
    },
    /// Show the prompt that would be sent, without calling the service
    Prompt {
        #[command(flatten)]
        trip: TripArgs,
    },
    /// Parse a saved raw response and write its calendar file
    Parse {
        file: PathBuf,

        /// Destination the response was generated for (names the .ics file)
        #[arg(short, long)]
        destination: String,

        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write a commented default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Show where tripcal reads and writes files
    Path,
}

#[derive(Args, Debug, Clone)]
struct TripArgs {
    /// City or region, e.g. "Tokyo"
    #[arg(short, long)]
    destination: String,

    /// First day of the trip (YYYY-MM-DD)
    #[arg(long, value_parser = start_date)]
    start: NaiveDate,

    /// Last day of the trip (YYYY-MM-DD)
    #[arg(long, value_parser = end_date)]
    end: NaiveDate,

    /// Arrival time on the first day (HH:MM)
    #[arg(long, default_value = "10:00", value_parser = arrival_time)]
    arrival: NaiveTime,

    /// Departure time on the last day (HH:MM)
    #[arg(long, default_value = "18:00", value_parser = departure_time)]
    departure: NaiveTime,

    /// Hotel or area you're staying in
    #[arg(short, long)]
    accommodation: String,

    /// Places you want to see, optionally with times ("Skytree, Disneyland (all day)")
    #[arg(short, long, default_value = "")]
    must_visit: String,

    /// Places to leave out
    #[arg(long, default_value = "")]
    exclude: String,

    /// relaxed, normal or packed
    #[arg(short, long, default_value_t = Pace::Normal)]
    pace: Pace,

    #[arg(long, default_value = DEFAULT_TRIP_TYPE)]
    trip_type: String,
}

fn start_date(value: &str) -> TripcalResult<NaiveDate> {
    parse_date(value, "start_date")
}

fn end_date(value: &str) -> TripcalResult<NaiveDate> {
    parse_date(value, "end_date")
}

fn arrival_time(value: &str) -> TripcalResult<NaiveTime> {
    parse_time(value, "arrival_time")
}

fn departure_time(value: &str) -> TripcalResult<NaiveTime> {
    parse_time(value, "departure_time")
}

impl From<TripArgs> for TripRequest {
    fn from(args: TripArgs) -> Self {
        TripRequest {
            destination: args.destination.trim().to_string(),
            start_date: args.start,
            end_date: args.end,
            arrival_time: args.arrival,
            departure_time: args.departure,
            accommodation: args.accommodation.trim().to_string(),
            must_visit: args.must_visit.trim().to_string(),
            exclude: args.exclude.trim().to_string(),
            pace: args.pace,
            trip_type: args.trip_type.trim().to_string(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Plan {
            trip,
            output_dir,
            save_response,
        } => commands::plan::run(trip.into(), output_dir, save_response).await,
        Commands::Prompt { trip } => commands::prompt::run(&trip.into()),
        Commands::Parse {
            file,
            destination,
            output_dir,
        } => commands::parse::run(&file, &destination, output_dir),
        Commands::Config { command } => match command {
            ConfigCommands::Init { force } => commands::config::init(force),
            ConfigCommands::Path => commands::config::path(),
        },
    }
}

/// Logs go to stderr so they don't mix with the itinerary output.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
