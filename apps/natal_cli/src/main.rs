mod input;

use anyhow::Context;
use clap::Parser;
use natal::{BirthData, ChartAssembler, ChartRecord, GeoLocation, SwissEphemerisAdapter, UtcOffset};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Compute a natal chart and print it as JSON")]
struct Args {
    /// Birth date, DD.MM.YYYY (local).
    date: String,

    /// Birth time, HH:MM (local).
    time: String,

    /// Latitude in degrees, north positive.
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Longitude in degrees, east positive.
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// Offset of the local time from UTC, e.g. +03:00 (default from config).
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: Option<String>,

    /// Name recorded in the chart.
    #[arg(long, default_value = "anonymous")]
    name: String,

    /// Place label recorded in the chart (not geocoded).
    #[arg(long)]
    place: Option<String>,

    /// Config file (otherwise configs/natal.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Swiss Ephemeris data directory; overrides the config.
    #[arg(long)]
    ephemeris_path: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let settings = natal_config::load_settings(args.config.as_deref())?;

    let utc_offset: UtcOffset = match &args.utc_offset {
        Some(text) => text
            .parse()
            .with_context(|| format!("--utc-offset {:?}", text))?,
        None => settings.default_utc_offset,
    };

    let birth = BirthData {
        name: args.name,
        date: input::parse_date(&args.date)?,
        time: input::parse_time(&args.time)?,
        utc_offset,
        location: GeoLocation::new(args.lat, args.lon),
        place: args.place,
    };

    let ephemeris_path = args.ephemeris_path.or(settings.ephemeris_path);
    let adapter = SwissEphemerisAdapter::new(ephemeris_path)
        .context("Failed to initialize Swiss Ephemeris")?;
    log::info!("Ephemeris data: {}", adapter.ephemeris_path().display());

    let assembler = ChartAssembler::with_settings(adapter, settings.aspects);
    let chart = assembler
        .assemble(&birth)
        .with_context(|| format!("Failed to compute chart for {}", birth.name))?;

    log::info!(
        "Computed chart for {}: {} aspects",
        birth.name,
        chart.aspects().len()
    );

    let json = ChartRecord::from(&chart).to_json(args.pretty)?;
    println!("{}", json);
    Ok(())
}
