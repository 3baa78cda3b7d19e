use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use corridor::classify::{classify, ClassifierConfig, DEFAULT_NEAR_RADIUS_KM};
use corridor::index::PlaceIndex;
use corridor::logging::init_logging;
use corridor::record::read_places_from_path;
use corridor::report::Report;

#[derive(Parser, Debug)]
#[command(name = "corridor")]
#[command(about = "Report the places near a destination and along the route from a start place.", long_about = None)]
struct Cli {
    /// Path to the places .csv file (Name, Address, Latitude, Longitude)
    #[arg(short, long)]
    csv: String,

    /// Start place; matched against names, then addresses. Prompted for if omitted.
    #[arg(short, long)]
    start: Option<String>,

    /// Destination place. Prompted for if omitted.
    #[arg(short, long)]
    end: Option<String>,

    /// Places within this many km of the destination count as nearby
    #[arg(short = 'r', long, default_value_t = DEFAULT_NEAR_RADIUS_KM)]
    near_radius_km: f64,

    /// Also write the report as CSV (list, name, distance_km)
    #[arg(short, long)]
    out: Option<String>,

    /// Sort each list by distance instead of dataset order
    #[arg(long, default_value_t = false)]
    sort_by_distance: bool,
}

fn prompt(question: &str) -> Result<String> {
    print!("{}", question);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading from stdin")?;
    Ok(line.trim().to_string())
}

fn main() -> Result<ExitCode> {
    init_logging();
    let cli = Cli::parse();

    let config = ClassifierConfig::new(cli.near_radius_km)?;

    let dataset =
        read_places_from_path(&cli.csv).with_context(|| format!("reading {}", &cli.csv))?;
    for skipped in &dataset.skipped {
        log::warn!("row {} ({:?}) skipped: {}", skipped.row, skipped.name, skipped.error);
    }
    let skipped_records = dataset.skipped_count();
    let index = PlaceIndex::build(dataset.records);

    let start = match cli.start {
        Some(s) => s,
        None => prompt("Enter your starting location (e.g., Bengaluru): ")?,
    };
    let end = match cli.end {
        Some(e) => e,
        None => prompt("Enter your destination (e.g., Mysuru): ")?,
    };

    let (start, end) = match index.resolve_route(&start, &end) {
        Ok(route) => route,
        Err(err) => {
            println!("{}", err);
            return Ok(ExitCode::FAILURE);
        }
    };
    log::info!(
        "Route ({:.4}, {:.4}) -> ({:.4}, {:.4}), {:.2} km",
        start.lat,
        start.lon,
        end.lat,
        end.lon,
        start.distance_km(&end)
    );

    let results = classify(start, end, index.records(), &config);
    let report = Report::build(&results, skipped_records, cli.sort_by_distance);

    println!();
    print!("{}", report);

    if let Some(out_path) = cli.out {
        let file =
            File::create(&out_path).with_context(|| format!("creating CSV {}", &out_path))?;
        report
            .write_csv(file)
            .with_context(|| format!("writing CSV {}", &out_path))?;
        log::info!(
            "Wrote {} near-destination and {} on-route places to {}",
            report.near_destination.len(),
            report.on_route.len(),
            out_path
        );
    }

    Ok(ExitCode::SUCCESS)
}
