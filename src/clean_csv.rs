use anyhow::{Context, Result};
use clap::Parser;
use csv::Writer;

use corridor::logging::init_logging;
use corridor::record::{read_places_from_path, CleanPlaceRow};

#[derive(Parser, Debug)]
#[command(name = "clean")]
#[command(about = "Normalize the coordinates of a places CSV and write the rows that parse.", long_about = None)]
struct Cli {
    /// Path to the places .csv file (Name, Address, Latitude, Longitude)
    #[arg(short, long)]
    csv: String,

    /// Output CSV (name, address, latitude, longitude)
    #[arg(short, long)]
    out: String,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let dataset =
        read_places_from_path(&cli.csv).with_context(|| format!("reading {}", &cli.csv))?;

    for skipped in &dataset.skipped {
        log::warn!("row {} ({:?}) skipped: {}", skipped.row, skipped.name, skipped.error);
    }

    let mut wtr =
        Writer::from_path(&cli.out).with_context(|| format!("creating CSV {}", &cli.out))?;
    for record in &dataset.records {
        wtr.serialize(CleanPlaceRow::from(record))?;
    }
    wtr.flush()?;

    println!(
        "Wrote {} places to {}; skipped {} malformed rows",
        dataset.records.len(),
        cli.out,
        dataset.skipped_count()
    );

    Ok(())
}
