/// Cell inspector: samples every layer of a layers JSON file at one
/// coordinate and prints the labelled values.
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cellscope_core::coords::{transect_fraction, Coordinate};
use cellscope_core::inspector::{inspect, InspectorRow, Layer};

#[derive(Parser, Debug)]
#[command(name = "inspect", about = "Print grid values of every layer at a coordinate")]
struct Args {
    /// JSON array of layers, each `{ "name", "patches": [grid, ...] }`.
    #[arg(short, long)]
    layers: PathBuf,

    /// Longitude in degrees.
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// Latitude in degrees.
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Inspection line as `lon0,lat0,lon1,lat1`; reports the point's position along it.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    line: Option<Vec<f64>>,

    /// Emit JSON instead of aligned text.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    coordinate: Coordinate,
    #[serde(skip_serializing_if = "Option::is_none")]
    transect_fraction: Option<f64>,
    rows: &'a [InspectorRow],
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Some(line) = &args.line {
        if line.len() != 4 {
            bail!("--line expects lon0,lat0,lon1,lat1, got {} values", line.len());
        }
    }
    let content = fs::read_to_string(&args.layers)
        .with_context(|| format!("Failed to read layers file: {:?}", args.layers))?;
    let layers: Vec<Layer> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse layers file: {:?}", args.layers))?;
    info!("Loaded {} layers from {:?}", layers.len(), args.layers);

    let at = Coordinate::new(args.lon, args.lat);
    let rows = inspect(&layers, at);
    let fraction = args.line.as_deref().and_then(|l| {
        transect_fraction(at, Coordinate::new(l[0], l[1]), Coordinate::new(l[2], l[3]))
    });

    if args.json {
        let report = Report { coordinate: at, transect_fraction: fraction, rows: &rows };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let width = rows.iter().map(|r| r.label.chars().count()).max().unwrap_or(0);
    for row in &rows {
        println!("{:<width$}  {}", row.label, row.value);
    }
    if let Some(f) = fraction {
        println!("{:<width$}  {:.3}", "Transect", f);
    }
    Ok(())
}
