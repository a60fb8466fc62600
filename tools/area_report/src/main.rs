/// Area report: renders contour areas in the selected unit and writes the
/// CSV summary, plus the selected contour's inspected series when present.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cellscope_core::config::InspectorConfig;
use cellscope_core::export::{output_to_csv, ContourSelection, FsWriter};
use cellscope_core::stats::StatAggregator;

#[derive(Parser, Debug)]
#[command(name = "area_report", about = "Format contour areas and export them as CSV")]
struct Args {
    /// JSON array of `{ "id", "label", "sqm" }` entries; `sqm` may be null.
    #[arg(short, long)]
    areas: PathBuf,

    /// Panel config JSON (units, translations, export directory).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Index of the unit to render in.
    #[arg(short, long, default_value = "0")]
    unit: usize,

    /// Selected contour JSON `{ "selected_contour", "grids": [...] }`.
    #[arg(short, long)]
    selection: Option<PathBuf>,

    /// Override the export directory from the config.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Deserialize)]
struct AreaDef {
    id: String,
    label: String,
    sqm: Option<f64>,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))
}

fn load_areas(stats: &mut StatAggregator, areas: Vec<AreaDef>) {
    for area in areas {
        // duplicates are logged by the aggregator and skipped
        if stats.add_entry(&area.id, &area.label).is_err() {
            continue;
        }
        if let Some(sqm) = area.sqm {
            stats.update_entry(&area.id, sqm);
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = InspectorConfig::load_or_default(args.config.as_deref())?;
    let mut stats = config.build_aggregator()?;
    if let Err(e) = stats.select_unit(args.unit) {
        warn!("{e}; keeping {}", stats.selected_unit().name);
    }

    let areas: Vec<AreaDef> = read_json(&args.areas)?;
    load_areas(&mut stats, areas);
    info!("Loaded {} entries in {}", stats.len(), stats.selected_unit().symbol);

    let selection: Option<ContourSelection> = args
        .selection
        .as_deref()
        .map(read_json::<ContourSelection>)
        .transpose()?;
    let export_dir = args.output.unwrap_or(config.export_dir);

    let mut stdout = io::stdout().lock();
    if let Some(path) = output_to_csv(&stats, &mut stdout, selection.as_ref(), &export_dir, &FsWriter)? {
        eprintln!("Selected contour written to {}", path.display());
    }
    Ok(())
}
