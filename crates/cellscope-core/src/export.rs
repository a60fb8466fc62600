//! CSV export of area statistics and inspected cell series.
use std::borrow::Cow;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::format::format_general;
use crate::localization::Translator;
use crate::stats::StatAggregator;

/// Writes a finished export to storage.
pub trait FileWriter {
    fn write_file(&self, path: &Path, bytes: &[u8]) -> Result<()>;
}

/// Writes to the local filesystem, creating parent directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsWriter;

impl FileWriter for FsWriter {
    fn write_file(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create export directory: {:?}", dir))?;
        }
        fs::write(path, bytes).with_context(|| format!("Failed to write export: {:?}", path))
    }
}

/// Values sampled along the selected contour for one grid, in cell order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectedGrid {
    pub layer_name: String,
    #[serde(default)]
    pub units: String,
    pub values: Vec<f32>,
}

/// The contour currently selected for export, with its inspected grids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContourSelection {
    pub selected_contour: i32,
    pub grids: Vec<InspectedGrid>,
}

impl ContourSelection {
    /// Contours 0 and 1 are not user selections.
    pub fn is_exportable(&self) -> bool {
        self.selected_contour > 1
    }
}

/// Quote a CSV field when it contains a delimiter, quote or line break.
pub fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Parse a single escaped CSV field back to its text.
pub fn unescape(field: &str) -> Result<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(field.as_bytes());
    let record = match reader.records().next() {
        Some(record) => record.context("Failed to parse CSV field")?,
        None => return Ok(String::new()),
    };
    Ok(record.get(0).unwrap_or_default().to_string())
}

/// One `KEY,value` line per entry, in insertion order.
pub fn export_summary(stats: &StatAggregator) -> String {
    let mut out = String::new();
    for (_, entry) in stats.entries() {
        out.push_str(&escape(&entry.row.key().to_uppercase()));
        out.push(',');
        out.push_str(&escape(entry.row.value()));
        out.push('\n');
    }
    out
}

/// Table of inspected values: a `Cells` column of 1-based positions, then one
/// column per grid.
///
/// Rows follow the first-insertion order of their position. A grid shorter
/// than the others contributes nothing to the later rows, so their values
/// shift left.
pub fn export_selected_series(grids: &[InspectedGrid], tr: &dyn Translator) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    let mut header = vec![tr.get("Cells")];
    header.extend(
        grids
            .iter()
            .map(|g| format!("{} ({})", tr.get(&g.layer_name), tr.get(&g.units))),
    );
    header.push(String::new());
    writer.write_record(&header)?;

    let mut lines: IndexMap<String, Vec<String>> = IndexMap::new();
    for grid in grids {
        for (j, value) in grid.values.iter().enumerate() {
            lines
                .entry((j + 1).to_string())
                .or_default()
                .push(format_general(*value));
        }
    }
    for (index, values) in &lines {
        writer.write_record(std::iter::once(index).chain(values))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow!("Failed to flush CSV: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

/// File name for a series export started at `now`.
pub fn series_file_name(now: DateTime<Local>) -> String {
    format!("{}SelectedContour.csv", now.format("%Y%m%d_%H%M%S_"))
}

/// Write the summary to `csv`, and the series of an exportable selection to
/// `export_dir` through `files`. Returns the series path when one was written.
pub fn output_to_csv<W: Write>(
    stats: &StatAggregator,
    csv: &mut W,
    selection: Option<&ContourSelection>,
    export_dir: &Path,
    files: &dyn FileWriter,
) -> Result<Option<PathBuf>> {
    csv.write_all(export_summary(stats).as_bytes())
        .context("Failed to write summary")?;

    let Some(selection) = selection.filter(|s| s.is_exportable()) else {
        return Ok(None);
    };
    let path = export_dir.join(series_file_name(Local::now()));
    let text = export_selected_series(&selection.grids, stats.translator())?;
    files.write_file(&path, text.as_bytes())?;
    info!("Exported selected contour {} to {:?}", selection.selected_contour, path);
    Ok(Some(path))
}
