//! Point sampling of plain, multi-category and classification grids.
//!
//! Missing data is never an error: every failure path yields
//! [`Sample::NoData`], displayed as "N/A".
use serde::{Deserialize, Serialize};

use crate::classification::{self, ClassificationGrid};
use crate::coords::Coordinate;
use crate::format::format_cell_value;
use crate::grid::GridData;
use crate::multigrid::{GridCategory, MultiGrid};

pub const NO_DATA: &str = "N/A";

/// A grid of any supported kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridKind {
    Plain(GridData),
    Multi(MultiGrid),
    Classification(ClassificationGrid),
}

/// One category reading from a multi-grid sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryValue {
    pub category: String,
    /// None when the category grid has no data at the point.
    pub value: Option<String>,
}

impl CategoryValue {
    pub fn display(&self) -> &str {
        self.value.as_deref().unwrap_or(NO_DATA)
    }
}

/// Result of sampling one grid at one coordinate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Sample {
    NoData,
    Value(String),
    /// Readings for every category but the last, then the summary category.
    Multi { rows: Vec<CategoryValue>, summary: CategoryValue },
}

impl Sample {
    pub fn is_no_data(&self) -> bool {
        matches!(self, Sample::NoData)
    }

    /// The single-row display value. For a multi-grid this is the summary
    /// category's reading.
    pub fn display(&self) -> &str {
        match self {
            Sample::NoData => NO_DATA,
            Sample::Value(v) => v,
            Sample::Multi { summary, .. } => summary.display(),
        }
    }
}

impl GridKind {
    pub fn sample(&self, at: Coordinate, want_units: bool) -> Sample {
        let value = match self {
            GridKind::Plain(grid) => sample_grid(grid, at, want_units),
            GridKind::Classification(grid) => sample_classification(grid, at),
            GridKind::Multi(multi) => return sample_multi(multi, at),
        };
        value.map_or(Sample::NoData, Sample::Value)
    }
}

/// Display value of a plain grid at `at`.
pub fn sample_grid(grid: &GridData, at: Coordinate, want_units: bool) -> Option<String> {
    if !grid.has_values() || !grid.is_inside(at.lon, at.lat) {
        return None;
    }
    let cell = if grid.values_mask.is_some() {
        grid.get_cell(at.lon, at.lat)
    } else {
        grid.get_value(at.lon, at.lat)
    }
    .filter(|v| !v.is_nan())?;

    if let Some(categories) = &grid.categories {
        let code = cell.round_ties_even() as i32;
        let label = usize::try_from(code)
            .ok()
            .and_then(|i| categories.get(i))
            .cloned()
            .unwrap_or_else(|| format!("Unknown ({code})"));
        return Some(label);
    }

    let mut text = format_cell_value(cell);
    if want_units {
        text.push(' ');
        text.push_str(&grid.units);
    }
    Some(text)
}

/// Display value of a classification grid at `at`.
pub fn sample_classification(grid: &ClassificationGrid, at: Coordinate) -> Option<String> {
    grid.mask_at(at.lon, at.lat).map(classification::describe)
}

fn category_value(category: &GridCategory, at: Coordinate) -> CategoryValue {
    CategoryValue {
        category: category.name.clone(),
        value: sample_grid(&category.grid, at, false),
    }
}

/// Per-category readings of a multi-grid at `at`.
pub fn sample_multi(multi: &MultiGrid, at: Coordinate) -> Sample {
    if !multi.is_inside(at.lon, at.lat) {
        return Sample::NoData;
    }
    let Some((rest, last)) = multi.split_summary() else {
        return Sample::NoData;
    };
    Sample::Multi {
        rows: rest.iter().map(|c| category_value(c, at)).collect(),
        summary: category_value(last, at),
    }
}
