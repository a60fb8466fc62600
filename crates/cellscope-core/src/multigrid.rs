use serde::{Deserialize, Serialize};
use crate::grid::GridData;

/// A named sub-grid of a [`MultiGrid`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridCategory {
    pub name: String,
    pub grid: GridData,
}

/// A bounded region holding one grid per category.
/// The last category is the summary (dominant) category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiGrid {
    pub west: f64,
    pub east: f64,
    pub south: f64,
    pub north: f64,
    #[serde(default)]
    pub categories: Vec<GridCategory>,
}

impl MultiGrid {
    pub fn new(west: f64, east: f64, south: f64, north: f64) -> Self {
        Self { west, east, south, north, categories: Vec::new() }
    }

    pub fn push_category(&mut self, name: impl Into<String>, grid: GridData) {
        self.categories.push(GridCategory { name: name.into(), grid });
    }

    pub fn is_inside(&self, lon: f64, lat: f64) -> bool {
        lon >= self.west && lon <= self.east && lat >= self.south && lat <= self.north
    }

    /// All categories but the last, and the last one. None when empty.
    pub fn split_summary(&self) -> Option<(&[GridCategory], &GridCategory)> {
        self.categories
            .split_last()
            .map(|(last, rest)| (rest, last))
    }
}
