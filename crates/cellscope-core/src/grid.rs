use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while constructing a grid.
#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("grid has zero cells ({0}x{1})")]
    Empty(usize, usize),
    #[error("value count {got} does not match {count_x}x{count_y} cells")]
    SizeMismatch { got: usize, count_x: usize, count_y: usize },
    #[error("degenerate bounds: west={west} east={east} south={south} north={north}")]
    DegenerateBounds { west: f64, east: f64, south: f64, north: f64 },
}

/// A rectangular raster over geographic bounds, row-major.
/// Row 0 is the southern edge. Coordinate math uses f64; cell values use f32.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawGridData")]
pub struct GridData {
    pub west: f64,
    pub east: f64,
    pub south: f64,
    pub north: f64,
    pub count_x: usize,
    pub count_y: usize,
    /// Row-major cell values. Empty when no values are loaded.
    #[serde(default)]
    pub values: Vec<f32>,
    /// Validity mask, one byte per cell; 0 marks an invalid cell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values_mask: Option<Vec<u8>>,
    /// Category names indexed by integer cell code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub units: String,
}

#[derive(Deserialize)]
struct RawGridData {
    west: f64,
    east: f64,
    south: f64,
    north: f64,
    count_x: usize,
    count_y: usize,
    #[serde(default)]
    values: Vec<f32>,
    #[serde(default)]
    values_mask: Option<Vec<u8>>,
    #[serde(default)]
    categories: Option<Vec<String>>,
    #[serde(default)]
    units: String,
}

impl TryFrom<RawGridData> for GridData {
    type Error = GridError;

    fn try_from(raw: RawGridData) -> Result<Self, Self::Error> {
        let grid = GridData {
            west: raw.west,
            east: raw.east,
            south: raw.south,
            north: raw.north,
            count_x: raw.count_x,
            count_y: raw.count_y,
            values: raw.values,
            values_mask: raw.values_mask,
            categories: raw.categories,
            units: raw.units,
        };
        grid.validate()?;
        Ok(grid)
    }
}

impl GridData {
    /// Create a grid filled with `fill`.
    pub fn new(
        count_x: usize,
        count_y: usize,
        west: f64,
        east: f64,
        south: f64,
        north: f64,
        fill: f32,
    ) -> Result<Self, GridError> {
        let grid = Self {
            west,
            east,
            south,
            north,
            count_x,
            count_y,
            values: vec![fill; count_x * count_y],
            values_mask: None,
            categories: None,
            units: String::new(),
        };
        grid.validate()?;
        Ok(grid)
    }

    /// Check the cell counts, bounds and value count. An empty value list
    /// (no data loaded) is accepted.
    pub fn validate(&self) -> Result<(), GridError> {
        let (count_x, count_y) = (self.count_x, self.count_y);
        if count_x == 0 || count_y == 0 {
            return Err(GridError::Empty(count_x, count_y));
        }
        let (west, east, south, north) = (self.west, self.east, self.south, self.north);
        if !(east > west) || !(north > south) {
            return Err(GridError::DegenerateBounds { west, east, south, north });
        }
        if self.has_values() && self.values.len() != count_x * count_y {
            return Err(GridError::SizeMismatch { got: self.values.len(), count_x, count_y });
        }
        Ok(())
    }

    /// Create a grid from existing row-major values.
    pub fn from_values(
        count_x: usize,
        count_y: usize,
        bounds: (f64, f64, f64, f64),
        values: Vec<f32>,
    ) -> Result<Self, GridError> {
        let (west, east, south, north) = bounds;
        let mut grid = Self::new(count_x, count_y, west, east, south, north, 0.0)?;
        if values.len() != count_x * count_y {
            return Err(GridError::SizeMismatch { got: values.len(), count_x, count_y });
        }
        grid.values = values;
        Ok(grid)
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    pub fn with_categories<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.categories = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_mask(mut self, mask: Vec<u8>) -> Self {
        self.values_mask = Some(mask);
        self
    }

    pub fn has_values(&self) -> bool {
        !self.values.is_empty()
    }

    pub fn is_categorized(&self) -> bool {
        self.categories.is_some()
    }

    pub fn is_inside(&self, lon: f64, lat: f64) -> bool {
        lon >= self.west && lon <= self.east && lat >= self.south && lat <= self.north
    }

    /// Index of the cell containing (lon, lat), or None outside the bounds.
    /// Points on the east/north edge belong to the last column/row.
    pub fn cell_index(&self, lon: f64, lat: f64) -> Option<usize> {
        if self.count_x == 0 || self.count_y == 0 || !self.is_inside(lon, lat) {
            return None;
        }
        let fx = (lon - self.west) / (self.east - self.west) * self.count_x as f64;
        let fy = (lat - self.south) / (self.north - self.south) * self.count_y as f64;
        let col = (fx.floor() as usize).min(self.count_x - 1);
        let row = (fy.floor() as usize).min(self.count_y - 1);
        Some(row * self.count_x + col)
    }

    /// Raw value of the cell containing (lon, lat).
    pub fn get_value(&self, lon: f64, lat: f64) -> Option<f32> {
        self.cell_index(lon, lat)
            .and_then(|i| self.values.get(i).copied())
    }

    /// Value of the cell containing (lon, lat), honouring the validity mask.
    pub fn get_cell(&self, lon: f64, lat: f64) -> Option<f32> {
        let i = self.cell_index(lon, lat)?;
        if let Some(mask) = &self.values_mask {
            if mask.get(i).copied().unwrap_or(0) == 0 {
                return None;
            }
        }
        self.values.get(i).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ramp(count_x: usize, count_y: usize) -> GridData {
        let values = (0..count_x * count_y).map(|i| i as f32).collect();
        GridData::from_values(count_x, count_y, (0.0, 4.0, 0.0, 2.0), values).unwrap()
    }

    #[test]
    fn corners_map_to_corner_cells() {
        let g = ramp(4, 2);
        assert_relative_eq!(g.get_value(0.0, 0.0).unwrap(), 0.0);
        assert_relative_eq!(g.get_value(4.0, 0.0).unwrap(), 3.0);
        assert_relative_eq!(g.get_value(0.0, 2.0).unwrap(), 4.0);
        assert_relative_eq!(g.get_value(4.0, 2.0).unwrap(), 7.0);
    }

    #[test]
    fn interior_point_uses_nearest_cell() {
        let g = ramp(4, 2);
        assert_relative_eq!(g.get_value(2.5, 1.5).unwrap(), 6.0);
    }

    #[test]
    fn out_of_bounds_returns_none() {
        let g = ramp(4, 2);
        assert!(!g.is_inside(-0.1, 1.0));
        assert!(g.get_value(5.0, 1.0).is_none());
        assert!(g.get_cell(1.0, -3.0).is_none());
    }

    #[test]
    fn mask_hides_invalid_cells_from_get_cell_only() {
        let g = ramp(4, 2).with_mask(vec![1, 0, 1, 1, 1, 1, 1, 1]);
        assert!(g.get_cell(1.5, 0.5).is_none());
        assert_relative_eq!(g.get_value(1.5, 0.5).unwrap(), 1.0);
        assert_relative_eq!(g.get_cell(2.5, 0.5).unwrap(), 2.0);
    }

    #[test]
    fn construction_rejects_bad_shapes() {
        assert_eq!(
            GridData::new(0, 3, 0.0, 1.0, 0.0, 1.0, 0.0).unwrap_err(),
            GridError::Empty(0, 3)
        );
        assert!(matches!(
            GridData::from_values(2, 2, (0.0, 1.0, 0.0, 1.0), vec![1.0; 3]),
            Err(GridError::SizeMismatch { got: 3, .. })
        ));
        assert!(matches!(
            GridData::new(2, 2, 1.0, 1.0, 0.0, 1.0, 0.0),
            Err(GridError::DegenerateBounds { .. })
        ));
    }

    #[test]
    fn deserialization_rejects_zero_width_grid() {
        let json = r#"{"west":0,"east":1,"south":0,"north":1,"count_x":0,"count_y":1,"values":[3.0]}"#;
        let err = serde_json::from_str::<GridData>(json).unwrap_err();
        assert!(err.to_string().contains("zero cells"), "unexpected error: {err}");

        let json = r#"{"west":0,"east":1,"south":0,"north":1,"count_x":2,"count_y":1,"values":[3.0]}"#;
        assert!(serde_json::from_str::<GridData>(json).is_err());
    }

    #[test]
    fn deserialization_accepts_grid_without_values() {
        let json = r#"{"west":0,"east":1,"south":0,"north":1,"count_x":2,"count_y":2}"#;
        let g: GridData = serde_json::from_str(json).unwrap();
        assert!(!g.has_values());
        assert!(g.get_value(0.5, 0.5).is_none());
    }

    #[test]
    fn zero_sized_grid_has_no_cells() {
        let mut g = ramp(4, 2);
        g.count_x = 0;
        assert!(g.cell_index(1.0, 1.0).is_none());
        assert!(g.get_cell(1.0, 1.0).is_none());
    }
}
