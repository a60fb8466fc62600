//! Bitmask classification grids.
//!
//! A nonzero cell value is a bitmask over [`Classification`]: flag `i`
//! (declaration index, `i >= 1`) is set when bit `i - 1` is set. Index 0 is
//! reserved for "no flags".
use serde::{Deserialize, Serialize};
use crate::grid::GridData;

/// Network classification flags, in bit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    None,
    Motorway,
    Primary,
    Secondary,
    Tertiary,
    Residential,
    Footway,
    Cycleway,
}

impl Classification {
    pub const ALL: [Classification; 8] = [
        Classification::None,
        Classification::Motorway,
        Classification::Primary,
        Classification::Secondary,
        Classification::Tertiary,
        Classification::Residential,
        Classification::Footway,
        Classification::Cycleway,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Motorway => "Motorway",
            Self::Primary => "Primary",
            Self::Secondary => "Secondary",
            Self::Tertiary => "Tertiary",
            Self::Residential => "Residential",
            Self::Footway => "Footway",
            Self::Cycleway => "Cycleway",
        }
    }

    /// Bit carried by this flag in a cell mask; 0 for `None`.
    pub const fn bit(self) -> i32 {
        match self {
            Self::None => 0,
            other => 1 << (other as i32 - 1),
        }
    }
}

/// Flags set in `mask`, in ascending bit order.
pub fn decode_flags(mask: i32) -> Vec<Classification> {
    Classification::ALL[1..]
        .iter()
        .copied()
        .filter(|flag| mask & flag.bit() != 0)
        .collect()
}

/// Display label for a cell mask: "None" for 0, else comma-joined flag names.
pub fn describe(mask: i32) -> String {
    if mask == 0 {
        return Classification::None.name().to_string();
    }
    decode_flags(mask)
        .iter()
        .map(|flag| flag.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A grid whose values are classification bitmasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationGrid {
    pub grid: GridData,
}

impl ClassificationGrid {
    pub fn new(grid: GridData) -> Self {
        Self { grid }
    }

    /// Truncated mask at (lon, lat), or None when no data is available there.
    pub fn mask_at(&self, lon: f64, lat: f64) -> Option<i32> {
        if !self.grid.has_values() || !self.grid.is_inside(lon, lat) {
            return None;
        }
        self.grid
            .get_value(lon, lat)
            .filter(|v| !v.is_nan())
            .map(|v| v as i32)
    }
}
