//! Raster cell inspection and area statistics.
//!
//! [`sampler`] turns a coordinate into display values for plain, multi-category
//! and classification grids; [`stats`] renders area quantities in a chosen unit
//! and [`export`] writes them out as CSV.
pub mod classification;
pub mod config;
pub mod coords;
pub mod error;
pub mod export;
pub mod format;
pub mod grid;
pub mod inspector;
pub mod localization;
pub mod multigrid;
pub mod sampler;
pub mod stats;
pub mod units;

pub use coords::Coordinate;
pub use error::StatsError;
pub use grid::{GridData, GridError};
pub use sampler::{GridKind, Sample};
pub use stats::StatAggregator;
pub use units::AreaUnit;
