//! Cell inspection across data layers.
//!
//! Each layer contributes at least one row. Its patches are tried in order
//! and the first one that resolves a value wins; a multi-grid patch covering
//! the point contributes one row per category instead.
use serde::{Deserialize, Serialize};

use crate::coords::Coordinate;
use crate::sampler::{GridKind, Sample, NO_DATA};

/// A named data layer made of the patches loaded in view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    #[serde(default)]
    pub patches: Vec<GridKind>,
}

/// A labelled value ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectorRow {
    pub label: String,
    pub value: String,
}

impl InspectorRow {
    fn new(layer: &str, suffix: &str, value: &str) -> Self {
        Self { label: format!("{layer}{suffix}"), value: value.to_string() }
    }
}

/// Rows for one layer at `at`.
pub fn inspect_layer(layer: &Layer, at: Coordinate) -> Vec<InspectorRow> {
    let mut rows = Vec::new();
    let mut suffix = String::new();
    let mut value = NO_DATA.to_string();

    for patch in &layer.patches {
        match patch.sample(at, true) {
            Sample::NoData => {}
            Sample::Value(v) => {
                value = v;
                break;
            }
            Sample::Multi { rows: categories, summary } => {
                for c in &categories {
                    rows.push(InspectorRow::new(&layer.name, &format!(" - {}", c.category), c.display()));
                }
                suffix = format!(" - {}", summary.category);
                value = summary.display().to_string();
                break;
            }
        }
    }

    rows.push(InspectorRow::new(&layer.name, &suffix, &value));
    rows
}

/// Rows for every layer at `at`, in layer order.
pub fn inspect(layers: &[Layer], at: Coordinate) -> Vec<InspectorRow> {
    layers
        .iter()
        .flat_map(|layer| inspect_layer(layer, at))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridData;
    use crate::multigrid::MultiGrid;

    const AT: Coordinate = Coordinate::new(0.5, 0.5);

    fn grid(bounds: (f64, f64, f64, f64), value: f32) -> GridData {
        GridData::from_values(1, 1, bounds, vec![value]).unwrap()
    }

    #[test]
    fn first_resolving_patch_wins() {
        let layer = Layer {
            name: "Population".into(),
            patches: vec![
                GridKind::Plain(grid((5.0, 6.0, 5.0, 6.0), 1.0)),
                GridKind::Plain(grid((0.0, 1.0, 0.0, 1.0), 42.0).with_units("ppl")),
                GridKind::Plain(grid((0.0, 1.0, 0.0, 1.0), 7.0)),
            ],
        };
        assert_eq!(
            inspect_layer(&layer, AT),
            vec![InspectorRow { label: "Population".into(), value: "42 ppl".into() }]
        );
    }

    #[test]
    fn layer_without_coverage_reports_na() {
        let layer = Layer { name: "Roads".into(), patches: vec![] };
        let rows = inspect_layer(&layer, AT);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value, "N/A");
    }

    #[test]
    fn multi_grid_emits_one_row_per_category() {
        let mut mg = MultiGrid::new(0.0, 1.0, 0.0, 1.0);
        mg.push_category("Built", grid((0.0, 1.0, 0.0, 1.0), 3.0));
        mg.push_category("Open", grid((0.0, 1.0, 0.0, 1.0), 5.0));
        mg.push_category("Dominant", grid((0.0, 1.0, 0.0, 1.0), 1.0).with_categories(["Built", "Open"]));
        let layers = vec![
            Layer { name: "Land".into(), patches: vec![GridKind::Multi(mg)] },
            Layer { name: "Empty".into(), patches: vec![] },
        ];

        let rows = inspect(&layers, AT);
        let labels: Vec<_> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["Land - Built", "Land - Open", "Land - Dominant", "Empty"]);
        assert_eq!(rows[0].value, "3");
        assert_eq!(rows[2].value, "Open");
    }

    #[test]
    fn multi_grid_outside_region_falls_through() {
        let mut mg = MultiGrid::new(10.0, 11.0, 10.0, 11.0);
        mg.push_category("Only", grid((10.0, 11.0, 10.0, 11.0), 1.0));
        let layer = Layer {
            name: "Mixed".into(),
            patches: vec![GridKind::Multi(mg), GridKind::Plain(grid((0.0, 1.0, 0.0, 1.0), 9.0))],
        };
        let rows = inspect_layer(&layer, AT);
        assert_eq!(rows, vec![InspectorRow { label: "Mixed".into(), value: "9 ".into() }]);
    }
}
