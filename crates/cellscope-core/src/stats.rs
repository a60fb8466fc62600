//! Area statistics rendered in a selectable unit.
//!
//! Entries are kept in insertion order; exports rely on it.
use indexmap::IndexMap;
use tracing::{debug, error};

use crate::error::StatsError;
use crate::format::format_grouped;
use crate::localization::{Translator, Untranslated};
use crate::sampler::NO_DATA;
use crate::units::AreaUnit;

/// A key/value display row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatRow {
    key: String,
    value: String,
    disabled: bool,
}

impl StatRow {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = key.into();
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }
}

/// One tracked quantity and its display row.
#[derive(Debug, Clone, Default)]
pub struct StatEntry {
    pub row: StatRow,
    /// Area in square metres; None means no data.
    pub sqm: Option<f64>,
}

/// Magnitude bands, checked top-down.
const MAGNITUDES: [(f32, f32, &str); 3] = [
    (1e12, 1e-12, "trillion"),
    (1e9, 1e-9, "billion"),
    (1e6, 1e-6, "million"),
];

/// Render `sqm` in `unit`. None when there is no data.
///
/// The output is `"<value> <suffix> <symbol>"`; an empty suffix leaves two
/// spaces before the symbol.
pub fn format_area(sqm: Option<f64>, unit: &AreaUnit, tr: &dyn Translator) -> Option<String> {
    let sqm = sqm?;
    let mut area = (sqm * unit.factor()) as f32;
    let mut suffix = String::new();
    if let Some((_, scale, word)) = MAGNITUDES.iter().find(|(limit, _, _)| area > *limit) {
        area *= scale;
        suffix = tr.get(word);
    }
    Some(format!("{} {} {}", format_grouped(area), suffix, unit.symbol))
}

fn render(entry: &mut StatEntry, unit: &AreaUnit, tr: &dyn Translator) {
    match format_area(entry.sqm, unit, tr) {
        Some(text) => {
            entry.row.set_value(text);
            entry.row.set_disabled(false);
        }
        None => {
            entry.row.set_value(tr.get(NO_DATA));
            entry.row.set_disabled(true);
        }
    }
}

/// Named area statistics, all rendered in the selected unit.
pub struct StatAggregator {
    entries: IndexMap<String, StatEntry>,
    units: Vec<AreaUnit>,
    selected: AreaUnit,
    translator: Box<dyn Translator>,
}

impl Default for StatAggregator {
    fn default() -> Self {
        Self::new(AreaUnit::defaults(), Box::new(Untranslated))
    }
}

impl StatAggregator {
    /// The first unit of `units` is selected; an empty list falls back to the
    /// default units.
    pub fn new(units: Vec<AreaUnit>, translator: Box<dyn Translator>) -> Self {
        let units = if units.is_empty() { AreaUnit::defaults() } else { units };
        let selected = units[0].clone();
        Self { entries: IndexMap::new(), units, selected, translator }
    }

    pub fn add_entry(&mut self, id: &str, label: &str) -> Result<(), StatsError> {
        if self.entries.contains_key(id) {
            error!("Entry {id} could not be added: already exists");
            return Err(StatsError::DuplicateKey(id.to_string()));
        }
        let mut entry = StatEntry::default();
        entry.row.set_key(label);
        render(&mut entry, &self.selected, self.translator.as_ref());
        self.entries.insert(id.to_string(), entry);
        Ok(())
    }

    pub fn rename_entry(&mut self, id: &str, label: &str) -> Result<(), StatsError> {
        match self.entries.get_mut(id) {
            Some(entry) => {
                entry.row.set_key(label);
                Ok(())
            }
            None => {
                error!("Entry {id} could not be renamed: not found");
                Err(StatsError::UnknownKey(id.to_string()))
            }
        }
    }

    /// Returns false when `id` is unknown.
    pub fn update_entry(&mut self, id: &str, sqm: f64) -> bool {
        self.set_quantity(id, Some(sqm))
    }

    /// Returns false when `id` is unknown.
    pub fn clear_entry(&mut self, id: &str) -> bool {
        self.set_quantity(id, None)
    }

    pub fn clear_all(&mut self) {
        for entry in self.entries.values_mut() {
            entry.sqm = None;
            render(entry, &self.selected, self.translator.as_ref());
        }
    }

    fn set_quantity(&mut self, id: &str, sqm: Option<f64>) -> bool {
        let Some(entry) = self.entries.get_mut(id) else {
            debug!("Ignoring update for unknown entry {id}");
            return false;
        };
        entry.sqm = sqm;
        render(entry, &self.selected, self.translator.as_ref());
        true
    }

    pub fn set_unit(&mut self, unit: AreaUnit) {
        self.selected = unit;
        self.update_all();
    }

    /// Select one of the configured units by position.
    pub fn select_unit(&mut self, index: usize) -> Result<(), StatsError> {
        let Some(unit) = self.units.get(index).cloned() else {
            error!("Unit {index} could not be selected: only {} units", self.units.len());
            return Err(StatsError::UnknownUnit { index, count: self.units.len() });
        };
        self.set_unit(unit);
        Ok(())
    }

    /// Switch language. Every row is re-rendered; quantities are untouched.
    pub fn set_translator(&mut self, translator: Box<dyn Translator>) {
        self.translator = translator;
        self.update_all();
    }

    fn update_all(&mut self) {
        for entry in self.entries.values_mut() {
            render(entry, &self.selected, self.translator.as_ref());
        }
    }

    pub fn selected_unit(&self) -> &AreaUnit {
        &self.selected
    }

    pub fn units(&self) -> &[AreaUnit] {
        &self.units
    }

    pub fn translator(&self) -> &dyn Translator {
        self.translator.as_ref()
    }

    pub fn entry(&self, id: &str) -> Option<&StatEntry> {
        self.entries.get(id)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &StatEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Unit choices as `"<name> (<symbol>)"`.
    pub fn unit_labels(&self) -> Vec<String> {
        self.units
            .iter()
            .map(|u| format!("{} ({})", self.translator.get(&u.name), u.symbol))
            .collect()
    }

    /// Explanation of the magnitude words.
    pub fn note_text(&self) -> String {
        let tr = self.translator.as_ref();
        format!(
            "{}:  {} = 10\u{2079},  {} = 10\u{00B9}\u{00B2}",
            tr.get("Note"),
            tr.get("billion"),
            tr.get("trillion")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localization::Catalog;
    use std::collections::HashMap;

    fn m2() -> AreaUnit {
        AreaUnit::square_meters()
    }

    fn german() -> Box<dyn Translator> {
        Box::new(Catalog::new(
            "de",
            HashMap::from([
                ("N/A".to_string(), "k.A.".to_string()),
                ("million".to_string(), "Millionen".to_string()),
                ("Hectares".to_string(), "Hektar".to_string()),
            ]),
        ))
    }

    #[test]
    fn format_none_is_no_data() {
        assert_eq!(format_area(None, &m2(), &Untranslated), None);
    }

    #[test]
    fn format_selects_magnitude_band() {
        let f = |sqm| format_area(Some(sqm), &m2(), &Untranslated).unwrap();
        assert_eq!(f(2_500_000.0), "2.50 million m\u{00B2}");
        assert_eq!(f(3.2e9), "3.20 billion m\u{00B2}");
        assert_eq!(f(4.0e12 + 1.0e11), "4.10 trillion m\u{00B2}");
        assert_eq!(f(999_999.0), "999,999.00  m\u{00B2}");
        // the band limits are exclusive
        assert_eq!(f(1_000_000.0), "1,000,000.00  m\u{00B2}");
    }

    #[test]
    fn format_applies_unit_factor() {
        let ha = AreaUnit::hectares();
        assert_eq!(format_area(Some(25_000.0), &ha, &Untranslated).unwrap(), "2.50  ha");
    }

    #[test]
    fn new_entry_is_disabled() {
        let mut agg = StatAggregator::default();
        agg.add_entry("a", "Area A").unwrap();
        let row = &agg.entry("a").unwrap().row;
        assert!(row.is_disabled());
        assert_eq!(row.value(), "N/A");
        assert_eq!(row.key(), "Area A");
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let mut agg = StatAggregator::default();
        agg.add_entry("a", "first").unwrap();
        assert_eq!(agg.add_entry("a", "second"), Err(StatsError::DuplicateKey("a".into())));
        assert_eq!(agg.len(), 1);
        assert_eq!(agg.entry("a").unwrap().row.key(), "first");
    }

    #[test]
    fn update_then_clear_matches_fresh_entry() {
        let mut agg = StatAggregator::default();
        agg.add_entry("a", "L").unwrap();
        agg.add_entry("b", "L").unwrap();
        assert!(agg.update_entry("a", 5000.0));
        assert!(!agg.entry("a").unwrap().row.is_disabled());
        assert!(agg.clear_entry("a"));
        assert_eq!(agg.entry("a").unwrap().row, agg.entry("b").unwrap().row);
        assert_eq!(agg.entry("a").unwrap().sqm, None);
    }

    #[test]
    fn unknown_updates_are_ignored() {
        let mut agg = StatAggregator::default();
        assert!(!agg.update_entry("ghost", 1.0));
        assert!(!agg.clear_entry("ghost"));
        assert!(agg.is_empty());
    }

    #[test]
    fn rename_changes_label_only() {
        let mut agg = StatAggregator::default();
        agg.add_entry("a", "old").unwrap();
        agg.update_entry("a", 20_000.0);
        let before = agg.entry("a").unwrap().row.value().to_string();
        agg.rename_entry("a", "new").unwrap();
        let entry = agg.entry("a").unwrap();
        assert_eq!(entry.row.key(), "new");
        assert_eq!(entry.row.value(), before);
        assert_eq!(entry.sqm, Some(20_000.0));

        assert_eq!(agg.rename_entry("zz", "x"), Err(StatsError::UnknownKey("zz".into())));
        assert_eq!(agg.len(), 1);
    }

    #[test]
    fn unit_change_rerenders_all_entries() {
        let mut agg = StatAggregator::default();
        agg.add_entry("a", "A").unwrap();
        agg.add_entry("b", "B").unwrap();
        agg.update_entry("a", 3_000_000.0);
        assert_eq!(agg.entry("a").unwrap().row.value(), "300.00  ha");

        agg.select_unit(1).unwrap();
        assert_eq!(agg.entry("a").unwrap().row.value(), "3.00  km\u{00B2}");
        assert_eq!(agg.entry("b").unwrap().row.value(), "N/A");

        agg.set_unit(m2());
        assert_eq!(agg.entry("a").unwrap().row.value(), "3.00 million m\u{00B2}");

        assert_eq!(agg.select_unit(9), Err(StatsError::UnknownUnit { index: 9, count: 3 }));
        assert_eq!(agg.selected_unit(), &m2());
    }

    #[test]
    fn clear_all_disables_every_entry() {
        let mut agg = StatAggregator::default();
        for id in ["a", "b", "c"] {
            agg.add_entry(id, id).unwrap();
            agg.update_entry(id, 10.0);
        }
        agg.clear_all();
        assert!(agg.entries().all(|(_, e)| e.row.is_disabled() && e.sqm.is_none()));
    }

    #[test]
    fn language_change_retranslates_without_touching_quantities() {
        let mut agg = StatAggregator::new(vec![m2()], Box::new(Untranslated));
        agg.add_entry("a", "A").unwrap();
        agg.add_entry("b", "B").unwrap();
        agg.update_entry("b", 7_000_000.0);

        agg.set_translator(german());
        assert_eq!(agg.entry("a").unwrap().row.value(), "k.A.");
        assert_eq!(agg.entry("b").unwrap().row.value(), "7.00 Millionen m\u{00B2}");
        assert_eq!(agg.entry("b").unwrap().sqm, Some(7_000_000.0));
    }

    #[test]
    fn unit_labels_and_note_are_translated() {
        let agg = StatAggregator::new(AreaUnit::defaults(), german());
        assert_eq!(agg.unit_labels()[0], "Hektar (ha)");
        assert_eq!(agg.unit_labels()[2], "Square Meters (m\u{00B2})");
        assert_eq!(agg.note_text(), "Note:  billion = 10\u{2079},  trillion = 10\u{00B9}\u{00B2}");
    }

    #[test]
    fn entries_keep_insertion_order() {
        let mut agg = StatAggregator::default();
        for id in ["zeta", "alpha", "mid"] {
            agg.add_entry(id, id).unwrap();
        }
        let ids: Vec<_> = agg.entries().map(|(id, _)| id).collect();
        assert_eq!(ids, ["zeta", "alpha", "mid"]);
    }
}
