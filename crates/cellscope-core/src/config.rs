use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::localization::{Catalog, Translator, Untranslated};
use crate::stats::StatAggregator;
use crate::units::AreaUnit;

/// Panel settings read from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectorConfig {
    /// Selectable area units; the first is selected initially.
    #[serde(default = "AreaUnit::defaults")]
    pub units: Vec<AreaUnit>,
    /// Directory receiving series exports.
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
    /// Optional translation catalog (flat JSON object).
    #[serde(default)]
    pub translations: Option<PathBuf>,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_export_dir() -> PathBuf {
    PathBuf::from("Export")
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            units: AreaUnit::defaults(),
            export_dir: default_export_dir(),
            translations: None,
            language: default_language(),
        }
    }
}

impl InspectorConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: InspectorConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Load `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load_from_file)
    }

    pub fn translator(&self) -> Result<Box<dyn Translator>> {
        Ok(match &self.translations {
            Some(path) => Box::new(Catalog::load(self.language.clone(), path)?),
            None => Box::new(Untranslated),
        })
    }

    pub fn build_aggregator(&self) -> Result<StatAggregator> {
        Ok(StatAggregator::new(self.units.clone(), self.translator()?))
    }
}
