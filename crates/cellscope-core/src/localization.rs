//! Translation lookup injected into display code.
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Resolves a display key to the text of the active language.
pub trait Translator {
    fn get(&self, key: &str) -> String;
}

/// Returns every key unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Untranslated;

impl Translator for Untranslated {
    fn get(&self, key: &str) -> String {
        key.to_string()
    }
}

/// A flat key → text table. Missing keys fall back to the key itself.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub language: String,
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn new(language: impl Into<String>, entries: HashMap<String, String>) -> Self {
        Self { language: language.into(), entries }
    }

    /// Load a JSON object of `"key": "text"` pairs.
    pub fn load(language: impl Into<String>, path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read translation file: {:?}", path))?;
        let entries: HashMap<String, String> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse translation file: {:?}", path))?;
        Ok(Self::new(language, entries))
    }
}

impl Translator for Catalog {
    fn get(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
