//! Default category catalogue loading
//!
//! The catalogue is data, not code: a JSON list of (name, type) pairs
//! shipped in `config/default_categories.json` and overridable via the
//! `DEFAULT_CATEGORIES_PATH` environment variable.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::models::EntryType;

const DEFAULT_CATALOGUE_PATH: &str = "config/default_categories.json";

#[derive(Debug, Deserialize)]
struct CatalogueEntry {
    name: String,
    #[serde(rename = "type")]
    kind: EntryType,
}

/// Resolve the catalogue path from the environment
pub fn catalogue_path_from_env() -> PathBuf {
    std::env::var("DEFAULT_CATEGORIES_PATH")
        .unwrap_or_else(|_| DEFAULT_CATALOGUE_PATH.to_string())
        .into()
}

/// Load the default category catalogue from a JSON data file; the path
/// is tried as-is, then relative to the workspace root
pub fn load_catalogue(path: &Path) -> Result<Vec<(String, EntryType)>> {
    let raw = std::fs::read_to_string(path)
        .or_else(|_| {
            let mut fallback = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
            fallback.push("../..");
            fallback.push(path);
            std::fs::read_to_string(fallback)
        })
        .with_context(|| format!("Failed to read category catalogue at {}", path.display()))?;

    parse_catalogue(&raw)
}

fn parse_catalogue(raw: &str) -> Result<Vec<(String, EntryType)>> {
    let entries: Vec<CatalogueEntry> =
        serde_json::from_str(raw).context("Malformed category catalogue")?;

    Ok(entries
        .into_iter()
        .map(|entry| (entry.name, entry.kind))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const BUNDLED: &str = include_str!("../../../config/default_categories.json");

    #[test]
    fn test_bundled_catalogue_parses() {
        let catalogue = parse_catalogue(BUNDLED).unwrap();
        assert_eq!(catalogue.len(), 32);
    }

    #[test]
    fn test_bundled_catalogue_has_no_duplicates() {
        let catalogue = parse_catalogue(BUNDLED).unwrap();
        let keys: HashSet<_> = catalogue
            .iter()
            .map(|(name, kind)| (name.clone(), *kind))
            .collect();
        assert_eq!(keys.len(), catalogue.len());
    }

    #[test]
    fn test_bundled_catalogue_covers_both_kinds() {
        let catalogue = parse_catalogue(BUNDLED).unwrap();
        assert!(catalogue.iter().any(|(_, k)| *k == EntryType::Income));
        assert!(catalogue.iter().any(|(_, k)| *k == EntryType::Expense));
    }

    #[test]
    fn test_malformed_catalogue_is_rejected() {
        assert!(parse_catalogue("[{\"name\": \"x\"}]").is_err());
        assert!(parse_catalogue("not json").is_err());
    }
}
