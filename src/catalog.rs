//! # Chemical Catalog Module
//!
//! ## Purpose
//! Holds the static typeahead catalog: the list of chemicals a user can find by
//! common name, IUPAC name or InChI key. The catalog is loaded once at startup,
//! either from the JSON document compiled into the binary or from a
//! user-supplied override file, and is never mutated afterwards.
//!
//! ## Main Data Structures
//! - `CatalogEntry`: one chemical record `{ name, iupacName?, inchiKey }`
//! - `ChemicalCatalog`: read-only collection of entries shared by the search engine
//!
//! ## Usage
//! ```rust
//! use chemprops::catalog::ChemicalCatalog;
//! let catalog = ChemicalCatalog::bundled();
//! assert!(!catalog.is_empty());
//! ```

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Typeahead lookup list compiled into the binary.
const BUNDLED_CATALOG_JSON: &str = include_str!("../assets/chemical_catalog.json");

/// error types for catalog loading
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog file does not exist: {0}")]
    FileNotFound(String),
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse catalog JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// One chemical record of the typeahead catalog.
///
/// The catalog JSON uses camelCase field names; the IUPAC name is optional and
/// an absent value contributes no search candidate for that field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iupac_name: Option<String>,
    pub inchi_key: String,
}

/// Read-only collection of catalog entries.
///
/// The InChI key uniquely identifies an entry; duplicates in a loaded file are
/// reported with a warning but kept, the first entry wins during search.
#[derive(Debug, Clone)]
pub struct ChemicalCatalog {
    entries: Vec<CatalogEntry>,
}

impl ChemicalCatalog {
    /// Loads the catalog that ships with the binary.
    pub fn bundled() -> Self {
        let entries: Vec<CatalogEntry> = serde_json::from_str(BUNDLED_CATALOG_JSON)
            .expect("bundled catalog must be valid JSON");
        Self::from_entries(entries)
    }

    /// Loads a catalog from a JSON file with the same shape as the bundled one.
    ///
    /// # Arguments
    /// * `file_name` - Path to a JSON array of `{ name, iupacName?, inchiKey }`
    ///
    /// # Returns
    /// * `Ok(ChemicalCatalog)` - Parsed catalog
    /// * `Err(CatalogError)` - If the file is missing, unreadable or malformed
    pub fn from_file(file_name: &str) -> Result<Self, CatalogError> {
        let path = Path::new(file_name);
        if !path.exists() {
            return Err(CatalogError::FileNotFound(file_name.to_string()));
        }
        let content = fs::read_to_string(path)?;
        let entries: Vec<CatalogEntry> = serde_json::from_str(&content)?;
        Ok(Self::from_entries(entries))
    }

    /// Builds a catalog from already constructed entries.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let catalog = Self { entries };
        catalog.warn_on_duplicate_keys();
        catalog
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn warn_on_duplicate_keys(&self) {
        let mut seen: HashSet<&str> = HashSet::new();
        for entry in &self.entries {
            if !seen.insert(entry.inchi_key.as_str()) {
                warn!("Duplicate InChI key in catalog: {}", entry.inchi_key);
            }
        }
    }
}
