//! # Typeahead Search Module
//!
//! ## Purpose
//! This module provides the incremental search engine behind the search screen.
//! Given a query prefix it returns the chemicals whose common name, IUPAC name
//! or InChI key starts with the query, in catalog order, capped at
//! `MAX_RESULTS` matches.
//!
//! ## Key Logic Implementation
//! 1. **Normalization**: the query is lower-cased before comparison
//! 2. **Candidate generation**: every entry contributes its lower-cased name,
//!    IUPAC name (when present) and InChI key, in that field order
//! 3. **Matching**: prefix match only, no substring and no fuzzy matching
//! 4. **Shaping**: a candidate that came from the InChI key field is displayed
//!    upper-cased, the others are displayed as matched
//!
//! ## Usage Pattern
//! ```rust
//! use chemprops::catalog::ChemicalCatalog;
//! use chemprops::typeahead::TypeaheadEngine;
//! let engine = TypeaheadEngine::new(ChemicalCatalog::bundled());
//! for found in engine.search("eth") {
//!     println!("{} -> {}", found.display_name, found.inchi_key);
//! }
//! ```

use crate::catalog::{CatalogEntry, ChemicalCatalog};

/// Result cap per query.
pub const MAX_RESULTS: usize = 20;

/// One typeahead suggestion: the matched display string and the InChI key of
/// the owning catalog entry. The entry is carried through candidate generation,
/// so the key is always present.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchMatch {
    pub display_name: String,
    pub inchi_key: String,
}

/// Search engine over a loaded catalog. Holds no per-query state; `search` is
/// a pure function of (catalog, query) and is safe to call repeatedly.
#[derive(Debug, Clone)]
pub struct TypeaheadEngine {
    catalog: ChemicalCatalog,
}

impl TypeaheadEngine {
    pub fn new(catalog: ChemicalCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ChemicalCatalog {
        &self.catalog
    }

    /// Returns the suggestions for a query prefix.
    ///
    /// An empty query deterministically returns an empty vector; callers are
    /// expected to suppress the call on empty input, but the engine must treat
    /// it safely either way. No matches is an empty vector, not an error.
    pub fn search(&self, query: &str) -> Vec<SearchMatch> {
        let query = query.to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<SearchMatch> = Vec::new();
        for entry in self.catalog.entries() {
            for (candidate, from_key) in candidate_strings(entry) {
                if !candidate.starts_with(&query) {
                    continue;
                }
                let display_name = if from_key {
                    candidate.to_uppercase()
                } else {
                    candidate
                };
                matches.push(SearchMatch {
                    display_name,
                    inchi_key: entry.inchi_key.clone(),
                });
                if matches.len() == MAX_RESULTS {
                    return matches;
                }
            }
        }
        matches
    }
}

/// Lower-cased match candidates of one entry, paired with a flag marking the
/// candidate that came from the InChI key field. An absent IUPAC name
/// contributes no candidate.
fn candidate_strings(entry: &CatalogEntry) -> Vec<(String, bool)> {
    let mut candidates = Vec::with_capacity(3);
    candidates.push((entry.name.to_lowercase(), false));
    if let Some(iupac_name) = &entry.iupac_name {
        candidates.push((iupac_name.to_lowercase(), false));
    }
    candidates.push((entry.inchi_key.to_lowercase(), true));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;

    fn entry(name: &str, iupac_name: Option<&str>, inchi_key: &str) -> CatalogEntry {
        CatalogEntry {
            name: name.to_string(),
            iupac_name: iupac_name.map(|s| s.to_string()),
            inchi_key: inchi_key.to_string(),
        }
    }

    fn water_engine() -> TypeaheadEngine {
        TypeaheadEngine::new(ChemicalCatalog::from_entries(vec![entry(
            "Water",
            None,
            "XLYOFNOQVPJJNP",
        )]))
    }

    #[test]
    fn test_water_by_name_prefix() {
        let engine = water_engine();
        let found = engine.search("wat");
        assert_eq!(
            found,
            vec![SearchMatch {
                display_name: "water".to_string(),
                inchi_key: "XLYOFNOQVPJJNP".to_string(),
            }]
        );
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let engine = water_engine();
        assert!(engine.search("").is_empty());
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let engine = water_engine();
        assert!(engine.search("zzz").is_empty());
    }

    #[test]
    fn test_exact_inchi_key_any_case() {
        let engine = water_engine();
        for query in ["XLYOFNOQVPJJNP", "xlyofnoqvpjjnp", "XlyofnoqvpjJNP"] {
            let found = engine.search(query);
            assert_eq!(found.len(), 1);
            assert_eq!(found[0].display_name, "XLYOFNOQVPJJNP");
            assert_eq!(found[0].inchi_key, "XLYOFNOQVPJJNP");
        }
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let engine = water_engine();
        assert_eq!(engine.search("WaT"), engine.search("wat"));
    }

    #[test]
    fn test_iupac_name_candidate() {
        let engine = TypeaheadEngine::new(ChemicalCatalog::from_entries(vec![entry(
            "Acetone",
            Some("Propan-2-one"),
            "CSCPPACGZOOCGX-UHFFFAOYSA-N",
        )]));
        let found = engine.search("propan");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].display_name, "propan-2-one");
        assert_eq!(found[0].inchi_key, "CSCPPACGZOOCGX-UHFFFAOYSA-N");
    }

    #[test]
    fn test_absent_iupac_name_contributes_no_candidate() {
        let engine = TypeaheadEngine::new(ChemicalCatalog::from_entries(vec![
            entry("Methane", None, "VNWKTOKETHGBQD-UHFFFAOYSA-N"),
            entry("Methanol", Some("methanol"), "OKKJLVBELUTLKV-UHFFFAOYSA-N"),
        ]));
        // "methanol" matches the name and the IUPAC name, "methane" only the name
        assert_eq!(engine.search("methanol").len(), 2);
        assert_eq!(engine.search("methane").len(), 1);
    }

    #[test]
    fn test_prefix_match_only() {
        let engine = water_engine();
        // substring but not prefix
        assert!(engine.search("ater").is_empty());
    }

    #[test]
    fn test_result_cap() {
        let entries: Vec<CatalogEntry> = (0..30)
            .map(|i| entry(&format!("Chem {}", i), None, &format!("KEY{}", i)))
            .collect();
        let engine = TypeaheadEngine::new(ChemicalCatalog::from_entries(entries));
        assert_eq!(engine.search("chem").len(), MAX_RESULTS);
    }

    #[test]
    fn test_catalog_order_preserved() {
        let engine = TypeaheadEngine::new(ChemicalCatalog::from_entries(vec![
            entry("Ethylene glycol", None, "LYCAIKOWRPUZTN-UHFFFAOYSA-N"),
            entry("Ethylene", None, "VGGSQFUCUMXWEO-UHFFFAOYSA-N"),
        ]));
        let found = engine.search("ethylene");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].display_name, "ethylene glycol");
        assert_eq!(found[1].display_name, "ethylene");
    }

    #[test]
    fn test_every_result_prefix_matches_query() {
        let engine = TypeaheadEngine::new(ChemicalCatalog::bundled());
        for query in ["e", "et", "eth", "acid", "XLY", "m"] {
            let normalized = query.to_lowercase();
            let found = engine.search(query);
            assert!(found.len() <= MAX_RESULTS);
            for m in found {
                assert!(
                    m.display_name.to_lowercase().starts_with(&normalized),
                    "{:?} does not start with {:?}",
                    m.display_name,
                    normalized
                );
            }
        }
    }
}
