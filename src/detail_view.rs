//! # Detail View Module
//!
//! ## Purpose
//! Data shaping for the chemical detail screen. This is view logic, not
//! presentation: synonym filtering and pagination, numeric formatting, property
//! label derivation and the per-property expand/collapse state all live here so
//! the rendering layer only prints what it is handed.
//!
//! ## Main Data Structures
//! - `DetailView`: owns one fetched `SearchChemicalsResponse` plus the screen
//!   state (show-all flag, expand map); discarded when the user navigates away
//! - `format_value` / `property_label`: free formatting helpers
//!
//! ## Usage
//! ```rust, ignore
//! let mut view = DetailView::new(client.fetch(inchi_key, true));
//! for synonym in view.visible_synonyms("acid") {
//!     println!("{}", synonym);
//! }
//! view.toggle_property("boiling_point");
//! view.print_properties();
//! ```

use crate::properties_api::{ChemicalDetail, ChemicalProperty, Measurement, SearchChemicalsResponse};
use prettytable::{Cell, Row, Table};
use std::collections::HashMap;

/// Synonyms shown per page unless the show-all flag is set.
pub const SYNONYM_PAGE_SIZE: usize = 10;

/// View state of one detail screen.
pub struct DetailView {
    response: SearchChemicalsResponse,
    pub show_all_synonyms: bool,
    expanded: HashMap<String, bool>,
}

impl DetailView {
    pub fn new(response: SearchChemicalsResponse) -> Self {
        Self {
            response,
            show_all_synonyms: false,
            expanded: HashMap::new(),
        }
    }

    pub fn chemical(&self) -> &ChemicalDetail {
        &self.response.chemical
    }

    pub fn properties(&self) -> &[ChemicalProperty] {
        &self.response.properties
    }

    /// Synonyms whose text contains the filter, case-insensitively. An empty
    /// filter keeps everything. Original order is preserved.
    pub fn filtered_synonyms(&self, filter: &str) -> Vec<&str> {
        let filter = filter.to_lowercase();
        self.response
            .chemical
            .synonyms
            .iter()
            .filter(|synonym| synonym.to_lowercase().contains(&filter))
            .map(String::as_str)
            .collect()
    }

    /// First `SYNONYM_PAGE_SIZE` filtered synonyms, or all of them when the
    /// show-all flag is set.
    pub fn visible_synonyms(&self, filter: &str) -> Vec<&str> {
        let filtered = self.filtered_synonyms(filter);
        if self.show_all_synonyms {
            filtered
        } else {
            filtered.into_iter().take(SYNONYM_PAGE_SIZE).collect()
        }
    }

    /// Flips the expand/collapse state of one property type. Each type toggles
    /// independently and starts collapsed.
    pub fn toggle_property(&mut self, property_type: &str) {
        let state = self
            .expanded
            .entry(property_type.to_string())
            .or_insert(false);
        *state = !*state;
    }

    pub fn is_expanded(&self, property_type: &str) -> bool {
        self.expanded.get(property_type).copied().unwrap_or(false)
    }

    /// Prints a pretty table of the properties to the console. Every property
    /// gets a row with its label, formatted aggregate and measurement count;
    /// expanded properties are followed by a table of their measurements.
    pub fn print_properties(&self) {
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("Property"),
            Cell::new("Aggregate"),
            Cell::new("Measurements"),
        ]));
        for property in &self.response.properties {
            let aggregate = match property.aggregate {
                Some(value) => format_value(value),
                None => "-".to_string(),
            };
            table.add_row(Row::new(vec![
                Cell::new(&property_label(&property.property_type)),
                Cell::new(&aggregate),
                Cell::new(&property.measurements.len().to_string()),
            ]));
        }
        table.printstd();

        for property in &self.response.properties {
            if self.is_expanded(&property.property_type) && !property.measurements.is_empty() {
                println!("{}:", property_label(&property.property_type));
                self.print_measurements(&property.measurements);
            }
        }
    }

    fn print_measurements(&self, measurements: &[Measurement]) {
        let mut table = Table::new();
        table.add_row(Row::new(vec![Cell::new("Value"), Cell::new("Conditions")]));
        for measurement in measurements {
            table.add_row(Row::new(vec![
                Cell::new(&format_value(measurement.value)),
                Cell::new(&measurement_conditions(measurement)),
            ]));
        }
        table.printstd();
    }
}

/// Formats a property value with exactly 2 decimal places.
pub fn format_value(value: f64) -> String {
    format!("{:.2}", value)
}

/// Derives a display label from a property type: first letter capitalized,
/// underscores replaced with spaces ("flash_point" -> "Flash point").
pub fn property_label(property_type: &str) -> String {
    let spaced = property_type.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// One-line summary of the measurement context for the conditions column.
fn measurement_conditions(measurement: &Measurement) -> String {
    let Some(misc) = &measurement.metadata.misc else {
        return String::new();
    };
    let mut parts: Vec<String> = Vec::new();
    if let Some(t) = misc.temperature {
        parts.push(format!("at {} C", t));
    }
    if let Some(t) = misc.substance_temperature {
        parts.push(format!("substance at {} C", t));
    }
    if let Some(t) = misc.water_temperature {
        parts.push(format!("water at {} C", t));
    }
    if let Some(p) = misc.pressure {
        parts.push(format!("{} kPa", p));
    }
    if let Some(kind) = &misc.measurement_type {
        parts.push(kind.clone());
    }
    if let Some(range) = &misc.range {
        parts.push(format!("range {} to {}", range.min, range.max));
    }
    parts.join(", ")
}
