use super::cli_main::get_user_input;
use super::detail_screen::detail_menu;
use crate::catalog::ChemicalCatalog;
use crate::config::with_config;
use crate::typeahead::TypeaheadEngine;
use log::warn;
use std::io::{self, Write};

pub fn search_menu() {
    let engine = TypeaheadEngine::new(load_catalog());

    loop {
        println!("\n=== Search for a chemical ===");
        print!("\x1b[36mType a name, IUPAC name or InChI key (0 to go back): \x1b[0m");
        io::stdout().flush().unwrap();

        let input = get_user_input();
        let query = input.trim();
        if query == "0" {
            break;
        }
        if query.is_empty() {
            continue;
        }

        let found = engine.search(query);
        if found.is_empty() {
            println!("No matching chemicals found.");
            continue;
        }

        for (i, chemical) in found.iter().enumerate() {
            println!("\x1b[33m{}. {}\x1b[0m", i + 1, chemical.display_name);
        }
        print!("\x1b[36mPick a number to open details (Enter to refine the query): \x1b[0m");
        io::stdout().flush().unwrap();

        let choice = get_user_input();
        if let Ok(n) = choice.trim().parse::<usize>() {
            if n >= 1 && n <= found.len() {
                detail_menu(&found[n - 1].inchi_key);
            } else {
                println!("Invalid choice. Please try again.");
            }
        }
    }
}

/// Catalog selection: the configured override file when one is set and loads,
/// the bundled catalog otherwise.
fn load_catalog() -> ChemicalCatalog {
    let catalog_path = with_config(|config| config.catalog_path().map(|p| p.to_string()));
    if let Some(path) = catalog_path {
        match ChemicalCatalog::from_file(&path) {
            Ok(catalog) => return catalog,
            Err(e) => {
                warn!(
                    "Failed to load catalog override '{}': {}. Using bundled catalog",
                    path, e
                );
            }
        }
    }
    ChemicalCatalog::bundled()
}
