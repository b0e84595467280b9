use super::cli_main::get_user_input;
use crate::detail_view::{DetailView, SYNONYM_PAGE_SIZE};
use crate::properties_api::PropertiesClient;
use std::io::{self, Write};

pub fn detail_menu(inchi_key: &str) {
    println!("Fetching chemical details...");
    let client = PropertiesClient::new();
    let mut view = DetailView::new(client.fetch(inchi_key, true));
    let mut synonym_filter = String::new();

    loop {
        render(&view, &synonym_filter);

        println!("\x1b[33m1. Filter synonyms\x1b[0m");
        println!("\x1b[33m2. Show all / first {} synonyms\x1b[0m", SYNONYM_PAGE_SIZE);
        println!("\x1b[33m3. Expand or collapse a property\x1b[0m");
        println!("\x1b[33m0. Back to search\x1b[0m");
        print!("\x1b[36mEnter your choice: \x1b[0m");
        io::stdout().flush().unwrap();

        let choice = get_user_input();
        match choice.trim() {
            "1" => {
                print!("\x1b[36mSynonym filter (empty to clear): \x1b[0m");
                io::stdout().flush().unwrap();
                synonym_filter = get_user_input().trim().to_string();
            }
            "2" => view.show_all_synonyms = !view.show_all_synonyms,
            "3" => {
                print!("\x1b[36mProperty type (e.g. boiling_point): \x1b[0m");
                io::stdout().flush().unwrap();
                let property_type = get_user_input();
                view.toggle_property(property_type.trim());
            }
            "0" => break,
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

fn render(view: &DetailView, synonym_filter: &str) {
    let chemical = view.chemical();
    println!("\x1b[34m\n=== {} ===\x1b[0m", chemical.name);
    println!("IUPAC name: {}", chemical.iupac_name);
    println!("InChI key:  {}", chemical.inchi_key);

    let visible = view.visible_synonyms(synonym_filter);
    let total = view.filtered_synonyms(synonym_filter).len();
    if synonym_filter.is_empty() {
        println!("\nSynonyms ({} of {}):", visible.len(), total);
    } else {
        println!(
            "\nSynonyms matching '{}' ({} of {}):",
            synonym_filter,
            visible.len(),
            total
        );
    }
    for synonym in &visible {
        println!("  {}", synonym);
    }
    if visible.len() < total {
        println!("  ... ({} more hidden)", total - visible.len());
    }

    println!();
    view.print_properties();
}
