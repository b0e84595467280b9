use super::api_help::api_access_menu;
use super::search_screen::search_menu;
use std::io::{self, Write};

pub fn run_interactive_menu() {
    loop {
        show_main_menu();
        let choice = get_user_input();

        match choice.trim() {
            "1" => search_menu(),
            "2" => api_access_menu(),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

// colors: blue header, yellow menu options, cyan prompt, reset after each
fn show_main_menu() {
    println!(
        "\x1b[34m\n Chemical Properties: search for a chemical by IUPAC name,\n
    common name or InChI key and look up its physical properties \n \x1b[0m"
    );
    println!("\x1b[33m1. Search for a chemical\x1b[0m");
    println!("\x1b[33m2. API access\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    print!("\x1b[36mEnter your choice: \x1b[0m");
    io::stdout().flush().unwrap();
}

pub fn get_user_input() -> String {
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .expect("Failed to read input");
    input
}
