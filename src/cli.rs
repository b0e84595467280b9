pub mod api_help;
pub mod cli_main;
pub mod detail_screen;
pub mod search_screen;
