use chemprops::cli::cli_main::run_interactive_menu;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

pub fn main() {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .expect("Failed to initialize logger");

    run_interactive_menu();
}
