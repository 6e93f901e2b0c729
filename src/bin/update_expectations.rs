//! Flaky expectations updater - folds bot flakiness data into TestExpectations

use perfgen::cli::args::parse_update_expectations_args;
use perfgen::services::expectations::{JsonBotDataProvider, OsHost, update_expectations};
use std::path::Path;
use std::process;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if let Some("--help" | "-h") = args.get(1).map(String::as_str) {
        print_help();
        return;
    }

    let cli_args = match parse_update_expectations_args(&args[1..]) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Use --help for usage information");
            process::exit(2);
        }
    };

    let provider = match JsonBotDataProvider::from_file(Path::new(&cli_args.bot_data)) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: failed to load bot data: {e}");
            process::exit(4);
        }
    };

    match update_expectations(
        &OsHost,
        &provider,
        Path::new(&cli_args.expectations),
        &cli_args.builders,
    ) {
        Ok(0) => println!("No new flaky expectations."),
        Ok(added) => println!("Added {added} flaky expectation(s)."),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(match e {
                perfgen::Error::InvalidInput(_) => 2,
                _ => 4,
            });
        }
    }
}

fn print_help() {
    println!("update-expectations - Append expectations for tests observed flaky on bots");
    println!();
    println!("USAGE:");
    println!("    update-expectations --expectations <FILE> --bot-data <FILE> BUILDER...");
    println!();
    println!("OPTIONS:");
    println!("    --expectations <FILE>     TestExpectations file to update in place");
    println!("    --bot-data <FILE>         JSON of per-builder observed test results");
    println!("    BUILDER                   Builders whose results to fold in");
    println!("    -h, --help                Show this help message");
}
