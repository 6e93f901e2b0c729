//! Perf waterfall config generator - main binary entry point

use perfgen::cli::args::{GenerateArgs, parse_generate_args};
use perfgen::io::artifacts;
use perfgen::services::generate;
use std::path::Path;
use std::process;

fn main() {
    // Initialize logger (controlled by RUST_LOG environment variable)
    // Example: RUST_LOG=debug perfgen --validate-only
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("--help" | "-h") => {
            print_help();
            return;
        }
        Some("--version" | "-v") => {
            print_version();
            return;
        }
        _ => {}
    }

    let cli_args = match parse_generate_args(&args[1..]) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Use --help for usage information");
            process::exit(2);
        }
    };

    process::exit(run(&cli_args));
}

fn run(args: &GenerateArgs) -> i32 {
    let dir = Path::new(&args.output_dir);

    let existing_fyi = match artifacts::read_existing_fyi(dir) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error: {e}");
            return 4;
        }
    };

    let generated = match generate::generate_artifacts(existing_fyi.as_deref()) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {e}");
            return match e {
                perfgen::Error::InvalidInput(_) => 2,
                perfgen::Error::Validation { .. } => 1,
                perfgen::Error::Io(_) => 4,
            };
        }
    };

    if args.validate_only {
        let stale = match artifacts::validate_artifacts(dir, &generated) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error: {e}");
                return 4;
            }
        };
        if stale.is_empty() {
            println!("All the perf config files are up-to-date. \\o/");
            return 0;
        }
        for name in &stale {
            println!("{name} is out of date.");
        }
        println!("Please run perfgen without --validate-only to update the configs.");
        return 1;
    }

    if let Err(e) = artifacts::write_artifacts(dir, &generated) {
        eprintln!("Error: Failed to write config files: {e}");
        return 4;
    }
    0
}

fn print_help() {
    println!("perfgen - Generate perf waterfall test configs and the benchmark ownership CSV");
    println!();
    println!("USAGE:");
    println!("    perfgen [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --validate-only           Diff generated output against existing files");
    println!("                              instead of writing; exit 1 if any is stale");
    println!("    --output-dir <DIR>        Directory holding the config files (default: .)");
    println!("    -h, --help                Show this help message");
    println!("    -v, --version             Show version information");
    println!();
    println!("OUTPUT FILES:");
    println!("    chromium.perf.json        Main waterfall test configuration");
    println!("    chromium.perf.fyi.json    FYI waterfall test configuration");
    println!("    benchmark.csv             Benchmark name / owner / component table");
}

fn print_version() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_DATE: &str = env!("GIT_DATE");
    const BUILD_TARGET: &str = env!("BUILD_TARGET");

    println!("perfgen {VERSION}");
    println!("Commit: {GIT_HASH} ({GIT_DATE})");
    println!("Target: {BUILD_TARGET}");

    #[cfg(debug_assertions)]
    println!("Build: debug");
    #[cfg(not(debug_assertions))]
    println!("Build: release");
}
