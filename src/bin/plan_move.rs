//! Rename planner - prints the (source, destination) pairs for the tree move

use perfgen::cli::args::parse_plan_move_args;
use perfgen::services::rewrite;
use std::path::Path;
use std::process;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if let Some("--help" | "-h") = args.get(1).map(String::as_str) {
        print_help();
        return;
    }

    let cli_args = match parse_plan_move_args(&args[1..]) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    };

    let root = cli_args.root.unwrap_or_else(|| ".".to_string());
    let pairs = match rewrite::plan_move(Path::new(&root), &cli_args.prefixes) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(match e {
                perfgen::Error::InvalidInput(_) => 2,
                _ => 4,
            });
        }
    };

    println!("Show renaming plan. It contains files not in the repository.");
    println!("<Source path> => <Destination path>");
    for (src, dest) in pairs {
        println!("{src}\t=>\t{dest}");
    }
}

fn print_help() {
    println!("plan-move - Compute destination paths for the source-tree reorganization");
    println!();
    println!("USAGE:");
    println!("    plan-move [--root <DIR>] [PREFIX...]");
    println!();
    println!("OPTIONS:");
    println!("    --root <DIR>      Tree to plan the move for (default: .)");
    println!("    PREFIX            Only plan files whose path starts with a prefix;");
    println!("                      no prefixes means the whole tree");
    println!("    -h, --help        Show this help message");
}
