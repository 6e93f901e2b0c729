//! Echo test fixture server

use perfgen::cli::args::parse_echo_server_args;
use perfgen::services::echo;
use std::net::SocketAddr;
use std::process;

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if let Some("--help" | "-h") = args.get(1).map(String::as_str) {
        print_help();
        return;
    }

    let cli_args = match parse_echo_server_args(&args[1..]) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    };

    let addr = SocketAddr::from(([127, 0, 0, 1], cli_args.port));
    log::info!("echo fixture listening on http://{addr}/echo");

    if let Err(e) = axum::Server::bind(&addr)
        .serve(echo::router().into_make_service())
        .await
    {
        eprintln!("Error: server failed: {e}");
        process::exit(4);
    }
}

fn print_help() {
    println!("echo-server - HTTP fixture that reflects request content");
    println!();
    println!("USAGE:");
    println!("    echo-server [--port <PORT>]");
    println!();
    println!("OPTIONS:");
    println!("    --port <PORT>     Port to listen on (default: 8000)");
    println!("    -h, --help        Show this help message");
    println!();
    println!("BEHAVIOR:");
    println!("    GET/POST /echo?content=X   responds with X");
    println!("    POST /echo with a body     responds with the raw body");
    println!("    Content-Type is mirrored from the request (default: text/plain)");
}
