//! Textveil: PII detection and offset-safe redaction server.

use std::path::Path;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    // Handle CLI subcommands
    if args.len() > 1 {
        match args[1].as_str() {
            "--redact" | "redact" => {
                if args.len() < 4 {
                    eprintln!("Usage: textveil redact <input> <output>");
                    std::process::exit(1);
                }
                let report = cli::run_redact(Path::new(&args[2]), Path::new(&args[3]));
                cli::print_report(&report);
                std::process::exit(if report.errors.is_empty() { 0 } else { 1 });
            }
            "--help" | "-h" | "help" => {
                println!("Textveil: PII detection and redaction");
                println!();
                println!("Usage: textveil [command]");
                println!();
                println!("Commands:");
                println!("  (none)                   Start the server");
                println!("  redact <input> <output>  Redact a text file or directory tree");
                println!("  help                     Show this help message");
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'textveil help' for usage.", args[1]);
                std::process::exit(1);
            }
        }
    }

    // Normal server startup
    let config = textveil_core::TextveilConfig::from_env();
    let port = config.port;

    // Initialize recognizer (ONNX if available, otherwise heuristics)
    let recognizer = textveil_recognize::create_recognizer(&config.model_dir);

    // Build application state
    let state = Arc::new(AppState::new(config, recognizer));

    // Build router
    let app = routes::build_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Textveil server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
