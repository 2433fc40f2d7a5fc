use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;

use grabcore::resolve::SaveType;
use grabcore::Resolver;
use reelgrab::cli::{Cli, Commands};
use reelgrab::handlers::{process_request, DownloadRequest};
use reelgrab::server::start_server;

/// Main entry point for the resolution service.
///
/// # Errors
/// Returns an error if initialization fails (logging, socket bind) or a
/// one-shot resolve does not succeed.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Log panics with their location instead of dying silently in a task.
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    // Load environment variables from .env if present
    let _ = dotenv();

    pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    match cli.command {
        Some(Commands::Resolve { url, save_type }) => run_resolve(&url, save_type.into()).await,
        Some(Commands::Serve { port }) => run_serve(port).await,
        None => run_serve(None).await,
    }
}

async fn run_serve(cli_port: Option<u16>) -> Result<()> {
    let port = cli_port
        .or_else(|| std::env::var("WEB_PORT").ok().and_then(|p| p.parse().ok()))
        .unwrap_or(3000);

    let resolver = Arc::new(Resolver::new());
    start_server(port, resolver)
        .await
        .map_err(|e| anyhow::anyhow!("server error: {}", e))
}

/// One-shot resolution from the command line, printed as JSON.
async fn run_resolve(url: &str, save_type: SaveType) -> Result<()> {
    let resolver = Resolver::new();
    let request = DownloadRequest {
        url: Some(url.to_string()),
        save_type,
        file_name: None,
    };

    match process_request(&resolver, request).await {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Err(err) => {
            log::error!("Resolution failed ({}): {}", err.code(), err);
            Err(anyhow::anyhow!(err))
        }
    }
}
