//! Multiplayer Arabic word-game server using an async actor model.
//!
//! Each room runs as its own actor task owned by a process-wide registry;
//! this binary wires the registry to an HTTP/WebSocket API.

use std::sync::Arc;

use anyhow::Error;
use ctrlc::set_handler;
use harf::{Dictionary, RoomRegistry};
use harf_server::{api, config::ServerConfig};
use log::info;
use pico_args::Arguments;
use tokio::time::Duration;

const HELP: &str = "\
Run a multiplayer word-game server

USAGE:
  harf_server [OPTIONS]

OPTIONS:
  --bind          IP:PORT   Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:4000]
  --center-words  PATH      Center word list            [default: env CENTER_WORDS_PATH or data/center_words.txt]
  --valid-words   PATH      Validity word list          [default: env VALID_WORDS_PATH or data/valid_words.txt]

FLAGS:
  -h, --help                Print help information

ENVIRONMENT:
  SERVER_BIND               Server bind address (e.g., 0.0.0.0:4000)
  CENTER_WORDS_PATH         Path to the center word list
  VALID_WORDS_PATH          Path to the validity word list
  SWEEP_INTERVAL_MS         Room deadline sweep period  [default: 500]
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let config = ServerConfig::from_env(
        pargs.opt_value_from_str("--bind")?,
        pargs.opt_value_from_str("--center-words")?,
        pargs.opt_value_from_str("--valid-words")?,
    )?;

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    env_logger::builder().format_target(false).init();
    info!("Starting word-game server at {}", config.bind);

    let dictionary = Dictionary::load(&config.center_words_path, &config.valid_words_path)
        .map_err(|e| anyhow::anyhow!("Failed to load word lists: {e}"))?;

    let registry = RoomRegistry::new(
        Arc::new(dictionary),
        Duration::from_millis(config.sweep_interval_ms),
    );

    let app = api::create_router(api::AppState { registry });

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {e}", config.bind))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {e}"))?;

    info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
}
