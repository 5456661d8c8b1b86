//! Huddle terminal client.
//!
//! # Usage
//!
//! ```bash
//! # Connect to a local server as "alice"
//! huddle --username alice
//!
//! # Start offline and connect later with /connect <url>
//! huddle --no-connect
//! ```

use std::time::Duration;

use clap::Parser;
use huddle_cli::{DEFAULT_URL, DEFAULT_USERNAME, Runtime, RuntimeConfig, TerminalDriver};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Huddle room-chat client
#[derive(Parser, Debug)]
#[command(name = "huddle")]
#[command(about = "Terminal client for Huddle room chat")]
#[command(version)]
struct Args {
    /// Server WebSocket URL
    #[arg(short, long, default_value = DEFAULT_URL)]
    url: String,

    /// Display name for chat messages and joins
    #[arg(short = 'n', long, default_value = DEFAULT_USERNAME)]
    username: String,

    /// Do not connect at startup
    #[arg(long)]
    no_connect: bool,

    /// Connection timeout in milliseconds
    #[arg(long, default_value = "5000")]
    connect_timeout_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl From<Args> for RuntimeConfig {
    fn from(args: Args) -> Self {
        Self {
            url: args.url,
            username: args.username,
            auto_connect: !args.no_connect,
            connect_timeout: Duration::from_millis(args.connect_timeout_ms),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = RuntimeConfig::from(args);
    tracing::info!(url = %config.url, username = %config.username, "huddle starting");

    let driver = TerminalDriver::new(config.transport_config());
    Runtime::new(driver, config).run().await?;

    Ok(())
}
