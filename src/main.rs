use std::path::PathBuf;

use clap::Parser;
use simplelog::{ColorChoice, Config as LogConfig, LevelFilter, TermLogger, TerminalMode};

mod config;
mod http_server;
mod state;

use config::Config;
use state::State;

#[derive(Parser, Debug)]
#[command(name = "bili-live-proxy", about = "Bilibili / Douyin live info proxy")]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Override the configured bind address
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    TermLogger::init(
        LevelFilter::Info,
        LogConfig::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .expect("failed to initialize logger");

    let mut config = Config::load(args.config.as_deref());
    if let Some(bind) = args.bind {
        config.bind = bind;
    }

    let state = match State::new(config) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Failed to build HTTP client: {e}");
            return;
        }
    };

    http_server::start_api_server(state).await;
}
