//! Test automation playground server.
//!
//! Run with: cargo run -- --addr 127.0.0.1:3000
//! Then open http://127.0.0.1:3000 in your browser

use std::process::ExitCode;

use clap::Parser;
use playground::{Config, init_logging, sections, start_server};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    if let Err(err) = init_logging(config.log_format) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    let router = config.apply(sections::router_config());
    match start_server(router, &config.addr).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "playground stopped");
            ExitCode::FAILURE
        }
    }
}
