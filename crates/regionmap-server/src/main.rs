//! Combined server binary: scene file server plus event relay.

use anyhow::{Result, bail};
use flexi_logger::Logger;
use log::info;
use regionmap_server::{ServerConfig, http, relay};
use std::sync::Arc;

const USAGE: &str = "Usage: regionmap-server [--http-port PORT] [--ws-port PORT] [--dir DIRECTORY]";

fn parse_args(mut args: std::env::Args) -> Result<ServerConfig> {
    let mut config = ServerConfig::default();
    args.next(); // program name
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--http-port" => {
                let Some(value) = args.next() else {
                    bail!("--http-port requires a value\n{USAGE}");
                };
                config.http_port = value.parse()?;
            }
            "--ws-port" => {
                let Some(value) = args.next() else {
                    bail!("--ws-port requires a value\n{USAGE}");
                };
                config.ws_port = value.parse()?;
            }
            "--dir" => {
                let Some(value) = args.next() else {
                    bail!("--dir requires a value\n{USAGE}");
                };
                config.directory = value.into();
            }
            other => bail!("unknown argument {other:?}\n{USAGE}"),
        }
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let _logger = Logger::try_with_env_or_str("info")?.start()?;

    let config = parse_args(std::env::args())?;
    info!("HTTP  http://localhost:{}", config.http_port);
    info!("WS    ws://localhost:{}", config.ws_port);
    info!("Serving {}", config.directory.display());

    let ws_port = config.ws_port;
    let config = Arc::new(config);
    tokio::try_join!(http::serve(config), relay::serve(ws_port))?;
    Ok(())
}
