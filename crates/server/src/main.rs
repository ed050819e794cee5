//! Replay SJK form server binary.

use anyhow::Context;
use replay_server::{init_logging, Server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::load().context("Failed to load configuration")?;
    init_logging(&config)?;

    Server::new(config).run().await
}
