//! Structured logging setup.
//!
//! `log_level` is the level for every target that `RUST_LOG` does not name.
//! `RUST_LOG` may carry full directives such as
//! `replay_server=debug,tower_http=debug`.

use anyhow::Context;
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::ServerConfig;

/// Builds the event filter from `RUST_LOG` directives layered over the
/// configured default level.
pub fn build_filter(directives: Option<&str>, level: &str) -> anyhow::Result<EnvFilter> {
    let level: LevelFilter = level
        .parse()
        .with_context(|| format!("Invalid log level '{}'", level))?;

    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse(directives.unwrap_or_default())
        .context("Invalid RUST_LOG directives")
}

/// Installs the global subscriber.
///
/// Fails on an unknown level, malformed `RUST_LOG`, or when a subscriber is
/// already installed.
pub fn init_logging(config: &ServerConfig) -> anyhow::Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(directives.as_deref(), &config.log_level)?;

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if config.json_logs {
        // One line per request span, carrying its latency
        registry
            .with(fmt::layer().json().with_span_events(FmtSpan::CLOSE))
            .try_init()
    } else {
        registry.with(fmt::layer().compact().with_target(true)).try_init()
    };
    installed.context("Failed to install log subscriber")?;

    tracing::info!(
        level = %config.log_level,
        rust_log = directives.as_deref().unwrap_or(""),
        json = config.json_logs,
        "Logging initialized"
    );
    Ok(())
}
