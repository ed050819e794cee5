//! Replay SJK form server
//!
//! Accepts a flat JSON object of field names to values on
//! `POST /replay-sjk`, maps it onto locked text fields and fills the
//! configured PDF template with them.
//!
//! # Example
//!
//! ```ignore
//! use replay_server::{Server, ServerConfig};
//!
//! let config = ServerConfig::load()?;
//! Server::new(config).run().await?;
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod output;
pub mod server;

pub use config::{OutputMode, ServerConfig, ServerConfigBuilder};
pub use error::ApiError;
pub use logging::{build_filter, init_logging};
pub use server::{router, AppState, Server};
