//! Server configuration.
//!
//! Configuration is loaded from (in order of precedence):
//! 1. Environment variables (`REPLAY_SJK_*`, e.g. `REPLAY_SJK_PORT=9000`)
//! 2. Default values
//!
//! With nothing set the server listens on `0.0.0.0:8080`, reads
//! `template_replay_form_sjk.pdf` and writes `filled_form.pdf`.

use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::path::PathBuf;

use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "REPLAY_SJK_";

/// Where filled documents are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// Every request replaces `output_path`.
    #[default]
    Fixed,
    /// Every request writes a new uniquely named file under `output_dir`.
    PerRequest,
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Fillable PDF template.
    pub template_path: PathBuf,
    /// Output file for [`OutputMode::Fixed`].
    pub output_path: PathBuf,
    /// Output handling.
    pub output_mode: OutputMode,
    /// Output directory for [`OutputMode::PerRequest`].
    pub output_dir: PathBuf,
    /// Default log level (`trace` to `error`, or `off`). `RUST_LOG`
    /// directives refine it per target.
    pub log_level: String,
    /// Emit logs as JSON.
    pub json_logs: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            template_path: PathBuf::from("template_replay_form_sjk.pdf"),
            output_path: PathBuf::from("filled_form.pdf"),
            output_mode: OutputMode::Fixed,
            output_dir: PathBuf::from("."),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl ServerConfig {
    /// Loads configuration from defaults and the environment.
    pub fn load() -> Result<Self, figment::Error> {
        Self::from_figment(
            Figment::new()
                .merge(Serialized::defaults(Self::default()))
                .merge(Env::prefixed(ENV_PREFIX)),
        )
    }

    /// Extracts configuration from an arbitrary figment.
    pub fn from_figment(figment: Figment) -> Result<Self, figment::Error> {
        figment.extract()
    }

    /// Creates a new config builder starting from the defaults.
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Socket address to bind.
    pub fn addr(&self) -> Result<SocketAddr, AddrParseError> {
        let ip: IpAddr = self.host.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Builder for ServerConfig.
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    /// Sets the bind host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Sets the listen port.
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Sets the template path.
    pub fn template_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.template_path = path.into();
        self
    }

    /// Sets the fixed output path.
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_path = path.into();
        self
    }

    /// Sets the output mode.
    pub fn output_mode(mut self, mode: OutputMode) -> Self {
        self.config.output_mode = mode;
        self
    }

    /// Sets the per-request output directory.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    /// Sets the default log level.
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.log_level = level.into();
        self
    }

    /// Sets JSON log output.
    pub fn json_logs(mut self, enabled: bool) -> Self {
        self.config.json_logs = enabled;
        self
    }

    /// Builds the server config.
    pub fn build(self) -> ServerConfig {
        self.config
    }
}
