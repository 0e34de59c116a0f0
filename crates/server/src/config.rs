//! HTTP host settings.
//!
//! Read from an optional `server.{toml,yaml,json}` file in the working
//! directory, then `NOTELENS_SERVER__*` environment variables, e.g.
//! `NOTELENS_SERVER__PORT=9000`. Provider credentials are not part of this
//! struct; they come from the notelens YAML named by `notelens_config` and
//! from `OPENAI_*` variables.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Key installed when none is configured, so a local run works out of the box.
pub const DEMO_API_KEY: &str = "demo-key-12345";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,

    /// Whole-request budget. Keep it above twice the completion timeout,
    /// since a summary may spend two provider attempts before going local.
    pub timeout_secs: u64,

    pub max_body_size_mb: usize,

    /// Requests per key per rolling minute.
    pub rate_limit_per_minute: u32,

    pub api_keys: HashSet<String>,
    pub enable_cors: bool,

    /// `tracing_subscriber` filter directive, e.g. `info,semantic=debug`.
    pub log_level: String,

    /// Path of the notelens YAML. `None` runs with defaults and env only.
    pub notelens_config: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: 8080,
            timeout_secs: 90,
            max_body_size_mb: 10,
            rate_limit_per_minute: 100,
            api_keys: HashSet::new(),
            enable_cors: true,
            log_level: "info".to_string(),
            notelens_config: None,
        }
    }
}

impl ServerConfig {
    /// Builds the config from file and environment, then validates it.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg: ServerConfig = config::Config::builder()
            .add_source(config::File::with_name("server").required(false))
            .add_source(config::Environment::with_prefix("NOTELENS_SERVER").separator("__"))
            .build()?
            .try_deserialize()?;

        if cfg.api_keys.is_empty() {
            tracing::warn!(key = DEMO_API_KEY, "no API keys configured, using the demo key");
            cfg.api_keys.insert(DEMO_API_KEY.to_string());
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.timeout_secs > 0, "timeout_secs must be > 0");
        anyhow::ensure!(self.max_body_size_mb > 0, "max_body_size_mb must be > 0");
        anyhow::ensure!(
            self.rate_limit_per_minute > 0,
            "rate_limit_per_minute must be > 0"
        );
        self.socket_addr()?;
        Ok(())
    }

    /// Provider and summarizer settings: the YAML file when one is
    /// configured, then `OPENAI_*` fallbacks from the environment.
    pub fn notelens(&self) -> anyhow::Result<notelens::NotelensConfig> {
        let mut cfg = match &self.notelens_config {
            Some(path) => notelens::NotelensConfig::from_file(path)?,
            None => notelens::NotelensConfig::default(),
        };
        cfg.apply_env();
        Ok(cfg)
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.bind_addr, self.port).parse()?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Body limit in bytes.
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }
}
