//! Configuration loading
//!
//! Embedded defaults, then `config/local.toml` if present, then `TABLESIDE_*` environment
//! variables (`TABLESIDE_SERVER__PORT=9000`).

use crate::model::{MenuItemCreate, Table};
use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::time::Duration;

/// Embedded default configuration (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub relay: RelayConfig,
    pub admin: AdminConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub tables: Vec<Table>,
    /// Menu items created at startup.
    #[serde(default)]
    pub menu: Vec<MenuItemCreate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    /// Mailbox capacity of every actor.
    pub mailbox_size: usize,
    /// Frames queued per channel before a slow peer starts missing events.
    pub channel_buffer: usize,
    #[serde(default)]
    pub token_ttl_secs: Option<u64>,
}

impl RelayConfig {
    pub fn token_ttl(&self) -> Option<Duration> {
        self.token_ttl_secs.map(Duration::from_secs)
    }
}

/// Staff credentials checked by HTTP Basic auth.
#[derive(Clone, Deserialize)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Used when `RUST_LOG` is unset.
    pub filter: String,
}

/// Load configuration from files and environment
pub fn load_config() -> Result<AppConfig> {
    let config = Config::builder()
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        .add_source(File::with_name("config/local").required(false))
        .add_source(
            Environment::with_prefix("TABLESIDE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("server.allowed_origins"),
        )
        .build()
        .context("Failed to build configuration")?;

    config
        .try_deserialize()
        .context("Failed to deserialize configuration")
}

/// The embedded defaults alone.
pub fn default_config() -> Result<AppConfig> {
    Config::builder()
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        .build()
        .context("Failed to build configuration")?
        .try_deserialize()
        .context("Failed to deserialize configuration")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_defaults_parse() {
        let config = default_config().unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.allowed_origins.len(), 2);
        assert_eq!(config.relay.token_ttl(), None);
        assert!(config.tables.iter().any(|t| t.slug == "table-1"));
        assert!(config.menu.iter().all(|item| item.available));
        let burger = config
            .menu
            .iter()
            .find(|item| item.name == "Cheeseburger")
            .unwrap();
        assert_eq!(burger.options.len(), 2);
    }

    #[test]
    fn admin_password_is_not_logged() {
        let config = default_config().unwrap();
        let printed = format!("{:?}", config.admin);
        assert!(printed.contains("admin"));
        assert!(!printed.contains(&config.admin.password));
    }
}
