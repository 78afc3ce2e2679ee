//! Server configuration.
//!
//! Sources, lowest precedence first: built-in defaults, the TOML file at
//! ~/.config/rsvp/config.toml (or an explicit path), then `RSVP_*`
//! environment variables.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{RsvpError, RsvpResult};

static DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 4096;
const DEFAULT_RESYNC_INTERVAL_SECS: u64 = 30;

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_resync_interval_secs() -> u64 {
    DEFAULT_RESYNC_INTERVAL_SECS
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// TOML file of `[[events]]` replacing the built-in catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,

    /// How often cached RSVP counts are recomputed from the ledger (0 = never)
    #[serde(default = "default_resync_interval_secs")]
    pub resync_interval_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
            catalog_path: None,
            resync_interval_secs: default_resync_interval_secs(),
        }
    }
}

impl ServerConfig {
    pub fn config_path() -> RsvpResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| RsvpError::Config("Could not determine config directory".into()))?
            .join("rsvp");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration, writing a commented default file first if the
    /// default location has none.
    pub fn load(path: Option<&Path>) -> RsvpResult<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let p = Self::config_path()?;
                if !p.exists() {
                    Self::create_default_config(&p)?;
                }
                p
            }
        };

        Self::from_sources(&config_path)
    }

    fn from_sources(config_path: &Path) -> RsvpResult<Self> {
        Self::from_file_and_env(config_path, Self::environment())
    }

    fn environment() -> Environment {
        Environment::with_prefix("RSVP").try_parsing(true)
    }

    fn from_file_and_env(config_path: &Path, env: Environment) -> RsvpResult<Self> {
        Config::builder()
            .add_source(File::from(config_path.to_path_buf()).required(false))
            .add_source(env)
            .build()
            .map_err(|e| RsvpError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| RsvpError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> RsvpResult<()> {
        let contents = format!(
            "\
# rsvp-server configuration

# Address to listen on:
# host = \"{}\"
# port = {}

# Replace the built-in event lineup with a TOML file of [[events]]:
# catalog_path = \"~/.config/rsvp/catalog.toml\"

# Seconds between RSVP count resyncs (0 disables):
# resync_interval_secs = {}
",
            DEFAULT_HOST, DEFAULT_PORT, DEFAULT_RESYNC_INTERVAL_SECS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                RsvpError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| RsvpError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn bind_addr(&self) -> RsvpResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| RsvpError::Config(format!("Invalid listen address '{}': {e}", self.host)))
    }

    /// Catalog file path with `~` expanded.
    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog_path.as_ref().map(|p| {
            PathBuf::from(shellexpand::tilde(&p.to_string_lossy()).into_owned())
        })
    }

    pub fn resync_interval(&self) -> Option<Duration> {
        match self.resync_interval_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}
