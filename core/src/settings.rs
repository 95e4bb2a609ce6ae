//! Client configuration, read from an optional TOML file and `ISBASI_*`
//! environment variables (the environment wins).
//!
//! See `isbasi.example.toml` at the repository root for the available keys.

use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;
use crate::session::{DEFAULT_BASE_URL, DEFAULT_LANGUAGE};

const DEFAULT_CONFIG_PATH: &str = "isbasi.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub language: String,
    /// Round-trip deadline in seconds; unset means no deadline.
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load from `path` if it exists, then apply `ISBASI_*` overrides.
    pub fn load_from(path: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("ISBASI"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
