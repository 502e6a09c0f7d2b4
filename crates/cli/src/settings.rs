//! Resolver configuration: optional TOML file, then `XCB_*` environment
//! variables, then command-line flags.

use anyhow::{Context, Result};
use config::{Config, Environment, File as ConfigFile};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use xcb_types::Address;

fn default_provider() -> String {
    "http://127.0.0.1:8545".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResolverConfig {
    /// JSON-RPC endpoint of a Core node
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Registry contract address
    #[serde(default)]
    pub registry_address: Option<String>,
    /// Identity lookups are made as
    #[serde(default)]
    pub caller: Option<String>,
    /// Upper bound for a single lookup
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            registry_address: None,
            caller: None,
            timeout_secs: default_timeout_secs(),
            log_level: default_log_level(),
        }
    }
}

/// Values given on the command line; `None` keeps the loaded value.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub provider: Option<String>,
    pub registry_address: Option<String>,
    pub caller: Option<String>,
    pub timeout_secs: Option<u64>,
    pub log_level: Option<String>,
}

impl ResolverConfig {
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            if !path.exists() {
                anyhow::bail!(
                    "Configuration file {} not found (specified via --config)",
                    path.display()
                );
            }
            builder = builder.add_source(ConfigFile::from(path));
        }

        builder = builder.add_source(Environment::with_prefix("XCB"));

        builder
            .build()?
            .try_deserialize()
            .context("invalid resolver configuration")
    }

    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(provider) = overrides.provider {
            self.provider = provider;
        }
        if let Some(registry_address) = overrides.registry_address {
            self.registry_address = Some(registry_address);
        }
        if let Some(caller) = overrides.caller {
            self.caller = Some(caller);
        }
        if let Some(timeout_secs) = overrides.timeout_secs {
            self.timeout_secs = timeout_secs;
        }
        if let Some(log_level) = overrides.log_level {
            self.log_level = log_level;
        }
    }

    pub fn registry_address(&self) -> Result<Address> {
        let value = self
            .registry_address
            .as_deref()
            .context("registry address is not configured (--registry or REGISTRY_ADDRESS)")?;
        value
            .parse()
            .with_context(|| format!("cannot parse registry address {value}"))
    }

    pub fn caller(&self) -> Result<Address> {
        let value = self
            .caller
            .as_deref()
            .context("caller address is not configured (--caller or XCB_CALLER)")?;
        value
            .parse()
            .with_context(|| format!("cannot parse caller address {value}"))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
