//! Service configuration

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

/// Service configuration, read from `PM_*` environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Instance name attached to every structured log event
    #[serde(default = "default_instance_name")]
    pub instance_name: String,

    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Seed every request's generator from this value for reproducible output
    #[serde(default)]
    pub rng_seed: Option<u64>,

    #[serde(default = "default_rate_limit_max_requests")]
    pub rate_limit_max_requests: usize,

    #[serde(default = "default_rate_limit_window_secs")]
    pub rate_limit_window_secs: u64,

    /// Year ages are computed against; current UTC year when unset
    #[serde(default)]
    pub reference_year: Option<i32>,
}

fn default_instance_name() -> String {
    std::env::var("HOSTNAME").unwrap_or_else(|_| "unknown".to_string())
}

fn default_api_port() -> u16 {
    8080
}

fn default_rate_limit_max_requests() -> usize {
    20
}

fn default_rate_limit_window_secs() -> u64 {
    600
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            instance_name: default_instance_name(),
            api_port: default_api_port(),
            rng_seed: None,
            rate_limit_max_requests: default_rate_limit_max_requests(),
            rate_limit_window_secs: default_rate_limit_window_secs(),
            reference_year: None,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from the environment
    pub fn load() -> Result<Self> {
        let source = config::Config::builder()
            .add_source(config::Environment::with_prefix("PM").try_parsing(true))
            .build()
            .context("Failed to read PM_* environment")?;
        Self::from_config(source)
    }

    pub fn from_config(source: config::Config) -> Result<Self> {
        let config: Self = source
            .try_deserialize()
            .context("Invalid service configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.rate_limit_max_requests > 0,
            "rate_limit_max_requests must be positive"
        );
        anyhow::ensure!(
            self.rate_limit_window_secs > 0,
            "rate_limit_window_secs must be positive"
        );
        Ok(())
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }
}
