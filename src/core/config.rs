use config::{Config, Environment};
use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;

pub(crate) const DEFAULT_SECRET: &str = "SECRET_KEY";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub(crate) struct Args {
    pub(crate) log_level: String,
    pub(crate) port: u16,
    pub(crate) secret: String,
    pub(crate) verify_signature: bool,
    /// Seconds between expired-token sweeps. Unset keeps expiry lazy.
    pub(crate) token_sweep_interval: Option<u64>,
    pub(crate) rate_limit: u64,
}

impl Args {
    pub(crate) fn load() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::with_prefix("TRAVELCORE"))
    }

    /// Layers `environment` over [`Args::default`].
    fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(Config::try_from(&Args::default())?)
            .add_source(environment)
            .build()?;

        Ok(config.try_deserialize::<Args>()?)
    }
}

impl Default for Args {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            port: 5000,
            secret: DEFAULT_SECRET.into(),
            verify_signature: false,
            token_sweep_interval: None,
            rate_limit: 10,
        }
    }
}
