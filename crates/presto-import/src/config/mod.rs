//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use crate::error::Result;
use std::path::Path;

impl Config {
    /// Load configuration from a YAML file.
    ///
    /// The result is not validated: command-line overrides are usually
    /// applied first, then [`Config::validate`] is called.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }
}

impl ClientConfig {
    /// Base URL for the statement endpoint.
    pub fn base_url(&self) -> String {
        let server = self.server.trim().trim_end_matches('/');
        if server.starts_with("http://") || server.starts_with("https://") {
            server.to_string()
        } else {
            format!("http://{}", server)
        }
    }
}
