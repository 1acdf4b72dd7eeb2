//! Configuration validation.

use super::Config;
use crate::error::{ImportError, Result};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    // Client validation
    if config.client.server.trim().is_empty() {
        return Err(ImportError::Config("client.server is required".into()));
    }
    if config.client.user.is_empty() {
        return Err(ImportError::Config("client.user is required".into()));
    }
    if let Some(0) = config.client.request_timeout_secs {
        return Err(ImportError::Config(
            "client.request_timeout_secs must be at least 1".into(),
        ));
    }

    // Import validation
    if config.import.table.is_empty() {
        return Err(ImportError::Config("import.table is required".into()));
    }
    config.import.target()?;

    if config.import.file.as_os_str().is_empty() {
        return Err(ImportError::Config("import.file is required".into()));
    }
    if config.import.batch_size == 0 {
        return Err(ImportError::Config(
            "import.batch_size must be at least 1".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClientConfig, ImportOptions};
    use std::path::PathBuf;

    fn valid_config() -> Config {
        Config {
            client: ClientConfig {
                user: "loader".to_string(),
                ..ClientConfig::default()
            },
            import: ImportOptions {
                table: "hive.sales.orders".to_string(),
                file: PathBuf::from("orders.csv"),
                ..ImportOptions::default()
            },
        }
    }

    #[test]
    fn test_valid_config() {
        let config = valid_config();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_missing_user() {
        let mut config = valid_config();
        config.client.user = "".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_malformed_table() {
        let mut config = valid_config();
        config.import.table = "sales.orders".to_string();
        assert!(matches!(
            validate(&config),
            Err(ImportError::MalformedIdentifier(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let mut config = valid_config();
        config.import.file = PathBuf::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_batch_size() {
        let mut config = valid_config();
        config.import.batch_size = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_client_config_debug_redacts_password() {
        let mut config = valid_config();
        config.client.password = Some("super_secret_password_123".to_string());
        let debug_output = format!("{:?}", config.client);
        assert!(
            debug_output.contains("[REDACTED]"),
            "Debug output should contain [REDACTED]"
        );
        assert!(
            !debug_output.contains("super_secret_password_123"),
            "Debug output should not contain actual password value"
        );
    }
}
