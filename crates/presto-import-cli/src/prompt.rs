//! Interactive password entry.

use dialoguer::Password;
use presto_import::{ImportError, PasswordProvider, Result, PASSWORD_ENV_VAR};
use std::io::IsTerminal;

/// Reads the password from `PRESTO_PASSWORD`, falling back to a prompt on
/// the controlling terminal.
pub struct ConsolePassword {
    env_value: Option<String>,
}

impl ConsolePassword {
    /// Capture the environment override at construction.
    pub fn from_env() -> Self {
        Self::new(std::env::var(PASSWORD_ENV_VAR).ok())
    }

    pub fn new(env_value: Option<String>) -> Self {
        Self { env_value }
    }
}

impl PasswordProvider for ConsolePassword {
    fn password(&self, user: &str) -> Result<Option<String>> {
        if user.is_empty() {
            return Err(ImportError::Config(
                "Username must be specified along with password".to_string(),
            ));
        }
        if let Some(password) = &self.env_value {
            return Ok(Some(password.clone()));
        }
        if !std::io::stdin().is_terminal() {
            return Err(ImportError::NoInteractiveTerminal);
        }

        let password = Password::new()
            .with_prompt("Password")
            .allow_empty_password(true)
            .interact()
            .map_err(|e| ImportError::Config(format!("Failed to read password: {}", e)))?;
        Ok(Some(password))
    }
}
