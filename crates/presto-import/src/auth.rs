//! Credential providers for session construction.
//!
//! The session never reads the environment or the console itself; callers
//! pass a provider.

use crate::error::Result;

/// Environment variable that overrides the interactive password prompt.
pub const PASSWORD_ENV_VAR: &str = "PRESTO_PASSWORD";

/// Supplies the password for a user, if any.
pub trait PasswordProvider {
    /// Return the password to authenticate `user` with, or `None` to connect
    /// without one.
    fn password(&self, user: &str) -> Result<Option<String>>;
}

/// Connect without a password.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPassword;

impl PasswordProvider for NoPassword {
    fn password(&self, _user: &str) -> Result<Option<String>> {
        Ok(None)
    }
}

/// A password known up front (configuration file, tests).
#[derive(Clone)]
pub struct StaticPassword(String);

impl StaticPassword {
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }
}

impl std::fmt::Debug for StaticPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticPassword([REDACTED])")
    }
}

impl PasswordProvider for StaticPassword {
    fn password(&self, _user: &str) -> Result<Option<String>> {
        Ok(Some(self.0.clone()))
    }
}
