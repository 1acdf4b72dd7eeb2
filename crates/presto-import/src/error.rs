//! Error types for the import library.

use thiserror::Error;

/// Main error type for import operations.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Table name is not of the form `catalog.schema.table`.
    #[error("Malformed table identifier '{0}': expected catalog.schema.table")]
    MalformedIdentifier(String),

    /// Metadata or DDL lookup for the table came back empty.
    #[error("Table {0} does not exist")]
    TableNotFound(String),

    /// Column type outside the supported scalar subset.
    #[error("Unsupported column type: {0}")]
    UnsupportedColumnType(String),

    /// Column set handed to the loader is unusable.
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// Raw field does not parse as its declared column type.
    #[error("Cannot convert '{value}' to {type_name}: {reason}")]
    CoercionFailure {
        type_name: String,
        value: String,
        reason: String,
    },

    /// Input record does not line up with the table's columns.
    #[error("Record {row} has {actual} fields, table has {expected} columns")]
    FieldCountMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Could not reach the query engine.
    #[error("Connection failed: {0}")]
    ConnectionFailure(#[from] reqwest::Error),

    /// The engine rejected or failed a statement.
    #[error("Statement failed: {message}")]
    StatementFailure { message: String },

    /// Password prompt requested without a controlling terminal.
    #[error("No console from which to read password")]
    NoInteractiveTerminal,

    /// Configuration error (invalid YAML, missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited input could not be decoded
    #[error("Input file error: {0}")]
    Csv(#[from] csv::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ImportError {
    /// Create a CoercionFailure error
    pub fn coercion(
        type_name: impl Into<String>,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        ImportError::CoercionFailure {
            type_name: type_name.into(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a StatementFailure error
    pub fn statement(message: impl Into<String>) -> Self {
        ImportError::StatementFailure {
            message: message.into(),
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for import operations.
pub type Result<T> = std::result::Result<T, ImportError>;
